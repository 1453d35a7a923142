use serde::{Deserialize, Serialize};
use std::path::Path;

use kiln_types::{
    Account, Api, ApiServer, ClientKind, ConsensusParams, Forks, Genesis, NetworkSpec, NodeSpec,
    Verbosity,
};

use crate::error::CliError;

/// Name of the configuration file written by `kiln init`.
pub const CONFIG_FILE: &str = "kiln.toml";

/// Signer and funded account of the default development chain.
const DEV_ACCOUNT: &str = "0xd2c21213027cbf4d46c16b55fa98e5252b048706";

/// 1000 ether in wei.
const DEV_BALANCE: &str = "0x3635c9adc5dea00000";

const DEV_CHAIN_ID: u64 = 1337;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KilnConfig {
    pub network: NetworkSpec,
    #[serde(default)]
    pub node: NodeSpec,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for KilnConfig {
    fn default() -> Self {
        let genesis = Genesis {
            chain_id: DEV_CHAIN_ID,
            forks: Forks::all_at_genesis(),
            engine: ConsensusParams::Clique {
                block_period: 5,
                epoch_length: kiln_types::constants::DEFAULT_EPOCH_LENGTH,
                signers: vec![DEV_ACCOUNT.to_string()],
            },
            accounts: vec![Account::funded(DEV_ACCOUNT, DEV_BALANCE)],
            ..Genesis::default()
        };
        Self {
            network: NetworkSpec::custom(genesis),
            node: NodeSpec {
                client: ClientKind::Besu,
                nodekey: true,
                p2p_port: Some(30303),
                rpc: ApiServer {
                    enabled: true,
                    port: Some(8545),
                    host: Some("0.0.0.0".to_string()),
                    apis: vec![Api::Eth, Api::Net, Api::Web3, Api::Clique],
                },
                hosts: vec!["*".to_string()],
                cors_domains: vec!["*".to_string()],
                logging: Some(Verbosity::Info),
                ..NodeSpec::default()
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl KilnConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path).map_err(|e| CliError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path, e),
        })?;
        let config: KilnConfig = toml::from_str(&contents).map_err(|e| CliError::ConfigError {
            reason: format!("failed to parse config file '{}': {}", path, e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Initialize a default configuration file in the given directory.
    pub fn init(dir: &str) -> Result<(), CliError> {
        let dir_path = Path::new(dir);
        if !dir_path.exists() {
            std::fs::create_dir_all(dir_path)?;
        }

        let config = KilnConfig::default();
        let toml_str = toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
            reason: format!("failed to serialize default config: {}", e),
        })?;

        let config_path = dir_path.join(CONFIG_FILE);
        std::fs::write(&config_path, toml_str)?;

        Ok(())
    }

    /// A network either joins a predefined chain or carries its own genesis.
    pub fn validate(&self) -> Result<(), CliError> {
        match (&self.network.network_name, &self.network.genesis) {
            (Some(name), Some(_)) => Err(CliError::ConfigError {
                reason: format!("network '{}' is predefined and cannot also set a genesis", name),
            }),
            (None, None) => Err(CliError::ConfigError {
                reason: "network must set either network_name or genesis".to_string(),
            }),
            _ => Ok(()),
        }
    }
}
