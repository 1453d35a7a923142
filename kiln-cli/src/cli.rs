use clap::{Parser, Subcommand};

use kiln_types::ClientKind;

use crate::config::KilnConfig;
use crate::error::CliError;

#[derive(Parser)]
#[command(
    name = "kiln",
    about = "Kiln: render Ethereum client arguments and genesis files",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write a default configuration (Besu node on a Clique dev chain)
    Init {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: String,
    },
    /// Render the genesis file of the configured network
    Genesis {
        /// Path to config file
        #[arg(short, long, default_value = "kiln.toml")]
        config: String,
        /// Client to render for (besu, geth, parity); defaults to the node's client
        #[arg(long, value_parser = parse_client)]
        client: Option<ClientKind>,
        /// Output path for the genesis file
        #[arg(short, long, default_value = "genesis.json")]
        output: String,
    },
    /// Print the client command-line arguments of the configured node
    Args {
        /// Path to config file
        #[arg(short, long, default_value = "kiln.toml")]
        config: String,
        /// Client to render for (besu, geth, parity); defaults to the node's client
        #[arg(long, value_parser = parse_client)]
        client: Option<ClientKind>,
        /// Resolved bootnode address (can be specified multiple times)
        #[arg(long = "bootnode")]
        bootnodes: Vec<String>,
        /// Print a JSON array instead of one argument per line
        #[arg(long)]
        json: bool,
    },
}

fn parse_client(s: &str) -> Result<ClientKind, String> {
    ClientKind::parse(s).ok_or_else(|| format!("unknown client '{}'", s))
}

impl Cli {
    /// Config file the command reads, if any.
    pub fn config_path(&self) -> Option<&str> {
        match &self.command {
            Command::Init { .. } => None,
            Command::Genesis { config, .. } | Command::Args { config, .. } => Some(config.as_str()),
        }
    }
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Init { dir } => {
            KilnConfig::init(&dir)?;
            tracing::info!("Kiln configuration initialized in {}", dir);
            Ok(())
        }
        Command::Genesis {
            config,
            client,
            output,
        } => {
            let config = KilnConfig::load(&config)?;
            let client = client.unwrap_or(config.node.client);
            let bytes = kiln_genesis::build_network(client, &config.network)?;
            std::fs::write(&output, &bytes)?;
            tracing::info!(
                "{} genesis for chain {} written to {}",
                client.display_name(),
                config.network.chain_id,
                output
            );
            Ok(())
        }
        Command::Args {
            config,
            client,
            bootnodes,
            json,
        } => {
            let config = KilnConfig::load(&config)?;
            let mut node = config.node;
            if let Some(client) = client {
                node.client = client;
            }

            let mut peers = node.bootnodes.clone();
            peers.extend(bootnodes);

            let args = kiln_client::client_args(&node, &config.network, &peers);
            if json {
                let out = serde_json::to_string(&args).map_err(|e| CliError::OutputError {
                    reason: e.to_string(),
                })?;
                println!("{}", out);
            } else {
                for arg in &args {
                    println!("{}", arg);
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_subcommand() {
        let cli = Cli::try_parse_from([
            "kiln",
            "args",
            "--client",
            "openethereum",
            "--bootnode",
            "enode://a@1.1.1.1:30303",
            "--bootnode",
            "enode://b@2.2.2.2:30303",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Command::Args {
                config,
                client,
                bootnodes,
                json,
            } => {
                assert_eq!(config, "kiln.toml");
                assert_eq!(client, Some(ClientKind::Parity));
                assert_eq!(bootnodes.len(), 2);
                assert!(json);
            }
            _ => panic!("expected args"),
        }
    }

    #[test]
    fn test_unknown_client_rejected() {
        assert!(Cli::try_parse_from(["kiln", "genesis", "--client", "nethermind"]).is_err());
    }

    #[test]
    fn test_config_path() {
        let cli = Cli::try_parse_from(["kiln", "genesis", "-c", "net.toml"]).unwrap();
        assert_eq!(cli.config_path(), Some("net.toml"));
        let cli = Cli::try_parse_from(["kiln", "init"]).unwrap();
        assert_eq!(cli.config_path(), None);
    }
}
