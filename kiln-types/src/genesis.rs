use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::network::Consensus;
use crate::primitives::{serde_quantity, Hash};

/// Custom genesis of a private network.
///
/// Addresses (coinbase, signers, validators, accounts) are kept as written by
/// the operator and validated when the genesis document is built, so that a
/// bad entry can be reported together with its position.
///
/// Header quantities accept either an integer or a `0x` hex string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genesis {
    /// Chain identifier written into the genesis `config`.
    pub chain_id: u64,
    #[serde(default, with = "serde_quantity")]
    pub nonce: u64,
    #[serde(default = "default_difficulty", with = "serde_quantity")]
    pub difficulty: u64,
    #[serde(default = "default_coinbase")]
    pub coinbase: String,
    #[serde(default)]
    pub mix_hash: Hash,
    #[serde(default = "default_gas_limit", with = "serde_quantity")]
    pub gas_limit: u64,
    /// Unix timestamp in seconds.
    #[serde(default, with = "serde_quantity")]
    pub timestamp: u64,
    #[serde(default)]
    pub forks: Forks,
    /// Consensus engine parameters; the variant must match the network's consensus.
    pub engine: ConsensusParams,
    /// Pre-funded accounts.
    #[serde(default)]
    pub accounts: Vec<Account>,
}

fn default_difficulty() -> u64 {
    DEFAULT_DIFFICULTY
}

fn default_coinbase() -> String {
    format!("0x{}", "0".repeat(40))
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

impl Default for Genesis {
    fn default() -> Self {
        Self {
            chain_id: 0,
            nonce: 0,
            difficulty: default_difficulty(),
            coinbase: default_coinbase(),
            mix_hash: Hash::ZERO,
            gas_limit: default_gas_limit(),
            timestamp: 0,
            forks: Forks::default(),
            engine: ConsensusParams::Ethash {
                fixed_difficulty: None,
            },
            accounts: Vec::new(),
        }
    }
}

/// Fork activation block numbers. `None` means "not scheduled".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forks {
    pub homestead: Option<u64>,
    pub dao: Option<u64>,
    pub eip150: Option<u64>,
    pub eip150_hash: Option<Hash>,
    pub eip155: Option<u64>,
    pub eip158: Option<u64>,
    pub byzantium: Option<u64>,
    pub constantinople: Option<u64>,
    pub petersburg: Option<u64>,
    pub istanbul: Option<u64>,
    pub muir_glacier: Option<u64>,
}

impl Forks {
    /// Every fork active from block 0.
    pub fn all_at_genesis() -> Self {
        Self {
            homestead: Some(0),
            dao: None,
            eip150: Some(0),
            eip150_hash: None,
            eip155: Some(0),
            eip158: Some(0),
            byzantium: Some(0),
            constantinople: Some(0),
            petersburg: Some(0),
            istanbul: Some(0),
            muir_glacier: Some(0),
        }
    }
}

/// Engine-specific consensus parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ConsensusParams {
    /// Proof of work.
    Ethash {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fixed_difficulty: Option<u64>,
    },
    /// Proof of authority.
    Clique {
        #[serde(default = "default_block_period")]
        block_period: u64,
        #[serde(default = "default_epoch_length")]
        epoch_length: u64,
        /// Initial signers, in rotation order.
        signers: Vec<String>,
    },
    /// Istanbul BFT 2.0.
    Ibft2 {
        #[serde(default = "default_block_period")]
        block_period: u64,
        #[serde(default = "default_epoch_length")]
        epoch_length: u64,
        #[serde(default = "default_request_timeout")]
        request_timeout: u64,
        #[serde(default = "default_message_queue_limit")]
        message_queue_limit: u64,
        #[serde(default = "default_duplicate_message_limit")]
        duplicate_message_limit: u64,
        #[serde(default = "default_future_messages_limit")]
        future_messages_limit: u64,
        #[serde(default = "default_future_messages_max_distance")]
        future_messages_max_distance: u64,
        /// Initial validators, in the order they are encoded.
        validators: Vec<String>,
    },
}

fn default_block_period() -> u64 {
    DEFAULT_BLOCK_PERIOD
}

fn default_epoch_length() -> u64 {
    DEFAULT_EPOCH_LENGTH
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_message_queue_limit() -> u64 {
    DEFAULT_MESSAGE_QUEUE_LIMIT
}

fn default_duplicate_message_limit() -> u64 {
    DEFAULT_DUPLICATE_MESSAGE_LIMIT
}

fn default_future_messages_limit() -> u64 {
    DEFAULT_FUTURE_MESSAGES_LIMIT
}

fn default_future_messages_max_distance() -> u64 {
    DEFAULT_FUTURE_MESSAGES_MAX_DISTANCE
}

impl ConsensusParams {
    /// The consensus algorithm these parameters configure.
    pub fn consensus(&self) -> Consensus {
        match self {
            ConsensusParams::Ethash { .. } => Consensus::ProofOfWork,
            ConsensusParams::Clique { .. } => Consensus::ProofOfAuthority,
            ConsensusParams::Ibft2 { .. } => Consensus::IstanbulBft,
        }
    }

    /// IBFT2 parameters with protocol defaults.
    pub fn ibft2(validators: Vec<String>) -> Self {
        ConsensusParams::Ibft2 {
            block_period: DEFAULT_BLOCK_PERIOD,
            epoch_length: DEFAULT_EPOCH_LENGTH,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            message_queue_limit: DEFAULT_MESSAGE_QUEUE_LIMIT,
            duplicate_message_limit: DEFAULT_DUPLICATE_MESSAGE_LIMIT,
            future_messages_limit: DEFAULT_FUTURE_MESSAGES_LIMIT,
            future_messages_max_distance: DEFAULT_FUTURE_MESSAGES_MAX_DISTANCE,
            validators,
        }
    }
}

/// A pre-funded account in the genesis allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: String,
    /// Balance in wei, as a hex quantity or decimal string.
    pub balance: String,
    /// Contract bytecode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Contract storage slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<BTreeMap<String, String>>,
}

impl Account {
    pub fn funded(address: impl Into<String>, balance: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            balance: balance.into(),
            code: None,
            storage: None,
        }
    }
}
