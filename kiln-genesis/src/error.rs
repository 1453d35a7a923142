use kiln_types::error::ParseError;
use kiln_types::{ClientKind, Consensus};
use thiserror::Error;

/// Errors that can occur while building a genesis document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisError {
    #[error("invalid address {field}[{index}] '{value}': {reason}")]
    InvalidAddress {
        field: &'static str,
        index: usize,
        value: String,
        reason: ParseError,
    },

    #[error("duplicate account {address} at accounts[{index}]")]
    DuplicateAccount { address: String, index: usize },

    #[error("consensus mismatch: network uses {declared}, genesis configures {configured}")]
    ConsensusMismatch {
        declared: Consensus,
        configured: Consensus,
    },

    #[error("{client} does not support {consensus} consensus")]
    UnsupportedConsensus {
        client: ClientKind,
        consensus: Consensus,
    },

    #[error("network has no custom genesis")]
    MissingGenesis,

    #[error("serialization error: {reason}")]
    SerializationError { reason: String },
}
