use thiserror::Error;

/// Errors produced when parsing fixed-width hex identifiers (addresses, hashes).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing 0x prefix")]
    MissingPrefix,

    #[error("invalid length: expected {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid hex character {character:?} at position {index}")]
    InvalidCharacter { character: char, index: usize },
}
