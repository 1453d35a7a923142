use thiserror::Error;

/// Errors surfaced by the `kiln` binary.
#[derive(Debug, Error)]
#[allow(clippy::enum_variant_names)]
pub enum CliError {
    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error("genesis error: {0}")]
    GenesisError(#[from] kiln_genesis::GenesisError),

    #[error("output error: {reason}")]
    OutputError { reason: String },

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::ConfigError {
            reason: "missing field `network`".to_string(),
        };
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_genesis_error_from() {
        let err: CliError = kiln_genesis::GenesisError::MissingGenesis.into();
        assert!(matches!(err, CliError::GenesisError(_)));
        assert_eq!(err.to_string(), "genesis error: network has no custom genesis");
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CliError = io_err.into();
        assert!(matches!(err, CliError::IoError(_)));
    }
}
