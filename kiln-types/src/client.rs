use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported Ethereum client families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    /// Hyperledger Besu.
    Besu,
    /// go-ethereum.
    Geth,
    /// OpenEthereum (formerly Parity).
    Parity,
}

impl ClientKind {
    pub const ALL: [ClientKind; 3] = [ClientKind::Besu, ClientKind::Geth, ClientKind::Parity];

    /// Short lowercase identifier (for CLI/config).
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientKind::Besu => "besu",
            ClientKind::Geth => "geth",
            ClientKind::Parity => "parity",
        }
    }

    /// Parse from a string identifier.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "besu" => Some(ClientKind::Besu),
            "geth" => Some(ClientKind::Geth),
            "parity" | "openethereum" => Some(ClientKind::Parity),
            _ => None,
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ClientKind::Besu => "Hyperledger Besu",
            ClientKind::Geth => "Go Ethereum",
            ClientKind::Parity => "OpenEthereum",
        }
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
