use std::fmt;

use serde::{Deserialize, Serialize};

use crate::genesis::Genesis;

/// Consensus algorithm of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Consensus {
    #[serde(rename = "pow")]
    ProofOfWork,
    #[serde(rename = "poa")]
    ProofOfAuthority,
    #[serde(rename = "ibft2")]
    IstanbulBft,
}

impl Consensus {
    /// Short lowercase identifier (for CLI/config).
    pub fn as_str(&self) -> &'static str {
        match self {
            Consensus::ProofOfWork => "pow",
            Consensus::ProofOfAuthority => "poa",
            Consensus::IstanbulBft => "ibft2",
        }
    }
}

impl fmt::Display for Consensus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of a chain, either a well-known network or a custom genesis.
///
/// Exclusivity of `network_name` and `genesis` is validated by whoever builds
/// this value; translation checks each independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Network id passed to the client. Zero means "not set".
    #[serde(default)]
    pub chain_id: u64,
    /// Well-known network to join instead of a custom genesis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_name: Option<String>,
    pub consensus: Consensus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genesis: Option<Genesis>,
}

impl NetworkSpec {
    /// A network joining a well-known public chain.
    pub fn join(name: impl Into<String>, consensus: Consensus) -> Self {
        Self {
            chain_id: 0,
            network_name: Some(name.into()),
            consensus,
            genesis: None,
        }
    }

    /// A private network bootstrapped from a custom genesis.
    pub fn custom(genesis: Genesis) -> Self {
        Self {
            chain_id: genesis.chain_id,
            network_name: None,
            consensus: genesis.engine.consensus(),
            genesis: Some(genesis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genesis::ConsensusParams;

    #[test]
    fn test_consensus_display_matches_serde() {
        for c in [
            Consensus::ProofOfWork,
            Consensus::ProofOfAuthority,
            Consensus::IstanbulBft,
        ] {
            let json = format!("\"{c}\"");
            assert_eq!(serde_json::from_str::<Consensus>(&json).unwrap(), c);
        }
        assert!(serde_json::from_str::<Consensus>("\"pos\"").is_err());
    }

    #[test]
    fn test_consensus_serde_names_match_as_str() {
        let json = serde_json::to_string(&Consensus::IstanbulBft).unwrap();
        assert_eq!(json, "\"ibft2\"");
    }

    #[test]
    fn test_custom_network_takes_chain_id_and_consensus_from_genesis() {
        let genesis = Genesis {
            chain_id: 4_242,
            engine: ConsensusParams::Ethash {
                fixed_difficulty: None,
            },
            ..Genesis::default()
        };
        let network = NetworkSpec::custom(genesis);
        assert_eq!(network.chain_id, 4_242);
        assert_eq!(network.consensus, Consensus::ProofOfWork);
        assert!(network.network_name.is_none());
    }

    #[test]
    fn test_join_network_has_no_genesis() {
        let network = NetworkSpec::join("goerli", Consensus::ProofOfAuthority);
        assert_eq!(network.network_name.as_deref(), Some("goerli"));
        assert!(network.genesis.is_none());
        assert_eq!(network.chain_id, 0);
    }
}
