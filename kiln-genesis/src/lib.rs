//! Client-specific genesis documents.
//!
//! Each supported client reads its own genesis dialect. All of them embed the
//! same consensus encoding from [`consensus`].

pub mod besu;
pub mod consensus;
pub mod document;
pub mod error;
pub mod geth;
pub mod parity;

use kiln_types::{ClientKind, Consensus, Genesis, NetworkSpec};

pub use besu::BesuGenesis;
pub use error::GenesisError;
pub use geth::GethGenesis;
pub use parity::ParityChainSpec;

/// A client's genesis dialect.
pub trait GenesisFormat: Sync {
    /// Client this format is read by.
    fn client(&self) -> ClientKind;

    /// Render `genesis` as the client's JSON genesis document.
    ///
    /// Fails without output when any address is malformed, the engine does
    /// not match `consensus`, or the client lacks the consensus algorithm.
    fn build(&self, genesis: &Genesis, consensus: Consensus) -> Result<Vec<u8>, GenesisError>;
}

/// Genesis format of a client.
pub fn genesis_for(client: ClientKind) -> &'static dyn GenesisFormat {
    match client {
        ClientKind::Besu => &BesuGenesis,
        ClientKind::Geth => &GethGenesis,
        ClientKind::Parity => &ParityChainSpec,
    }
}

/// Render the genesis of a custom network for `client`.
pub fn build_network(client: ClientKind, network: &NetworkSpec) -> Result<Vec<u8>, GenesisError> {
    let genesis = network.genesis.as_ref().ok_or(GenesisError::MissingGenesis)?;
    genesis_for(client).build(genesis, network.consensus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_types::ConsensusParams;

    fn clique_network() -> NetworkSpec {
        NetworkSpec::custom(Genesis {
            chain_id: 99,
            engine: ConsensusParams::Clique {
                block_period: 2,
                epoch_length: 100,
                signers: vec![format!("0x{}", "5".repeat(40))],
            },
            ..Genesis::default()
        })
    }

    #[test]
    fn test_genesis_for_matches_client() {
        for client in ClientKind::ALL {
            assert_eq!(genesis_for(client).client(), client);
        }
    }

    #[test]
    fn test_every_client_renders_clique() {
        let network = clique_network();
        for client in ClientKind::ALL {
            let bytes = build_network(client, &network).unwrap();
            let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert!(doc.is_object(), "{client} produced non-object");
        }
    }

    #[test]
    fn test_joined_network_has_no_genesis() {
        let network = NetworkSpec::join("goerli", Consensus::ProofOfAuthority);
        assert_eq!(
            build_network(ClientKind::Besu, &network).unwrap_err(),
            GenesisError::MissingGenesis
        );
    }

    #[test]
    fn test_ibft2_only_on_besu() {
        let network = NetworkSpec::custom(Genesis {
            engine: ConsensusParams::ibft2(vec![format!("0x{}", "6".repeat(40))]),
            ..Genesis::default()
        });
        assert!(build_network(ClientKind::Besu, &network).is_ok());
        assert!(build_network(ClientKind::Geth, &network).is_err());
        assert!(build_network(ClientKind::Parity, &network).is_err());
    }
}
