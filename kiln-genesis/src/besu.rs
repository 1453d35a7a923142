//! Hyperledger Besu genesis document.

use kiln_types::{ClientKind, Consensus, Genesis};

use crate::consensus::encode;
use crate::document::{check_consensus, to_json, EthGenesis};
use crate::error::GenesisError;
use crate::GenesisFormat;

/// Build the Besu genesis document for `genesis` under `consensus`.
pub fn build(genesis: &Genesis, consensus: Consensus) -> Result<Vec<u8>, GenesisError> {
    check_consensus(genesis, consensus)?;
    let encoded = encode(genesis)?;
    let document = EthGenesis::assemble(genesis, &encoded, encoded.engine.clone())?;
    let bytes = to_json(&document)?;

    tracing::debug!(
        client = %ClientKind::Besu,
        consensus = %consensus,
        chain_id = genesis.chain_id,
        accounts = document.alloc.len(),
        "built genesis document"
    );
    Ok(bytes)
}

/// Besu genesis format.
#[derive(Debug, Clone, Copy, Default)]
pub struct BesuGenesis;

impl GenesisFormat for BesuGenesis {
    fn client(&self) -> ClientKind {
        ClientKind::Besu
    }

    fn build(&self, genesis: &Genesis, consensus: Consensus) -> Result<Vec<u8>, GenesisError> {
        build(genesis, consensus)
    }
}
