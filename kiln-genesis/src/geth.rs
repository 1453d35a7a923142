//! go-ethereum genesis document.
//!
//! Same layout as Besu's, but Clique parameters are spelled `period`/`epoch`
//! and Ethash takes no parameters. Geth has no IBFT2 engine.

use kiln_types::{ClientKind, Consensus, Genesis};
use serde::Serialize;

use crate::consensus::{encode, EngineConfig};
use crate::document::{check_consensus, to_json, EthGenesis};
use crate::error::GenesisError;
use crate::GenesisFormat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
enum GethEngine {
    #[serde(rename = "ethash")]
    Ethash {},
    #[serde(rename = "clique")]
    Clique { period: u64, epoch: u64 },
}

/// Build the geth genesis document for `genesis` under `consensus`.
pub fn build(genesis: &Genesis, consensus: Consensus) -> Result<Vec<u8>, GenesisError> {
    check_consensus(genesis, consensus)?;
    let encoded = encode(genesis)?;

    let engine = match encoded.engine {
        EngineConfig::Ethash { fixed_difficulty } => {
            if fixed_difficulty.is_some() {
                tracing::warn!("geth has no fixed difficulty setting, ignoring it");
            }
            GethEngine::Ethash {}
        }
        EngineConfig::Clique {
            block_period,
            epoch_length,
        } => GethEngine::Clique {
            period: block_period,
            epoch: epoch_length,
        },
        EngineConfig::Ibft2 { .. } => {
            return Err(GenesisError::UnsupportedConsensus {
                client: ClientKind::Geth,
                consensus,
            })
        }
    };

    let document = EthGenesis::assemble(genesis, &encoded, engine)?;
    let bytes = to_json(&document)?;

    tracing::debug!(
        client = %ClientKind::Geth,
        consensus = %consensus,
        chain_id = genesis.chain_id,
        accounts = document.alloc.len(),
        "built genesis document"
    );
    Ok(bytes)
}

/// go-ethereum genesis format.
#[derive(Debug, Clone, Copy, Default)]
pub struct GethGenesis;

impl GenesisFormat for GethGenesis {
    fn client(&self) -> ClientKind {
        ClientKind::Geth
    }

    fn build(&self, genesis: &Genesis, consensus: Consensus) -> Result<Vec<u8>, GenesisError> {
        build(genesis, consensus)
    }
}
