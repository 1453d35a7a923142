//! Pieces shared by the genesis formats: fork table, allocation, JSON output.

use std::collections::BTreeMap;

use kiln_types::primitives::serde_quantity;
use kiln_types::{Account, Address, Consensus, Forks, Genesis, Hash};
use serde::Serialize;

use crate::consensus::{parse_address, EncodedConsensus};
use crate::error::GenesisError;

/// Fork activation fields of a geth-style genesis `config`. Unscheduled forks
/// are left out of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForkBlocks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homestead_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dao_fork_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eip150_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eip150_hash: Option<Hash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eip155_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eip158_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byzantium_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constantinople_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub petersburg_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub istanbul_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muir_glacier_block: Option<u64>,
}

impl From<&Forks> for ForkBlocks {
    fn from(forks: &Forks) -> Self {
        Self {
            homestead_block: forks.homestead,
            dao_fork_block: forks.dao,
            eip150_block: forks.eip150,
            eip150_hash: forks.eip150_hash,
            eip155_block: forks.eip155,
            eip158_block: forks.eip158,
            byzantium_block: forks.byzantium,
            constantinople_block: forks.constantinople,
            petersburg_block: forks.petersburg,
            istanbul_block: forks.istanbul,
            muir_glacier_block: forks.muir_glacier,
        }
    }
}

/// Genesis `config` object: chain id, forks and the engine block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig<E: Serialize> {
    pub chain_id: u64,
    #[serde(flatten)]
    pub forks: ForkBlocks,
    #[serde(flatten)]
    pub engine: E,
}

/// A geth-style genesis document, generic over the engine block spelling.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EthGenesis<'a, E: Serialize> {
    pub config: ChainConfig<E>,
    #[serde(with = "serde_quantity")]
    pub nonce: u64,
    #[serde(with = "serde_quantity")]
    pub timestamp: u64,
    #[serde(with = "serde_quantity")]
    pub gas_limit: u64,
    #[serde(with = "serde_quantity")]
    pub difficulty: u64,
    pub coinbase: Address,
    pub mix_hash: Hash,
    pub extra_data: String,
    pub alloc: BTreeMap<Address, AllocAccount<'a>>,
}

impl<'a, E: Serialize> EthGenesis<'a, E> {
    /// Assemble the document from the genesis and its encoded consensus.
    pub fn assemble(
        genesis: &'a Genesis,
        encoded: &EncodedConsensus,
        engine: E,
    ) -> Result<Self, GenesisError> {
        Ok(Self {
            config: ChainConfig {
                chain_id: genesis.chain_id,
                forks: ForkBlocks::from(&genesis.forks),
                engine,
            },
            nonce: encoded.nonce,
            timestamp: genesis.timestamp,
            gas_limit: genesis.gas_limit,
            difficulty: encoded.difficulty,
            coinbase: parse_address("coinbase", 0, &genesis.coinbase)?,
            mix_hash: encoded.mix_hash,
            extra_data: encoded.extra_data_hex(),
            alloc: build_alloc(&genesis.accounts)?,
        })
    }
}

/// One allocation entry. `code` and `storage` are omitted when not supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocAccount<'a> {
    pub balance: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<&'a BTreeMap<String, String>>,
}

/// Build the allocation table keyed by canonical address.
pub fn build_alloc(accounts: &[Account]) -> Result<BTreeMap<Address, AllocAccount<'_>>, GenesisError> {
    let mut alloc = BTreeMap::new();
    for (index, account) in accounts.iter().enumerate() {
        let address = parse_address("accounts", index, &account.address)?;
        let entry = AllocAccount {
            balance: &account.balance,
            code: account.code.as_deref().filter(|code| !code.is_empty()),
            storage: account.storage.as_ref(),
        };
        if alloc.insert(address, entry).is_some() {
            return Err(GenesisError::DuplicateAccount {
                address: address.to_string(),
                index,
            });
        }
    }
    Ok(alloc)
}

/// Reject a genesis whose engine does not match the network's consensus.
pub fn check_consensus(genesis: &Genesis, declared: Consensus) -> Result<(), GenesisError> {
    let configured = genesis.engine.consensus();
    if configured != declared {
        return Err(GenesisError::ConsensusMismatch {
            declared,
            configured,
        });
    }
    Ok(())
}

/// Serialize a document to pretty-printed JSON bytes.
pub fn to_json<T: Serialize>(document: &T) -> Result<Vec<u8>, GenesisError> {
    serde_json::to_vec_pretty(document).map_err(|e| {
        tracing::error!(error = %e, "failed to serialize genesis document");
        GenesisError::SerializationError {
            reason: e.to_string(),
        }
    })
}
