//! OpenEthereum (Parity) chainspec.
//!
//! The chainspec expresses forks as per-EIP transition blocks rather than
//! named hard forks, so each fork in [`Forks`] fans out to the EIPs it
//! activated.

use std::collections::BTreeMap;

use kiln_types::primitives::serde_quantity;
use kiln_types::{Address, ClientKind, Consensus, Forks, Genesis, Hash};
use serde::Serialize;

use crate::consensus::{encode, parse_address, EngineConfig};
use crate::document::{build_alloc, check_consensus, to_json, AllocAccount};
use crate::error::GenesisError;
use crate::GenesisFormat;

/// Ethash protocol constants used by the public networks.
const MINIMUM_DIFFICULTY: u64 = 0x20000;
const DIFFICULTY_BOUND_DIVISOR: u64 = 0x800;
const DURATION_LIMIT: u64 = 0xd;

/// Block rewards in wei: frontier, byzantium, constantinople.
const REWARD_FRONTIER: &str = "0x4563918244f40000";
const REWARD_BYZANTIUM: &str = "0x29a2241af62c0000";
const REWARD_CONSTANTINOPLE: &str = "0x1bc16d674ec80000";

/// Difficulty bomb delays in blocks.
const BOMB_DELAY_BYZANTIUM: u64 = 3_000_000;
const BOMB_DELAY_CONSTANTINOPLE: u64 = 2_000_000;
const BOMB_DELAY_MUIR_GLACIER: u64 = 4_000_000;

const GAS_LIMIT_BOUND_DIVISOR: u64 = 0x400;
const MAXIMUM_EXTRA_DATA_SIZE: u64 = 0xffff;
const MIN_GAS_LIMIT: u64 = 0x1388;
const MAX_CODE_SIZE: u64 = 0x6000;

#[derive(Debug, Serialize)]
struct ChainSpec<'a> {
    name: String,
    engine: Engine,
    params: Params,
    genesis: GenesisBlock,
    accounts: BTreeMap<Address, AllocAccount<'a>>,
}

#[derive(Debug, Serialize)]
enum Engine {
    Ethash { params: EthashParams },
    #[serde(rename = "clique")]
    Clique { params: CliqueParams },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EthashParams {
    #[serde(with = "serde_quantity")]
    minimum_difficulty: u64,
    #[serde(with = "serde_quantity")]
    difficulty_bound_divisor: u64,
    #[serde(with = "serde_quantity")]
    duration_limit: u64,
    block_reward: BTreeMap<u64, &'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    homestead_transition: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dao_hardfork_transition: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    eip100b_transition: Option<u64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    difficulty_bomb_delays: BTreeMap<u64, u64>,
}

#[derive(Debug, Serialize)]
struct CliqueParams {
    period: u64,
    epoch: u64,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Params {
    #[serde(with = "serde_quantity")]
    account_start_nonce: u64,
    #[serde(rename = "chainID", with = "serde_quantity")]
    chain_id: u64,
    #[serde(rename = "networkID", with = "serde_quantity")]
    network_id: u64,
    #[serde(with = "serde_quantity")]
    gas_limit_bound_divisor: u64,
    #[serde(with = "serde_quantity")]
    maximum_extra_data_size: u64,
    #[serde(with = "serde_quantity")]
    min_gas_limit: u64,
    #[serde(with = "serde_quantity")]
    max_code_size: u64,
    #[serde(flatten)]
    transitions: BTreeMap<&'static str, u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenesisBlock {
    seal: Seal,
    #[serde(with = "serde_quantity")]
    difficulty: u64,
    author: Address,
    #[serde(with = "serde_quantity")]
    timestamp: u64,
    extra_data: String,
    #[serde(with = "serde_quantity")]
    gas_limit: u64,
}

#[derive(Debug, Serialize)]
struct Seal {
    ethereum: EthereumSeal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EthereumSeal {
    /// 8-byte nonce, zero padded.
    nonce: String,
    mix_hash: Hash,
}

/// EIP transition blocks implied by the scheduled forks.
fn transitions(forks: &Forks) -> BTreeMap<&'static str, u64> {
    let table: [(Option<u64>, &[&'static str]); 7] = [
        (forks.eip150, &["eip150Transition"]),
        (forks.eip155, &["eip155Transition"]),
        (
            forks.eip158,
            &[
                "eip160Transition",
                "eip161abcTransition",
                "eip161dTransition",
                "maxCodeSizeTransition",
            ],
        ),
        (
            forks.byzantium,
            &[
                "eip140Transition",
                "eip211Transition",
                "eip214Transition",
                "eip658Transition",
            ],
        ),
        (
            forks.constantinople,
            &[
                "eip145Transition",
                "eip1014Transition",
                "eip1052Transition",
                "eip1283Transition",
            ],
        ),
        (forks.petersburg, &["eip1283DisableTransition"]),
        (
            forks.istanbul,
            &[
                "eip1283ReenableTransition",
                "eip1344Transition",
                "eip1706Transition",
                "eip1884Transition",
                "eip2028Transition",
            ],
        ),
    ];

    let mut out = BTreeMap::new();
    for (block, eips) in table {
        if let Some(block) = block {
            for eip in eips {
                out.insert(*eip, block);
            }
        }
    }
    out
}

fn ethash_params(forks: &Forks, fixed_difficulty: Option<u64>) -> EthashParams {
    let mut block_reward = BTreeMap::from([(0, REWARD_FRONTIER)]);
    if let Some(block) = forks.byzantium {
        block_reward.insert(block, REWARD_BYZANTIUM);
    }
    if let Some(block) = forks.constantinople {
        block_reward.insert(block, REWARD_CONSTANTINOPLE);
    }

    let mut difficulty_bomb_delays = BTreeMap::new();
    for (block, delay) in [
        (forks.byzantium, BOMB_DELAY_BYZANTIUM),
        (forks.constantinople, BOMB_DELAY_CONSTANTINOPLE),
        (forks.muir_glacier, BOMB_DELAY_MUIR_GLACIER),
    ] {
        if let Some(block) = block {
            difficulty_bomb_delays.insert(block, delay);
        }
    }

    EthashParams {
        // Closest equivalent of a fixed difficulty: never adjust below it.
        minimum_difficulty: fixed_difficulty.unwrap_or(MINIMUM_DIFFICULTY),
        difficulty_bound_divisor: DIFFICULTY_BOUND_DIVISOR,
        duration_limit: DURATION_LIMIT,
        block_reward,
        homestead_transition: forks.homestead,
        dao_hardfork_transition: forks.dao,
        eip100b_transition: forks.byzantium,
        difficulty_bomb_delays,
    }
}

/// Build the OpenEthereum chainspec for `genesis` under `consensus`.
pub fn build(genesis: &Genesis, consensus: Consensus) -> Result<Vec<u8>, GenesisError> {
    check_consensus(genesis, consensus)?;
    let encoded = encode(genesis)?;

    let engine = match encoded.engine {
        EngineConfig::Ethash { fixed_difficulty } => Engine::Ethash {
            params: ethash_params(&genesis.forks, fixed_difficulty),
        },
        EngineConfig::Clique {
            block_period,
            epoch_length,
        } => Engine::Clique {
            params: CliqueParams {
                period: block_period,
                epoch: epoch_length,
            },
        },
        EngineConfig::Ibft2 { .. } => {
            return Err(GenesisError::UnsupportedConsensus {
                client: ClientKind::Parity,
                consensus,
            })
        }
    };

    let spec = ChainSpec {
        name: format!("private-{}", genesis.chain_id),
        engine,
        params: Params {
            account_start_nonce: 0,
            chain_id: genesis.chain_id,
            network_id: genesis.chain_id,
            gas_limit_bound_divisor: GAS_LIMIT_BOUND_DIVISOR,
            maximum_extra_data_size: MAXIMUM_EXTRA_DATA_SIZE,
            min_gas_limit: MIN_GAS_LIMIT,
            max_code_size: MAX_CODE_SIZE,
            transitions: transitions(&genesis.forks),
        },
        genesis: GenesisBlock {
            seal: Seal {
                ethereum: EthereumSeal {
                    nonce: format!("{:#018x}", encoded.nonce),
                    mix_hash: encoded.mix_hash,
                },
            },
            difficulty: encoded.difficulty,
            author: parse_address("coinbase", 0, &genesis.coinbase)?,
            timestamp: genesis.timestamp,
            extra_data: encoded.extra_data_hex(),
            gas_limit: genesis.gas_limit,
        },
        accounts: build_alloc(&genesis.accounts)?,
    };
    let bytes = to_json(&spec)?;

    tracing::debug!(
        client = %ClientKind::Parity,
        consensus = %consensus,
        chain_id = genesis.chain_id,
        accounts = spec.accounts.len(),
        "built chainspec"
    );
    Ok(bytes)
}

/// OpenEthereum chainspec format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParityChainSpec;

impl GenesisFormat for ParityChainSpec {
    fn client(&self) -> ClientKind {
        ClientKind::Parity
    }

    fn build(&self, genesis: &Genesis, consensus: Consensus) -> Result<Vec<u8>, GenesisError> {
        build(genesis, consensus)
    }
}
