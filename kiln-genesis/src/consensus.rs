//! Consensus parameter encoding: engine blocks and extra-data.

use alloy_primitives::{hex, Bytes, B256};
use alloy_rlp::{Decodable, RlpDecodable, RlpEncodable};
use kiln_types::{Address, ConsensusParams, Genesis, Hash};
use serde::Serialize;

use crate::error::GenesisError;

/// Length of the zero-filled vanity prefix of extra-data.
pub const EXTRA_VANITY_LEN: usize = 32;

/// Length of the zero-filled Clique seal suffix (one secp256k1 signature).
pub const CLIQUE_SEAL_LEN: usize = 65;

/// IBFT2 genesis mix hash ("ctical byzantine fault tolerance").
pub const IBFT2_MIX_HASH: Hash = Hash::new(*b"ctical byzantine fault tolerance");

/// IBFT2 genesis nonce.
pub const IBFT2_NONCE: u64 = 0;

/// IBFT2 genesis difficulty.
pub const IBFT2_DIFFICULTY: u64 = 1;

/// Engine configuration block, keyed by engine name in the genesis `config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EngineConfig {
    #[serde(rename = "ethash")]
    Ethash {
        #[serde(rename = "fixeddifficulty", skip_serializing_if = "Option::is_none")]
        fixed_difficulty: Option<u64>,
    },
    #[serde(rename = "clique")]
    Clique {
        #[serde(rename = "blockperiodseconds")]
        block_period: u64,
        #[serde(rename = "epochlength")]
        epoch_length: u64,
    },
    #[serde(rename = "ibft2")]
    Ibft2 {
        #[serde(rename = "blockperiodseconds")]
        block_period: u64,
        #[serde(rename = "epochlength")]
        epoch_length: u64,
        #[serde(rename = "requesttimeoutseconds")]
        request_timeout: u64,
        #[serde(rename = "messageQueueLimit")]
        message_queue_limit: u64,
        #[serde(rename = "duplicateMessageLimit")]
        duplicate_message_limit: u64,
        #[serde(rename = "futureMessagesLimit")]
        future_messages_limit: u64,
        #[serde(rename = "futureMessagesMaxDistance")]
        future_messages_max_distance: u64,
    },
}

/// Output of [`encode`]: the engine block plus the header fields the engine
/// controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedConsensus {
    pub engine: EngineConfig,
    pub extra_data: Vec<u8>,
    pub mix_hash: Hash,
    pub nonce: u64,
    pub difficulty: u64,
}

impl EncodedConsensus {
    /// Extra-data as a `0x`-prefixed hex string, or `""` when there is none.
    pub fn extra_data_hex(&self) -> String {
        if self.extra_data.is_empty() {
            return String::new();
        }
        hex::encode_prefixed(&self.extra_data)
    }
}

/// Parse one operator-supplied address, reporting its list and position on failure.
pub fn parse_address(field: &'static str, index: usize, raw: &str) -> Result<Address, GenesisError> {
    raw.parse().map_err(|reason| GenesisError::InvalidAddress {
        field,
        index,
        value: raw.to_string(),
        reason,
    })
}

/// Parse an ordered address list. Order is kept; nothing is sorted or deduplicated.
pub fn parse_addresses(field: &'static str, raw: &[String]) -> Result<Vec<Address>, GenesisError> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| parse_address(field, index, value))
        .collect()
}

/// Encode the genesis' consensus parameters.
pub fn encode(genesis: &Genesis) -> Result<EncodedConsensus, GenesisError> {
    match &genesis.engine {
        ConsensusParams::Ethash { fixed_difficulty } => Ok(EncodedConsensus {
            engine: EngineConfig::Ethash {
                fixed_difficulty: *fixed_difficulty,
            },
            extra_data: Vec::new(),
            mix_hash: genesis.mix_hash,
            nonce: genesis.nonce,
            difficulty: genesis.difficulty,
        }),
        ConsensusParams::Clique {
            block_period,
            epoch_length,
            signers,
        } => {
            let signers = parse_addresses("signers", signers)?;
            Ok(EncodedConsensus {
                engine: EngineConfig::Clique {
                    block_period: *block_period,
                    epoch_length: *epoch_length,
                },
                extra_data: clique_extra_data(&signers),
                mix_hash: genesis.mix_hash,
                nonce: genesis.nonce,
                difficulty: genesis.difficulty,
            })
        }
        ConsensusParams::Ibft2 {
            block_period,
            epoch_length,
            request_timeout,
            message_queue_limit,
            duplicate_message_limit,
            future_messages_limit,
            future_messages_max_distance,
            validators,
        } => {
            let validators = parse_addresses("validators", validators)?;
            Ok(EncodedConsensus {
                engine: EngineConfig::Ibft2 {
                    block_period: *block_period,
                    epoch_length: *epoch_length,
                    request_timeout: *request_timeout,
                    message_queue_limit: *message_queue_limit,
                    duplicate_message_limit: *duplicate_message_limit,
                    future_messages_limit: *future_messages_limit,
                    future_messages_max_distance: *future_messages_max_distance,
                },
                extra_data: ibft2_extra_data(&validators),
                mix_hash: IBFT2_MIX_HASH,
                nonce: IBFT2_NONCE,
                difficulty: IBFT2_DIFFICULTY,
            })
        }
    }
}

/// Clique extra-data: `vanity ‖ signer_1 ‖ … ‖ signer_n ‖ seal`.
pub fn clique_extra_data(signers: &[Address]) -> Vec<u8> {
    let mut data = Vec::with_capacity(EXTRA_VANITY_LEN + signers.len() * 20 + CLIQUE_SEAL_LEN);
    data.extend_from_slice(&[0u8; EXTRA_VANITY_LEN]);
    for signer in signers {
        data.extend_from_slice(signer.as_bytes());
    }
    data.extend_from_slice(&[0u8; CLIQUE_SEAL_LEN]);
    data
}

/// Recover the signer list from Clique extra-data.
///
/// Returns `None` if the length does not fit `vanity + 20·n + seal`.
pub fn decode_clique_signers(extra_data: &[u8]) -> Option<Vec<Address>> {
    let body_len = extra_data
        .len()
        .checked_sub(EXTRA_VANITY_LEN + CLIQUE_SEAL_LEN)?;
    if body_len % 20 != 0 {
        return None;
    }
    let body = &extra_data[EXTRA_VANITY_LEN..EXTRA_VANITY_LEN + body_len];
    Some(
        body.chunks_exact(20)
            .map(|chunk| {
                let mut addr = [0u8; 20];
                addr.copy_from_slice(chunk);
                Address::new(addr)
            })
            .collect(),
    )
}

/// IBFT2 extra-data as laid out on the wire: `[vanity, [validators…], [seals…]]`.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
struct Ibft2ExtraData {
    vanity: B256,
    validators: Vec<alloy_primitives::Address>,
    seals: Vec<Bytes>,
}

/// IBFT2 extra-data: `rlp([vanity, [validators…], []])`.
pub fn ibft2_extra_data(validators: &[Address]) -> Vec<u8> {
    alloy_rlp::encode(Ibft2ExtraData {
        vanity: B256::ZERO,
        validators: validators.iter().map(|v| v.0).collect(),
        seals: Vec::new(),
    })
}

/// Recover the validator list from IBFT2 extra-data.
///
/// The whole input must be one RLP list; trailing bytes are rejected.
pub fn decode_ibft2_validators(extra_data: &[u8]) -> Result<Vec<Address>, alloy_rlp::Error> {
    let mut buf = extra_data;
    let decoded = Ibft2ExtraData::decode(&mut buf)?;
    if !buf.is_empty() {
        return Err(alloy_rlp::Error::UnexpectedLength);
    }
    Ok(decoded.validators.into_iter().map(Address).collect())
}
