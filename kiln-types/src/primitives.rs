use std::fmt;
use std::str::FromStr;

use alloy_primitives::hex::{self, FromHexError};
use alloy_primitives::B256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// 20-byte account address.
///
/// The canonical text form is `0x` followed by 40 lowercase hex characters.
/// Parsing accepts either prefix case and mixed-case digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub alloy_primitives::Address);

/// 32-byte hash (mix hash, fork block hash).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hash(pub B256);

/// Strip the mandatory `0x` prefix and check the digit count.
fn hex_digits(s: &str, expected: usize) -> Result<&str, ParseError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or(ParseError::MissingPrefix)?;
    if digits.len() != expected {
        return Err(ParseError::InvalidLength {
            expected,
            actual: digits.len(),
        });
    }
    Ok(digits)
}

/// Positions are reported relative to the full input, prefix included.
fn from_hex_error(err: FromHexError, digits: &str, expected: usize) -> ParseError {
    match err {
        FromHexError::InvalidHexCharacter { c, index } => ParseError::InvalidCharacter {
            character: c,
            index: index + 2,
        },
        _ => ParseError::InvalidLength {
            expected,
            actual: digits.len(),
        },
    }
}

impl Address {
    pub const fn new(bytes: [u8; 20]) -> Self {
        Address(alloy_primitives::Address::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl Hash {
    pub const ZERO: Hash = Hash(B256::ZERO);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Hash(B256::new(bytes))
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = hex_digits(s, 40)?;
        alloy_primitives::Address::from_str(digits)
            .map(Address)
            .map_err(|e| from_hex_error(e, digits, 40))
    }
}

impl FromStr for Hash {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = hex_digits(s, 64)?;
        B256::from_str(digits)
            .map(Hash)
            .map_err(|e| from_hex_error(e, digits, 64))
    }
}

// alloy's own `Display` for addresses is EIP-55 mixed case.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&hex::encode_prefixed(self.0))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&hex::encode_prefixed(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Serde helper that writes integers as `0x`-prefixed hex quantities.
///
/// Accepts either a quantity string or a plain integer on input.
pub mod serde_quantity {
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:#x}", value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => parse_quantity(&s).map_err(serde::de::Error::custom),
        }
    }

    /// Parse a hex quantity (`0x2a`) or decimal string (`42`).
    pub fn parse_quantity(s: &str) -> Result<u64, String> {
        match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some("") => Ok(0),
            Some(digits) => u64::from_str_radix(digits, 16)
                .map_err(|e| format!("invalid hex quantity '{}': {}", s, e)),
            None => s
                .parse::<u64>()
                .map_err(|e| format!("invalid quantity '{}': {}", s, e)),
        }
    }
}
