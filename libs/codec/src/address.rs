//! EIP-55 address canonicalization
//!
//! Quote tokens are carried as raw `bytes` on the wire. When they hold a
//! 20-byte EVM address every textual form of the value is the checksummed one,
//! so two decodes of the same bytes always print and compare identically.
//! Non-EVM token identifiers (any other length) render as lowercase hex.

use crate::bytes::{parse_hex, Bytes};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;

/// Length of an EVM address
pub const ADDRESS_LEN: usize = 20;

/// Errors parsing a textual address
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AddressError {
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Mixed-case address fails EIP-55 checksum (expected {expected})")]
    BadChecksum { expected: String },
}

/// Keccak-256 digest
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// EIP-55 checksummed form of a 20-byte address, `0x`-prefixed
pub fn to_checksum(address: &[u8; ADDRESS_LEN]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(2 + 2 * ADDRESS_LEN);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Token identifier bytes with checksummed rendering
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ChecksumAddress(Bytes);

impl ChecksumAddress {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// The address as a fixed array when it is exactly 20 bytes long
    pub fn as_evm_address(&self) -> Option<[u8; ADDRESS_LEN]> {
        self.0.as_slice().try_into().ok()
    }

    /// Canonical textual form
    pub fn to_canonical_string(&self) -> String {
        match self.as_evm_address() {
            Some(address) => to_checksum(&address),
            None => self.0.to_hex(),
        }
    }
}

impl Deref for ChecksumAddress {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Bytes> for ChecksumAddress {
    fn from(value: Bytes) -> Self {
        Self(value)
    }
}

impl From<Vec<u8>> for ChecksumAddress {
    fn from(value: Vec<u8>) -> Self {
        Self(value.into())
    }
}

impl From<[u8; ADDRESS_LEN]> for ChecksumAddress {
    fn from(value: [u8; ADDRESS_LEN]) -> Self {
        Self(value.into())
    }
}

impl FromStr for ChecksumAddress {
    type Err = AddressError;

    /// All-lowercase and all-uppercase input is accepted as is; mixed-case
    /// 20-byte input must carry a valid checksum.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = parse_hex(s)?;
        let parsed = Self(bytes.into());

        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        if let Some(address) = parsed.as_evm_address() {
            if has_upper && has_lower {
                let expected = to_checksum(&address);
                if expected[2..] != *digits {
                    return Err(AddressError::BadChecksum { expected });
                }
            }
        }
        Ok(parsed)
    }
}

impl fmt::Display for ChecksumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl fmt::Debug for ChecksumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChecksumAddress({})", self.to_canonical_string())
    }
}

impl Serialize for ChecksumAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_canonical_string())
    }
}

impl<'de> Deserialize<'de> for ChecksumAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
