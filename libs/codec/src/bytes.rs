//! Owned byte strings rendered as `0x`-prefixed hex

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Owned byte string used for every `bytes` field of the instruction tree
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bytes(Vec<u8>);

impl Bytes {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Lowercase hex with `0x` prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }
}

/// Parse `0x`-prefixed (or bare) hex into bytes
pub(crate) fn parse_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(digits)
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for Bytes {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Bytes {
    fn from(value: [u8; N]) -> Self {
        Self(value.to_vec())
    }
}

impl From<Bytes> for Vec<u8> {
    fn from(value: Bytes) -> Self {
        value.0
    }
}

impl FromStr for Bytes {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map(Self)
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes({})", self.to_hex())
    }
}

impl Serialize for Bytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rendering() {
        let bytes = Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(bytes.to_string(), "0xdeadbeef");
        assert_eq!(Bytes::new().to_string(), "0x");
    }

    #[test]
    fn test_parse_accepts_prefix_and_case() {
        assert_eq!("0xDEAD".parse::<Bytes>().unwrap().as_slice(), &[0xde, 0xad]);
        assert_eq!("beef".parse::<Bytes>().unwrap().as_slice(), &[0xbe, 0xef]);
        assert!("0xabc".parse::<Bytes>().is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let bytes = Bytes::from([0x01u8, 0x02]);
        let json = serde_json::to_string(&bytes).unwrap();
        assert_eq!(json, "\"0x0102\"");
        let back: Bytes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bytes);
    }
}
