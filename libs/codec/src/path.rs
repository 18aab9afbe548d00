//! # Channel Path
//!
//! A `uint256` packing up to eight 32-bit channel ids. The first hop sits in
//! the lowest 32 bits and each following hop in the next 32-bit slot:
//!
//! ```text
//! bits  255 ........ 96  95 .. 64  63 .. 32  31 ... 0
//!       (unused)          hop 3     hop 2     hop 1
//! ```
//!
//! The same encoding is used by `Forward::path`, `Packet::path` and
//! `TokenOrderV1::base_token_path`. Channel id 0 never appears inside a
//! path; a zero path is the empty path.

use crate::error::PathError;
use ethereum_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum number of hops a path can hold
pub const MAX_HOPS: usize = 8;

const HOP_BITS: usize = 32;

/// Packed sequence of channel ids
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelPath(U256);

impl ChannelPath {
    pub const EMPTY: ChannelPath = ChannelPath(U256::zero());

    pub fn new(raw: U256) -> Self {
        Self(raw)
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Build a path from hops in travel order
    pub fn from_hops(hops: &[u32]) -> Result<Self, PathError> {
        hops.iter()
            .try_fold(Self::EMPTY, |path, &channel| path.push(channel))
    }

    /// Hops in travel order
    pub fn hops(&self) -> Vec<u32> {
        (0..self.len()).map(|index| self.hop(index)).collect()
    }

    /// Number of occupied 32-bit slots
    pub fn len(&self) -> usize {
        if self.0.is_zero() {
            0
        } else {
            self.last_index() + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_zero()
    }

    /// Append `channel` as the next hop
    pub fn push(self, channel: u32) -> Result<Self, PathError> {
        if channel == 0 {
            return Err(PathError::ZeroChannel);
        }
        if self.is_empty() {
            return Ok(Self(U256::from(channel)));
        }
        let next = self.last_index() + 1;
        if next >= MAX_HOPS {
            return Err(PathError::TooManyHops { max: MAX_HOPS });
        }
        Ok(Self((U256::from(channel) << (HOP_BITS * next)) | self.0))
    }

    /// Remove the last hop
    pub fn pop(self) -> (Self, Option<u32>) {
        if self.is_empty() {
            return (self, None);
        }
        let index = self.last_index();
        let last = self.hop(index);
        let rest = if index == 0 {
            U256::zero()
        } else {
            let clear = (MAX_HOPS - index) * HOP_BITS;
            (self.0 << clear) >> clear
        };
        (Self(rest), Some(last))
    }

    /// Remove the first hop
    pub fn dequeue(self) -> (Self, Option<u32>) {
        if self.is_empty() {
            return (self, None);
        }
        (Self(self.0 >> HOP_BITS), Some(self.0.low_u32()))
    }

    /// The same hops in the opposite order
    pub fn reverse(self) -> Self {
        let len = self.len();
        let reversed = (0..len).fold(U256::zero(), |acc, index| {
            acc | (U256::from(self.hop(index)) << (HOP_BITS * (len - 1 - index)))
        });
        Self(reversed)
    }

    /// Slot of the highest set bit
    fn last_index(&self) -> usize {
        (255 - self.0.leading_zeros() as usize) / HOP_BITS
    }

    fn hop(&self, index: usize) -> u32 {
        (self.0 >> (HOP_BITS * index)).low_u32()
    }
}

impl From<U256> for ChannelPath {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

impl From<ChannelPath> for U256 {
    fn from(path: ChannelPath) -> Self {
        path.0
    }
}

impl fmt::Display for ChannelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, hop) in self.hops().into_iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            write!(f, "{hop}")?;
        }
        Ok(())
    }
}

/// Errors parsing the `a/b/c` form
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParsePathError {
    #[error("invalid channel id {0:?}")]
    InvalidChannel(String),

    #[error(transparent)]
    Path(#[from] PathError),
}

impl FromStr for ChannelPath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::EMPTY);
        }
        let hops = s
            .split('/')
            .map(|hop| {
                hop.trim()
                    .parse::<u32>()
                    .map_err(|_| ParsePathError::InvalidChannel(hop.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_hops(&hops)?)
    }
}
