//! Acknowledgement payloads written back by the destination chain
//!
//! All three are plain ABI tuples over the same primitive codec as
//! instructions:
//!
//! - `Ack`: `(uint256 tag, bytes innerAck)`
//! - `TokenOrderAck`: `(uint256 fillType, bytes marketMaker)`
//! - `BatchAck`: `(bytes[] acknowledgements)`, one inner ack per batch child

use crate::abi::{self, encode_tuple, AbiType, Token, TupleReader};
use crate::bytes::Bytes;
use crate::error::{DecodeResult, EncodeResult};
use ethereum_types::U256;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

pub const TAG_ACK_FAILURE: u64 = 0x00;
pub const TAG_ACK_SUCCESS: u64 = 0x01;

/// Order filled by the protocol (mint or unescrow)
pub const FILL_TYPE_PROTOCOL: u64 = 0xB0CAD0;
/// Order filled by a market maker
pub const FILL_TYPE_MARKETMAKER: u64 = 0xD1CEC45E;

/// Inner failure ack asking the source to retry with a market maker
pub const ACK_ERR_ONLY_MAKER: [u8; 4] = [0xDE, 0xAD, 0xC0, 0xDE];

const ACK_FIELDS: [AbiType; 2] = [AbiType::Uint(256), AbiType::Bytes];
const TOKEN_ORDER_ACK_FIELDS: [AbiType; 2] = [AbiType::Uint(256), AbiType::Bytes];
const BATCH_ACK_FIELDS: [AbiType; 1] = [AbiType::Array(&AbiType::Bytes)];

/// Top-level packet acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub tag: U256,
    pub inner_ack: Bytes,
}

impl Ack {
    pub fn success(inner_ack: impl Into<Bytes>) -> Self {
        Self {
            tag: U256::from(TAG_ACK_SUCCESS),
            inner_ack: inner_ack.into(),
        }
    }

    pub fn failure(inner_ack: impl Into<Bytes>) -> Self {
        Self {
            tag: U256::from(TAG_ACK_FAILURE),
            inner_ack: inner_ack.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.tag == U256::from(TAG_ACK_SUCCESS)
    }

    /// Failure carrying [`ACK_ERR_ONLY_MAKER`]
    pub fn is_only_maker(&self) -> bool {
        !self.is_success() && self.inner_ack.as_slice() == ACK_ERR_ONLY_MAKER
    }

    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        encode_tuple(
            &ACK_FIELDS,
            &[Token::Uint(self.tag), abi::bytes(&self.inner_ack)],
        )
    }

    pub fn decode(bytes: &[u8]) -> DecodeResult<Self> {
        let mut reader = TupleReader::decode(&ACK_FIELDS, bytes, "Ack")?;
        let ack = Ack {
            tag: reader.uint()?,
            inner_ack: reader.bytes()?,
        };
        reader.finish()?;
        Ok(ack)
    }
}

/// Known `fillType` values
#[repr(u64)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FillKind {
    Protocol = 0xB0CAD0,
    MarketMaker = 0xD1CEC45E,
}

/// Success payload of a filled token order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOrderAck {
    pub fill_type: U256,
    /// Address credited with the base amount for market maker fills
    pub market_maker: Bytes,
}

impl TokenOrderAck {
    pub fn protocol() -> Self {
        Self {
            fill_type: U256::from(FILL_TYPE_PROTOCOL),
            market_maker: Bytes::new(),
        }
    }

    pub fn market_maker(market_maker: impl Into<Bytes>) -> Self {
        Self {
            fill_type: U256::from(FILL_TYPE_MARKETMAKER),
            market_maker: market_maker.into(),
        }
    }

    /// `None` for fill types outside the known set
    pub fn fill_kind(&self) -> Option<FillKind> {
        if self.fill_type.bits() > 64 {
            return None;
        }
        FillKind::try_from(self.fill_type.low_u64()).ok()
    }

    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        encode_tuple(
            &TOKEN_ORDER_ACK_FIELDS,
            &[
                Token::Uint(self.fill_type),
                abi::bytes(&self.market_maker),
            ],
        )
    }

    pub fn decode(bytes: &[u8]) -> DecodeResult<Self> {
        let mut reader = TupleReader::decode(&TOKEN_ORDER_ACK_FIELDS, bytes, "TokenOrderAck")?;
        let ack = TokenOrderAck {
            fill_type: reader.uint()?,
            market_maker: reader.bytes()?,
        };
        reader.finish()?;
        Ok(ack)
    }
}

/// Per-child acknowledgements of a batch, in batch order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchAck {
    pub acknowledgements: Vec<Bytes>,
}

impl BatchAck {
    pub fn new(acknowledgements: Vec<Bytes>) -> Self {
        Self { acknowledgements }
    }

    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        let acks = self
            .acknowledgements
            .iter()
            .map(|ack| abi::bytes(ack))
            .collect();
        encode_tuple(&BATCH_ACK_FIELDS, &[Token::Array(acks)])
    }

    pub fn decode(bytes: &[u8]) -> DecodeResult<Self> {
        let mut reader = TupleReader::decode(&BATCH_ACK_FIELDS, bytes, "BatchAck")?;
        let values = reader.array()?;
        reader.finish()?;

        let len = values.len();
        let mut acks = TupleReader::new(values, "BatchAck");
        let acknowledgements = (0..len)
            .map(|_| acks.bytes())
            .collect::<DecodeResult<Vec<_>>>()?;
        Ok(Self { acknowledgements })
    }
}
