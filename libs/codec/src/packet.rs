//! Relayable packet: `(bytes32 salt, uint256 path, Instruction instruction)`

use crate::abi::{encode_tuple, AbiType, Token, TupleReader};
use crate::config::DecodeLimits;
use crate::dispatch::{self, DecodeContext};
use crate::error::{DecodeResult, EncodeResult};
use crate::instruction::{Instruction, RawInstruction};
use crate::path::ChannelPath;
use crate::variants::INSTRUCTION_TUPLE;
use ethereum_types::{H256, U256};
use serde::{Deserialize, Serialize};
use tracing::debug;

const PACKET_FIELDS: [AbiType; 3] = [AbiType::FixedBytes32, AbiType::Uint(256), INSTRUCTION_TUPLE];

/// Top-level packet sent over a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    /// Sender-chosen uniqueness salt
    pub salt: H256,
    /// Channels the packet was forwarded through, see [`ChannelPath`]
    pub path: U256,
    pub instruction: Instruction,
}

impl Packet {
    pub fn new(salt: impl Into<H256>, path: U256, instruction: impl Into<Instruction>) -> Self {
        Self {
            salt: salt.into(),
            path,
            instruction: instruction.into(),
        }
    }

    pub fn channel_path(&self) -> ChannelPath {
        ChannelPath::new(self.path)
    }

    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        let instruction = self.instruction.to_raw()?;
        encode_tuple(
            &PACKET_FIELDS,
            &[
                Token::FixedBytes(self.salt.as_bytes().to_vec()),
                Token::Uint(self.path),
                instruction.to_token(),
            ],
        )
    }

    /// Decode and resolve the instruction tree with default limits
    pub fn decode(bytes: &[u8]) -> DecodeResult<Self> {
        Self::decode_with(bytes, &DecodeLimits::DEFAULT)
    }

    pub fn decode_with(bytes: &[u8], limits: &DecodeLimits) -> DecodeResult<Self> {
        let (salt, path, raw) = Self::decode_parts(bytes)?;
        debug!(
            salt = %salt,
            version = raw.version,
            opcode = raw.opcode,
            "decoding packet instruction"
        );
        let instruction = dispatch::decode_raw(&raw, &mut DecodeContext::new(limits))?;
        Ok(Self {
            salt,
            path,
            instruction,
        })
    }

    /// Decode the packet but keep its instruction as an opaque envelope
    pub fn decode_raw(bytes: &[u8]) -> DecodeResult<Self> {
        let (salt, path, raw) = Self::decode_parts(bytes)?;
        Ok(Self {
            salt,
            path,
            instruction: Instruction::Raw(raw),
        })
    }

    fn decode_parts(bytes: &[u8]) -> DecodeResult<(H256, U256, RawInstruction)> {
        let mut reader = TupleReader::decode(&PACKET_FIELDS, bytes, "Packet")?;
        let salt = H256(reader.word()?);
        let path = reader.uint()?;
        let raw = RawInstruction::from_reader(reader.tuple()?)?;
        reader.finish()?;
        Ok((salt, path, raw))
    }
}
