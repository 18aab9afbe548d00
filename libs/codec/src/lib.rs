//! # UCS03 Instruction Codec
//!
//! ## Purpose
//!
//! Encodes and decodes UCS03 instructions and packets: the recursive
//! instruction tree exchanged between chains by the Union token-transfer
//! and multiplexing protocol. The wire format is the Ethereum ABI tuple
//! layout of the on-chain structs, bit for bit.
//!
//! ## Layers
//!
//! ```text
//! packet ──► variants (Forward, Call, Batch, TokenOrderV1/V2)
//!   │            │            ▲
//!   │            ▼            │ child envelopes
//!   └──────►  dispatch ──► registry ──► resolver (opcode 3)
//!                │
//!                ▼
//!               abi (ethabi tuples, canonical-only decoding)
//! ```
//!
//! - **abi**: `ethabi` tuple encoding with canonical-only decoding
//! - **registry**: closed `(version, opcode)` table
//! - **instruction**: plain data model of the tree
//! - **variants**: per-variant operand schemas and conversions
//! - **dispatch**: recursive decode with depth and fan-out limits
//! - **resolver**: TokenOrder V1/V2 disambiguation, bound to the envelope version
//! - **packet**, **ack**, **path**: packet envelope, acknowledgements and
//!   channel path helpers
//!
//! ## What This Crate Does NOT Contain
//! - Execution semantics (minting, escrow, solver selection)
//! - Transport, signing or relaying
//! - Configuration file loading (see `ucs03-config`)
//!
//! ## Example
//!
//! ```
//! use ucs03_codec::{decode_instruction, encode_instruction, Instruction};
//! use ethereum_types::U256;
//!
//! let call = Instruction::call(vec![0xAA; 20], false, vec![0xBB; 20], vec![0x01]);
//! let forward = Instruction::forward(U256::one(), 100, 200, call);
//!
//! let bytes = encode_instruction(&forward).unwrap();
//! assert_eq!(decode_instruction(&bytes).unwrap(), forward);
//! ```

pub mod abi;
pub mod ack;
pub mod address;
pub mod bytes;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod instruction;
pub mod packet;
pub mod path;
pub mod registry;
pub mod resolver;
pub mod variants;

pub use ack::{Ack, BatchAck, FillKind, TokenOrderAck};
pub use address::ChecksumAddress;
pub use bytes::Bytes;
pub use config::{CodecConfig, DecodeLimits};
pub use dispatch::decode_instruction_with;
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult, PathError};
pub use instruction::{
    Batch, Call, Forward, Instruction, OrderMetadata, RawInstruction, SolverMetadata,
    TokenMetadata, TokenOrderKind, TokenOrderV1, TokenOrderV2,
};
pub use packet::Packet;
pub use path::ChannelPath;
pub use registry::{Opcode, INSTR_VERSION_0, INSTR_VERSION_1, INSTR_VERSION_2};
pub use variants::Operand;

/// Encode a top-level instruction envelope
pub fn encode_instruction(instruction: &Instruction) -> EncodeResult<Vec<u8>> {
    instruction.encode()
}

/// Decode a top-level instruction envelope into its typed variant
pub fn decode_instruction(bytes: &[u8]) -> DecodeResult<Instruction> {
    decode_instruction_with(bytes, &DecodeLimits::DEFAULT)
}

pub fn encode_packet(packet: &Packet) -> EncodeResult<Vec<u8>> {
    packet.encode()
}

pub fn decode_packet(bytes: &[u8]) -> DecodeResult<Packet> {
    Packet::decode(bytes)
}
