//! # Opcode/Version Registry
//!
//! ## Purpose
//!
//! Closed, process-wide table mapping a `(version, opcode)` pair to the
//! decoder for its operand. Every recursive decode step consults this single
//! table through [`crate::dispatch`]; there is no other opcode matching in the
//! crate.
//!
//! ```text
//! version  opcode  variant
//! ───────  ──────  ─────────────────────────────
//!    0       0     Forward
//!    0       1     Call
//!    0       2     Batch
//!    1       3     TokenOrder ─┐ ambiguity resolver
//!    2       3     TokenOrder ─┘ (V1 tried first)
//! ```
//!
//! Decoders receive the whole envelope rather than just the operand, so the
//! TokenOrder resolver can hold the decoded layout to the envelope version.
//!
//! The table is a `static` slice of plain function pointers: immutable after
//! program start and safe to share across threads without synchronization.

use crate::dispatch::DecodeContext;
use crate::error::DecodeResult;
use crate::instruction::{Batch, Call, Forward, Instruction, RawInstruction};
use crate::resolver;
use crate::variants::decode_into;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction layout version 0 (Forward, Call, Batch)
pub const INSTR_VERSION_0: u8 = 0;
/// Instruction layout version 1 (TokenOrderV1)
pub const INSTR_VERSION_1: u8 = 1;
/// Instruction layout version 2 (TokenOrderV2)
pub const INSTR_VERSION_2: u8 = 2;

/// Instruction opcodes
#[repr(u8)]
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
pub enum Opcode {
    /// Multi-hop forwarding of a nested instruction
    Forward = 0,
    /// Contract call on the destination chain
    Call = 1,
    /// Atomic group of instructions
    Batch = 2,
    /// Asset transfer order (layout depends on version)
    TokenOrder = 3,
}

impl Opcode {
    pub fn name(&self) -> &'static str {
        match self {
            Opcode::Forward => "Forward",
            Opcode::Call => "Call",
            Opcode::Batch => "Batch",
            Opcode::TokenOrder => "TokenOrder",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoder for one registry entry: turns an envelope into a typed instruction
pub type DecoderRef = fn(&RawInstruction, &mut DecodeContext<'_>) -> DecodeResult<Instruction>;

/// One row of the registry table
#[derive(Clone, Copy)]
pub struct RegistryEntry {
    pub version: u8,
    pub opcode: Opcode,
    /// Variant (or variant family) decoded by this entry
    pub name: &'static str,
    pub decoder: DecoderRef,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("version", &self.version)
            .field("opcode", &self.opcode)
            .field("name", &self.name)
            .finish()
    }
}

static REGISTRY: [RegistryEntry; 5] = [
    RegistryEntry {
        version: INSTR_VERSION_0,
        opcode: Opcode::Forward,
        name: "Forward",
        decoder: decode_into::<Forward>,
    },
    RegistryEntry {
        version: INSTR_VERSION_0,
        opcode: Opcode::Call,
        name: "Call",
        decoder: decode_into::<Call>,
    },
    RegistryEntry {
        version: INSTR_VERSION_0,
        opcode: Opcode::Batch,
        name: "Batch",
        decoder: decode_into::<Batch>,
    },
    RegistryEntry {
        version: INSTR_VERSION_1,
        opcode: Opcode::TokenOrder,
        name: "TokenOrder",
        decoder: resolver::decode_token_order,
    },
    RegistryEntry {
        version: INSTR_VERSION_2,
        opcode: Opcode::TokenOrder,
        name: "TokenOrder",
        decoder: resolver::decode_token_order,
    },
];

/// Find the decoder registered for `(version, opcode)`
pub fn lookup(version: u8, opcode: u8) -> Option<DecoderRef> {
    REGISTRY
        .iter()
        .find(|entry| entry.version == version && u8::from(entry.opcode) == opcode)
        .map(|entry| entry.decoder)
}

/// Whether `(version, opcode)` is a known instruction
pub fn is_registered(version: u8, opcode: u8) -> bool {
    lookup(version, opcode).is_some()
}

/// The full table, in registration order
pub fn entries() -> &'static [RegistryEntry] {
    &REGISTRY
}
