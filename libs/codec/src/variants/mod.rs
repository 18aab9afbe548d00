//! # Variant Encoders/Decoders
//!
//! ## Purpose
//!
//! Structural codecs for every instruction variant. Each variant implements
//! [`Operand`]: a fixed `(version, opcode)`, a `'static` ABI schema for its
//! operand tuple, and the conversion between the typed struct and that tuple.
//!
//! ## Recursion
//!
//! ```text
//! encode:  Forward ──► nested.to_raw() ──► (path, h, t, (v, op, operand))
//!          Batch   ──► [child.to_raw()...] ──► ((v, op, operand)[])
//!
//! decode:  operand ──► tuple ──► RawInstruction ──► dispatch::decode_raw
//!                                                     (registry lookup)
//! ```
//!
//! Children are always re-wrapped as the generic envelope before tuple
//! encoding, and always resolved through the dispatcher when decoding.

mod batch;
mod call;
mod envelope;
mod forward;
mod token_order;

pub use envelope::{INSTRUCTION_FIELDS, INSTRUCTION_TUPLE};
pub use token_order::{SOLVER_METADATA_FIELDS, TOKEN_METADATA_FIELDS};

use crate::abi::AbiType;
use crate::config::DecodeLimits;
use crate::dispatch::DecodeContext;
use crate::error::{DecodeResult, EncodeResult};
use crate::instruction::{Instruction, RawInstruction};
use crate::registry::Opcode;

/// Operand codec of a typed instruction variant
pub trait Operand: Sized + Into<Instruction> {
    const VERSION: u8;
    const OPCODE: Opcode;
    const NAME: &'static str;
    /// Wire schema of the operand tuple
    const SCHEMA: &'static [AbiType];

    /// Encode the operand tuple (without the envelope)
    fn encode_operand(&self) -> EncodeResult<Vec<u8>>;

    /// Decode the operand tuple, resolving nested instructions through `ctx`
    fn decode_operand_with(operand: &[u8], ctx: &mut DecodeContext<'_>) -> DecodeResult<Self>;

    /// Decode the operand tuple with default limits
    fn decode_operand(operand: &[u8]) -> DecodeResult<Self> {
        let limits = DecodeLimits::DEFAULT;
        Self::decode_operand_with(operand, &mut DecodeContext::new(&limits))
    }

    /// Wrap the encoded operand in its envelope
    fn to_raw(&self) -> EncodeResult<RawInstruction> {
        Ok(RawInstruction::new(
            Self::VERSION,
            Self::OPCODE.into(),
            self.encode_operand()?,
        ))
    }

    /// Full wire bytes of this variant as a top-level instruction
    fn encode(&self) -> EncodeResult<Vec<u8>> {
        self.to_raw()?.encode()
    }

    fn into_instruction(self) -> Instruction {
        self.into()
    }
}

/// Registry adapter from a typed operand decoder to an [`Instruction`]
pub(crate) fn decode_into<T: Operand>(
    raw: &RawInstruction,
    ctx: &mut DecodeContext<'_>,
) -> DecodeResult<Instruction> {
    T::decode_operand_with(&raw.operand, ctx).map(Into::into)
}

impl Instruction {
    /// Encode the operand and wrap it in the generic envelope
    pub fn to_raw(&self) -> EncodeResult<RawInstruction> {
        match self {
            Instruction::Raw(raw) => Ok(raw.clone()),
            Instruction::Forward(forward) => forward.to_raw(),
            Instruction::Call(call) => call.to_raw(),
            Instruction::Batch(batch) => batch.to_raw(),
            Instruction::TokenOrderV1(order) => order.to_raw(),
            Instruction::TokenOrderV2(order) => order.to_raw(),
        }
    }

    /// Top-level wire bytes: the envelope tuple
    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        self.to_raw()?.encode()
    }
}
