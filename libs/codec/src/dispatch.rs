//! Recursive decode dispatcher
//!
//! The one place where a `{version, opcode, operand}` envelope becomes a
//! typed instruction. Forward and Batch call back into [`decode_raw`] for
//! their children, so depth accounting and registry lookup happen uniformly
//! at every level.

use crate::config::DecodeLimits;
use crate::error::{DecodeError, DecodeResult};
use crate::instruction::{Instruction, RawInstruction};
use crate::registry;
use tracing::{debug, trace};

/// Per-call decode state
#[derive(Debug)]
pub struct DecodeContext<'a> {
    limits: &'a DecodeLimits,
    depth: usize,
}

impl<'a> DecodeContext<'a> {
    pub fn new(limits: &'a DecodeLimits) -> Self {
        Self { limits, depth: 0 }
    }

    pub fn limits(&self) -> &DecodeLimits {
        self.limits
    }

    /// Nesting level of the instruction currently being decoded
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn enter(&mut self) -> DecodeResult<()> {
        if self.depth >= self.limits.max_depth {
            debug!(
                max_depth = self.limits.max_depth,
                "instruction nesting exceeds decode limit"
            );
            return Err(DecodeError::LimitExceeded {
                limit: "instruction depth",
                max: self.limits.max_depth,
                actual: self.depth + 1,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Reject a batch longer than the configured maximum
    pub fn check_batch_len(&self, len: usize) -> DecodeResult<()> {
        if len > self.limits.max_batch_len {
            debug!(
                len,
                max_batch_len = self.limits.max_batch_len,
                "batch exceeds decode limit"
            );
            return Err(DecodeError::LimitExceeded {
                limit: "batch length",
                max: self.limits.max_batch_len,
                actual: len,
            });
        }
        Ok(())
    }
}

/// Resolve an envelope into its typed instruction
pub fn decode_raw(raw: &RawInstruction, ctx: &mut DecodeContext<'_>) -> DecodeResult<Instruction> {
    ctx.enter()?;
    trace!(
        version = raw.version,
        opcode = raw.opcode,
        depth = ctx.depth(),
        operand_len = raw.operand.len(),
        "decoding instruction"
    );

    let result = match registry::lookup(raw.version, raw.opcode) {
        Some(decoder) => decoder(raw, ctx),
        None => Err(DecodeError::UnknownOpcode {
            version: raw.version,
            opcode: raw.opcode,
        }),
    };

    ctx.leave();
    result
}

/// Decode top-level instruction bytes with explicit limits
pub fn decode_instruction_with(bytes: &[u8], limits: &DecodeLimits) -> DecodeResult<Instruction> {
    let raw = RawInstruction::decode(bytes)?;
    decode_raw(&raw, &mut DecodeContext::new(limits))
}
