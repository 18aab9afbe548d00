//! Codec errors for UCS03 instruction processing
//!
//! Every encode and decode path returns one of these values; nothing in the
//! codec panics on malformed input. Each variant carries enough context to
//! tell a truncated outer tuple apart from a malformed nested instruction.

use thiserror::Error;

/// Decoding errors with diagnostic context
///
/// Nested decodes propagate the child error unchanged, so the kind always
/// describes the innermost failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer bytes are available than the schema requires
    #[error("Truncated input: need {need} bytes, got {got} (context: {context})")]
    Truncated {
        need: usize,
        got: usize,
        context: String,
    },

    /// Offsets, lengths or values violate the canonical tuple layout
    #[error("Malformed input at byte {offset}: {reason}")]
    Malformed { offset: usize, reason: String },

    /// `(version, opcode)` pair is not present in the registry
    #[error("Unknown instruction: version {version}, opcode {opcode}")]
    UnknownOpcode { version: u8, opcode: u8 },

    /// Batch operand decoded to zero instructions
    #[error("Batch operand contains no instructions")]
    EmptyBatch,

    /// Every candidate layout for a shared opcode failed
    #[error("No token order layout matched (v1: {v1}; v2: {v2})")]
    AmbiguousVariant {
        v1: Box<DecodeError>,
        v2: Box<DecodeError>,
    },

    /// Input exceeds a configured decode limit
    #[error("Decode limit exceeded: {limit} is {actual}, maximum {max}")]
    LimitExceeded {
        limit: &'static str,
        max: usize,
        actual: usize,
    },
}

impl DecodeError {
    /// Create a Truncated error with context
    pub fn truncated(need: usize, got: usize, context: impl Into<String>) -> Self {
        Self::Truncated {
            need,
            got,
            context: context.into(),
        }
    }

    /// Create a Malformed error at `offset`
    pub fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            offset,
            reason: reason.into(),
        }
    }

    pub fn ambiguous(v1: DecodeError, v2: DecodeError) -> Self {
        Self::AmbiguousVariant {
            v1: Box::new(v1),
            v2: Box::new(v2),
        }
    }

    /// True for the structural kinds produced by the primitive codec
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Truncated { .. } | Self::Malformed { .. })
    }
}

/// Encoding errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A variant's fields fail a structural precondition
    #[error("Invalid {variant} operand: {reason}")]
    InvalidOperand {
        variant: &'static str,
        reason: String,
    },

    /// A value does not match the schema type it is encoded as
    #[error("Schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },
}

impl EncodeError {
    pub fn invalid_operand(variant: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOperand {
            variant,
            reason: reason.into(),
        }
    }

    /// The error every empty batch produces
    pub fn empty_batch() -> Self {
        Self::invalid_operand("Batch", "batch must contain at least one instruction")
    }

    pub fn schema_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Channel path manipulation errors
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    #[error("Channel path cannot hold more than {max} hops")]
    TooManyHops { max: usize },

    #[error("Channel id 0 cannot be part of a path")]
    ZeroChannel,
}

/// Result type for decode operations
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Result type for encode operations
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = DecodeError::truncated(64, 12, "tuple head");
        assert_eq!(
            err.to_string(),
            "Truncated input: need 64 bytes, got 12 (context: tuple head)"
        );

        let err = DecodeError::UnknownOpcode {
            version: 9,
            opcode: 9,
        };
        assert_eq!(err.to_string(), "Unknown instruction: version 9, opcode 9");
    }

    #[test]
    fn test_ambiguous_keeps_both_candidates() {
        let err = DecodeError::ambiguous(
            DecodeError::malformed(0, "non-canonical offset"),
            DecodeError::truncated(256, 128, "tuple head"),
        );
        match err {
            DecodeError::AmbiguousVariant { v1, v2 } => {
                assert!(matches!(*v1, DecodeError::Malformed { offset: 0, .. }));
                assert!(matches!(*v2, DecodeError::Truncated { need: 256, .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_batch_is_invalid_operand() {
        assert!(matches!(
            EncodeError::empty_batch(),
            EncodeError::InvalidOperand { variant: "Batch", .. }
        ));
    }
}
