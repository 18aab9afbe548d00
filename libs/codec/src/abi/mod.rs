//! # ABI Tuple Codec - Primitive Wire Layer
//!
//! ## Purpose
//!
//! Encodes and decodes the Ethereum ABI tuple layout used by every UCS03
//! structure: a 32-byte aligned head region holding static values inline and
//! offsets for dynamic values, followed by a tail region holding the dynamic
//! values themselves.
//!
//! ```text
//! (uint8 version, uint8 opcode, bytes operand)
//!
//! 0x00  version            ─┐
//! 0x20  opcode              │ head
//! 0x40  offset = 0x60      ─┘
//! 0x60  operand length     ─┐ tail
//! 0x80  operand data ...   ─┘ (zero padded to 32 bytes)
//! ```
//!
//! The byte layout itself is produced and parsed by `ethabi`; values are
//! [`ethabi::Token`]s. This module adds what `ethabi` leaves to the caller.
//!
//! ## Canonical Decoding
//!
//! `ethabi` is lenient: it follows any in-bounds offset, ignores trailing
//! bytes and does not check `uint<N>` widths. The decoder here re-encodes
//! every successful parse and rejects input that does not reproduce itself
//! byte for byte, then checks integer widths against the schema. Any byte
//! sequence that decodes therefore re-encodes to itself.
//!
//! Schemas are `'static` constants built from [`AbiType`] and converted to
//! [`ethabi::ParamType`] on use; there is no runtime lookup into ABI JSON.

mod decoder;
mod encoder;

pub use decoder::decode_tuple;
pub use encoder::encode_tuple;
pub use ethabi::Token;

use crate::bytes::Bytes;
use crate::error::{DecodeError, DecodeResult};
use ethabi::ParamType;
use ethereum_types::U256;
use std::fmt;

/// Size of an ABI word
pub const WORD: usize = 32;

/// Wire type of a tuple component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiType {
    /// Unsigned integer of the given bit width (8..=256)
    Uint(usize),
    Bool,
    /// `bytes32`
    FixedBytes32,
    Bytes,
    String,
    /// Dynamic array `T[]`
    Array(&'static AbiType),
    Tuple(&'static [AbiType]),
}

impl AbiType {
    /// Whether the value lives in the tail region
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Bytes | AbiType::String | AbiType::Array(_) => true,
            AbiType::Tuple(fields) => fields.iter().any(AbiType::is_dynamic),
            _ => false,
        }
    }

    /// Bytes this type occupies in its enclosing head region
    pub fn head_size(&self) -> usize {
        match self {
            AbiType::Tuple(fields) if !self.is_dynamic() => {
                fields.iter().map(AbiType::head_size).sum()
            }
            _ => WORD,
        }
    }

    /// The `ethabi` parameter type for this schema node
    pub fn param_type(&self) -> ParamType {
        match self {
            AbiType::Uint(bits) => ParamType::Uint(*bits),
            AbiType::Bool => ParamType::Bool,
            AbiType::FixedBytes32 => ParamType::FixedBytes(WORD),
            AbiType::Bytes => ParamType::Bytes,
            AbiType::String => ParamType::String,
            AbiType::Array(inner) => ParamType::Array(Box::new(inner.param_type())),
            AbiType::Tuple(fields) => ParamType::Tuple(param_types(fields)),
        }
    }

    /// Check `token` against this type, including `uint<N>` width and the
    /// `bytes32` length; returns a description of the first violation
    pub(crate) fn check(&self, token: &Token) -> Result<(), String> {
        match (self, token) {
            (AbiType::Uint(bits), Token::Uint(value)) => {
                if value.bits() > *bits {
                    return Err(format!("value {value} exceeds {self}"));
                }
                Ok(())
            }
            (AbiType::Bool, Token::Bool(_))
            | (AbiType::Bytes, Token::Bytes(_))
            | (AbiType::String, Token::String(_)) => Ok(()),
            (AbiType::FixedBytes32, Token::FixedBytes(word)) if word.len() == WORD => Ok(()),
            (AbiType::Array(inner), Token::Array(items)) => {
                items.iter().try_for_each(|item| inner.check(item))
            }
            (AbiType::Tuple(fields), Token::Tuple(items)) => check_all(fields, items),
            (ty, token) => Err(format!("expected {ty}, found {}", token_kind(token))),
        }
    }
}

pub fn uint(value: impl Into<U256>) -> Token {
    Token::Uint(value.into())
}

pub fn bytes(value: &[u8]) -> Token {
    Token::Bytes(value.to_vec())
}

pub fn string(value: &str) -> Token {
    Token::String(value.to_owned())
}

/// Convert a whole schema to `ethabi` parameter types
pub fn param_types(schema: &[AbiType]) -> Vec<ParamType> {
    schema.iter().map(AbiType::param_type).collect()
}

pub(crate) fn check_all(schema: &[AbiType], tokens: &[Token]) -> Result<(), String> {
    if schema.len() != tokens.len() {
        return Err(format!(
            "expected {} tuple components, found {}",
            schema.len(),
            tokens.len()
        ));
    }
    schema
        .iter()
        .zip(tokens)
        .try_for_each(|(ty, token)| ty.check(token))
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Uint(bits) => write!(f, "uint{bits}"),
            AbiType::Bool => f.write_str("bool"),
            AbiType::FixedBytes32 => f.write_str("bytes32"),
            AbiType::Bytes => f.write_str("bytes"),
            AbiType::String => f.write_str("string"),
            AbiType::Array(inner) => write!(f, "{inner}[]"),
            AbiType::Tuple(fields) => {
                f.write_str("(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Short name of a token kind, used in mismatch diagnostics
pub fn token_kind(token: &Token) -> &'static str {
    match token {
        Token::Address(_) => "address",
        Token::FixedBytes(_) => "bytesN",
        Token::Bytes(_) => "bytes",
        Token::Int(_) => "int",
        Token::Uint(_) => "uint",
        Token::Bool(_) => "bool",
        Token::String(_) => "string",
        Token::FixedArray(_) => "T[N]",
        Token::Array(_) => "array",
        Token::Tuple(_) => "tuple",
    }
}

/// Sequential typed access to the components of a decoded tuple
///
/// Variant decoders read fields in schema order. A type mismatch can only
/// happen if a decoder reads against the wrong schema, and is reported as
/// `Malformed` rather than panicking.
#[derive(Debug)]
pub struct TupleReader {
    tokens: std::vec::IntoIter<Token>,
    context: &'static str,
}

impl TupleReader {
    pub fn new(tokens: Vec<Token>, context: &'static str) -> Self {
        Self {
            tokens: tokens.into_iter(),
            context,
        }
    }

    /// Decode `data` against `schema` and wrap the result
    pub fn decode(
        schema: &[AbiType],
        data: &[u8],
        context: &'static str,
    ) -> DecodeResult<Self> {
        Ok(Self::new(decode_tuple(schema, data)?, context))
    }

    fn next(&mut self, expected: &str) -> DecodeResult<Token> {
        self.tokens.next().ok_or_else(|| {
            DecodeError::malformed(0, format!("{}: missing {expected} field", self.context))
        })
    }

    fn mismatch(&self, expected: &str, found: &Token) -> DecodeError {
        DecodeError::malformed(
            0,
            format!(
                "{}: expected {expected}, found {}",
                self.context,
                token_kind(found)
            ),
        )
    }

    pub fn uint(&mut self) -> DecodeResult<U256> {
        match self.next("uint")? {
            Token::Uint(value) => Ok(value),
            other => Err(self.mismatch("uint", &other)),
        }
    }

    pub fn u64(&mut self) -> DecodeResult<u64> {
        let value = self.uint()?;
        if value.bits() > 64 {
            return Err(DecodeError::malformed(
                0,
                format!("{}: value {value} exceeds uint64", self.context),
            ));
        }
        Ok(value.low_u64())
    }

    pub fn u8(&mut self) -> DecodeResult<u8> {
        let value = self.uint()?;
        if value.bits() > 8 {
            return Err(DecodeError::malformed(
                0,
                format!("{}: value {value} exceeds uint8", self.context),
            ));
        }
        Ok(value.low_u32() as u8)
    }

    pub fn bool(&mut self) -> DecodeResult<bool> {
        match self.next("bool")? {
            Token::Bool(value) => Ok(value),
            other => Err(self.mismatch("bool", &other)),
        }
    }

    pub fn word(&mut self) -> DecodeResult<[u8; 32]> {
        match self.next("bytes32")? {
            Token::FixedBytes(value) => match <[u8; 32]>::try_from(value.as_slice()) {
                Ok(word) => Ok(word),
                Err(_) => Err(DecodeError::malformed(
                    0,
                    format!("{}: bytes32 of {} bytes", self.context, value.len()),
                )),
            },
            other => Err(self.mismatch("bytes32", &other)),
        }
    }

    pub fn bytes(&mut self) -> DecodeResult<Bytes> {
        match self.next("bytes")? {
            Token::Bytes(value) => Ok(value.into()),
            other => Err(self.mismatch("bytes", &other)),
        }
    }

    pub fn string(&mut self) -> DecodeResult<String> {
        match self.next("string")? {
            Token::String(value) => Ok(value),
            other => Err(self.mismatch("string", &other)),
        }
    }

    pub fn tuple(&mut self) -> DecodeResult<TupleReader> {
        match self.next("tuple")? {
            Token::Tuple(tokens) => Ok(TupleReader::new(tokens, self.context)),
            other => Err(self.mismatch("tuple", &other)),
        }
    }

    pub fn array(&mut self) -> DecodeResult<Vec<Token>> {
        match self.next("array")? {
            Token::Array(tokens) => Ok(tokens),
            other => Err(self.mismatch("array", &other)),
        }
    }

    /// Assert every component was consumed
    pub fn finish(mut self) -> DecodeResult<()> {
        match self.tokens.next() {
            None => Ok(()),
            Some(extra) => Err(DecodeError::malformed(
                0,
                format!(
                    "{}: unexpected trailing {} field",
                    self.context,
                    token_kind(&extra)
                ),
            )),
        }
    }
}
