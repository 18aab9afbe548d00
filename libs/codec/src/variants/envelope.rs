//! Generic `{version, opcode, operand}` envelope

use crate::abi::{self, encode_tuple, AbiType, Token, TupleReader};
use crate::error::{DecodeError, DecodeResult, EncodeResult};
use crate::instruction::RawInstruction;

/// `(uint8 version, uint8 opcode, bytes operand)`
pub const INSTRUCTION_FIELDS: [AbiType; 3] = [AbiType::Uint(8), AbiType::Uint(8), AbiType::Bytes];

/// The envelope as a nested tuple component
pub const INSTRUCTION_TUPLE: AbiType = AbiType::Tuple(&INSTRUCTION_FIELDS);

impl RawInstruction {
    fn fields(&self) -> Vec<Token> {
        vec![
            abi::uint(self.version as u64),
            abi::uint(self.opcode as u64),
            abi::bytes(&self.operand),
        ]
    }

    /// The envelope as a tuple token, for nesting inside a parent operand
    pub fn to_token(&self) -> Token {
        Token::Tuple(self.fields())
    }

    pub(crate) fn from_reader(mut reader: TupleReader) -> DecodeResult<Self> {
        let version = reader.u8()?;
        let opcode = reader.u8()?;
        let operand = reader.bytes()?;
        reader.finish()?;
        Ok(Self {
            version,
            opcode,
            operand,
        })
    }

    /// Convert a nested tuple token back into an envelope
    pub(crate) fn from_token(token: Token, context: &'static str) -> DecodeResult<Self> {
        match token {
            Token::Tuple(tokens) => Self::from_reader(TupleReader::new(tokens, context)),
            other => Err(DecodeError::malformed(
                0,
                format!(
                    "{context}: expected instruction tuple, found {}",
                    abi::token_kind(&other)
                ),
            )),
        }
    }

    /// Encode as a top-level envelope tuple
    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        encode_tuple(&INSTRUCTION_FIELDS, &self.fields())
    }

    /// Decode a top-level envelope without resolving the operand
    pub fn decode(bytes: &[u8]) -> DecodeResult<Self> {
        Self::from_reader(TupleReader::decode(&INSTRUCTION_FIELDS, bytes, "Instruction")?)
    }
}
