use super::envelope::INSTRUCTION_TUPLE;
use super::Operand;
use crate::abi::{self, encode_tuple, AbiType, Token, TupleReader};
use crate::dispatch::{self, DecodeContext};
use crate::error::{DecodeResult, EncodeResult};
use crate::instruction::{Forward, RawInstruction};
use crate::registry::{Opcode, INSTR_VERSION_0};

/// `(uint256 path, uint64 timeoutHeight, uint64 timeoutTimestamp, Instruction instruction)`
const FORWARD_FIELDS: [AbiType; 4] = [
    AbiType::Uint(256),
    AbiType::Uint(64),
    AbiType::Uint(64),
    INSTRUCTION_TUPLE,
];

impl Operand for Forward {
    const VERSION: u8 = INSTR_VERSION_0;
    const OPCODE: Opcode = Opcode::Forward;
    const NAME: &'static str = "Forward";
    const SCHEMA: &'static [AbiType] = &FORWARD_FIELDS;

    fn encode_operand(&self) -> EncodeResult<Vec<u8>> {
        let nested = self.instruction.to_raw()?;
        encode_tuple(
            Self::SCHEMA,
            &[
                Token::Uint(self.path),
                abi::uint(self.timeout_height),
                abi::uint(self.timeout_timestamp),
                nested.to_token(),
            ],
        )
    }

    fn decode_operand_with(operand: &[u8], ctx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        let mut reader = TupleReader::decode(Self::SCHEMA, operand, Self::NAME)?;
        let path = reader.uint()?;
        let timeout_height = reader.u64()?;
        let timeout_timestamp = reader.u64()?;
        let nested = RawInstruction::from_reader(reader.tuple()?)?;
        reader.finish()?;

        let instruction = dispatch::decode_raw(&nested, ctx)?;
        Ok(Forward::new(
            path,
            timeout_height,
            timeout_timestamp,
            instruction,
        ))
    }
}
