use super::envelope::INSTRUCTION_TUPLE;
use super::Operand;
use crate::abi::{encode_tuple, AbiType, Token, TupleReader};
use crate::dispatch::{self, DecodeContext};
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::instruction::{Batch, RawInstruction};
use crate::registry::{Opcode, INSTR_VERSION_0};

/// `(Instruction[] instructions)`
const BATCH_FIELDS: [AbiType; 1] = [AbiType::Array(&INSTRUCTION_TUPLE)];

impl Operand for Batch {
    const VERSION: u8 = INSTR_VERSION_0;
    const OPCODE: Opcode = Opcode::Batch;
    const NAME: &'static str = "Batch";
    const SCHEMA: &'static [AbiType] = &BATCH_FIELDS;

    fn encode_operand(&self) -> EncodeResult<Vec<u8>> {
        if self.instructions.is_empty() {
            return Err(EncodeError::empty_batch());
        }
        let children = self
            .instructions
            .iter()
            .map(|child| child.to_raw().map(|raw| raw.to_token()))
            .collect::<EncodeResult<Vec<_>>>()?;
        encode_tuple(Self::SCHEMA, &[Token::Array(children)])
    }

    fn decode_operand_with(operand: &[u8], ctx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        let mut reader = TupleReader::decode(Self::SCHEMA, operand, Self::NAME)?;
        let children = reader.array()?;
        reader.finish()?;

        if children.is_empty() {
            return Err(DecodeError::EmptyBatch);
        }
        ctx.check_batch_len(children.len())?;

        let instructions = children
            .into_iter()
            .map(|child| {
                let raw = RawInstruction::from_token(child, Self::NAME)?;
                dispatch::decode_raw(&raw, ctx)
            })
            .collect::<DecodeResult<Vec<_>>>()?;
        Ok(Batch::new(instructions))
    }
}
