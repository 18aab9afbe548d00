use super::Operand;
use crate::abi::{self, encode_tuple, AbiType, Token, TupleReader};
use crate::dispatch::DecodeContext;
use crate::error::{DecodeResult, EncodeResult};
use crate::instruction::Call;
use crate::registry::{Opcode, INSTR_VERSION_0};

/// `(bytes sender, bool eureka, bytes contractAddress, bytes contractCalldata)`
const CALL_FIELDS: [AbiType; 4] = [AbiType::Bytes, AbiType::Bool, AbiType::Bytes, AbiType::Bytes];

impl Operand for Call {
    const VERSION: u8 = INSTR_VERSION_0;
    const OPCODE: Opcode = Opcode::Call;
    const NAME: &'static str = "Call";
    const SCHEMA: &'static [AbiType] = &CALL_FIELDS;

    fn encode_operand(&self) -> EncodeResult<Vec<u8>> {
        encode_tuple(
            Self::SCHEMA,
            &[
                abi::bytes(&self.sender),
                Token::Bool(self.eureka),
                abi::bytes(&self.contract_address),
                abi::bytes(&self.contract_calldata),
            ],
        )
    }

    fn decode_operand_with(operand: &[u8], _ctx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        let mut reader = TupleReader::decode(Self::SCHEMA, operand, Self::NAME)?;
        let call = Call {
            sender: reader.bytes()?,
            eureka: reader.bool()?,
            contract_address: reader.bytes()?,
            contract_calldata: reader.bytes()?,
        };
        reader.finish()?;
        Ok(call)
    }
}
