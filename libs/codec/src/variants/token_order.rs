//! Token order layouts and the kind-specific metadata of version 2

use super::Operand;
use crate::abi::{self, encode_tuple, AbiType, Token, TupleReader};
use crate::bytes::Bytes;
use crate::dispatch::DecodeContext;
use crate::error::{DecodeError, DecodeResult, EncodeResult};
use crate::instruction::{
    OrderMetadata, SolverMetadata, TokenMetadata, TokenOrderKind, TokenOrderV1, TokenOrderV2,
};
use crate::registry::{Opcode, INSTR_VERSION_1, INSTR_VERSION_2};

/// `(bytes sender, bytes receiver, bytes baseToken, uint256 baseAmount,
/// string baseTokenSymbol, string baseTokenName, uint8 baseTokenDecimals,
/// uint256 baseTokenPath, bytes quoteToken, uint256 quoteAmount)`
const TOKEN_ORDER_V1_FIELDS: [AbiType; 10] = [
    AbiType::Bytes,
    AbiType::Bytes,
    AbiType::Bytes,
    AbiType::Uint(256),
    AbiType::String,
    AbiType::String,
    AbiType::Uint(8),
    AbiType::Uint(256),
    AbiType::Bytes,
    AbiType::Uint(256),
];

/// `(bytes sender, bytes receiver, bytes baseToken, uint256 baseAmount,
/// bytes quoteToken, uint256 quoteAmount, uint8 kind, bytes metadata)`
const TOKEN_ORDER_V2_FIELDS: [AbiType; 8] = [
    AbiType::Bytes,
    AbiType::Bytes,
    AbiType::Bytes,
    AbiType::Uint(256),
    AbiType::Bytes,
    AbiType::Uint(256),
    AbiType::Uint(8),
    AbiType::Bytes,
];

/// Head position of the V2 `kind` word
const KIND_OFFSET: usize = 6 * 32;

/// `(bytes implementation, bytes initializer)`
pub const TOKEN_METADATA_FIELDS: [AbiType; 2] = [AbiType::Bytes, AbiType::Bytes];

/// `(bytes solverAddress, bytes metadata)`
pub const SOLVER_METADATA_FIELDS: [AbiType; 2] = [AbiType::Bytes, AbiType::Bytes];

impl Operand for TokenOrderV1 {
    const VERSION: u8 = INSTR_VERSION_1;
    const OPCODE: Opcode = Opcode::TokenOrder;
    const NAME: &'static str = "TokenOrderV1";
    const SCHEMA: &'static [AbiType] = &TOKEN_ORDER_V1_FIELDS;

    fn encode_operand(&self) -> EncodeResult<Vec<u8>> {
        encode_tuple(
            Self::SCHEMA,
            &[
                abi::bytes(&self.sender),
                abi::bytes(&self.receiver),
                abi::bytes(&self.base_token),
                Token::Uint(self.base_amount),
                abi::string(&self.base_token_symbol),
                abi::string(&self.base_token_name),
                abi::uint(self.base_token_decimals as u64),
                Token::Uint(self.base_token_path),
                abi::bytes(&self.quote_token),
                Token::Uint(self.quote_amount),
            ],
        )
    }

    fn decode_operand_with(operand: &[u8], _ctx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        let mut reader = TupleReader::decode(Self::SCHEMA, operand, Self::NAME)?;
        let order = TokenOrderV1 {
            sender: reader.bytes()?,
            receiver: reader.bytes()?,
            base_token: reader.bytes()?,
            base_amount: reader.uint()?,
            base_token_symbol: reader.string()?,
            base_token_name: reader.string()?,
            base_token_decimals: reader.u8()?,
            base_token_path: reader.uint()?,
            quote_token: reader.bytes()?.into(),
            quote_amount: reader.uint()?,
        };
        reader.finish()?;
        Ok(order)
    }
}

impl Operand for TokenOrderV2 {
    const VERSION: u8 = INSTR_VERSION_2;
    const OPCODE: Opcode = Opcode::TokenOrder;
    const NAME: &'static str = "TokenOrderV2";
    const SCHEMA: &'static [AbiType] = &TOKEN_ORDER_V2_FIELDS;

    fn encode_operand(&self) -> EncodeResult<Vec<u8>> {
        encode_tuple(
            Self::SCHEMA,
            &[
                abi::bytes(&self.sender),
                abi::bytes(&self.receiver),
                abi::bytes(&self.base_token),
                Token::Uint(self.base_amount),
                abi::bytes(&self.quote_token),
                Token::Uint(self.quote_amount),
                abi::uint(u8::from(self.kind) as u64),
                abi::bytes(&self.metadata),
            ],
        )
    }

    fn decode_operand_with(operand: &[u8], _ctx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        let mut reader = TupleReader::decode(Self::SCHEMA, operand, Self::NAME)?;
        let sender = reader.bytes()?;
        let receiver = reader.bytes()?;
        let base_token = reader.bytes()?;
        let base_amount = reader.uint()?;
        let quote_token = reader.bytes()?.into();
        let quote_amount = reader.uint()?;
        let kind = reader.u8()?;
        let kind = TokenOrderKind::try_from(kind).map_err(|_| {
            DecodeError::malformed(KIND_OFFSET, format!("unknown token order kind {kind}"))
        })?;
        let metadata = reader.bytes()?;
        reader.finish()?;

        Ok(TokenOrderV2 {
            sender,
            receiver,
            base_token,
            base_amount,
            quote_token,
            quote_amount,
            kind,
            metadata,
        })
    }
}

impl TokenOrderV2 {
    /// Decode `metadata` according to `kind`
    pub fn typed_metadata(&self) -> DecodeResult<OrderMetadata> {
        OrderMetadata::decode(self.kind, &self.metadata)
    }

    /// Replace kind and metadata with the encoded form of `metadata`
    pub fn with_metadata(mut self, metadata: &OrderMetadata) -> EncodeResult<Self> {
        self.kind = metadata.kind();
        self.metadata = metadata.encode()?;
        Ok(self)
    }
}

impl TokenMetadata {
    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        encode_tuple(
            &TOKEN_METADATA_FIELDS,
            &[
                abi::bytes(&self.implementation),
                abi::bytes(&self.initializer),
            ],
        )
    }

    pub fn decode(bytes: &[u8]) -> DecodeResult<Self> {
        let mut reader = TupleReader::decode(&TOKEN_METADATA_FIELDS, bytes, "TokenMetadata")?;
        let metadata = TokenMetadata {
            implementation: reader.bytes()?,
            initializer: reader.bytes()?,
        };
        reader.finish()?;
        Ok(metadata)
    }
}

impl SolverMetadata {
    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        encode_tuple(
            &SOLVER_METADATA_FIELDS,
            &[
                abi::bytes(&self.solver_address),
                abi::bytes(&self.metadata),
            ],
        )
    }

    pub fn decode(bytes: &[u8]) -> DecodeResult<Self> {
        let mut reader = TupleReader::decode(&SOLVER_METADATA_FIELDS, bytes, "SolverMetadata")?;
        let metadata = SolverMetadata {
            solver_address: reader.bytes()?,
            metadata: reader.bytes()?,
        };
        reader.finish()?;
        Ok(metadata)
    }
}

impl OrderMetadata {
    /// Escrow and Unescrow metadata is carried verbatim
    pub fn decode(kind: TokenOrderKind, bytes: &[u8]) -> DecodeResult<Self> {
        Ok(match kind {
            TokenOrderKind::Initialize => OrderMetadata::Initialize(TokenMetadata::decode(bytes)?),
            TokenOrderKind::Escrow => OrderMetadata::Escrow { raw: bytes.into() },
            TokenOrderKind::Unescrow => OrderMetadata::Unescrow { raw: bytes.into() },
            TokenOrderKind::Solve => OrderMetadata::Solve(SolverMetadata::decode(bytes)?),
        })
    }

    pub fn encode(&self) -> EncodeResult<Bytes> {
        Ok(match self {
            OrderMetadata::Initialize(metadata) => metadata.encode()?.into(),
            OrderMetadata::Escrow { raw } | OrderMetadata::Unescrow { raw } => raw.clone(),
            OrderMetadata::Solve(metadata) => metadata.encode()?.into(),
        })
    }
}
