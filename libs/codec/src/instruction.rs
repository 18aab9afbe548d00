//! # Instruction Tree Model
//!
//! Plain data for every UCS03 instruction. Encoding and decoding live in
//! [`crate::variants`]; this module only defines the shapes, their fixed
//! version/opcode pairs and structural equality.
//!
//! `Forward` owns its nested instruction through a `Box` and `Batch` owns a
//! `Vec`, so arbitrarily deep trees are expressible; the decode side bounds
//! the depth through [`crate::config::DecodeLimits`].

use crate::address::ChecksumAddress;
use crate::bytes::Bytes;
use crate::error::{EncodeError, EncodeResult};
use crate::registry::{Opcode, INSTR_VERSION_0, INSTR_VERSION_1, INSTR_VERSION_2};
use ethereum_types::U256;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// A UCS03 instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instruction {
    /// Untyped `{version, opcode, operand}` envelope
    Raw(RawInstruction),
    Forward(Forward),
    Call(Call),
    Batch(Batch),
    TokenOrderV1(TokenOrderV1),
    TokenOrderV2(TokenOrderV2),
}

impl Instruction {
    pub fn forward(
        path: U256,
        timeout_height: u64,
        timeout_timestamp: u64,
        instruction: Instruction,
    ) -> Self {
        Instruction::Forward(Forward::new(
            path,
            timeout_height,
            timeout_timestamp,
            instruction,
        ))
    }

    pub fn call(
        sender: impl Into<Bytes>,
        eureka: bool,
        contract_address: impl Into<Bytes>,
        contract_calldata: impl Into<Bytes>,
    ) -> Self {
        Instruction::Call(Call::new(sender, eureka, contract_address, contract_calldata))
    }

    pub fn batch(instructions: Vec<Instruction>) -> Self {
        Instruction::Batch(Batch::new(instructions))
    }

    pub fn token_order_v1(order: TokenOrderV1) -> Self {
        Instruction::TokenOrderV1(order)
    }

    pub fn token_order_v2(order: TokenOrderV2) -> Self {
        Instruction::TokenOrderV2(order)
    }

    pub fn raw(version: u8, opcode: u8, operand: impl Into<Bytes>) -> Self {
        Instruction::Raw(RawInstruction::new(version, opcode, operand))
    }

    pub fn version(&self) -> u8 {
        match self {
            Instruction::Raw(raw) => raw.version,
            Instruction::Forward(_) | Instruction::Call(_) | Instruction::Batch(_) => {
                INSTR_VERSION_0
            }
            Instruction::TokenOrderV1(_) => INSTR_VERSION_1,
            Instruction::TokenOrderV2(_) => INSTR_VERSION_2,
        }
    }

    pub fn opcode(&self) -> u8 {
        match self {
            Instruction::Raw(raw) => raw.opcode,
            Instruction::Forward(_) => Opcode::Forward.into(),
            Instruction::Call(_) => Opcode::Call.into(),
            Instruction::Batch(_) => Opcode::Batch.into(),
            Instruction::TokenOrderV1(_) | Instruction::TokenOrderV2(_) => {
                Opcode::TokenOrder.into()
            }
        }
    }

    /// Variant name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::Raw(_) => "Instruction",
            Instruction::Forward(_) => "Forward",
            Instruction::Call(_) => "Call",
            Instruction::Batch(_) => "Batch",
            Instruction::TokenOrderV1(_) => "TokenOrderV1",
            Instruction::TokenOrderV2(_) => "TokenOrderV2",
        }
    }

    pub fn is_token_order(&self) -> bool {
        matches!(
            self,
            Instruction::TokenOrderV1(_) | Instruction::TokenOrderV2(_)
        )
    }
}

/// Generic wire envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInstruction {
    pub version: u8,
    pub opcode: u8,
    pub operand: Bytes,
}

impl RawInstruction {
    pub fn new(version: u8, opcode: u8, operand: impl Into<Bytes>) -> Self {
        Self {
            version,
            opcode,
            operand: operand.into(),
        }
    }
}

/// Forward the nested instruction along `path` (opcode 0, version 0)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forward {
    /// Channel hops, see [`crate::path::ChannelPath`]
    pub path: U256,
    pub timeout_height: u64,
    pub timeout_timestamp: u64,
    pub instruction: Box<Instruction>,
}

impl Forward {
    pub fn new(
        path: U256,
        timeout_height: u64,
        timeout_timestamp: u64,
        instruction: Instruction,
    ) -> Self {
        Self {
            path,
            timeout_height,
            timeout_timestamp,
            instruction: Box::new(instruction),
        }
    }
}

/// Call a contract on the destination chain (opcode 1, version 0)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub sender: Bytes,
    /// IBC-eureka style call (raw calldata, no wrapping)
    pub eureka: bool,
    pub contract_address: Bytes,
    pub contract_calldata: Bytes,
}

impl Call {
    pub fn new(
        sender: impl Into<Bytes>,
        eureka: bool,
        contract_address: impl Into<Bytes>,
        contract_calldata: impl Into<Bytes>,
    ) -> Self {
        Self {
            sender: sender.into(),
            eureka,
            contract_address: contract_address.into(),
            contract_calldata: contract_calldata.into(),
        }
    }
}

/// Execute the nested instructions atomically (opcode 2, version 0)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub instructions: Vec<Instruction>,
}

impl Batch {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Protocol-level check that every child is a Call or a TokenOrder
    ///
    /// The wire format permits any nested instruction and the codec encodes
    /// and decodes them all; executing chains reject batches that nest
    /// Forward or Batch.
    pub fn validate_leaf_instructions(&self) -> EncodeResult<()> {
        if self.is_empty() {
            return Err(EncodeError::empty_batch());
        }
        for (index, child) in self.instructions.iter().enumerate() {
            if !(matches!(child, Instruction::Call(_)) || child.is_token_order()) {
                return Err(EncodeError::invalid_operand(
                    "Batch",
                    format!("instruction {index} is a {}, expected Call or TokenOrder", child.name()),
                ));
            }
        }
        Ok(())
    }
}

/// Legacy fungible asset order (opcode 3, version 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOrderV1 {
    pub sender: Bytes,
    pub receiver: Bytes,
    pub base_token: Bytes,
    pub base_amount: U256,
    pub base_token_symbol: String,
    pub base_token_name: String,
    pub base_token_decimals: u8,
    /// Unwrap provenance of the base token
    pub base_token_path: U256,
    pub quote_token: ChecksumAddress,
    pub quote_amount: U256,
}

/// How the destination settles a [`TokenOrderV2`]
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
pub enum TokenOrderKind {
    /// Deploy the wrapped token described by the metadata, then mint
    Initialize = 0,
    Escrow = 1,
    Unescrow = 2,
    /// Filled by the solver named in the metadata
    Solve = 3,
}

/// Token order with explicit settlement kind (opcode 3, version 2)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOrderV2 {
    pub sender: Bytes,
    pub receiver: Bytes,
    pub base_token: Bytes,
    pub base_amount: U256,
    pub quote_token: ChecksumAddress,
    pub quote_amount: U256,
    pub kind: TokenOrderKind,
    /// Kind-specific payload, see [`OrderMetadata`]
    pub metadata: Bytes,
}

/// Wrapped token deployment parameters (kind Initialize)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub implementation: Bytes,
    pub initializer: Bytes,
}

/// Solver selection (kind Solve)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverMetadata {
    pub solver_address: Bytes,
    pub metadata: Bytes,
}

/// Typed view of [`TokenOrderV2::metadata`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderMetadata {
    Initialize(TokenMetadata),
    Escrow { raw: Bytes },
    Unescrow { raw: Bytes },
    Solve(SolverMetadata),
}

impl OrderMetadata {
    pub fn kind(&self) -> TokenOrderKind {
        match self {
            OrderMetadata::Initialize(_) => TokenOrderKind::Initialize,
            OrderMetadata::Escrow { .. } => TokenOrderKind::Escrow,
            OrderMetadata::Unescrow { .. } => TokenOrderKind::Unescrow,
            OrderMetadata::Solve(_) => TokenOrderKind::Solve,
        }
    }
}

macro_rules! impl_into_instruction {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Instruction {
                fn from(value: $variant) -> Self {
                    Instruction::$variant(value)
                }
            }
        )*
    };
}

impl_into_instruction!(Forward, Call, Batch, TokenOrderV1, TokenOrderV2);

impl From<RawInstruction> for Instruction {
    fn from(value: RawInstruction) -> Self {
        Instruction::Raw(value)
    }
}
