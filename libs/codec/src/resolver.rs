//! TokenOrder layout resolution
//!
//! Opcode 3 is registered under both version 1 and version 2. The operand is
//! tried against the V1 layout first and the V2 layout second; the first
//! layout that decodes cleanly and whose version matches the envelope wins.
//! Canonical decoding makes the two layouts disjoint (their first offsets
//! differ), so at most one ever succeeds. A layout decoded under the other
//! version's envelope would re-encode with a different version byte, so it
//! counts as that candidate's failure.

use crate::dispatch::DecodeContext;
use crate::error::{DecodeError, DecodeResult};
use crate::instruction::{Instruction, RawInstruction, TokenOrderV1, TokenOrderV2};
use crate::variants::Operand;
use tracing::trace;

/// Decode a TokenOrder envelope as V1, falling back to V2
pub fn decode_token_order(
    raw: &RawInstruction,
    ctx: &mut DecodeContext<'_>,
) -> DecodeResult<Instruction> {
    let v1 = match attempt::<TokenOrderV1>(raw, ctx) {
        Ok(order) => {
            trace!(layout = "v1", "token order resolved");
            return Ok(Instruction::TokenOrderV1(order));
        }
        Err(err) => err,
    };
    trace!(error = %v1, "token order is not a V1 layout");

    let v2 = match attempt::<TokenOrderV2>(raw, ctx) {
        Ok(order) => {
            trace!(layout = "v2", "token order resolved");
            return Ok(Instruction::TokenOrderV2(order));
        }
        Err(err) => err,
    };
    trace!(error = %v2, "token order is not a V2 layout");

    Err(DecodeError::ambiguous(v1, v2))
}

/// Decode one candidate layout and hold it to the envelope version
fn attempt<T: Operand>(raw: &RawInstruction, ctx: &mut DecodeContext<'_>) -> DecodeResult<T> {
    let order = T::decode_operand_with(&raw.operand, ctx)?;
    if raw.version != T::VERSION {
        return Err(DecodeError::malformed(
            0,
            format!(
                "{} layout under instruction version {}, expected {}",
                T::NAME,
                raw.version,
                T::VERSION
            ),
        ));
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecodeLimits;
    use crate::instruction::TokenOrderKind;
    use crate::registry::{INSTR_VERSION_1, INSTR_VERSION_2};
    use ethereum_types::U256;

    fn resolve(version: u8, operand: Vec<u8>) -> DecodeResult<Instruction> {
        let limits = DecodeLimits::default();
        let raw = RawInstruction::new(version, 3, operand);
        decode_token_order(&raw, &mut DecodeContext::new(&limits))
    }

    fn v1() -> TokenOrderV1 {
        TokenOrderV1 {
            sender: vec![1; 20].into(),
            receiver: vec![2; 20].into(),
            base_token: vec![3; 20].into(),
            base_amount: U256::from(10u64),
            base_token_symbol: "WETH".into(),
            base_token_name: "Wrapped Ether".into(),
            base_token_decimals: 18,
            base_token_path: U256::zero(),
            quote_token: [4; 20].into(),
            quote_amount: U256::from(10u64),
        }
    }

    fn v2() -> TokenOrderV2 {
        TokenOrderV2 {
            sender: vec![1; 20].into(),
            receiver: vec![2; 20].into(),
            base_token: vec![3; 20].into(),
            base_amount: U256::from(10u64),
            quote_token: [4; 20].into(),
            quote_amount: U256::from(10u64),
            kind: TokenOrderKind::Escrow,
            metadata: vec![].into(),
        }
    }

    #[test]
    fn test_v1_resolves() {
        let decoded = resolve(INSTR_VERSION_1, v1().encode_operand().unwrap()).unwrap();
        assert_eq!(decoded, Instruction::TokenOrderV1(v1()));
    }

    #[test]
    fn test_v2_resolves() {
        let decoded = resolve(INSTR_VERSION_2, v2().encode_operand().unwrap()).unwrap();
        assert_eq!(decoded, Instruction::TokenOrderV2(v2()));
    }

    #[test]
    fn test_v1_layout_under_version_2_rejected() {
        match resolve(INSTR_VERSION_2, v1().encode_operand().unwrap()).unwrap_err() {
            DecodeError::AmbiguousVariant { v1, v2 } => {
                assert!(matches!(*v1, DecodeError::Malformed { offset: 0, .. }));
                assert!(v1.to_string().contains("TokenOrderV1 layout under instruction version 2"));
                assert!(v2.is_structural());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_v2_layout_under_version_1_rejected() {
        match resolve(INSTR_VERSION_1, v2().encode_operand().unwrap()).unwrap_err() {
            DecodeError::AmbiguousVariant { v1, v2 } => {
                assert!(v1.is_structural());
                assert!(v2.to_string().contains("TokenOrderV2 layout under instruction version 1"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_neither_layout_reports_both() {
        match resolve(INSTR_VERSION_1, vec![0u8; 31]).unwrap_err() {
            DecodeError::AmbiguousVariant { v1, v2 } => {
                assert!(matches!(*v1, DecodeError::Truncated { .. }));
                assert!(matches!(*v2, DecodeError::Truncated { .. }));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
