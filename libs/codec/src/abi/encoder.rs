//! Schema-checked tuple encoder

use super::{check_all, AbiType, Token};
use crate::error::{EncodeError, EncodeResult};

/// Encode `values` as a tuple of `schema`
///
/// `ethabi` writes whatever tokens it is given, so the values are checked
/// against the schema first: arity, kinds and `uint<N>` widths.
pub fn encode_tuple(schema: &[AbiType], values: &[Token]) -> EncodeResult<Vec<u8>> {
    check_all(schema, values)
        .map_err(|reason| EncodeError::schema_mismatch(signature(schema), reason))?;
    Ok(ethabi::encode(values))
}

fn signature(schema: &[AbiType]) -> String {
    let fields: Vec<String> = schema.iter().map(ToString::to_string).collect();
    format!("({})", fields.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::WORD;
    use ethereum_types::U256;
    use hex_literal::hex;

    const ENVELOPE: [AbiType; 3] = [AbiType::Uint(8), AbiType::Uint(8), AbiType::Bytes];

    fn uint(value: u64) -> Token {
        Token::Uint(U256::from(value))
    }

    #[test]
    fn test_envelope_layout() {
        let encoded =
            encode_tuple(&ENVELOPE, &[uint(2), uint(3), Token::Bytes(vec![0xAB, 0xCD])]).unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(&hex!(
            "0000000000000000000000000000000000000000000000000000000000000002"
            "0000000000000000000000000000000000000000000000000000000000000003"
            "0000000000000000000000000000000000000000000000000000000000000060"
            "0000000000000000000000000000000000000000000000000000000000000002"
            "abcd000000000000000000000000000000000000000000000000000000000000"
        ));
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_empty_bytes_has_no_data_word() {
        let encoded = encode_tuple(&[AbiType::Bytes], &[Token::Bytes(vec![])]).unwrap();
        assert_eq!(encoded.len(), 2 * WORD);
    }

    #[test]
    fn test_uint_width_enforced() {
        let err = encode_tuple(&[AbiType::Uint(8)], &[uint(256)]).unwrap_err();
        assert!(matches!(err, EncodeError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_kind_mismatch() {
        let err = encode_tuple(&[AbiType::Bool], &[Token::String("x".into())]).unwrap_err();
        assert_eq!(
            err,
            EncodeError::schema_mismatch("(bool)", "expected bool, found string")
        );
    }

    #[test]
    fn test_arity_mismatch() {
        assert!(encode_tuple(&ENVELOPE, &[uint(1)]).is_err());
    }
}
