//! Strict tuple decoder
//!
//! Parsing is delegated to `ethabi`; canonical form is enforced by encoding
//! the parsed tokens again and comparing with the input.

use super::{check_all, param_types, AbiType, Token, WORD};
use crate::error::{DecodeError, DecodeResult};

/// Decode `data` as a tuple of `schema`, consuming it exactly
pub fn decode_tuple(schema: &[AbiType], data: &[u8]) -> DecodeResult<Vec<Token>> {
    let head_len: usize = schema.iter().map(AbiType::head_size).sum();
    if data.len() < head_len {
        return Err(DecodeError::truncated(head_len, data.len(), "tuple head"));
    }
    if data.len() % WORD != 0 {
        let need = data.len().div_ceil(WORD) * WORD;
        return Err(DecodeError::truncated(need, data.len(), "partial word"));
    }

    let tokens = ethabi::decode(&param_types(schema), data)
        .map_err(|e| DecodeError::malformed(0, format!("invalid tuple layout: {e}")))?;

    let canonical = ethabi::encode(&tokens);
    if canonical != data {
        let at = canonical
            .iter()
            .zip(data)
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| canonical.len().min(data.len()));
        return Err(DecodeError::malformed(
            at,
            format!(
                "non-canonical encoding ({} bytes, canonical form is {})",
                data.len(),
                canonical.len()
            ),
        ));
    }

    check_all(schema, &tokens).map_err(|reason| DecodeError::malformed(0, reason))?;
    Ok(tokens)
}
