//! # UCS03 Codec Integration Tests
//!
//! End-to-end behaviour of the public API:
//! - Batch and Forward trees round-trip to typed variants
//! - Decode errors carry the documented kinds
//! - Encoding is deterministic and decoding is canonical

use ethereum_types::U256;
use ucs03_codec::address::to_checksum;
use ucs03_codec::{
    decode_instruction, decode_instruction_with, decode_packet, encode_instruction,
    encode_packet, Batch, Call, DecodeError, DecodeLimits, EncodeError, Forward, Instruction,
    Operand, Packet, RawInstruction, TokenOrderKind, TokenOrderV1, TokenOrderV2,
};

fn sample_order_v1() -> TokenOrderV1 {
    TokenOrderV1 {
        sender: vec![0xAA; 20].into(),
        receiver: vec![0xBB; 20].into(),
        base_token: vec![0xCC; 20].into(),
        base_amount: U256::from(1000u64),
        base_token_symbol: "U".into(),
        base_token_name: "Union".into(),
        base_token_decimals: 6,
        base_token_path: U256::zero(),
        quote_token: [0xDD; 20].into(),
        quote_amount: U256::from(900u64),
    }
}

fn sample_call() -> Call {
    Call::new(vec![0xAA; 20], false, vec![0xBB; 20], vec![0xDE, 0xAD, 0xBE, 0xEF])
}

#[test]
fn test_batch_of_two_token_orders() {
    let batch = Instruction::batch(vec![
        Instruction::token_order_v1(sample_order_v1()),
        Instruction::token_order_v1(sample_order_v1()),
    ]);
    let bytes = encode_instruction(&batch).unwrap();

    let decoded = decode_instruction(&bytes).unwrap();
    let Instruction::Batch(Batch { instructions }) = &decoded else {
        panic!("expected a batch, got {decoded:?}");
    };
    assert_eq!(instructions.len(), 2);
    for child in instructions {
        let Instruction::TokenOrderV1(order) = child else {
            panic!("expected a TokenOrderV1, got {child:?}");
        };
        assert_eq!(order, &sample_order_v1());
        assert_eq!(order.base_amount, U256::from(1000u64));
        assert_eq!(order.base_token_symbol, "U");
        assert_eq!(order.base_token_name, "Union");
        assert_eq!(order.base_token_decimals, 6);

        let rendered = order.quote_token.to_string();
        assert_eq!(rendered, to_checksum(&[0xDD; 20]));
        assert!(rendered.eq_ignore_ascii_case(&format!("0x{}", "dd".repeat(20))));
    }
}

#[test]
fn test_forward_wrapping_call() {
    let forward = Forward::new(U256::one(), 100, 200, sample_call().into());
    let bytes = forward.encode().unwrap();

    let decoded = decode_instruction(&bytes).unwrap();
    let Instruction::Forward(decoded) = decoded else {
        panic!("expected a forward");
    };
    assert_eq!(decoded.path, U256::one());
    assert_eq!(decoded.timeout_height, 100);
    assert_eq!(decoded.timeout_timestamp, 200);
    assert_eq!(*decoded.instruction, Instruction::Call(sample_call()));
}

#[test]
fn test_unknown_opcode() {
    let bytes = RawInstruction::new(9, 9, vec![]).encode().unwrap();
    assert_eq!(
        decode_instruction(&bytes).unwrap_err(),
        DecodeError::UnknownOpcode {
            version: 9,
            opcode: 9
        }
    );
}

#[test]
fn test_version_mismatch_is_unknown() {
    // Call is only registered under version 0
    let operand = sample_call().encode_operand().unwrap();
    let bytes = RawInstruction::new(1, 1, operand).encode().unwrap();
    assert!(matches!(
        decode_instruction(&bytes),
        Err(DecodeError::UnknownOpcode {
            version: 1,
            opcode: 1
        })
    ));
}

#[test]
fn test_empty_batch() {
    assert!(matches!(
        encode_instruction(&Instruction::batch(vec![])),
        Err(EncodeError::InvalidOperand { variant: "Batch", .. })
    ));

    // (offset 0x20, length 0) under version 0, opcode 2
    let mut operand = vec![0u8; 64];
    operand[31] = 0x20;
    let bytes = RawInstruction::new(0, 2, operand).encode().unwrap();
    assert_eq!(decode_instruction(&bytes).unwrap_err(), DecodeError::EmptyBatch);
}

#[test]
fn test_encoding_is_deterministic() {
    let tree = Instruction::forward(
        U256::from(7u64),
        1,
        2,
        Instruction::batch(vec![
            sample_call().into(),
            Instruction::token_order_v1(sample_order_v1()),
        ]),
    );
    let first = encode_instruction(&tree).unwrap();
    let second = encode_instruction(&tree.clone()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_every_prefix_fails_structurally() {
    let tree = Instruction::forward(
        U256::one(),
        100,
        200,
        Instruction::batch(vec![Instruction::token_order_v1(sample_order_v1())]),
    );
    let bytes = encode_instruction(&tree).unwrap();
    for len in 0..bytes.len() {
        let err = decode_instruction(&bytes[..len]).unwrap_err();
        assert!(err.is_structural(), "prefix of {len} bytes gave {err:?}");
    }
}

#[test]
fn test_trailing_byte_rejected() {
    let mut bytes = encode_instruction(&sample_call().into()).unwrap();
    bytes.push(0);
    assert!(matches!(
        decode_instruction(&bytes),
        Err(DecodeError::Malformed { .. })
    ));
}

#[test]
fn test_token_order_v2_resolves_under_version_2() {
    let order = TokenOrderV2 {
        sender: vec![0x01; 20].into(),
        receiver: vec![0x02; 32].into(),
        base_token: vec![0x03; 20].into(),
        base_amount: U256::from(10u64).pow(U256::from(18u64)),
        quote_token: vec![0x04; 32].into(),
        quote_amount: U256::from(1u64),
        kind: TokenOrderKind::Unescrow,
        metadata: vec![].into(),
    };
    let bytes = order.encode().unwrap();
    assert_eq!(bytes[31], 2);
    assert_eq!(
        decode_instruction(&bytes).unwrap(),
        Instruction::TokenOrderV2(order)
    );
}

fn sample_order_v2() -> TokenOrderV2 {
    TokenOrderV2 {
        sender: vec![0x01; 20].into(),
        receiver: vec![0x02; 32].into(),
        base_token: vec![0x03; 20].into(),
        base_amount: U256::from(42u64),
        quote_token: vec![0x04; 20].into(),
        quote_amount: U256::from(41u64),
        kind: TokenOrderKind::Escrow,
        metadata: vec![0x05; 3].into(),
    }
}

#[test]
fn test_token_order_under_other_version_rejected() {
    let swapped = [
        (2u8, sample_order_v1().encode_operand().unwrap()),
        (1u8, sample_order_v2().encode_operand().unwrap()),
    ];
    for (version, operand) in swapped {
        let bytes = RawInstruction::new(version, 3, operand).encode().unwrap();
        match decode_instruction(&bytes) {
            Err(DecodeError::AmbiguousVariant { v1, v2 }) => {
                assert!(v1.is_structural(), "v1 candidate gave {v1:?}");
                assert!(v2.is_structural(), "v2 candidate gave {v2:?}");
            }
            other => panic!("version {version} envelope gave {other:?}"),
        }
    }
}

#[test]
fn test_accepted_token_orders_re_encode_exactly() {
    let observed = [
        sample_order_v1().encode().unwrap(),
        sample_order_v2().encode().unwrap(),
    ];
    for bytes in observed {
        let decoded = decode_instruction(&bytes).unwrap();
        assert_eq!(encode_instruction(&decoded).unwrap(), bytes);
    }
}

#[test]
fn test_token_order_resolution_is_deterministic() {
    let cases = [
        (sample_order_v1().encode().unwrap(), "TokenOrderV1"),
        (sample_order_v2().encode().unwrap(), "TokenOrderV2"),
    ];
    for (bytes, expected) in cases {
        let first = decode_instruction(&bytes).unwrap();
        assert_eq!(first.name(), expected);
        for _ in 0..16 {
            assert_eq!(decode_instruction(&bytes).unwrap(), first);
        }
    }

    let garbage = RawInstruction::new(2, 3, vec![0xFF; 256]).encode().unwrap();
    let first = decode_instruction(&garbage).unwrap_err();
    for _ in 0..16 {
        assert_eq!(decode_instruction(&garbage).unwrap_err(), first);
    }
}

#[test]
fn test_token_order_garbage_is_ambiguous() {
    let bytes = RawInstruction::new(1, 3, vec![0xFF; 64]).encode().unwrap();
    assert!(matches!(
        decode_instruction(&bytes),
        Err(DecodeError::AmbiguousVariant { .. })
    ));
}

#[test]
fn test_batch_len_limit() {
    let batch = Instruction::batch(vec![sample_call().into(); 3]);
    let bytes = encode_instruction(&batch).unwrap();
    let limits = DecodeLimits {
        max_batch_len: 2,
        ..DecodeLimits::default()
    };
    assert!(matches!(
        decode_instruction_with(&bytes, &limits),
        Err(DecodeError::LimitExceeded { max: 2, actual: 3, .. })
    ));
    assert_eq!(decode_instruction(&bytes).unwrap(), batch);
}

#[test]
fn test_packet_round_trip() {
    let packet = Packet::new(
        [0x11; 32],
        U256::from(2u64),
        Instruction::forward(U256::from(5u64), 0, 1_700_000_000, sample_call().into()),
    );
    let bytes = encode_packet(&packet).unwrap();
    assert_eq!(decode_packet(&bytes).unwrap(), packet);
    assert_eq!(packet.channel_path().hops(), vec![2]);
}

#[test]
fn test_raw_children_re_encode() {
    // An unresolvable child still encodes; decoding reports the child's error
    let batch = Instruction::batch(vec![
        sample_call().into(),
        Instruction::raw(7, 0, vec![0x01]),
    ]);
    let bytes = encode_instruction(&batch).unwrap();
    assert_eq!(
        decode_instruction(&bytes).unwrap_err(),
        DecodeError::UnknownOpcode {
            version: 7,
            opcode: 0
        }
    );
}
