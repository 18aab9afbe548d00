//! Byte compatibility with an independent ABI implementation
//!
//! Every layout is encoded with `ethabi` from the same field values and must
//! match the codec output exactly, and `ethabi` must be able to decode what
//! the codec produces.

use ethabi::{ParamType, Token};
use ethereum_types::U256;
use hex_literal::hex;
use ucs03_codec::{
    decode_instruction, Ack, BatchAck, Call, Forward, Instruction, Operand, Packet,
    TokenOrderAck, TokenOrderKind, TokenOrderV1, TokenOrderV2,
};

fn instruction_type() -> ParamType {
    ParamType::Tuple(vec![ParamType::Uint(8), ParamType::Uint(8), ParamType::Bytes])
}

fn envelope_tokens(version: u8, opcode: u8, operand: Vec<u8>) -> Vec<Token> {
    vec![
        Token::Uint(U256::from(version)),
        Token::Uint(U256::from(opcode)),
        Token::Bytes(operand),
    ]
}

fn call() -> Call {
    Call::new(
        hex!("1111111111111111111111111111111111111111").to_vec(),
        true,
        hex!("2222222222222222222222222222222222222222").to_vec(),
        hex!("a9059cbb").to_vec(),
    )
}

fn call_tokens(call: &Call) -> Vec<Token> {
    vec![
        Token::Bytes(call.sender.to_vec()),
        Token::Bool(call.eureka),
        Token::Bytes(call.contract_address.to_vec()),
        Token::Bytes(call.contract_calldata.to_vec()),
    ]
}

#[test]
fn test_call_matches_ethabi() {
    let call = call();
    let operand = ethabi::encode(&call_tokens(&call));
    assert_eq!(call.encode_operand().unwrap(), operand);

    let envelope = ethabi::encode(&envelope_tokens(0, 1, operand));
    assert_eq!(call.encode().unwrap(), envelope);
    assert_eq!(decode_instruction(&envelope).unwrap(), Instruction::Call(call));
}

#[test]
fn test_forward_matches_ethabi() {
    let forward = Forward::new(U256::from(0x0000_0002_0000_0001u64), 100, 200, call().into());
    let nested = ethabi::encode(&call_tokens(&call()));
    let operand = ethabi::encode(&[
        Token::Uint(forward.path),
        Token::Uint(U256::from(100u64)),
        Token::Uint(U256::from(200u64)),
        Token::Tuple(envelope_tokens(0, 1, nested)),
    ]);
    assert_eq!(forward.encode_operand().unwrap(), operand);

    let decoded = ethabi::decode(
        &[
            ParamType::Uint(256),
            ParamType::Uint(64),
            ParamType::Uint(64),
            instruction_type(),
        ],
        &operand,
    )
    .unwrap();
    assert_eq!(decoded[1], Token::Uint(U256::from(100u64)));
}

#[test]
fn test_batch_matches_ethabi() {
    let children = vec![Instruction::from(call()), Instruction::from(call())];
    let batch = ucs03_codec::Batch::new(children);
    let child = Token::Tuple(envelope_tokens(0, 1, ethabi::encode(&call_tokens(&call()))));
    let operand = ethabi::encode(&[Token::Array(vec![child.clone(), child])]);
    assert_eq!(batch.encode_operand().unwrap(), operand);
}

#[test]
fn test_token_order_v1_matches_ethabi() {
    let order = TokenOrderV1 {
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
    };
    let operand = ethabi::encode(&[
        Token::Bytes(vec![0xAA; 20]),
        Token::Bytes(vec![0xBB; 20]),
        Token::Bytes(vec![0xCC; 20]),
        Token::Uint(U256::from(1000u64)),
        Token::String("U".into()),
        Token::String("Union".into()),
        Token::Uint(U256::from(6u64)),
        Token::Uint(U256::zero()),
        Token::Bytes(vec![0xDD; 20]),
        Token::Uint(U256::from(900u64)),
    ]);
    assert_eq!(order.encode_operand().unwrap(), operand);
    assert_eq!(TokenOrderV1::decode_operand(&operand).unwrap(), order);
}

#[test]
fn test_token_order_v2_matches_ethabi() {
    let order = TokenOrderV2 {
        sender: vec![0xAA; 20].into(),
        receiver: vec![0xBB; 32].into(),
        base_token: vec![0xCC; 20].into(),
        base_amount: U256::MAX,
        quote_token: vec![0xDD; 32].into(),
        quote_amount: U256::one(),
        kind: TokenOrderKind::Solve,
        metadata: vec![0x42; 33].into(),
    };
    let operand = ethabi::encode(&[
        Token::Bytes(vec![0xAA; 20]),
        Token::Bytes(vec![0xBB; 32]),
        Token::Bytes(vec![0xCC; 20]),
        Token::Uint(U256::MAX),
        Token::Bytes(vec![0xDD; 32]),
        Token::Uint(U256::one()),
        Token::Uint(U256::from(3u64)),
        Token::Bytes(vec![0x42; 33]),
    ]);
    assert_eq!(order.encode_operand().unwrap(), operand);
    assert_eq!(TokenOrderV2::decode_operand(&operand).unwrap(), order);
}

#[test]
fn test_packet_matches_ethabi() {
    let packet = Packet::new([0x5A; 32], U256::from(9u64), call());
    let expected = ethabi::encode(&[
        Token::FixedBytes(vec![0x5A; 32]),
        Token::Uint(U256::from(9u64)),
        Token::Tuple(envelope_tokens(0, 1, ethabi::encode(&call_tokens(&call())))),
    ]);
    assert_eq!(packet.encode().unwrap(), expected);
    assert_eq!(Packet::decode(&expected).unwrap(), packet);
}

#[test]
fn test_acks_match_ethabi() {
    let inner = TokenOrderAck::market_maker(vec![0x77; 20]);
    let inner_bytes = ethabi::encode(&[
        Token::Uint(U256::from(0xD1CEC45Eu64)),
        Token::Bytes(vec![0x77; 20]),
    ]);
    assert_eq!(inner.encode().unwrap(), inner_bytes);

    let ack = Ack::success(inner_bytes.clone());
    let ack_bytes = ethabi::encode(&[Token::Uint(U256::one()), Token::Bytes(inner_bytes.clone())]);
    assert_eq!(ack.encode().unwrap(), ack_bytes);

    let batch = BatchAck::new(vec![inner_bytes.clone().into(), vec![].into()]);
    let batch_bytes = ethabi::encode(&[Token::Array(vec![
        Token::Bytes(inner_bytes),
        Token::Bytes(vec![]),
    ])]);
    assert_eq!(batch.encode().unwrap(), batch_bytes);
    assert_eq!(BatchAck::decode(&batch_bytes).unwrap(), batch);
}
