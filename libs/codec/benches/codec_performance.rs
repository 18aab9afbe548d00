//! Encode/decode throughput for representative instruction trees
//!
//! Covers the shapes relayers see most: a bare token order, a batch of
//! orders, and a multi-hop forward wrapping a batch.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ethereum_types::U256;
use ucs03_codec::{decode_instruction, encode_instruction, Call, Instruction, TokenOrderV1};

fn token_order() -> Instruction {
    TokenOrderV1 {
        sender: vec![0xAA; 20].into(),
        receiver: vec![0xBB; 20].into(),
        base_token: vec![0xCC; 20].into(),
        base_amount: U256::from(1_000_000u64),
        base_token_symbol: "USDC".into(),
        base_token_name: "USD Coin".into(),
        base_token_decimals: 6,
        base_token_path: U256::zero(),
        quote_token: [0xDD; 20].into(),
        quote_amount: U256::from(999_000u64),
    }
    .into()
}

fn trees() -> Vec<(&'static str, Instruction)> {
    let batch = Instruction::batch(vec![
        token_order(),
        token_order(),
        Call::new(vec![0xAA; 20], false, vec![0xEE; 20], vec![0x00; 132]).into(),
    ]);
    let forward = Instruction::forward(
        U256::from(0x0000_0003_0000_0002u64),
        0,
        1_700_000_000_000_000_000,
        batch.clone(),
    );
    vec![
        ("token_order", token_order()),
        ("batch_of_three", batch),
        ("forward_batch", forward),
    ]
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for (name, tree) in trees() {
        let size = encode_instruction(&tree).map(|b| b.len()).unwrap_or_default();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &tree, |b, tree| {
            b.iter(|| encode_instruction(black_box(tree)))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for (name, tree) in trees() {
        let Ok(bytes) = encode_instruction(&tree) else {
            continue;
        };
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &bytes, |b, bytes| {
            b.iter(|| decode_instruction(black_box(bytes)))
        });
    }
    group.finish();
}

/// Error path: garbage under the TokenOrder opcode runs both layouts
fn bench_ambiguous_rejection(c: &mut Criterion) {
    let bytes = ucs03_codec::RawInstruction::new(1, 3, vec![0xFF; 320])
        .encode()
        .unwrap_or_default();
    c.bench_function("decode_ambiguous_token_order", |b| {
        b.iter(|| decode_instruction(black_box(&bytes)))
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_ambiguous_rejection);
criterion_main!(benches);
