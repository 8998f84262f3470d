//! # Spore-Blog Core Benchmarks
//!
//! | Crate | Operation |
//! |-------|-----------|
//! | sb-01 Record Codec | `SporeData` / `ClusterData` decode |
//! | sb-04 Transaction Signer | signing-entry derivation, signer recovery |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use k256::ecdsa::SigningKey;
use sb_01_record_codec::{
    decode_post, decode_site, encode_post, encode_site, ClusterData, RecordId, SporeData,
    JSON_CONTENT_TYPE,
};
use sb_03_entity_reconciler::eth_owner_lock;
use sb_04_transaction_signer::{
    fill_placeholder_witnesses, parse_signature, personal_message_hash, prepare_signing_entries,
    recover_personal_signer, LocalEthSigner, TransactionSkeleton,
};
use shared_types::{Cell, CellOutput, ChainConfig, OutPoint};
use std::time::Duration;

// ============================================================================
// SB-01: Record Codec
// ============================================================================

fn bench_record_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("sb-01-record-codec");

    let site = encode_site(&ClusterData {
        name: "Bench Blog".into(),
        description: "a".repeat(256),
    });
    group.bench_function("decode_site", |b| b.iter(|| black_box(decode_site(&site).is_ok())));

    for size in [256usize, 4_096, 65_536] {
        let body = format!(r#"{{"title":"t","content":"{}"}}"#, "x".repeat(size));
        let post = encode_post(&SporeData {
            content_type: JSON_CONTENT_TYPE.into(),
            content: body.into_bytes(),
            cluster_id: Some(RecordId(vec![0xaa; 32])),
        });

        group.throughput(Throughput::Bytes(post.len() as u64));
        group.bench_with_input(BenchmarkId::new("decode_post", size), &post, |b, post| {
            b.iter(|| black_box(decode_post(post).is_ok()))
        });
    }

    group.finish();
}

// ============================================================================
// SB-04: Transaction Signer
// ============================================================================

fn skeleton(config: &ChainConfig, owners: usize, inputs: usize) -> TransactionSkeleton {
    let mut skeleton = TransactionSkeleton {
        inputs: (0..inputs)
            .map(|i| {
                let mut address = [0u8; 20];
                address[0] = (i % owners) as u8;
                Cell {
                    out_point: OutPoint::new([i as u8; 32], i as u32),
                    output: CellOutput {
                        capacity: 100_000_000_000,
                        lock: eth_owner_lock(&config.omnilock, &address),
                        type_: None,
                    },
                    ..Cell::default()
                }
            })
            .collect(),
        outputs: vec![CellOutput::default()],
        outputs_data: vec![Vec::new()],
        ..TransactionSkeleton::default()
    };
    fill_placeholder_witnesses(&mut skeleton, &config.omnilock);
    skeleton
}

fn bench_signing_entries(c: &mut Criterion) {
    let config = ChainConfig::testnet();
    let mut group = c.benchmark_group("sb-04-signing-entries");

    for inputs in [1usize, 16, 128] {
        let skeleton = skeleton(&config, 4, inputs);
        group.throughput(Throughput::Elements(inputs as u64));
        group.bench_with_input(
            BenchmarkId::new("prepare_signing_entries", inputs),
            &skeleton,
            |b, skeleton| {
                b.iter(|| black_box(prepare_signing_entries(skeleton, &config.omnilock).is_ok()))
            },
        );
    }

    group.finish();
}

fn bench_signer_recovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("sb-04-signer-recovery");
    group.measurement_time(Duration::from_secs(10));

    let key = SigningKey::random(&mut rand::thread_rng());
    let message = [0x42u8; 32];
    let digest = personal_message_hash(&message);
    let Ok((signature, recovery_id)) = key.sign_prehash_recoverable(&digest) else {
        return;
    };
    let mut raw = signature.to_bytes().to_vec();
    raw.push(recovery_id.to_byte() + 27);
    let Ok(signature) = parse_signature(&raw) else {
        return;
    };
    let signer = LocalEthSigner::new(key);

    group.bench_function("recover_personal_signer", |b| {
        b.iter(|| black_box(recover_personal_signer(&message, &signature).ok() == Some(signer.address())))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_record_decoding,
    bench_signing_entries,
    bench_signer_recovery,
);

criterion_main!(benches);
