//! Performance benchmarks for the container codec.
//!
//! Run with: cargo bench
//!
//! Covers key derivation on its own and full encrypt/decrypt at several
//! payload sizes. Key derivation dominates for small documents.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sealdoc::crypto::profile::V1;
use sealdoc::crypto::{decrypt_bytes, derive_key, encrypt_bytes};
use secrecy::SecretString;

/// Benchmark PBKDF2 key derivation with the current profile.
fn bench_derive_key(c: &mut Criterion) {
    let passphrase = SecretString::from("benchmark-passphrase".to_string());
    let salt = [7u8; 8];

    c.bench_function("derive_key", |b| {
        b.iter(|| {
            let key = derive_key(black_box(&passphrase), black_box(&salt), &V1)
                .expect("key derivation failed");
            black_box(key);
        });
    });
}

/// Benchmark encryption performance with various payload sizes.
fn bench_encrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("encrypt");
    group.sample_size(10);

    let passphrase = SecretString::from("benchmark-passphrase".to_string());
    let sizes = vec![("1KB", 1024), ("100KB", 100 * 1024), ("1MB", 1024 * 1024)];

    for (name, size) in sizes {
        let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &data, |b, data| {
            b.iter(|| {
                let container = encrypt_bytes(black_box(data), black_box(&passphrase))
                    .expect("encryption failed");
                black_box(container);
            });
        });
    }

    group.finish();
}

/// Benchmark decryption performance with various payload sizes.
fn bench_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrypt");
    group.sample_size(10);

    let passphrase = SecretString::from("benchmark-passphrase".to_string());
    let sizes = vec![("1KB", 1024), ("100KB", 100 * 1024), ("1MB", 1024 * 1024)];

    for (name, size) in sizes {
        let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        let container =
            encrypt_bytes(&data, &passphrase).expect("encryption failed for benchmark");

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &container,
            |b, container| {
                b.iter(|| {
                    let plaintext = decrypt_bytes(black_box(container), black_box(&passphrase))
                        .expect("decryption failed");
                    black_box(plaintext);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_derive_key, bench_encrypt, bench_decrypt);
criterion_main!(benches);
