// Signing & verification benchmarks for the Symbol SDK.
//
// Covers key pair generation, raw Ed25519 signing and verification,
// transaction signing through the facade, and aggregate hashing.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use symbol_sdk::crypto::KeyPair;
use symbol_sdk::facade::SymbolFacade;
use symbol_sdk::models::{EmbeddedTransaction, Transaction};
use symbol_sdk::network::Network;
use symbol_sdk::transaction::Descriptor;

const RECIPIENT: &str = "TCHBDENCLKEBILBPWP3JPB2XNY64OE7PYHHE32I";

fn transfer(facade: &SymbolFacade, key_pair: &KeyPair) -> Transaction {
    let descriptor = Descriptor::map()
        .with("type", "transfer_transaction_v1")
        .with("signer_public_key", key_pair.public_key())
        .with("recipient_address", RECIPIENT)
        .with("message", "benchmark transfer");
    facade.transaction_factory().create(&descriptor, true).unwrap()
}

fn embedded(facade: &SymbolFacade, count: usize) -> Vec<EmbeddedTransaction> {
    (0..count)
        .map(|i| {
            let descriptor = Descriptor::map()
                .with("type", "transfer_transaction_v1")
                .with("signer_public_key", KeyPair::generate().public_key())
                .with("recipient_address", RECIPIENT)
                .with("message", format!("inner-{i:04}"));
            facade.transaction_factory().create_embedded(&descriptor, true).unwrap()
        })
        .collect()
}

fn bench_keypair_generation(c: &mut Criterion) {
    c.bench_function("ed25519/keypair_generate", |b| {
        b.iter(KeyPair::generate);
    });
}

fn bench_sign_message(c: &mut Criterion) {
    let key_pair = KeyPair::generate();
    let message = b"transfer 1000000 units to TCHBDENCLKEBILBPWP3JPB2XNY64OE7PYHHE32I";

    c.bench_function("ed25519/sign_message", |b| {
        b.iter(|| key_pair.sign(message));
    });
}

fn bench_verify_signature(c: &mut Criterion) {
    let key_pair = KeyPair::generate();
    let message = b"transfer 1000000 units to TCHBDENCLKEBILBPWP3JPB2XNY64OE7PYHHE32I";
    let signature = key_pair.sign(message);
    let verifier = key_pair.verifier();

    c.bench_function("ed25519/verify_signature", |b| {
        b.iter(|| verifier.verify(message, &signature));
    });
}

fn bench_sign_transaction(c: &mut Criterion) {
    let facade = SymbolFacade::new(Network::testnet()).unwrap();
    let key_pair = KeyPair::generate();
    let transaction = transfer(&facade, &key_pair);

    c.bench_function("facade/sign_transaction", |b| {
        b.iter(|| facade.sign_transaction(&key_pair, &transaction).unwrap());
    });
}

fn bench_hash_transaction(c: &mut Criterion) {
    let facade = SymbolFacade::new(Network::testnet()).unwrap();
    let key_pair = KeyPair::generate();
    let mut transaction = transfer(&facade, &key_pair);
    transaction.signature = facade.sign_transaction(&key_pair, &transaction).unwrap();

    c.bench_function("facade/hash_transaction", |b| {
        b.iter(|| facade.hash_transaction(&transaction).unwrap());
    });
}

fn bench_hash_embedded_transactions(c: &mut Criterion) {
    let facade = SymbolFacade::new(Network::testnet()).unwrap();
    let mut group = c.benchmark_group("facade/hash_embedded_transactions");

    for size in [1, 10, 50, 100] {
        let transactions = embedded(&facade, size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &transactions, |b, transactions| {
            b.iter(|| SymbolFacade::hash_embedded_transactions(transactions).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_keypair_generation,
    bench_sign_message,
    bench_verify_signature,
    bench_sign_transaction,
    bench_hash_transaction,
    bench_hash_embedded_transactions,
);
criterion_main!(benches);
