// Factory benchmarks: descriptor conversion, id autogeneration and
// aggregate assembly.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use symbol_sdk::models::UnresolvedMosaic;
use symbol_sdk::network::Network;
use symbol_sdk::transaction::{Descriptor, TransactionFactory};

const SIGNER: &str = "87DA603E7BE5656C45692D5FC7F6D0EF8F24BB7A5C10ED5FDA8C5CFBC49FCBC8";
const RECIPIENT: &str = "TCHBDENCLKEBILBPWP3JPB2XNY64OE7PYHHE32I";

fn transfer(mosaic_count: u64) -> Descriptor {
    Descriptor::map()
        .with("type", "transfer_transaction_v1")
        .with("signer_public_key", SIGNER)
        .with("fee", 1_000_000u64)
        .with("deadline", 41_998_024_783u64)
        .with("recipient_address", RECIPIENT)
        .with(
            "mosaics",
            Descriptor::list((0..mosaic_count).rev().map(|id| UnresolvedMosaic::new(id + 1, 100u64))),
        )
}

fn bench_factory_construction(c: &mut Criterion) {
    c.bench_function("factory/new", |b| {
        b.iter(|| TransactionFactory::new(Network::testnet()).unwrap());
    });
}

fn bench_create_transfer(c: &mut Criterion) {
    let factory = TransactionFactory::new(Network::testnet()).unwrap();
    let mut group = c.benchmark_group("factory/create_transfer");

    for mosaics in [0, 4, 16, 64] {
        let descriptor = transfer(mosaics);
        group.throughput(Throughput::Elements(mosaics.max(1)));
        group.bench_with_input(BenchmarkId::from_parameter(mosaics), &descriptor, |b, descriptor| {
            b.iter(|| factory.create(descriptor, true).unwrap());
        });
    }

    group.finish();
}

fn bench_create_namespace_registration(c: &mut Criterion) {
    let factory = TransactionFactory::new(Network::testnet()).unwrap();
    let descriptor = Descriptor::map()
        .with("type", "namespace_registration_transaction_v1")
        .with("signer_public_key", SIGNER)
        .with("registration_type", "root")
        .with("duration", 86_400u64)
        .with("name", "benchmark");

    c.bench_function("factory/create_namespace_registration", |b| {
        b.iter(|| factory.create(&descriptor, true).unwrap());
    });
}

fn bench_create_aggregate(c: &mut Criterion) {
    let factory = TransactionFactory::new(Network::testnet()).unwrap();
    let mut group = c.benchmark_group("factory/create_aggregate");

    for size in [1usize, 10, 50] {
        let inner: Vec<_> = (0..size)
            .map(|i| {
                let descriptor = Descriptor::map()
                    .with("type", "transfer_transaction_v1")
                    .with("signer_public_key", SIGNER)
                    .with("recipient_address", RECIPIENT)
                    .with("mosaics", Descriptor::list([UnresolvedMosaic::new(i as u64 + 1, 100u64)]));
                factory.create_embedded(&descriptor, true).unwrap()
            })
            .collect();
        let descriptor = Descriptor::map()
            .with("type", "aggregate_complete_transaction_v2")
            .with("signer_public_key", SIGNER)
            .with("transactions", Descriptor::list(inner));

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &descriptor, |b, descriptor| {
            b.iter(|| factory.create(descriptor, true).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_factory_construction,
    bench_create_transfer,
    bench_create_namespace_registration,
    bench_create_aggregate,
);
criterion_main!(benches);
