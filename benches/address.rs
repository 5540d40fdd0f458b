// SPDX short identifier: Unlicense

use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    Criterion,
    BenchmarkId
};
use std::time::Duration;
use sip_core::{
    Chain,
    address::{
        generate_meta_address,
        generate_stealth_address,
        check_stealth_address,
        derive_stealth_private_key,
        scan_stealth_addresses
    }
};

fn stealth_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stealth address");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(3));

    for chain in [Chain::Ethereum, Chain::Solana] {
        let keys = generate_meta_address(chain).unwrap();
        let (stealth, _) = generate_stealth_address(&keys.meta_address).unwrap();

        group.bench_with_input(BenchmarkId::new("Generate", chain), &keys.meta_address,
        |b, meta| b.iter(|| {
            black_box(generate_stealth_address(meta).unwrap());
        }));

        group.bench_with_input(BenchmarkId::new("Check", chain), &stealth,
        |b, stealth| b.iter(|| {
            black_box(check_stealth_address(stealth, &keys.spending_private_key, &keys.viewing_private_key).unwrap());
        }));

        group.bench_with_input(BenchmarkId::new("Derive private key", chain), &stealth,
        |b, stealth| b.iter(|| {
            black_box(derive_stealth_private_key(stealth, &keys.spending_private_key, &keys.viewing_private_key).unwrap());
        }));
    }
}

fn scan_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scan");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(5));

    for chain in [Chain::Ethereum, Chain::Solana] {
        let mine = generate_meta_address(chain).unwrap();
        let theirs = generate_meta_address(chain).unwrap();

        for size in [128usize, 1024] {
            let candidates: Vec<_> = (0..size).map(|i| {
                let meta = if i % 64 == 0 { &mine.meta_address } else { &theirs.meta_address };
                generate_stealth_address(meta).unwrap().0
            }).collect();

            group.bench_with_input(BenchmarkId::new(format!("{}", chain), size), &candidates,
            |b, candidates| b.iter(|| {
                black_box(scan_stealth_addresses(candidates, &mine.spending_private_key, &mine.viewing_private_key).unwrap());
            }));
        }
    }
}

criterion_group!(address, stealth_benchmark, scan_benchmark);
criterion_main!(address);
