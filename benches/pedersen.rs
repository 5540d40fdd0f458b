// SPDX short identifier: Unlicense

use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    Criterion,
    BenchmarkId
};
use std::time::Duration;
use sip_core::pedersen::{
    Commitment,
    commit,
    commit_with_blinding,
    verify_opening,
    add_commitments,
    generate_blinding
};

fn pedersen_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pedersen");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(3));

    let blinding = generate_blinding().unwrap();
    let opened = commit(1_000_000).unwrap();
    let other = commit(1).unwrap();

    group.bench_with_input(BenchmarkId::new("Commit", "random blinding"), &(),
    |b, ()| b.iter(|| {
        black_box(commit(black_box(1_000_000)).unwrap());
    }));

    group.bench_with_input(BenchmarkId::new("Commit", "fixed blinding"), &blinding,
    |b, blinding| b.iter(|| {
        black_box(commit_with_blinding(black_box(1_000_000), blinding).unwrap());
    }));

    group.bench_with_input(BenchmarkId::new("Verify", "opening"), &opened,
    |b, opened| b.iter(|| {
        black_box(verify_opening(&opened.commitment, 1_000_000, &opened.blinding).unwrap());
    }));

    group.bench_with_input(BenchmarkId::new("Add", "2 commitments"), &(),
    |b, ()| b.iter(|| {
        black_box(add_commitments(&opened.commitment, &other.commitment));
    }));

    for size in [2usize, 16, 128] {
        let inputs: Vec<Commitment> = (0..size).map(|i| commit(i as u64).unwrap().commitment).collect();
        group.bench_with_input(BenchmarkId::new("Balance", size), &inputs,
        |b, inputs| b.iter(|| {
            black_box(Commitment::is_balanced(inputs, inputs, 0));
        }));
    }
}

criterion_group!(pedersen, pedersen_benchmark);
criterion_main!(pedersen);
