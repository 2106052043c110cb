//! Criterion benchmarks for the eight queens solver.
//!
//! Measures fitness evaluation on its own and complete seeded solves.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_queens::queens::{CandidateState, GeneticSolver, Selection, SolverConfig};

fn bench_fitness(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let boards: Vec<CandidateState> = (0..1024)
        .map(|_| CandidateState::random(&mut rng))
        .collect();

    c.bench_function("fitness_1024_boards", |b| {
        b.iter(|| {
            let total: u32 = black_box(&boards).iter().map(CandidateState::fitness).sum();
            black_box(total)
        })
    });
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    for &(pop, selection) in &[
        (20, Selection::Tournament),
        (20, Selection::Roulette),
        (50, Selection::Tournament),
    ] {
        let config = SolverConfig::new(pop, 0.8, 0.03, 1000)
            .with_selection(selection)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("p{pop}_{selection}"), pop),
            &config,
            |b, config| {
                b.iter(|| {
                    let mut solver = GeneticSolver::new(black_box(config.clone())).unwrap();
                    black_box(solver.solve())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_fitness, bench_solve);
criterion_main!(benches);
