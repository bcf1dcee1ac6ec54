//! Criterion benchmarks for the partition solver.
//!
//! Uses synthetic org charts (managers with direct reports) plus random
//! history pairs to measure search overhead at realistic team sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_partition::constraints::{ForbiddenPairs, PartitionProblem};
use u_partition::enumerate::SolutionEnumerator;
use u_partition::solver::{ParticipantOrder, PartitionSolver, SolverConfig};

// ===========================================================================
// Synthetic org chart
// ===========================================================================

/// `managers` managers with `reports` reports each, plus `history_pairs`
/// random forbidden pairs standing in for past rotations.
fn org_chart(
    managers: usize,
    reports: usize,
    history_pairs: usize,
    group_size: usize,
) -> PartitionProblem {
    let mut names = Vec::new();
    let mut forbidden = ForbiddenPairs::new();
    for m in 0..managers {
        let manager = format!("m{m:02}");
        names.push(manager.clone());
        for r in 0..reports {
            let report = format!("m{m:02}r{r:02}");
            forbidden.insert(manager.clone(), report.clone());
            names.push(report);
        }
    }

    let mut rng = StdRng::seed_from_u64(42);
    let n = names.len();
    while forbidden.len() < managers * reports + history_pairs {
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        forbidden.insert(names[a].clone(), names[b].clone());
    }

    PartitionProblem::new(names, forbidden, group_size)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_solve_org_chart(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_org_chart");
    group.sample_size(20);

    let cases = [(4usize, 4usize, 20usize, 2usize), (6, 5, 60, 3), (10, 6, 150, 4)];
    for (managers, reports, history, size) in cases {
        let problem = org_chart(managers, reports, history, size);
        let config = SolverConfig::default().with_time_limit_ms(2_000);
        group.bench_with_input(
            BenchmarkId::new(format!("m{managers}_r{reports}_h{history}_g{size}"), problem.len()),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = PartitionSolver::solve(black_box(p), &[], black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_orders(c: &mut Criterion) {
    let mut group = c.benchmark_group("participant_order");
    group.sample_size(20);

    let problem = org_chart(6, 5, 60, 3);
    for order in [
        ParticipantOrder::Lexical,
        ParticipantOrder::MostConstrained,
        ParticipantOrder::Shuffled,
    ] {
        let config = SolverConfig::default()
            .with_order(order)
            .with_seed(42)
            .with_time_limit_ms(2_000);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{order:?}")),
            &config,
            |b, c| {
                b.iter(|| {
                    let result = PartitionSolver::solve(black_box(&problem), &[], black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate");
    group.sample_size(10);

    for &k in &[1usize, 5, 20] {
        let problem = org_chart(4, 4, 20, 2);
        let config = SolverConfig::default().with_time_limit_ms(2_000);
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| {
                let results: Vec<_> = SolutionEnumerator::new(black_box(&problem), &config, k)
                    .map(|e| e.collect::<Vec<_>>())
                    .unwrap_or_default();
                black_box(results)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solve_org_chart, bench_orders, bench_enumerate);
criterion_main!(benches);
