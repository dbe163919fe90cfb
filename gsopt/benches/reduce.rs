use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use gsopt::generate::RandomGraphStateBuilder;
use gsopt::graph_state::ReducedGraph;
use gsopt::simplify;

fn random_state(nodes: usize) -> ReducedGraph {
    RandomGraphStateBuilder::new()
        .seed(1337)
        .nodes(nodes)
        .edge_prob(4.0 / nodes as f64)
        .pauli_prob(0.6)
        .outputs(nodes / 10)
        .dependency_prob(1.0 / nodes as f64)
        .build()
}

fn benchmark_reduction(c: &mut Criterion) {
    for nodes in [100, 400] {
        let g = random_state(nodes);

        c.bench_function(&format!("eliminate_clifford_{nodes}"), |b| {
            b.iter_batched_ref(
                || g.clone(),
                |g| simplify::eliminate_clifford(g),
                BatchSize::SmallInput,
            );
        });

        c.bench_function(&format!("clifford_simp_{nodes}"), |b| {
            b.iter_batched_ref(
                || g.clone(),
                |g| simplify::clifford_simp(g),
                BatchSize::SmallInput,
            );
        });

        let mut reduced = g.clone();
        simplify::clifford_simp(&mut reduced);
        c.bench_function(&format!("schedule_{nodes}"), |b| {
            b.iter(|| std::hint::black_box(reduced.schedule().unwrap()));
        });
    }
}

criterion_group!(benches, benchmark_reduction);
criterion_main!(benches);
