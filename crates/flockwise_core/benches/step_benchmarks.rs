use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flockwise_core::{Flock, FlockConfig, PolicyConfig};

fn config(agents: usize) -> FlockConfig {
    let mut config = FlockConfig::default();
    config.world.agent_count = agents;
    config.world.seed = 42;
    config
}

fn bench_flock_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("flock_step");
    for agents in [100, 250, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(agents), &agents, |b, &n| {
            let mut flock = Flock::new(config(n)).unwrap();
            b.iter(|| black_box(flock.step().cluster_count))
        });
    }
    group.finish();
}

fn bench_flock_step_three_state(c: &mut Criterion) {
    let mut cfg = config(200);
    cfg.policy = PolicyConfig::three_state_default();
    let mut flock = Flock::new(cfg).unwrap();

    c.bench_function("flock_step_three_state_200", |b| {
        b.iter(|| black_box(flock.step().polarization))
    });
}

criterion_group!(benches, bench_flock_step, bench_flock_step_three_state);
criterion_main!(benches);
