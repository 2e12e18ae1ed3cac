use criterion::{criterion_group, criterion_main, Criterion};
use rs_gravity::constants_config::SimulationConfig;
use rs_gravity::gravity::{build_tree, direct_force, scatter_cluster, Region};
use rs_gravity::models::Vec3;

pub fn bench_force_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_evaluation");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(50);

    let config = SimulationConfig::new(Some(0.5), Some(0.01), Some(1.0), None, None, None);
    let bodies = scatter_cluster(1000, Vec3::zero(), 100.0, 0.0);
    let bounds = Region::containing(&bodies).unwrap();

    group.bench_function("tree_build_1000", |b| {
        b.iter(|| build_tree(&bodies, bounds, &config).unwrap())
    });

    let tree = build_tree(&bodies, bounds, &config).unwrap();

    group.bench_function("barnes_hut_1000", |b| {
        b.iter(|| {
            let mut sum = Vec3::zero();
            for body in &bodies {
                sum += tree.compute_force(body, 0.5, 1.0, 0.01);
            }
            sum
        })
    });

    group.bench_function("direct_sum_1000", |b| {
        b.iter(|| {
            let mut sum = Vec3::zero();
            for body in &bodies {
                sum += direct_force(body, &bodies, 1.0, 0.01);
            }
            sum
        })
    });

    group.finish();
}

criterion_group!(benches, bench_force_evaluation);
criterion_main!(benches);
