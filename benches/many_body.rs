use criterion::{black_box, Criterion, criterion_group, criterion_main};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rs_force_layout::forces::{calculate_velocity, ManyBody, Vertex};
use rs_force_layout::models::{Point2D, Vector2D};
use rs_force_layout::quadtree::QuadTree;
use rs_force_layout::utils::ManyBodySettings;

fn random_vertices(count: usize) -> Vec<Vertex<usize>> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..count)
        .map(|key| {
            Vertex::at_rest(
                key,
                Point2D::new(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0)),
                -30.0,
            )
        })
        .collect()
}

pub fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_build");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(50);

    let points: Vec<Point2D> = random_vertices(10_000).iter().map(|v| v.position).collect();

    group.bench_function("insert_10k", |b| b.iter(|| {
        QuadTree::from_items(|p: &Point2D| *p, black_box(points.clone()))
    }));
}

pub fn bench_many_body(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut group = c.benchmark_group("many_body");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(20);

    let vertices = random_vertices(2_000);

    group.bench_function("brute_force", |b| b.iter(|| {
        let deltas: Vec<Vector2D> = vertices
            .iter()
            .map(|target| {
                vertices
                    .iter()
                    .filter(|source| source.key != target.key)
                    .map(|source| calculate_velocity(1.0, target, source))
                    .sum()
            })
            .collect();
        black_box(deltas)
    }));

    for theta in [0.5, 0.9, 1.5] {
        for parallel in [false, true] {
            let many_body = match ManyBodySettings::new(Some(theta), None, None, Some(parallel)) {
                Ok(settings) => ManyBody::new(settings),
                Err(e) => panic!("{}", e),
            };
            let name = format!("theta_{}_{}", theta, if parallel { "parallel" } else { "sequential" });
            debug!("Benchmarking {}", name);
            group.bench_function(name, |b| b.iter(|| {
                black_box(many_body.velocity_deltas(1.0, &vertices))
            }));
        }
    }
}

criterion_group!(benches, bench_tree_build, bench_many_body);
criterion_main!(benches);
