use std::collections::BTreeMap;
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::forces::{
    calculate_velocity, many_body, many_body_force, LayoutParticle, ManyBody, ParticleState, Vertex,
};
use crate::models::{Point2D, Vector2D};
use crate::utils::{ManyBodySettings, DEFAULT_THETA};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn settings(theta: f64, parallel: bool) -> ManyBodySettings {
    ManyBodySettings::new(Some(theta), None, None, Some(parallel)).unwrap()
}

/// Direct pairwise summation of the same force law.
fn brute_force(alpha: f64, vertices: &[Vertex<usize>]) -> Vec<Vector2D> {
    vertices
        .iter()
        .map(|target| {
            vertices
                .iter()
                .filter(|source| source.key != target.key)
                .map(|source| calculate_velocity(alpha, target, source))
                .sum()
        })
        .collect()
}

fn random_vertices(seed: u64, count: usize, spread: f64) -> Vec<Vertex<usize>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|key| {
            Vertex::at_rest(
                key,
                Point2D::new(rng.random_range(-spread..spread), rng.random_range(-spread..spread)),
                rng.random_range(-50.0..50.0),
            )
        })
        .collect()
}

/// Four tight clusters of 12 vertices inside a frame spanned by two corner vertices.
fn clustered_vertices(seed: u64) -> Vec<Vertex<usize>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions = vec![Point2D::new(-100.0, -100.0), Point2D::new(100.0, 100.0)];
    for (cx, cy) in [(-50.0, 50.0), (50.0, 50.0), (50.0, -50.0), (-50.0, -50.0)] {
        for _ in 0..12 {
            positions.push(Point2D::new(cx + rng.random_range(-2.0..2.0), cy + rng.random_range(-2.0..2.0)));
        }
    }
    positions
        .into_iter()
        .enumerate()
        .map(|(key, position)| Vertex::at_rest(key, position, -30.0))
        .collect()
}

/// Largest deviation from `exact`, relative to the largest exact delta.
fn relative_error(approx: &[Vector2D], exact: &[Vector2D]) -> f64 {
    let scale = exact.iter().map(|v| v.length()).fold(0.0, f64::max);
    let worst = approx
        .iter()
        .zip(exact)
        .map(|(a, e)| (*a - *e).length())
        .fold(0.0, f64::max);
    worst / scale
}

#[test]
fn test_empty_batch() {
    init_logging();
    let vertices: Vec<Vertex<usize>> = Vec::new();
    assert!(many_body(1.0, 0.9, vertices).is_empty());

    let points: BTreeMap<u32, LayoutParticle> = BTreeMap::new();
    assert!(many_body_force(1.0, 0.9, &BTreeMap::new(), points).is_empty());
}

#[test]
fn test_single_vertex_is_untouched() {
    let vertex = Vertex::new(7usize, Point2D::new(3.0, 3.0), -30.0, Vector2D::new(1.0, -1.0));
    let moved = many_body(1.0, 0.9, vec![vertex.clone()]);
    assert_eq!(moved, vec![vertex]);
}

#[test]
fn test_three_vertices_in_a_row() {
    init_logging();
    let vertices = vec![
        Vertex::at_rest(0usize, Point2D::new(0.0, 0.0), -30.0),
        Vertex::at_rest(1, Point2D::new(10.0, 0.0), -30.0),
        Vertex::at_rest(2, Point2D::new(20.0, 0.0), -30.0),
    ];
    let exact = brute_force(0.5, &vertices);
    let moved = many_body(0.5, 0.0, vertices);

    // (-10) * (-30 * 0.5 / 100) + (-20) * (-30 * 0.5 / 400)
    assert_relative_eq!(moved[0].velocity, Vector2D::new(2.25, 0.0), epsilon = 1e-12);
    assert_relative_eq!(moved[1].velocity, Vector2D::zero(), epsilon = 1e-12);
    assert_relative_eq!(moved[2].velocity, Vector2D::new(-2.25, 0.0), epsilon = 1e-12);
    for (vertex, expected) in moved.iter().zip(&exact) {
        assert_relative_eq!(vertex.velocity, *expected, epsilon = 1e-12);
    }
}

#[test]
fn test_velocity_is_accumulated() {
    let vertices = vec![
        Vertex::new(0usize, Point2D::new(0.0, 0.0), 4.0, Vector2D::new(1.0, 1.0)),
        Vertex::new(1, Point2D::new(2.0, 0.0), 0.0, Vector2D::new(-1.0, 0.5)),
    ];
    let moved = many_body(1.0, 0.9, vertices);
    // Vertex 1 is pushed along +x by (2, 0) * 4 / 4; vertex 0 feels nothing from the inert vertex 1.
    assert_eq!(moved[0].velocity, Vector2D::new(1.0, 1.0));
    assert_eq!(moved[1].velocity, Vector2D::new(1.0, 0.5));
}

#[test]
fn test_vertex_never_acts_on_itself() {
    init_logging();
    let base = random_vertices(41, 300, 100.0);
    for strong in [0usize, 57, 150, 299] {
        let vertices: Vec<Vertex<usize>> = base
            .iter()
            .map(|v| Vertex::at_rest(v.key, v.position, if v.key == strong { 1e9 } else { 0.0 }))
            .collect();
        let moved = many_body(1.0, DEFAULT_THETA, vertices);

        assert_eq!(moved[strong].velocity, Vector2D::zero(), "vertex {} moved itself", strong);
        assert!(moved.iter().filter(|v| v.key != strong).all(|v| v.velocity.length() > 0.0));
    }
}

#[test]
fn test_coincident_vertices_stay_finite() {
    let vertices = vec![
        Vertex::at_rest(0usize, Point2D::new(0.0, 0.0), 10.0),
        Vertex::at_rest(1, Point2D::new(0.0, 0.0), 10.0),
        Vertex::at_rest(2, Point2D::new(2.0, 0.0), 0.0),
    ];
    let moved = many_body(1.0, 0.9, vertices);

    assert_eq!(moved[0].velocity, Vector2D::zero());
    assert_eq!(moved[1].velocity, Vector2D::zero());
    assert_eq!(moved[2].velocity, Vector2D::new(10.0, 0.0));
}

#[test]
fn test_many_coincident_vertices_stay_finite() {
    let mut vertices: Vec<Vertex<usize>> = (0..100)
        .map(|key| Vertex::at_rest(key, Point2D::new(5.0, 5.0), -30.0))
        .collect();
    vertices.extend(random_vertices(42, 50, 20.0).into_iter().map(|mut v| {
        v.key += 100;
        v
    }));

    let moved = many_body(0.3, 0.9, vertices);
    assert!(moved.iter().all(|v| v.velocity.is_finite()));
}

#[test]
fn test_parallel_matches_sequential() {
    let vertices = random_vertices(43, 1000, 300.0);
    let parallel = ManyBody::new(settings(0.9, true)).velocity_deltas(0.7, &vertices);
    let sequential = ManyBody::new(settings(0.9, false)).velocity_deltas(0.7, &vertices);
    assert_eq!(parallel, sequential);
}

#[test]
fn test_velocity_deltas_follow_input_order() {
    let vertices = random_vertices(44, 120, 50.0);
    let many_body = ManyBody::new(settings(0.5, true));
    let tree = many_body.build_tree(&vertices);

    let deltas = many_body.velocity_deltas(1.0, &vertices);
    assert_eq!(deltas.len(), vertices.len());
    for (vertex, delta) in vertices.iter().zip(&deltas) {
        assert_eq!(many_body.apply_force(1.0, &tree, vertex), *delta);
    }
}

#[test]
fn test_zero_theta_is_exact() {
    let vertices = random_vertices(45, 200, 100.0);
    let exact = brute_force(0.8, &vertices);
    let approx = ManyBody::new(settings(0.0, true)).velocity_deltas(0.8, &vertices);
    assert!(relative_error(&approx, &exact) < 1e-12);
}

#[test]
fn test_error_shrinks_with_theta() {
    init_logging();
    for seed in 0..5 {
        let vertices = clustered_vertices(seed);
        let exact = brute_force(1.0, &vertices);

        for theta in [0.9, 0.5, 0.1, 0.01] {
            let approx = ManyBody::new(settings(theta, true)).velocity_deltas(1.0, &vertices);
            let error = relative_error(&approx, &exact);
            assert!(error < theta / 10.0, "seed {}, theta {}: relative error {}", seed, theta, error);
        }
    }
}

#[test]
fn test_invalid_theta_falls_back_to_default() {
    init_logging();
    let vertices = random_vertices(46, 150, 100.0);
    let expected = many_body(1.0, DEFAULT_THETA, vertices.clone());
    assert_eq!(many_body(1.0, -1.0, vertices.clone()), expected);
    assert_eq!(many_body(1.0, f64::NAN, vertices), expected);
}

#[test]
fn test_alpha_scales_linearly() {
    let vertices = random_vertices(47, 80, 60.0);
    let full = ManyBody::default().velocity_deltas(1.0, &vertices);
    let quarter = ManyBody::default().velocity_deltas(0.25, &vertices);
    for (f, q) in full.iter().zip(&quarter) {
        assert_relative_eq!(*f * 0.25, *q, epsilon = 1e-12, max_relative = 1e-12);
    }
}

#[test]
fn test_wrapper_defaults_missing_strengths() {
    let mut points = BTreeMap::new();
    points.insert(1, LayoutParticle::new(0.0, 0.0, 0.0, 0.0));
    points.insert(2, LayoutParticle::new(4.0, 0.0, 0.0, 0.0));
    points.insert(3, LayoutParticle::new(0.0, 2.0, 0.0, 0.0));

    let mut strengths = BTreeMap::new();
    strengths.insert(1, 8.0);
    strengths.insert(99, 1e6);

    let result = many_body_force(0.5, 0.9, &strengths, points);

    assert_eq!(result.len(), 3);
    // Only vertex 1 exerts a force: (4, 0) * 8 * 0.5 / 16 and (0, 2) * 8 * 0.5 / 4.
    assert_eq!(result[&1], LayoutParticle::new(0.0, 0.0, 0.0, 0.0));
    assert_eq!(result[&2], LayoutParticle::new(4.0, 0.0, 1.0, 0.0));
    assert_eq!(result[&3], LayoutParticle::new(0.0, 2.0, 0.0, 2.0));
}

#[derive(Debug, Clone, PartialEq)]
struct Bead {
    label: String,
    position: Point2D,
    velocity: Vector2D,
    fixed: bool,
}

impl ParticleState for Bead {
    fn position(&self) -> Point2D {
        self.position
    }

    fn velocity(&self) -> Vector2D {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vector2D) {
        self.velocity = velocity;
    }
}

#[test]
fn test_wrapper_keeps_other_record_fields() {
    let bead = |label: &str, x: f64, fixed: bool| Bead {
        label: label.to_string(),
        position: Point2D::new(x, 0.0),
        velocity: Vector2D::new(0.0, 1.0),
        fixed,
    };
    let mut points = BTreeMap::new();
    points.insert("left".to_string(), bead("L", -1.0, true));
    points.insert("right".to_string(), bead("R", 1.0, false));

    let strengths: BTreeMap<String, f64> =
        [("left".to_string(), 2.0), ("right".to_string(), 2.0)].into_iter().collect();

    let result = many_body_force(1.0, 0.9, &strengths, points);

    let left = &result["left"];
    assert_eq!((left.label.as_str(), left.fixed, left.position), ("L", true, Point2D::new(-1.0, 0.0)));
    // (-2, 0) * 2 / 4 on top of the existing (0, 1).
    assert_eq!(left.velocity, Vector2D::new(-1.0, 1.0));

    let right = &result["right"];
    assert_eq!((right.label.as_str(), right.fixed), ("R", false));
    assert_eq!(right.velocity, Vector2D::new(1.0, 1.0));
}

#[test]
fn test_wrapper_matches_vertex_api() {
    let vertices = random_vertices(48, 60, 80.0);
    let points: BTreeMap<usize, LayoutParticle> = vertices
        .iter()
        .map(|v| (v.key, LayoutParticle::new(v.position.x, v.position.y, 0.0, 0.0)))
        .collect();
    let strengths: BTreeMap<usize, f64> = vertices.iter().map(|v| (v.key, v.strength)).collect();

    let result = many_body_force(0.6, 0.5, &strengths, points);
    let moved = many_body(0.6, 0.5, vertices);

    for vertex in &moved {
        assert_eq!(result[&vertex.key].velocity(), vertex.velocity);
    }
}
