use std::collections::BTreeMap;
use log::{debug, trace, warn};
use rayon::prelude::*;
use crate::forces::{AggregateVertex, Charged, SuperPointAggregator, Vertex};
use crate::models::{BoundingBox2D, Point2D, Vector2D};
use crate::quadtree::QuadTree;
use crate::utils::{ManyBodySettings, DEFAULT_STRENGTH, DEFAULT_THETA};

/// Aggregated quadtree over a borrowed batch of vertices.
pub type VertexTree<'a, K> = QuadTree<AggregateVertex, &'a Vertex<K>>;

/// Velocity change of `target` caused by `source`.
///
/// `delta = target - source` is scaled by `source.strength * alpha / |delta|²`. When the two
/// positions coincide the weight is not finite and the zero vector is returned instead.
///
/// # Examples
///
/// ```
/// use rs_force_layout::forces::{calculate_velocity, Vertex};
/// use rs_force_layout::models::{Point2D, Vector2D};
///
/// let target = Vertex::at_rest("a", Point2D::new(2.0, 0.0), 1.0);
/// let source = Vertex::at_rest("b", Point2D::new(0.0, 0.0), 4.0);
///
/// // delta = (2, 0), weight = 4 * 0.5 / 4
/// assert_eq!(calculate_velocity(0.5, &target, &source), Vector2D::new(1.0, 0.0));
///
/// let twin = Vertex::at_rest("c", Point2D::new(2.0, 0.0), 4.0);
/// assert_eq!(calculate_velocity(0.5, &target, &twin), Vector2D::zero());
/// ```
pub fn calculate_velocity<K, S>(alpha: f64, target: &Vertex<K>, source: &S) -> Vector2D
where
    S: Charged + ?Sized,
{
    let delta = target.position - source.position();
    let weight = source.strength() * alpha / delta.squared_length();
    if weight.is_finite() {
        delta * weight
    } else {
        trace!("Singular weight between {:?} and {:?}, contributing zero", target.position, source.position());
        Vector2D::zero()
    }
}

/// Barnes-Hut evaluator for the many-body force.
///
/// Every call to [`ManyBody::apply`] builds a fresh quadtree over the batch, aggregates it
/// into super-points and walks it once per vertex. Nothing is kept between calls.
///
/// # Examples
///
/// ```
/// use rs_force_layout::forces::{ManyBody, Vertex};
/// use rs_force_layout::models::Point2D;
/// use rs_force_layout::utils::ManyBodySettings;
///
/// let vertices = vec![
///     Vertex::at_rest(0, Point2D::new(-1.0, 0.0), 1.0),
///     Vertex::at_rest(1, Point2D::new(1.0, 0.0), 1.0),
/// ];
/// let many_body = ManyBody::new(ManyBodySettings::default());
/// let moved = many_body.apply(1.0, vertices);
///
/// // Positive strengths push the pair apart.
/// assert!(moved[0].velocity.x < 0.0);
/// assert!(moved[1].velocity.x > 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManyBody {
    settings: ManyBodySettings,
}

impl ManyBody {
    pub fn new(settings: ManyBodySettings) -> Self {
        ManyBody { settings }
    }

    pub fn settings(&self) -> &ManyBodySettings {
        &self.settings
    }

    /// Builds and aggregates the quadtree over `vertices`.
    pub fn build_tree<'a, K>(&self, vertices: &'a [Vertex<K>]) -> VertexTree<'a, K> {
        let tree = QuadTree::from_items_with(
            &self.settings.split,
            |vertex: &&Vertex<K>| vertex.position,
            vertices.iter(),
        );
        debug_assert!(
            tree.validate(|vertex: &&Vertex<K>| vertex.position, &self.settings.split).is_ok(),
            "quadtree invariants violated: {:?}",
            tree.validate(|vertex: &&Vertex<K>| vertex.position, &self.settings.split)
        );
        tree.perform_aggregate(&SuperPointAggregator)
    }

    /// Net velocity change of `vertex` from everything in `tree`.
    ///
    /// A subtree whose box excludes `vertex` and whose width divided by the distance from
    /// `vertex` to its aggregate falls below `theta` is replaced by that aggregate. Inside leaves that are not far enough away, `vertex` skips
    /// the item with its own key.
    pub fn apply_force<K: PartialEq>(&self, alpha: f64, tree: &VertexTree<'_, K>, vertex: &Vertex<K>) -> Vector2D {
        match tree {
            QuadTree::Empty => Vector2D::zero(),
            QuadTree::Leaf { bounding_box, aggregate, items } => {
                if self.is_far_away(bounding_box, aggregate, vertex.position) {
                    calculate_velocity(alpha, vertex, aggregate)
                } else {
                    items
                        .iter()
                        .filter(|item| item.key != vertex.key)
                        .map(|item| calculate_velocity(alpha, vertex, *item))
                        .sum()
                }
            }
            QuadTree::Node { bounding_box, aggregate, children } => {
                if self.is_far_away(bounding_box, aggregate, vertex.position) {
                    calculate_velocity(alpha, vertex, aggregate)
                } else {
                    children
                        .iter()
                        .map(|child| self.apply_force(alpha, child, vertex))
                        .sum()
                }
            }
        }
    }

    // A box containing the vertex is never far away, so a vertex is never folded into its
    // own aggregate. NaN (zero width at zero distance) compares false as well.
    fn is_far_away(&self, bounding_box: &BoundingBox2D, aggregate: &AggregateVertex, position: Point2D) -> bool {
        !bounding_box.contains(position)
            && bounding_box.width() / position.distance_to(aggregate.position()) < self.settings.theta
    }

    /// Velocity change of every vertex, in input order.
    pub fn velocity_deltas<K>(&self, alpha: f64, vertices: &[Vertex<K>]) -> Vec<Vector2D>
    where
        K: PartialEq + Sync,
    {
        let tree = self.build_tree(vertices);
        debug!(
            "Many-body pass: {} vertices, tree depth {}, theta {}, alpha {}",
            vertices.len(),
            tree.depth(),
            self.settings.theta,
            alpha
        );
        if self.settings.parallel {
            vertices
                .par_iter()
                .map(|vertex| self.apply_force(alpha, &tree, vertex))
                .collect()
        } else {
            vertices
                .iter()
                .map(|vertex| self.apply_force(alpha, &tree, vertex))
                .collect()
        }
    }

    /// Adds the many-body velocity change to every vertex.
    pub fn apply<K>(&self, alpha: f64, vertices: Vec<Vertex<K>>) -> Vec<Vertex<K>>
    where
        K: PartialEq + Sync,
    {
        let deltas = self.velocity_deltas(alpha, &vertices);
        vertices
            .into_iter()
            .zip(deltas)
            .map(|(mut vertex, delta)| {
                vertex.velocity += delta;
                vertex
            })
            .collect()
    }
}

fn settings_for_theta(theta: f64) -> ManyBodySettings {
    match ManyBodySettings::default().with_theta(theta) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("{}; falling back to theta {}", e, DEFAULT_THETA);
            ManyBodySettings::default()
        }
    }
}

/// Applies the many-body force to a batch of vertices with the default split policy.
///
/// A negative or NaN `theta` is replaced by [`DEFAULT_THETA`].
///
/// # Examples
///
/// ```
/// use rs_force_layout::forces::{many_body, Vertex};
/// use rs_force_layout::models::Point2D;
///
/// let vertices = vec![
///     Vertex::at_rest('a', Point2D::new(0.0, 0.0), -30.0),
///     Vertex::at_rest('b', Point2D::new(10.0, 0.0), -30.0),
/// ];
/// let moved = many_body(0.5, 0.9, vertices);
///
/// // Negative strengths pull the pair together: 'a' gains (-10) * (-30 * 0.5 / 100) = 1.5 in x.
/// assert!((moved[0].velocity.x - 1.5).abs() < 1e-12);
/// assert!((moved[1].velocity.x + 1.5).abs() < 1e-12);
/// ```
pub fn many_body<K>(alpha: f64, theta: f64, vertices: Vec<Vertex<K>>) -> Vec<Vertex<K>>
where
    K: PartialEq + Sync,
{
    ManyBody::new(settings_for_theta(theta)).apply(alpha, vertices)
}

/// A caller-owned particle record the many-body wrapper can read and update.
///
/// Only the velocity is ever written; any other state of the record passes through.
pub trait ParticleState {
    fn position(&self) -> Point2D;
    fn velocity(&self) -> Vector2D;
    fn set_velocity(&mut self, velocity: Vector2D);

    fn accelerate(&mut self, delta: Vector2D) {
        let velocity = self.velocity() + delta;
        self.set_velocity(velocity);
    }
}

/// Plain particle record: position and velocity on the layout plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutParticle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl LayoutParticle {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        LayoutParticle { x, y, vx, vy }
    }
}

impl ParticleState for LayoutParticle {
    fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    fn velocity(&self) -> Vector2D {
        Vector2D::new(self.vx, self.vy)
    }

    fn set_velocity(&mut self, velocity: Vector2D) {
        self.vx = velocity.x;
        self.vy = velocity.y;
    }
}

/// Entry point for a simulation scheduler.
///
/// Builds one vertex per entry of `points`, taking its strength from `strengths` (ids without
/// a strength are inert: they feel the force but exert none), and adds the resulting
/// velocity change to each record.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use rs_force_layout::forces::{many_body_force, LayoutParticle};
///
/// let mut points = BTreeMap::new();
/// points.insert("hub", LayoutParticle::new(0.0, 0.0, 0.0, 0.0));
/// points.insert("leaf", LayoutParticle::new(3.0, 4.0, 1.0, 1.0));
///
/// let mut strengths = BTreeMap::new();
/// strengths.insert("hub", 25.0);
///
/// let result = many_body_force(1.0, 0.9, &strengths, points);
///
/// // "leaf" is pushed away from "hub" by (3, 4) * 25 / 25.
/// assert_eq!(result["leaf"], LayoutParticle::new(3.0, 4.0, 4.0, 5.0));
/// // "hub" feels nothing from the inert "leaf".
/// assert_eq!(result["hub"], LayoutParticle::new(0.0, 0.0, 0.0, 0.0));
/// ```
pub fn many_body_force<K, R>(
    alpha: f64,
    theta: f64,
    strengths: &BTreeMap<K, f64>,
    mut points: BTreeMap<K, R>,
) -> BTreeMap<K, R>
where
    K: Ord + Clone + Sync,
    R: ParticleState,
{
    let vertices: Vec<Vertex<K>> = points
        .iter()
        .map(|(key, point)| Vertex {
            key: key.clone(),
            position: point.position(),
            strength: strengths.get(key).copied().unwrap_or(DEFAULT_STRENGTH),
            velocity: point.velocity(),
        })
        .collect();

    let deltas = ManyBody::new(settings_for_theta(theta)).velocity_deltas(alpha, &vertices);
    for (vertex, delta) in vertices.iter().zip(deltas) {
        if let Some(point) = points.get_mut(&vertex.key) {
            point.accelerate(delta);
        }
    }
    points
}
