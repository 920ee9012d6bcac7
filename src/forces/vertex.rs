use crate::models::{Point2D, Vector2D};
use crate::quadtree::Aggregator;

/// Anything with a position and a signed strength that can exert a many-body force.
pub trait Charged {
    fn position(&self) -> Point2D;
    fn strength(&self) -> f64;
}

impl<T: Charged + ?Sized> Charged for &T {
    fn position(&self) -> Point2D {
        (**self).position()
    }

    fn strength(&self) -> f64 {
        (**self).strength()
    }
}

/// A particle taking part in one evaluation of the many-body force.
///
/// `key` identifies the vertex within one batch and is used to keep a vertex from acting on
/// itself. A positive `strength` pushes other vertices away, a negative one pulls them in.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex<K> {
    pub key: K,
    pub position: Point2D,
    pub strength: f64,
    pub velocity: Vector2D,
}

impl<K> Vertex<K> {
    pub fn new(key: K, position: Point2D, strength: f64, velocity: Vector2D) -> Self {
        Vertex { key, position, strength, velocity }
    }

    /// A vertex at rest.
    pub fn at_rest(key: K, position: Point2D, strength: f64) -> Self {
        Vertex { key, position, strength, velocity: Vector2D::zero() }
    }
}

impl<K> Charged for Vertex<K> {
    fn position(&self) -> Point2D {
        self.position
    }

    fn strength(&self) -> f64 {
        self.strength
    }
}

/// The combined representative of a group of vertices: their centroid and summed strength.
///
/// Only produced by [`construct_super_point`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateVertex {
    position: Point2D,
    strength: f64,
}

impl Charged for AggregateVertex {
    fn position(&self) -> Point2D {
        self.position
    }

    fn strength(&self) -> f64 {
        self.strength
    }
}

/// Combines a non-empty group of charged points into one super-point.
///
/// The position is the plain arithmetic mean of the positions (every point counts once,
/// whatever its strength) and the strength is the algebraic sum of the strengths.
///
/// # Examples
///
/// ```
/// use rs_force_layout::forces::{construct_super_point, Charged, Vertex};
/// use rs_force_layout::models::Point2D;
///
/// let a = Vertex::at_rest(1, Point2D::new(0.0, 0.0), 10.0);
/// let b = Vertex::at_rest(2, Point2D::new(4.0, 2.0), -4.0);
///
/// let super_point = construct_super_point(&a, [&b]);
/// assert_eq!(super_point.position(), Point2D::new(2.0, 1.0));
/// assert_eq!(super_point.strength(), 6.0);
/// ```
pub fn construct_super_point<'a, T, R>(first: &'a T, rest: R) -> AggregateVertex
where
    T: Charged + 'a,
    R: IntoIterator<Item = &'a T>,
{
    let origin = first.position();
    let (count, sum_x, sum_y, strength) = rest.into_iter().fold(
        (1usize, origin.x, origin.y, first.strength()),
        |(count, sum_x, sum_y, strength), point| {
            let position = point.position();
            (count + 1, sum_x + position.x, sum_y + position.y, strength + point.strength())
        },
    );
    AggregateVertex {
        position: Point2D::new(sum_x / count as f64, sum_y / count as f64),
        strength,
    }
}

/// Aggregates any [`Charged`] items into [`AggregateVertex`] super-points.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuperPointAggregator;

impl<V: Charged> Aggregator<V> for SuperPointAggregator {
    type Aggregate = AggregateVertex;

    fn combine_items(&self, first: &V, rest: &[V]) -> AggregateVertex {
        construct_super_point(first, rest)
    }

    fn combine_aggregates(&self, first: &AggregateVertex, rest: &[&AggregateVertex]) -> AggregateVertex {
        construct_super_point(first, rest.iter().copied())
    }

    fn to_point(&self, item: &V) -> Point2D {
        item.position()
    }
}
