use std::marker::PhantomData;
use crate::models::Point2D;
use crate::quadtree::{QuadTree, Quadrants};

/// Describes how the items and subtrees of a [`QuadTree`] are summarised.
///
/// `combine_items` reduces the contents of a leaf, `combine_aggregates` reduces the
/// aggregates of a node's non-empty children. Both receive a non-empty input split into
/// its first element and the rest.
pub trait Aggregator<I> {
    type Aggregate;

    fn combine_items(&self, first: &I, rest: &[I]) -> Self::Aggregate;

    fn combine_aggregates(&self, first: &Self::Aggregate, rest: &[&Self::Aggregate]) -> Self::Aggregate;

    fn to_point(&self, item: &I) -> Point2D;
}

/// An [`Aggregator`] assembled from three closures.
///
/// # Examples
///
/// Counting the items below every node:
///
/// ```
/// use rs_force_layout::models::Point2D;
/// use rs_force_layout::quadtree::{AggregateConfig, QuadTree};
///
/// let points: Vec<Point2D> = (0..100).map(|i| Point2D::new(i as f64, (i * i % 7) as f64)).collect();
/// let tree = QuadTree::from_items(|p: &Point2D| *p, points);
///
/// let count: AggregateConfig<usize, _, _, _> = AggregateConfig::new(
///     |_first: &Point2D, rest: &[Point2D]| 1 + rest.len(),
///     |first: &usize, rest: &[&usize]| *first + rest.iter().copied().sum::<usize>(),
///     |p: &Point2D| *p,
/// );
/// let counted = tree.perform_aggregate(&count);
/// assert_eq!(counted.aggregate(), Some(&100));
/// ```
pub struct AggregateConfig<A, CI, CA, P> {
    pub combine_items: CI,
    pub combine_aggregates: CA,
    pub to_point: P,
    _aggregate: PhantomData<fn() -> A>,
}

impl<A, CI, CA, P> AggregateConfig<A, CI, CA, P> {
    pub fn new(combine_items: CI, combine_aggregates: CA, to_point: P) -> Self {
        AggregateConfig {
            combine_items,
            combine_aggregates,
            to_point,
            _aggregate: PhantomData,
        }
    }
}

impl<I, A, CI, CA, P> Aggregator<I> for AggregateConfig<A, CI, CA, P>
where
    CI: Fn(&I, &[I]) -> A,
    CA: Fn(&A, &[&A]) -> A,
    P: Fn(&I) -> Point2D,
{
    type Aggregate = A;

    fn combine_items(&self, first: &I, rest: &[I]) -> A {
        (self.combine_items)(first, rest)
    }

    fn combine_aggregates(&self, first: &A, rest: &[&A]) -> A {
        (self.combine_aggregates)(first, rest)
    }

    fn to_point(&self, item: &I) -> Point2D {
        (self.to_point)(item)
    }
}

impl<A, I> QuadTree<A, I> {
    /// Recomputes the aggregate of every node, children first.
    ///
    /// Existing aggregates are discarded, so running the same aggregator twice yields the
    /// same result. A node whose children are all empty collapses to `Empty`.
    pub fn perform_aggregate<G>(self, config: &G) -> QuadTree<G::Aggregate, I>
    where
        G: Aggregator<I>,
    {
        match self {
            QuadTree::Empty => QuadTree::Empty,
            QuadTree::Leaf { bounding_box, items, .. } => {
                let aggregate = match items.split_first() {
                    Some((first, rest)) => config.combine_items(first, rest),
                    None => return QuadTree::Empty,
                };
                QuadTree::Leaf { bounding_box, aggregate, items }
            }
            QuadTree::Node { bounding_box, children, .. } => {
                let Quadrants { nw, ne, se, sw } = *children;
                let children = Quadrants {
                    nw: nw.perform_aggregate(config),
                    ne: ne.perform_aggregate(config),
                    se: se.perform_aggregate(config),
                    sw: sw.perform_aggregate(config),
                };

                let aggregate = {
                    let aggregates: Vec<&G::Aggregate> = children.iter().filter_map(QuadTree::aggregate).collect();
                    match aggregates.split_first() {
                        Some((first, rest)) => config.combine_aggregates(first, rest),
                        None => return QuadTree::Empty,
                    }
                };
                QuadTree::Node {
                    bounding_box,
                    aggregate,
                    children: Box::new(children),
                }
            }
        }
    }
}
