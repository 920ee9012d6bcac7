//! Adaptive quadtree used as the spatial index of the force computations.
//!
//! The tree is built by repeated insertion ([`QuadTree::from_items`]) with an empty `()`
//! aggregate on every node, then turned into an aggregated tree by a post-order pass
//! ([`QuadTree::perform_aggregate`]). Forces other than many-body can reuse the index by
//! supplying their own [`Aggregator`].
mod quadtree;
mod aggregate;

pub use quadtree::*;
pub use aggregate::*;
