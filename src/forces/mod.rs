//! Many-body (charge) force between layout vertices, evaluated with the Barnes-Hut
//! approximation over a [`crate::quadtree::QuadTree`] rebuilt on every call.
mod vertex;
mod many_body;

pub use vertex::*;
pub use many_body::*;

#[cfg(test)]
mod many_body_tests;
