use std::fmt;
use std::error::Error;

/// Represents errors that can occur while configuring or validating a layout computation.
///
/// Force evaluation itself never fails. These errors only come out of settings validation
/// and the quadtree invariant checks.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Indicates a theta value that is negative or not a number.
    InvalidTheta(f64),
    /// Indicates a leaf capacity too small to ever hold a bucket (must be at least 2).
    InvalidLeafCapacity(usize),
    /// Indicates a subdivision depth cap of zero.
    InvalidDepth(usize),
    /// A point was found outside the bounding box of a subtree that contains it.
    PointOutsideBounds {
        x: f64,
        y: f64,
        depth: usize,
    },
    /// A child subtree whose bounding box is not enclosed by its parent's box.
    ChildOutsideBounds {
        depth: usize,
    },
    /// A leaf holds more items than the split policy allows.
    LeafOverCapacity {
        size: usize,
        capacity: usize,
        depth: usize,
    },
    /// A leaf without any items.
    EmptyLeaf,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LayoutError::InvalidTheta(theta) => write!(f, "Invalid theta value: {}", theta),
            LayoutError::InvalidLeafCapacity(size) => write!(f, "Invalid leaf capacity: {}", size),
            LayoutError::InvalidDepth(depth) => write!(f, "Invalid maximum depth: {}", depth),
            LayoutError::PointOutsideBounds { x, y, depth } => {
                write!(f, "Point ({}, {}) lies outside its bounding box at depth {}", x, y, depth)
            }
            LayoutError::ChildOutsideBounds { depth } => {
                write!(f, "Child bounding box escapes its parent at depth {}", depth)
            }
            LayoutError::LeafOverCapacity { size, capacity, depth } => {
                write!(f, "Leaf at depth {} holds {} items (capacity {})", depth, size, capacity)
            }
            LayoutError::EmptyLeaf => write!(f, "Leaf without items"),
        }
    }
}

impl Error for LayoutError {}
