use crate::quadtree::SplitPolicy;
use crate::utils::ManyBodySettings;

/// Default Barnes-Hut accuracy threshold.
pub const DEFAULT_THETA: f64 = 0.9;

/// Item count at which a leaf bucket is converted into a node.
pub const DEFAULT_MAX_LEAF_SIZE: usize = 32;

/// Subdivision depth below which leaves are no longer split.
pub const DEFAULT_MAX_DEPTH: usize = 48;

/// Replacement for exactly-zero components, see [`crate::utils::jiggle`].
pub const JIGGLE_EPSILON: f64 = 1e-6;

/// Strength of a vertex that has no entry in the strength map.
pub const DEFAULT_STRENGTH: f64 = 0.0;

pub const DEFAULT_SPLIT_POLICY: SplitPolicy = SplitPolicy {
    max_leaf_size: DEFAULT_MAX_LEAF_SIZE,
    max_depth: DEFAULT_MAX_DEPTH,
};

pub const DEFAULT_MANY_BODY_SETTINGS: ManyBodySettings = ManyBodySettings {
    theta: DEFAULT_THETA,
    split: DEFAULT_SPLIT_POLICY,
    parallel: true,
};
