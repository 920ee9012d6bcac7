use crate::quadtree::SplitPolicy;
use crate::utils::{
    DEFAULT_MANY_BODY_SETTINGS,
    errors::LayoutError
};

/// Tunables for the many-body force evaluator.
///
/// * `theta` - Barnes-Hut accuracy threshold. A subtree is collapsed into its aggregate once
///   `box width / distance < theta`; `0.0` disables the approximation entirely.
/// * `split` - leaf capacity and depth cap used while building the quadtree.
/// * `parallel` - evaluate vertices on the rayon thread pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManyBodySettings {
    pub theta: f64,
    pub split: SplitPolicy,
    pub parallel: bool,
}

impl Default for ManyBodySettings {
    fn default() -> Self {
        DEFAULT_MANY_BODY_SETTINGS
    }
}

impl ManyBodySettings {
    /// Creates a new set of settings, taking every unspecified value from the defaults.
    ///
    /// # Errors
    /// Returns an error if `theta` is negative or NaN, if `max_leaf_size` is below 2,
    /// or if `max_depth` is zero.
    ///
    /// # Example
    /// ```
    /// use rs_force_layout::utils::{ManyBodySettings, LayoutError, DEFAULT_MAX_LEAF_SIZE};
    ///
    /// let settings = ManyBodySettings::new(Some(0.5), None, None, None).unwrap();
    /// assert_eq!(settings.theta, 0.5);
    /// assert_eq!(settings.split.max_leaf_size, DEFAULT_MAX_LEAF_SIZE);
    ///
    /// let invalid = ManyBodySettings::new(Some(-1.0), None, None, None);
    /// assert_eq!(invalid, Err(LayoutError::InvalidTheta(-1.0)));
    /// ```
    pub fn new(
        theta: Option<f64>,
        max_leaf_size: Option<usize>,
        max_depth: Option<usize>,
        parallel: Option<bool>,
    ) -> Result<Self, LayoutError> {
        let default = DEFAULT_MANY_BODY_SETTINGS;
        let theta = theta.unwrap_or(default.theta);
        if theta.is_nan() || theta < 0.0 {
            return Err(LayoutError::InvalidTheta(theta));
        }
        let split = SplitPolicy::new(
            max_leaf_size.unwrap_or(default.split.max_leaf_size),
            max_depth.unwrap_or(default.split.max_depth),
        )?;
        Ok(Self {
            theta,
            split,
            parallel: parallel.unwrap_or(default.parallel),
        })
    }

    /// Returns a copy with a different `theta`.
    ///
    /// # Errors
    /// Returns an error if `theta` is negative or NaN.
    pub fn with_theta(self, theta: f64) -> Result<Self, LayoutError> {
        if theta.is_nan() || theta < 0.0 {
            return Err(LayoutError::InvalidTheta(theta));
        }
        Ok(Self { theta, ..self })
    }

    pub fn with_parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }
}
