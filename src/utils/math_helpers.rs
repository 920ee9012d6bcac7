use crate::models::Vector2D;
use crate::utils::JIGGLE_EPSILON;

/// Replaces an exactly-zero value by a tiny epsilon.
///
/// Forces that divide by a coordinate difference apply this before the division, so two
/// particles starting at the same position do not produce an infinite force.
///
/// # Example
/// ```
/// use rs_force_layout::utils::jiggle;
///
/// assert_eq!(jiggle(0.0), 1e-6);
/// assert_eq!(jiggle(-3.5), -3.5);
/// ```
#[inline]
pub fn jiggle(value: f64) -> f64 {
    if value == 0.0 {
        JIGGLE_EPSILON
    } else {
        value
    }
}

/// Applies [`jiggle`] to both components independently.
///
/// # Example
/// ```
/// use rs_force_layout::models::Vector2D;
/// use rs_force_layout::utils::jiggle_vector;
///
/// let v = jiggle_vector(Vector2D::new(0.0, 2.0));
/// assert_eq!(v, Vector2D::new(1e-6, 2.0));
/// ```
#[inline]
pub fn jiggle_vector(vector: Vector2D) -> Vector2D {
    Vector2D::new(jiggle(vector.x), jiggle(vector.y))
}
