use crate::models::Point2D;

/// An axis-aligned rectangle on the layout plane.
///
/// Unlike a fixed simulation region, a `BoundingBox2D` is grown to fit the points it covers,
/// so every edge is inclusive.
///
/// # Examples
///
/// ```
/// use rs_force_layout::models::{BoundingBox2D, Point2D};
///
/// let bbox = BoundingBox2D::singleton(Point2D::new(1.0, 1.0))
///     .union(&BoundingBox2D::singleton(Point2D::new(3.0, -1.0)));
///
/// assert_eq!(bbox.width(), 2.0);
/// assert_eq!(bbox.height(), 2.0);
/// assert_eq!(bbox.center(), Point2D::new(2.0, 0.0));
/// assert!(bbox.contains(Point2D::new(3.0, 1.0))); // corners are inside
/// assert!(!bbox.contains(Point2D::new(3.5, 0.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox2D {
    /// The zero-area box at a single point.
    pub fn singleton(point: Point2D) -> Self {
        BoundingBox2D {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x,
            max_y: point.y,
        }
    }

    /// Builds a box from its extrema, swapping them if they are given in the wrong order.
    pub fn from_extrema(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox2D {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    /// Returns `(min_x, min_y, max_x, max_y)`.
    pub fn extrema(&self) -> (f64, f64, f64, f64) {
        (self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// The smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox2D) -> Self {
        BoundingBox2D {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn contains(&self, point: Point2D) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Returns true if `other` lies entirely within `self`.
    pub fn is_contained_in(&self, other: &BoundingBox2D) -> bool {
        self.min_x >= other.min_x
            && self.max_x <= other.max_x
            && self.min_y >= other.min_y
            && self.max_y <= other.max_y
    }

    pub fn center(&self) -> Point2D {
        Point2D {
            x: self.min_x + 0.5 * (self.max_x - self.min_x),
            y: self.min_y + 0.5 * (self.max_y - self.min_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (f64, f64) {
        (self.width(), self.height())
    }

    /// True when the box has collapsed to a single point.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 && self.height() == 0.0
    }
}
