use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use approx::{AbsDiffEq, RelativeEq};
use crate::models::{FromCoordinates, ToCoordinates};

/// A position on the layout plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

/// A displacement or velocity on the layout plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Point2D { x, y }
    }

    pub const fn origin() -> Self {
        Point2D { x: 0.0, y: 0.0 }
    }

    /// Returns the vector pointing from `other` to `self`.
    /// # Example
    /// ```
    /// use rs_force_layout::models::{Point2D, Vector2D};
    ///
    /// let a = Point2D::new(3.0, 4.0);
    /// let b = Point2D::new(1.0, 1.0);
    /// assert_eq!(a.vector_from(b), Vector2D::new(2.0, 3.0));
    /// ```
    pub fn vector_from(self, other: Point2D) -> Vector2D {
        Vector2D {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Euclidean distance between two points.
    /// # Example
    /// ```
    /// use rs_force_layout::models::Point2D;
    ///
    /// let d = Point2D::new(0.0, 0.0).distance_to(Point2D::new(3.0, 4.0));
    /// assert_eq!(d, 5.0);
    /// ```
    pub fn distance_to(self, other: Point2D) -> f64 {
        self.vector_from(other).length()
    }

    pub fn translate_by(self, vector: Vector2D) -> Point2D {
        Point2D {
            x: self.x + vector.x,
            y: self.y + vector.y,
        }
    }
}

impl Vector2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    pub const fn zero() -> Self {
        Vector2D { x: 0.0, y: 0.0 }
    }

    pub fn squared_length(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f64 {
        self.squared_length().sqrt()
    }

    pub fn scale_by(self, factor: f64) -> Vector2D {
        Vector2D {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Sub for Point2D {
    type Output = Vector2D;

    fn sub(self, other: Point2D) -> Vector2D {
        self.vector_from(other)
    }
}

impl Add<Vector2D> for Point2D {
    type Output = Point2D;

    fn add(self, vector: Vector2D) -> Point2D {
        self.translate_by(vector)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, other: Vector2D) -> Vector2D {
        Vector2D {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, other: Vector2D) -> Vector2D {
        Vector2D {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, other: Vector2D) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, factor: f64) -> Vector2D {
        self.scale_by(factor)
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Vector2D { x: -self.x, y: -self.y }
    }
}

impl Sum for Vector2D {
    fn sum<I: Iterator<Item = Vector2D>>(iter: I) -> Vector2D {
        iter.fold(Vector2D::zero(), Add::add)
    }
}

impl FromCoordinates<(f64, f64)> for Point2D {
    fn from_coord(position: (f64, f64)) -> Self {
        Point2D {
            x: position.0,
            y: position.1,
        }
    }
}

impl ToCoordinates<(f64, f64)> for Point2D {
    fn to_coord(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl FromCoordinates<(f64, f64)> for Vector2D {
    fn from_coord(position: (f64, f64)) -> Self {
        Vector2D {
            x: position.0,
            y: position.1,
        }
    }
}

impl ToCoordinates<(f64, f64)> for Vector2D {
    fn to_coord(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl AbsDiffEq for Vector2D {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for Vector2D {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

impl AbsDiffEq for Point2D {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for Point2D {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}
