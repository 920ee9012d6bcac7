use approx::{assert_abs_diff_eq, assert_relative_eq};
use crate::models::{BoundingBox2D, FromCoordinates, Point2D, ToCoordinates, Vector2D};

#[test]
fn test_point_arithmetic() {
    let a = Point2D::new(3.0, 4.0);
    let b = Point2D::origin();
    assert_eq!(a - b, Vector2D::new(3.0, 4.0));
    assert_eq!(a.distance_to(b), 5.0);
    assert_eq!(b + Vector2D::new(1.0, -1.0), Point2D::new(1.0, -1.0));
}

#[test]
fn test_vector_arithmetic() {
    let v = Vector2D::new(1.0, 2.0);
    assert_eq!(v + v, Vector2D::new(2.0, 4.0));
    assert_eq!(v - v, Vector2D::zero());
    assert_eq!(v * 3.0, Vector2D::new(3.0, 6.0));
    assert_eq!(-v, Vector2D::new(-1.0, -2.0));
    assert_eq!(v.squared_length(), 5.0);

    let mut acc = Vector2D::zero();
    acc += v;
    acc += v;
    assert_eq!(acc, Vector2D::new(2.0, 4.0));

    let total: Vector2D = vec![v, v, v].into_iter().sum();
    assert_eq!(total, Vector2D::new(3.0, 6.0));
}

#[test]
fn test_vector_finiteness() {
    assert!(Vector2D::new(1.0, -1.0).is_finite());
    assert!(!Vector2D::new(f64::NAN, 0.0).is_finite());
    assert!(!Vector2D::new(0.0, f64::INFINITY).is_finite());
}

#[test]
fn test_approx_comparisons() {
    let v = Vector2D::new(0.1 + 0.2, 1.0);
    assert_relative_eq!(v, Vector2D::new(0.3, 1.0));
    assert_abs_diff_eq!(Point2D::new(1.0, 1.0 + 1e-12), Point2D::new(1.0, 1.0), epsilon = 1e-9);
}

#[test]
fn test_coordinate_conversions() {
    let p = Point2D::from_coord((1.5, -2.5));
    assert_eq!(p.to_coord(), (1.5, -2.5));
    let v = Vector2D::from_coord((0.0, 7.0));
    assert_eq!(v.to_coord(), (0.0, 7.0));
}

#[test]
fn test_bounding_box_singleton_and_union() {
    let a = BoundingBox2D::singleton(Point2D::new(1.0, 2.0));
    assert!(a.is_degenerate());
    assert_eq!(a.dimensions(), (0.0, 0.0));
    assert!(a.contains(Point2D::new(1.0, 2.0)));

    let b = a.union(&BoundingBox2D::singleton(Point2D::new(-1.0, 5.0)));
    assert_eq!(b.extrema(), (-1.0, 2.0, 1.0, 5.0));
    assert_eq!(b.center(), Point2D::new(0.0, 3.5));
    assert!(!b.is_degenerate());
    assert!(a.is_contained_in(&b));
    assert!(!b.is_contained_in(&a));
}

#[test]
fn test_bounding_box_edges_are_inclusive() {
    let bbox = BoundingBox2D::from_extrema(0.0, 0.0, 2.0, 1.0);
    assert!(bbox.contains(Point2D::new(0.0, 0.0)));
    assert!(bbox.contains(Point2D::new(2.0, 1.0)));
    assert!(!bbox.contains(Point2D::new(2.0 + 1e-9, 1.0)));
    assert!(!bbox.contains(Point2D::new(1.0, -1e-9)));
}

#[test]
fn test_bounding_box_from_swapped_extrema() {
    let bbox = BoundingBox2D::from_extrema(3.0, 4.0, 1.0, 2.0);
    assert_eq!(bbox.extrema(), (1.0, 2.0, 3.0, 4.0));
    assert_eq!(bbox.width(), 2.0);
    assert_eq!(bbox.height(), 2.0);
}
