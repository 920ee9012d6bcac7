mod coordinates;
mod point_2d;
mod bounding_box_2d;

pub use coordinates::*;
pub use point_2d::*;
pub use bounding_box_2d::*;

#[cfg(test)]
mod models_tests;
