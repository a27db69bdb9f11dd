mod matrix;
mod ray;
mod transform;
mod vector;

pub use matrix::*;
pub use ray::*;
pub use transform::*;
pub use vector::*;

/// Tolerance for treating matrix elements as zero or equal.
pub const EPSILON: f64 = 1e-9;

/// Check whether two numbers are equal to within [`EPSILON`].
pub fn close_enough(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Linearly interpolate between two values.
pub fn lerp(a: f64, b: f64, c: f64) -> f64 {
    a + (b - a) * c
}

/// A type that can be linearly interpolated between two values of itself.
pub trait Lerp {
    fn lerp(self, other: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, other: Self, t: f64) -> Self {
        lerp(self, other, t)
    }
}
