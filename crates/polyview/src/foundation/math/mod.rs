//! Math utilities and types
//!
//! Provides the linear algebra the viewer core is built on: a 3D vector,
//! a runtime-dimensioned matrix with checked shapes, and a fixed 4x4
//! transformation matrix with the usual graphics factories.

pub mod matrix;
pub mod vector;

pub use matrix::{Mat4, MathError, Matrix};
pub use vector::Vec3;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}
