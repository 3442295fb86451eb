//! Matrix types: a runtime-dimensioned matrix for general linear algebra
//! and a fixed 4x4 matrix for 3D transformations.

use super::vector::Vec3;
use approx::{AbsDiffEq, RelativeEq};
use std::ops::Mul;
use thiserror::Error;

/// Errors from math contract violations.
///
/// Degenerate numeric input (zero-length axes, parallel look-at vectors)
/// is not an error; it propagates through the arithmetic as documented on
/// the individual operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// Constructor called with an unusable dimension or element count
    #[error("Invalid matrix dimension: {0}")]
    InvalidDimension(String),

    /// Operand shapes are incompatible for the requested operation
    #[error("Matrix dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Element access outside the matrix bounds
    #[error("Matrix index out of bounds: {0}")]
    IndexOutOfBounds(String),
}

/// Row-major matrix with dimensions chosen at runtime.
///
/// Shape errors surface as [`MathError`] results; elements are never
/// silently clamped or wrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Create a zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Result<Self, MathError> {
        if rows == 0 || cols == 0 {
            return Err(MathError::InvalidDimension(format!(
                "{rows}x{cols} has a zero dimension"
            )));
        }
        Ok(Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        })
    }

    /// Create a matrix from row-major elements.
    pub fn from_elements(rows: usize, cols: usize, elements: Vec<f32>) -> Result<Self, MathError> {
        let mut matrix = Self::new(rows, cols)?;
        if elements.len() != rows * cols {
            return Err(MathError::InvalidDimension(format!(
                "{rows}x{cols} needs {} elements, got {}",
                rows * cols,
                elements.len()
            )));
        }
        matrix.data = elements;
        Ok(matrix)
    }

    /// Create an `n x n` identity matrix.
    pub fn identity(n: usize) -> Result<Self, MathError> {
        let mut matrix = Self::new(n, n)?;
        for i in 0..n {
            matrix.data[i * n + i] = 1.0;
        }
        Ok(matrix)
    }

    /// Create a square matrix with the given values on the diagonal.
    pub fn diagonal(values: &[f32]) -> Result<Self, MathError> {
        let n = values.len();
        let mut matrix = Self::new(n, n)?;
        for (i, value) in values.iter().enumerate() {
            matrix.data[i * n + i] = *value;
        }
        Ok(matrix)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major element slice.
    pub fn elements(&self) -> &[f32] {
        &self.data
    }

    /// Read the element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<f32, MathError> {
        self.check_index(row, col)?;
        Ok(self.data[row * self.cols + col])
    }

    /// Write the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), MathError> {
        self.check_index(row, col)?;
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    fn check_index(&self, row: usize, col: usize) -> Result<(), MathError> {
        if row >= self.rows || col >= self.cols {
            return Err(MathError::IndexOutOfBounds(format!(
                "({row}, {col}) in a {}x{} matrix",
                self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// Standard matrix product; `self.cols` must equal `rhs.rows`.
    pub fn multiply(&self, rhs: &Self) -> Result<Self, MathError> {
        if self.cols != rhs.rows {
            return Err(MathError::DimensionMismatch(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, rhs.rows, rhs.cols
            )));
        }
        let mut result = Self::new(self.rows, rhs.cols)?;
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.data[i * self.cols + k] * rhs.data[k * rhs.cols + j];
                }
                result.data[i * rhs.cols + j] = sum;
            }
        }
        Ok(result)
    }

    /// The transposed matrix.
    pub fn transpose(&self) -> Self {
        let mut result = Self {
            rows: self.cols,
            cols: self.rows,
            data: vec![0.0; self.data.len()],
        };
        for i in 0..self.rows {
            for j in 0..self.cols {
                result.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        result
    }
}

/// Row-major 4x4 transformation matrix.
///
/// Points multiply on the right as column vectors, so `A * B` applies
/// `B` first. Translation lives in the last column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    /// Rows of the matrix
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// The all-zero matrix.
    pub fn zero() -> Self {
        Self { m: [[0.0; 4]; 4] }
    }

    /// Translation by `offset`.
    pub fn translation(offset: Vec3) -> Self {
        let mut result = Self::identity();
        result.m[0][3] = offset.x;
        result.m[1][3] = offset.y;
        result.m[2][3] = offset.z;
        result
    }

    /// Non-uniform scale about the origin.
    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut result = Self::identity();
        result.m[0][0] = x;
        result.m[1][1] = y;
        result.m[2][2] = z;
        result
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f32) -> Self {
        let mut result = Self::identity();
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        result.m[1][1] = cos_a;
        result.m[1][2] = -sin_a;
        result.m[2][1] = sin_a;
        result.m[2][2] = cos_a;
        result
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f32) -> Self {
        let mut result = Self::identity();
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        result.m[0][0] = cos_a;
        result.m[0][2] = sin_a;
        result.m[2][0] = -sin_a;
        result.m[2][2] = cos_a;
        result
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f32) -> Self {
        let mut result = Self::identity();
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        result.m[0][0] = cos_a;
        result.m[0][1] = -sin_a;
        result.m[1][0] = sin_a;
        result.m[1][1] = cos_a;
        result
    }

    /// Combined Euler rotation: X first, then Y, then Z.
    pub fn rotation_euler(rx: f32, ry: f32, rz: f32) -> Self {
        Self::rotation_z(rz) * Self::rotation_y(ry) * Self::rotation_x(rx)
    }

    /// Rotation of `angle` radians about an arbitrary axis (Rodrigues form).
    ///
    /// The axis is normalized internally, so callers may pass any non-zero
    /// vector. A zero axis degenerates to a uniform scale by `cos(angle)`
    /// instead of erroring, consistent with [`Vec3::normalize`].
    pub fn rotation_axis(angle: f32, axis: Vec3) -> Self {
        let a = axis.normalize();
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        let t = 1.0 - cos_a;

        let mut result = Self::identity();
        result.m[0][0] = t * a.x * a.x + cos_a;
        result.m[0][1] = t * a.x * a.y - sin_a * a.z;
        result.m[0][2] = t * a.x * a.z + sin_a * a.y;
        result.m[1][0] = t * a.x * a.y + sin_a * a.z;
        result.m[1][1] = t * a.y * a.y + cos_a;
        result.m[1][2] = t * a.y * a.z - sin_a * a.x;
        result.m[2][0] = t * a.x * a.z - sin_a * a.y;
        result.m[2][1] = t * a.y * a.z + sin_a * a.x;
        result.m[2][2] = t * a.z * a.z + cos_a;
        result
    }

    /// Rotation about an axis through an arbitrary point instead of the
    /// origin. The axis is normalized internally.
    pub fn rotation_about_point(angle: f32, axis: Vec3, point: Vec3) -> Self {
        Self::translation(point)
            * Self::rotation_axis(angle, axis)
            * Self::translation(-point)
    }

    /// Right-handed view matrix looking from `eye` toward `center`.
    ///
    /// A forward direction parallel to `up` produces a degenerate basis
    /// (NaN columns); keeping the two separated is the caller's job.
    pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        let f = (center - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);

        let mut result = Self::identity();
        result.m[0][0] = s.x;
        result.m[0][1] = s.y;
        result.m[0][2] = s.z;
        result.m[1][0] = u.x;
        result.m[1][1] = u.y;
        result.m[1][2] = u.z;
        result.m[2][0] = -f.x;
        result.m[2][1] = -f.y;
        result.m[2][2] = -f.z;
        result.m[0][3] = -s.dot(eye);
        result.m[1][3] = -u.dot(eye);
        result.m[2][3] = f.dot(eye);
        result
    }

    /// Perspective projection with OpenGL-style clip space (depth -1..1).
    ///
    /// `fov_y` is the vertical field of view in radians. `near == far` is
    /// undefined and not validated.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut result = Self::zero();
        let tan_half_fov = (fov_y / 2.0).tan();

        result.m[0][0] = 1.0 / (aspect * tan_half_fov);
        result.m[1][1] = 1.0 / tan_half_fov;
        result.m[2][2] = -(far + near) / (far - near);
        result.m[2][3] = -(2.0 * far * near) / (far - near);
        result.m[3][2] = -1.0;
        result
    }

    /// Apply the full homogeneous transform to a point, including the
    /// perspective divide.
    ///
    /// A resulting `w` of zero divides through to non-finite components
    /// (a point at infinity); nothing is clamped.
    pub fn transform_point(&self, v: Vec3) -> Vec3 {
        let x = self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z + self.m[0][3];
        let y = self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z + self.m[1][3];
        let z = self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z + self.m[2][3];
        let w = self.m[3][0] * v.x + self.m[3][1] * v.y + self.m[3][2] * v.z + self.m[3][3];
        Vec3::new(x / w, y / w, z / w)
    }

    /// Inverse of a rigid transform (rotation plus translation only).
    ///
    /// Transposes the upper 3x3 block and counter-rotates the translation.
    /// Matrices carrying scale, shear, or projection are outside the
    /// contract and produce garbage.
    pub fn rigid_inverse(&self) -> Self {
        let mut result = Self::identity();
        for i in 0..3 {
            for j in 0..3 {
                result.m[i][j] = self.m[j][i];
            }
        }
        for i in 0..3 {
            result.m[i][3] = -(self.m[0][i] * self.m[0][3]
                + self.m[1][i] * self.m[1][3]
                + self.m[2][i] * self.m[2][3]);
        }
        result
    }

    /// The transposed matrix.
    pub fn transpose(&self) -> Self {
        let mut result = Self::zero();
        for i in 0..4 {
            for j in 0..4 {
                result.m[i][j] = self.m[j][i];
            }
        }
        result
    }

    /// Column-major element array, the layout GPU uniform buffers expect.
    pub fn as_array(&self) -> [f32; 16] {
        [
            self.m[0][0], self.m[1][0], self.m[2][0], self.m[3][0],
            self.m[0][1], self.m[1][1], self.m[2][1], self.m[3][1],
            self.m[0][2], self.m[1][2], self.m[2][2], self.m[3][2],
            self.m[0][3], self.m[1][3], self.m[2][3], self.m[3][3],
        ]
    }

    /// View this matrix as a general [`Matrix`].
    pub fn to_matrix(&self) -> Matrix {
        let mut elements = Vec::with_capacity(16);
        for row in &self.m {
            elements.extend_from_slice(row);
        }
        Matrix {
            rows: 4,
            cols: 4,
            data: elements,
        }
    }

    /// Convert a general [`Matrix`] back to a fixed 4x4 matrix.
    pub fn from_matrix(matrix: &Matrix) -> Result<Self, MathError> {
        if matrix.rows != 4 || matrix.cols != 4 {
            return Err(MathError::DimensionMismatch(format!(
                "expected a 4x4 matrix, got {}x{}",
                matrix.rows, matrix.cols
            )));
        }
        let mut result = Self::zero();
        for i in 0..4 {
            for j in 0..4 {
                result.m[i][j] = matrix.data[i * 4 + j];
            }
        }
        Ok(result)
    }
}

impl Mul for Mat4 {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        let mut result = Self::zero();
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result.m[i][j] += self.m[i][k] * other.m[k][j];
                }
            }
        }
        result
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if !f32::abs_diff_eq(&self.m[i][j], &other.m[i][j], epsilon) {
                    return false;
                }
            }
        }
        true
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if !f32::relative_eq(&self.m[i][j], &other.m[i][j], epsilon, max_relative) {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::PI;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_matrix_rejects_zero_dimensions() {
        assert!(matches!(
            Matrix::new(0, 3),
            Err(MathError::InvalidDimension(_))
        ));
        assert!(matches!(
            Matrix::new(3, 0),
            Err(MathError::InvalidDimension(_))
        ));
        assert!(matches!(
            Matrix::identity(0),
            Err(MathError::InvalidDimension(_))
        ));
        assert!(matches!(
            Matrix::diagonal(&[]),
            Err(MathError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_matrix_from_elements_checks_count() {
        let ok = Matrix::from_elements(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
        assert!(ok.is_ok());

        let short = Matrix::from_elements(2, 2, vec![1.0, 2.0, 3.0]);
        assert!(matches!(short, Err(MathError::InvalidDimension(_))));
    }

    #[test]
    fn test_matrix_get_set_bounds() {
        let mut m = Matrix::new(2, 3).unwrap();
        m.set(1, 2, 7.5).unwrap();
        assert_eq!(m.get(1, 2).unwrap(), 7.5);

        assert!(matches!(m.get(2, 0), Err(MathError::IndexOutOfBounds(_))));
        assert!(matches!(
            m.set(0, 3, 1.0),
            Err(MathError::IndexOutOfBounds(_))
        ));
    }

    #[test]
    fn test_matrix_multiply_known_product() {
        let a = Matrix::from_elements(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = Matrix::from_elements(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();

        let product = a.multiply(&b).unwrap();
        assert_eq!(product.rows(), 2);
        assert_eq!(product.cols(), 2);
        assert_eq!(product.elements(), &[58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_matrix_multiply_shape_mismatch() {
        let a = Matrix::new(2, 3).unwrap();
        let b = Matrix::new(2, 3).unwrap();
        assert!(matches!(
            a.multiply(&b),
            Err(MathError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_matrix_identity_is_multiplicative_unit() {
        let a = Matrix::from_elements(3, 3, vec![2.0, 0.0, 1.0, 1.0, 3.0, 0.0, 0.0, 1.0, 4.0])
            .unwrap();
        let i = Matrix::identity(3).unwrap();
        assert_eq!(i.multiply(&a).unwrap(), a);
        assert_eq!(a.multiply(&i).unwrap(), a);
    }

    #[test]
    fn test_matrix_transpose_swaps_shape() {
        let a = Matrix::from_elements(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = a.transpose();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_eq!(t.elements(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn test_rotation_composed_with_its_inverse_is_identity() {
        let theta = 0.7;
        for pair in [
            Mat4::rotation_x(theta) * Mat4::rotation_x(-theta),
            Mat4::rotation_y(theta) * Mat4::rotation_y(-theta),
            Mat4::rotation_z(theta) * Mat4::rotation_z(-theta),
        ] {
            assert_relative_eq!(pair, Mat4::identity(), epsilon = EPSILON);
        }
    }

    #[test]
    fn test_rotation_axis_matches_cardinal_rotations() {
        let theta = 1.1;
        assert_relative_eq!(
            Mat4::rotation_axis(theta, Vec3::new(0.0, 0.0, 1.0)),
            Mat4::rotation_z(theta),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Mat4::rotation_axis(theta, Vec3::new(0.0, 1.0, 0.0)),
            Mat4::rotation_y(theta),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_rotation_axis_normalizes_its_axis() {
        let theta = 0.4;
        let from_unit = Mat4::rotation_axis(theta, Vec3::new(1.0, 0.0, 0.0));
        let from_scaled = Mat4::rotation_axis(theta, Vec3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(from_unit, from_scaled, epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_about_point_fixes_the_point() {
        let point = Vec3::new(2.0, -1.0, 3.0);
        let m = Mat4::rotation_about_point(1.3, Vec3::new(0.0, 1.0, 0.0), point);
        assert_relative_eq!(m.transform_point(point), point, epsilon = EPSILON);

        let quarter = Mat4::rotation_about_point(PI / 2.0, Vec3::new(0.0, 0.0, 1.0), Vec3::one());
        let moved = quarter.transform_point(Vec3::new(2.0, 1.0, 1.0));
        assert_relative_eq!(moved, Vec3::new(1.0, 2.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_euler_rotation_applies_x_then_y_then_z() {
        let (rx, ry, rz) = (0.3, -0.8, 1.2);
        let composed = Mat4::rotation_z(rz) * Mat4::rotation_y(ry) * Mat4::rotation_x(rx);
        assert_relative_eq!(Mat4::rotation_euler(rx, ry, rz), composed, epsilon = EPSILON);
    }

    #[test]
    fn test_translation_moves_points() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        let p = m.transform_point(Vec3::new(10.0, 0.0, -1.0));
        assert_relative_eq!(p, Vec3::new(11.0, 2.0, 2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_transform_point_divides_by_w() {
        let projection = Mat4::perspective(PI / 2.0, 1.0, 1.0, 10.0);
        let projected = projection.transform_point(Vec3::new(0.0, 0.0, -5.0));
        // On the view axis x and y stay centered; depth lands inside -1..1.
        assert_relative_eq!(projected.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(projected.y, 0.0, epsilon = EPSILON);
        assert!(projected.z > -1.0 && projected.z < 1.0);
    }

    #[test]
    fn test_rigid_inverse_round_trip() {
        let m = Mat4::translation(Vec3::new(4.0, -2.0, 7.0)) * Mat4::rotation_y(0.9);
        assert_relative_eq!(m * m.rigid_inverse(), Mat4::identity(), epsilon = EPSILON);
        assert_relative_eq!(m.rigid_inverse() * m, Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_look_at_maps_eye_to_origin() {
        let eye = Vec3::new(3.0, 4.0, 5.0);
        let view = Mat4::look_at(eye, Vec3::zero(), Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(view.transform_point(eye), Vec3::zero(), epsilon = EPSILON);

        // The target should land straight ahead on the -Z view axis.
        let target_in_view = view.transform_point(Vec3::zero());
        assert_relative_eq!(target_in_view.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(target_in_view.y, 0.0, epsilon = EPSILON);
        assert!(target_in_view.z < 0.0);
    }

    #[test]
    fn test_mat4_matrix_conversions() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0)) * Mat4::rotation_x(0.5);
        let general = m.to_matrix();
        assert_eq!(general.rows(), 4);
        assert_eq!(general.cols(), 4);
        assert_eq!(Mat4::from_matrix(&general).unwrap(), m);

        let wrong_shape = Matrix::new(3, 3).unwrap();
        assert!(matches!(
            Mat4::from_matrix(&wrong_shape),
            Err(MathError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_as_array_is_column_major() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        let a = m.as_array();
        // Translation occupies the last column, elements 12..14.
        assert_eq!(&a[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(a[0], 1.0);
    }
}
