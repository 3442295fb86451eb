//! Orbit camera for interactive model viewing.
//!
//! The camera always looks from `position` toward `target`. Interactive
//! motion comes in three flavors driven by 2D input deltas: orbit swings
//! the position around the target, pan slides both together, zoom moves
//! the position along the view axis. Each step size is a tunable field so
//! configuration can rescale input sensitivity.

use crate::foundation::math::{utils, Mat4, Vec3};

/// Default orbit increment in radians per drag event
pub const DEFAULT_ORBIT_STEP: f32 = 0.05;
/// Default pan increment in world units per drag event
pub const DEFAULT_PAN_STEP: f32 = 0.05;
/// Default zoom increment in world units per wheel tick
pub const DEFAULT_ZOOM_STEP: f32 = 1.0;

/// Perspective camera with orbit, pan and zoom controls
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// World up reference, typically +Y
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Viewport width over height
    pub aspect: f32,
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
    /// Radians the position swings per orbit event
    pub orbit_step: f32,
    /// World units the camera slides per pan event
    pub pan_step: f32,
    /// World units the camera advances per zoom tick
    pub zoom_step: f32,
}

impl Camera {
    /// Create a perspective camera at `position` looking at the origin.
    pub fn perspective(position: Vec3, fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zero(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov_y: utils::deg_to_rad(fov_y_degrees),
            aspect,
            near,
            far,
            orbit_step: DEFAULT_ORBIT_STEP,
            pan_step: DEFAULT_PAN_STEP,
            zoom_step: DEFAULT_ZOOM_STEP,
        }
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// World-to-view transform for the current pose.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Perspective projection for the current lens parameters.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Swing the eye around the target.
    ///
    /// The screen-space drag delta is lifted into world space through the
    /// camera basis, the rotation axis is the cross product of that world
    /// delta with the view direction, and the position rotates about the
    /// target by `orbit_step` radians. The target never moves. A zero
    /// axis, from a zero delta or a degenerate basis, leaves the pose
    /// untouched.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let (right, up) = self.world_basis();
        let world_delta = right * dx + up * dy;
        let axis = world_delta.cross(self.target - self.position);
        if axis.length_squared() > 0.0 {
            let rotation = Mat4::rotation_about_point(self.orbit_step, axis, self.target);
            self.position = rotation.transform_point(self.position);
        }
    }

    /// Slide eye and target together across the view plane.
    ///
    /// The vertical input is inverted because screen Y grows downward
    /// while world up is +Y.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let (right, up) = self.world_basis();
        let world_delta = (right * dx + up * -dy) * self.pan_step;
        self.position = self.position + world_delta;
        self.target = self.target + world_delta;
    }

    /// Move the eye along the view axis by `ticks` zoom steps.
    ///
    /// Deliberately unclamped: enough positive ticks push the eye through
    /// the target and out the other side, flipping the view direction.
    pub fn zoom(&mut self, ticks: f32) {
        let direction = (self.target - self.position).normalize();
        self.position = self.position + direction * (ticks * self.zoom_step);
    }

    /// Distance from the eye to the target.
    pub fn target_distance(&self) -> f32 {
        (self.target - self.position).length()
    }

    /// Camera right and up axes in world space.
    ///
    /// Degenerates to zero vectors when the view direction is parallel to
    /// `up`, which makes orbit and pan no-ops rather than errors.
    fn world_basis(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward);
        (right, up)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(Vec3::new(0.0, 3.0, 3.0), 45.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn front_camera() -> Camera {
        Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 45.0, 1.0, 0.1, 100.0)
    }

    #[test]
    fn test_view_matrix_sends_eye_to_origin() {
        let camera = front_camera();
        let eye_in_view = camera.view_matrix().transform_point(camera.position);
        assert_relative_eq!(eye_in_view.length(), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_orbit_keeps_distance_and_target() {
        let mut camera = front_camera();
        let distance = camera.target_distance();

        camera.orbit(1.0, 0.0);
        camera.orbit(0.0, 1.0);
        camera.orbit(-0.5, 0.3);

        assert_relative_eq!(camera.target_distance(), distance, epsilon = EPSILON);
        assert_relative_eq!(camera.target.length(), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_orbit_right_swings_around_world_up() {
        let mut camera = front_camera();
        camera.orbit(1.0, 0.0);

        // A horizontal drag from the front view becomes a rotation about +Y.
        assert!(camera.position.x > 0.0);
        assert_relative_eq!(camera.position.y, 0.0, epsilon = EPSILON);
        assert!(camera.position.z < 5.0);
    }

    #[test]
    fn test_orbit_with_zero_delta_is_a_no_op() {
        let mut camera = front_camera();
        camera.orbit(0.0, 0.0);
        assert_relative_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0), epsilon = EPSILON);
    }

    #[test]
    fn test_pan_moves_eye_and_target_together() {
        let mut camera = front_camera();
        let offset_before = camera.target - camera.position;

        camera.pan(2.0, 3.0);

        let offset_after = camera.target - camera.position;
        assert_relative_eq!(offset_after, offset_before, epsilon = EPSILON);
        // dx pans along +X from the front view, dy is screen-down so it
        // lowers the camera.
        assert_relative_eq!(camera.position.x, 2.0 * DEFAULT_PAN_STEP, epsilon = EPSILON);
        assert_relative_eq!(camera.position.y, -3.0 * DEFAULT_PAN_STEP, epsilon = EPSILON);
    }

    #[test]
    fn test_zoom_is_unclamped_through_the_target() {
        let mut camera = front_camera();

        camera.zoom(1.0);
        assert_relative_eq!(camera.position.z, 4.0, epsilon = EPSILON);

        camera.zoom(10.0);
        assert_relative_eq!(camera.position.z, -6.0, epsilon = EPSILON);
    }
}
