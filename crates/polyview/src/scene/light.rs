//! Scene lighting.

use crate::foundation::math::Vec3;

/// Single point light plus an ambient term
///
/// The viewer lights every scene with exactly one of these; it can be
/// repositioned freely or pinned to the camera through
/// [`Scene::pin_light_to_camera`](crate::scene::Scene::pin_light_to_camera).
#[derive(Debug, Clone)]
pub struct Light {
    /// Position in world space
    pub position: Vec3,
    /// Diffuse and specular color
    pub color: Vec3,
    /// Ambient color applied independently of geometry
    pub ambient_color: Vec3,
    /// Ambient contribution scale, usually small
    pub ambient_strength: f32,
}

impl Light {
    /// White light at `position` with a dim white ambient term.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            color: Vec3::one(),
            ambient_color: Vec3::one(),
            ambient_strength: 0.1,
        }
    }

    /// Override the light color.
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Override the ambient term.
    pub fn with_ambient(mut self, color: Vec3, strength: f32) -> Self {
        self.ambient_color = color;
        self.ambient_strength = strength;
        self
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Vec3::new(2.0, 4.0, 3.0))
    }
}
