//! Backend abstraction for the rendering system
//!
//! This module defines the trait a graphics backend implements to draw
//! scenes produced by this crate. The scene renderer drives it with flat
//! buffers, named uniforms, and ranged draws; the backend owns every
//! GPU-facing detail behind that surface.

use crate::assets::ImageData;
use crate::render::{RenderError, Vertex};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Uniform names the scene renderer sets. Backends resolve these to
/// their own binding model.
///
/// Material properties are uploaded as arrays indexed by the per-vertex
/// material attribute; each element is set under an [`indexed`] name such
/// as `u_diffuse_color[2]`.
pub mod uniforms {
    /// Projection matrix (column-major, set once per frame)
    pub const PROJECTION: &str = "u_projection";
    /// Combined model-view matrix (column-major, set per object)
    pub const MODEL_VIEW: &str = "u_model_view";
    /// Normal matrix (column-major, set per object)
    pub const NORMAL_MATRIX: &str = "u_normal_matrix";
    /// Light position in world space
    pub const LIGHT_POSITION: &str = "u_light_position";
    /// Light color
    pub const LIGHT_COLOR: &str = "u_light_color";
    /// Ambient light color
    pub const AMBIENT_COLOR: &str = "u_ambient_color";
    /// Ambient light strength
    pub const AMBIENT_STRENGTH: &str = "u_ambient_strength";
    /// Ambient reflectance array, one entry per material
    pub const MATERIAL_AMBIENT: &str = "u_material_ambient";
    /// Diffuse color array, one entry per material
    pub const DIFFUSE_COLOR: &str = "u_diffuse_color";
    /// Specular color array, one entry per material
    pub const SPECULAR_COLOR: &str = "u_specular_color";
    /// Emission color array, one entry per material
    pub const EMISSION_COLOR: &str = "u_emission_color";
    /// Specular exponent array, one entry per material
    pub const SHININESS: &str = "u_shininess";
    /// Opacity array, one entry per material
    pub const ALPHA: &str = "u_alpha";
    /// Illumination model selector array (0, 1 or 2), one entry per material
    pub const ILLUMINATION: &str = "u_illum";
    /// Per-material flag, 1 when the draw samples the diffuse map instead
    /// of the solid color
    pub const USE_DIFFUSE_MAP: &str = "u_use_diffuse_map";
    /// Auxiliary texture slot array bound per object
    pub const AUX_TEXTURES: &str = "u_aux_textures";

    /// Element name within a uniform array, e.g. `u_diffuse_color[2]`.
    pub fn indexed(name: &str, index: usize) -> String {
        format!("{name}[{index}]")
    }
}

/// Rendering backend trait
///
/// Call order per frame: [`begin_frame`](RenderBackend::begin_frame),
/// then per object an optional [`upload_mesh`](RenderBackend::upload_mesh)
/// followed by uniform updates and ranged draws, then
/// [`end_frame`](RenderBackend::end_frame). Uniform and texture bindings
/// persist until overwritten within a frame.
pub trait RenderBackend {
    /// Start a frame, clearing the target to `background` RGBA.
    fn begin_frame(&mut self, background: [f32; 4]) -> BackendResult<()>;

    /// Upload flat vertex and index data for subsequent draws.
    fn upload_mesh(
        &mut self,
        vertices: &[Vertex],
        indices: &[u32],
        line_indices: &[u32],
    ) -> BackendResult<()>;

    /// Set a 4x4 matrix uniform (column-major elements).
    fn set_uniform_mat4(&mut self, name: &str, value: [f32; 16]);

    /// Set a 3-component vector uniform.
    fn set_uniform_vec3(&mut self, name: &str, value: [f32; 3]);

    /// Set a 4-component vector uniform.
    fn set_uniform_vec4(&mut self, name: &str, value: [f32; 4]);

    /// Set a scalar float uniform.
    fn set_uniform_f32(&mut self, name: &str, value: f32);

    /// Set a scalar unsigned integer uniform.
    fn set_uniform_u32(&mut self, name: &str, value: u32);

    /// Bind decoded pixels to a named texture slot.
    fn bind_texture(&mut self, slot: &str, image: &ImageData) -> BackendResult<()>;

    /// Remove whatever is bound to a named texture slot.
    fn clear_texture(&mut self, slot: &str);

    /// Draw a triangle-list range of the uploaded index array.
    fn draw_triangles(&mut self, index_offset: usize, index_count: usize) -> BackendResult<()>;

    /// Draw a line-list range of the uploaded line index array.
    fn draw_lines(&mut self, index_offset: usize, index_count: usize) -> BackendResult<()>;

    /// Finish the frame and present it.
    fn end_frame(&mut self) -> BackendResult<()>;
}
