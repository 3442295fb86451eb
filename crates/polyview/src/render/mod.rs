//! Rendering data model and backend contract
//!
//! Everything a backend needs to draw a scene lives here: flat mesh
//! buffers, materials, per-object textures, and the [`RenderBackend`]
//! trait real graphics backends implement. The crate ships only the
//! recording [`HeadlessBackend`]; GPU backends are external.

pub mod backend;
pub mod headless;
pub mod material;
pub mod mesh;
pub mod texture;

pub use backend::RenderBackend;
pub use headless::{BackendCall, HeadlessBackend, UniformValue};
pub use material::{
    IlluminationModel, Material, MaterialMaps, MaterialTable, DEFAULT_MATERIAL_NAME,
};
pub use mesh::{face_normal, Aabb, Mesh, MeshPart, Vertex};
pub use texture::{ObjectTextures, TextureKind, MAX_AUX_TEXTURES};

use thiserror::Error;

/// Rendering errors
///
/// Backend-specific failure detail stays behind [`RenderError::BackendError`]
/// so callers handle one error surface regardless of the backend in use.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The per-object auxiliary texture list is full
    #[error("Auxiliary texture limit reached: at most {MAX_AUX_TEXTURES} per object")]
    TextureBudgetExceeded,

    /// A backend operation failed
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
