//! # Polyview
//!
//! An embeddable 3D model viewer core: Wavefront OBJ/MTL loading, scene
//! management, and a backend-agnostic rendering contract.
//!
//! ## Features
//!
//! - **Forgiving OBJ/MTL parsing**: malformed records become collected
//!   diagnostics, not failures; whatever geometry can be salvaged renders
//! - **Flat draw buffers**: indexed models are flattened into per-vertex
//!   arrays with per-part triangle and line ranges
//! - **Interactive scene model**: orbit/pan/zoom camera, movable objects
//!   with eager world-position updates, one scene light
//! - **Backend-agnostic**: any GPU layer can implement [`RenderBackend`]
//!   and draw what the scene renderer feeds it; a recording
//!   [`HeadlessBackend`](render::HeadlessBackend) ships for tests and
//!   windowless use
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use polyview::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
//!     let loaded = load_model(obj, None, &[])?;
//!     let object = RenderObject::from_model("triangle", &loaded.model, loaded.materials);
//!
//!     let mut scene = Scene::new();
//!     scene.add_object(object);
//!
//!     let mut backend = HeadlessBackend::new();
//!     SceneRenderer::new().render(&scene, &mut backend)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;

pub use render::backend::RenderBackend;

/// Common imports for viewer embedders
pub mod prelude {
    pub use crate::{
        assets::{load_model, AssetError, Diagnostics, ImageData, LoadedModel},
        config::{ConfigError, ViewerConfig},
        foundation::math::{Mat4, MathError, Matrix, Vec3},
        render::{
            HeadlessBackend, Material, MaterialTable, Mesh, RenderBackend, RenderError,
            TextureKind, Vertex,
        },
        scene::{Camera, Light, ObjectKey, RenderObject, Scene, SceneRenderer},
    };
}
