//! Scene management and the per-frame render driver.
//!
//! A [`Scene`] owns the objects to draw, a single [`Camera`] and [`Light`],
//! and the background color. Objects are addressed through stable
//! [`ObjectKey`] handles; removing an object invalidates its key, and every
//! later use of that key is simply a miss rather than a dangling reference.
//! [`SceneRenderer`] walks a scene each frame and drives any
//! [`RenderBackend`](crate::render::RenderBackend).

pub mod camera;
pub mod light;
pub mod manager;
pub mod object;
pub mod renderer;

pub use camera::Camera;
pub use light::Light;
pub use manager::{FrameMatrices, ObjectKey, Scene};
pub use object::RenderObject;
pub use renderer::SceneRenderer;
