//! Recording backend for tests and windowless runs.
//!
//! [`HeadlessBackend`] implements the full [`RenderBackend`] contract
//! without touching a GPU: it records every call, keeps the latest value
//! of each uniform and texture binding, and validates call ordering and
//! draw ranges the way a real backend would reject them.

use crate::assets::ImageData;
use crate::render::backend::{BackendResult, RenderBackend};
use crate::render::{RenderError, Vertex};
use std::collections::HashMap;

/// One recorded backend invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    /// `begin_frame` with the clear color
    BeginFrame {
        /// RGBA clear color
        background: [f32; 4],
    },
    /// `upload_mesh` with the buffer sizes
    UploadMesh {
        /// Number of vertices uploaded
        vertex_count: usize,
        /// Number of triangle indices uploaded
        index_count: usize,
        /// Number of line indices uploaded
        line_index_count: usize,
    },
    /// `draw_triangles` with its range
    DrawTriangles {
        /// First index drawn
        index_offset: usize,
        /// Number of indices drawn
        index_count: usize,
    },
    /// `draw_lines` with its range
    DrawLines {
        /// First line index drawn
        index_offset: usize,
        /// Number of line indices drawn
        index_count: usize,
    },
    /// `end_frame`
    EndFrame,
}

/// Latest value of a named uniform.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// Column-major 4x4 matrix
    Mat4([f32; 16]),
    /// 3-component vector
    Vec3([f32; 3]),
    /// 4-component vector
    Vec4([f32; 4]),
    /// Scalar float
    F32(f32),
    /// Scalar unsigned integer
    U32(u32),
}

/// Backend that records instead of drawing.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    calls: Vec<BackendCall>,
    uniforms: HashMap<String, UniformValue>,
    textures: HashMap<String, (u32, u32)>,
    uploaded_indices: usize,
    uploaded_line_indices: usize,
    mesh_uploaded: bool,
    frame_open: bool,
}

impl HeadlessBackend {
    /// Create a backend with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call recorded so far, in order.
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// The last value set for a uniform, if any.
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    /// Dimensions of the texture bound to a slot, if any.
    pub fn bound_texture(&self, slot: &str) -> Option<(u32, u32)> {
        self.textures.get(slot).copied()
    }

    /// Number of recorded triangle draws.
    pub fn triangle_draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, BackendCall::DrawTriangles { .. }))
            .count()
    }

    /// Number of recorded line draws.
    pub fn line_draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, BackendCall::DrawLines { .. }))
            .count()
    }

    /// Forget all recorded calls but keep uploaded state, so one backend
    /// can verify several frames separately.
    pub fn clear_recording(&mut self) {
        self.calls.clear();
    }

    fn require_frame(&self, what: &str) -> BackendResult<()> {
        if !self.frame_open {
            return Err(RenderError::BackendError(format!(
                "{what} outside begin_frame/end_frame"
            )));
        }
        Ok(())
    }
}

impl RenderBackend for HeadlessBackend {
    fn begin_frame(&mut self, background: [f32; 4]) -> BackendResult<()> {
        if self.frame_open {
            return Err(RenderError::BackendError(
                "begin_frame while a frame is already open".to_string(),
            ));
        }
        self.frame_open = true;
        self.calls.push(BackendCall::BeginFrame { background });
        Ok(())
    }

    fn upload_mesh(
        &mut self,
        vertices: &[Vertex],
        indices: &[u32],
        line_indices: &[u32],
    ) -> BackendResult<()> {
        self.mesh_uploaded = true;
        self.uploaded_indices = indices.len();
        self.uploaded_line_indices = line_indices.len();
        self.calls.push(BackendCall::UploadMesh {
            vertex_count: vertices.len(),
            index_count: indices.len(),
            line_index_count: line_indices.len(),
        });
        log::trace!(
            "Headless upload: {} vertices, {} indices, {} line indices",
            vertices.len(),
            indices.len(),
            line_indices.len()
        );
        Ok(())
    }

    fn set_uniform_mat4(&mut self, name: &str, value: [f32; 16]) {
        self.uniforms.insert(name.to_string(), UniformValue::Mat4(value));
    }

    fn set_uniform_vec3(&mut self, name: &str, value: [f32; 3]) {
        self.uniforms.insert(name.to_string(), UniformValue::Vec3(value));
    }

    fn set_uniform_vec4(&mut self, name: &str, value: [f32; 4]) {
        self.uniforms.insert(name.to_string(), UniformValue::Vec4(value));
    }

    fn set_uniform_f32(&mut self, name: &str, value: f32) {
        self.uniforms.insert(name.to_string(), UniformValue::F32(value));
    }

    fn set_uniform_u32(&mut self, name: &str, value: u32) {
        self.uniforms.insert(name.to_string(), UniformValue::U32(value));
    }

    fn bind_texture(&mut self, slot: &str, image: &ImageData) -> BackendResult<()> {
        self.textures
            .insert(slot.to_string(), (image.width, image.height));
        Ok(())
    }

    fn clear_texture(&mut self, slot: &str) {
        self.textures.remove(slot);
    }

    fn draw_triangles(&mut self, index_offset: usize, index_count: usize) -> BackendResult<()> {
        self.require_frame("draw_triangles")?;
        if !self.mesh_uploaded {
            return Err(RenderError::BackendError(
                "draw_triangles with no uploaded mesh".to_string(),
            ));
        }
        if index_offset + index_count > self.uploaded_indices {
            return Err(RenderError::BackendError(format!(
                "triangle draw range {index_offset}..{} exceeds uploaded {} indices",
                index_offset + index_count,
                self.uploaded_indices
            )));
        }
        self.calls.push(BackendCall::DrawTriangles {
            index_offset,
            index_count,
        });
        Ok(())
    }

    fn draw_lines(&mut self, index_offset: usize, index_count: usize) -> BackendResult<()> {
        self.require_frame("draw_lines")?;
        if !self.mesh_uploaded {
            return Err(RenderError::BackendError(
                "draw_lines with no uploaded mesh".to_string(),
            ));
        }
        if index_offset + index_count > self.uploaded_line_indices {
            return Err(RenderError::BackendError(format!(
                "line draw range {index_offset}..{} exceeds uploaded {} line indices",
                index_offset + index_count,
                self.uploaded_line_indices
            )));
        }
        self.calls.push(BackendCall::DrawLines {
            index_offset,
            index_count,
        });
        Ok(())
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        self.require_frame("end_frame")?;
        self.frame_open = false;
        self.calls.push(BackendCall::EndFrame);
        Ok(())
    }
}
