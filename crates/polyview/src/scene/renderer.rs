//! Per-frame render driver.
//!
//! [`SceneRenderer`] is the stateless bridge between a [`Scene`] and any
//! [`RenderBackend`]: one `render` call clears to the background, then for
//! each visible object in draw order uploads its buffers, sets matrix,
//! light, material and texture state, and issues one triangle draw plus
//! one line draw per part with a non-empty range.

use crate::foundation::math::Mat4;
use crate::render::backend::{uniforms, BackendResult, RenderBackend};
use crate::render::TextureKind;
use crate::scene::manager::FrameMatrices;
use crate::scene::{RenderObject, Scene};

/// Stateless scene-to-backend frame driver
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneRenderer;

impl SceneRenderer {
    /// Create a renderer.
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame of `scene` through `backend`.
    pub fn render<B: RenderBackend>(&self, scene: &Scene, backend: &mut B) -> BackendResult<()> {
        backend.begin_frame(scene.background)?;

        let frame = scene.frame_matrices();
        backend.set_uniform_mat4(uniforms::PROJECTION, frame.projection.as_array());
        backend.set_uniform_vec3(uniforms::LIGHT_POSITION, scene.light.position.to_array());
        backend.set_uniform_vec3(uniforms::LIGHT_COLOR, scene.light.color.to_array());
        backend.set_uniform_vec3(uniforms::AMBIENT_COLOR, scene.light.ambient_color.to_array());
        backend.set_uniform_f32(uniforms::AMBIENT_STRENGTH, scene.light.ambient_strength);

        for (_, object) in scene.objects() {
            if !object.visible {
                continue;
            }
            Self::draw_object(&frame, object, backend)?;
        }

        backend.end_frame()
    }

    fn draw_object<B: RenderBackend>(
        frame: &FrameMatrices,
        object: &RenderObject,
        backend: &mut B,
    ) -> BackendResult<()> {
        let mesh = object.mesh();
        backend.upload_mesh(&mesh.vertices, &mesh.indices, &mesh.line_indices)?;

        // Object transforms compose translations and rotations only, so
        // the composed model-view stays rigid and the closed-form inverse
        // behind the normal matrix remains valid.
        let model_view = frame.view * object.transform();
        backend.set_uniform_mat4(uniforms::MODEL_VIEW, model_view.as_array());
        let normal: Mat4 = model_view.rigid_inverse().transpose();
        backend.set_uniform_mat4(uniforms::NORMAL_MATRIX, normal.as_array());

        Self::upload_materials(object, backend);
        Self::bind_textures(object, backend)?;

        for part in &mesh.parts {
            if part.index_count > 0 {
                backend.draw_triangles(part.index_offset, part.index_count)?;
            }
            if part.line_index_count > 0 {
                backend.draw_lines(part.line_index_offset, part.line_index_count)?;
            }
        }
        Ok(())
    }

    /// Upload the object's material table as indexed uniform arrays; the
    /// per-vertex material attribute selects among them in the shader.
    fn upload_materials<B: RenderBackend>(object: &RenderObject, backend: &mut B) {
        for (index, material) in object.materials().iter().enumerate() {
            backend.set_uniform_vec3(
                &uniforms::indexed(uniforms::MATERIAL_AMBIENT, index),
                material.ambient.to_array(),
            );
            backend.set_uniform_vec3(
                &uniforms::indexed(uniforms::DIFFUSE_COLOR, index),
                material.diffuse.to_array(),
            );
            backend.set_uniform_vec3(
                &uniforms::indexed(uniforms::SPECULAR_COLOR, index),
                material.specular.to_array(),
            );
            backend.set_uniform_vec3(
                &uniforms::indexed(uniforms::EMISSION_COLOR, index),
                material.emission.to_array(),
            );
            backend.set_uniform_f32(
                &uniforms::indexed(uniforms::SHININESS, index),
                material.shininess,
            );
            backend.set_uniform_f32(&uniforms::indexed(uniforms::ALPHA, index), material.alpha);
            backend.set_uniform_u32(
                &uniforms::indexed(uniforms::ILLUMINATION, index),
                material.illumination.as_mtl(),
            );
            backend.set_uniform_u32(
                &uniforms::indexed(uniforms::USE_DIFFUSE_MAP, index),
                u32::from(material.maps.diffuse.is_some()),
            );
        }
    }

    fn bind_textures<B: RenderBackend>(
        object: &RenderObject,
        backend: &mut B,
    ) -> BackendResult<()> {
        let textures = object.textures();
        for kind in [TextureKind::Diffuse, TextureKind::Normal, TextureKind::Specular] {
            match textures.get(kind) {
                Some(image) => backend.bind_texture(kind.slot_name(), image)?,
                None => backend.clear_texture(kind.slot_name()),
            }
        }
        for (slot, image) in textures.auxiliary().iter().enumerate() {
            backend.bind_texture(&uniforms::indexed(uniforms::AUX_TEXTURES, slot), image)?;
        }
        Ok(())
    }
}
