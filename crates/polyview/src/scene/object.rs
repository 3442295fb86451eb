//! Renderable scene objects.
//!
//! A [`RenderObject`] couples a flattened [`Mesh`] with a material table,
//! texture bindings, and an incrementally-composed model transform. The
//! rest-pose vertex buffer is never mutated; instead every transform
//! mutation re-derives the world-space position of each vertex eagerly, so
//! readers always see positions consistent with the current transform.
//! Mutations cost O(vertex count), which is fine because they happen at
//! user-input rate, not per frame.

use crate::assets::{ImageData, Model};
use crate::foundation::math::{Mat4, Vec3};
use crate::render::{Material, MaterialTable, Mesh, ObjectTextures, RenderResult, TextureKind};

/// A model instance placed in a scene
#[derive(Debug, Clone)]
pub struct RenderObject {
    /// Display name, usually the source file stem
    pub name: String,
    /// Invisible objects stay in the scene but are skipped by the renderer
    pub visible: bool,
    mesh: Mesh,
    world_positions: Vec<[f32; 3]>,
    transform: Mat4,
    materials: MaterialTable,
    textures: ObjectTextures,
}

impl RenderObject {
    /// Build an object from parsed model data and its material table.
    ///
    /// The model is flattened into draw-ready buffers and the transform
    /// starts at identity, so world positions begin equal to the rest pose.
    pub fn from_model(name: &str, model: &Model, materials: MaterialTable) -> Self {
        let mesh = Mesh::from_model(model);
        let world_positions = mesh.vertices.iter().map(|v| v.position).collect();

        log::debug!(
            "Created object '{}': {} vertices, {} parts, {} materials",
            name,
            mesh.vertices.len(),
            mesh.parts.len(),
            materials.len()
        );

        Self {
            name: name.to_string(),
            visible: true,
            mesh,
            world_positions,
            transform: Mat4::identity(),
            materials,
            textures: ObjectTextures::new(),
        }
    }

    /// Flattened draw buffers in rest pose.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Current model transform.
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// World-space vertex positions under the current transform.
    ///
    /// Kept in lockstep with the transform by every mutator; indexed the
    /// same as [`Mesh::vertices`](crate::render::Mesh).
    pub fn world_positions(&self) -> &[[f32; 3]] {
        &self.world_positions
    }

    /// Materials referenced by this object's vertices.
    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    /// Material behind a vertex's material index, falling back to the
    /// default entry when the index is out of range.
    pub fn material(&self, index: usize) -> &Material {
        self.materials
            .by_index(index)
            .unwrap_or_else(|| self.materials.fallback_material())
    }

    /// Texture bindings for this object.
    pub fn textures(&self) -> &ObjectTextures {
        &self.textures
    }

    /// Translation component of the current transform.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.transform.m[0][3],
            self.transform.m[1][3],
            self.transform.m[2][3],
        )
    }

    /// Move the object by `delta` along its own local axes.
    ///
    /// Right-multiplies a translation, so a previously applied rotation
    /// turns the axes the delta travels along.
    pub fn translate(&mut self, delta: Vec3) {
        self.transform = self.transform * Mat4::translation(delta);
        self.refresh_world_positions();
    }

    /// Rotate the object about its own local axes.
    ///
    /// Right-multiplies the Z·Y·X Euler composition built by
    /// [`Mat4::rotation_euler`]; angles are radians.
    pub fn rotate(&mut self, rx: f32, ry: f32, rz: f32) {
        self.transform = self.transform * Mat4::rotation_euler(rx, ry, rz);
        self.refresh_world_positions();
    }

    /// Overwrite the translation column, leaving rotation intact.
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.m[0][3] = position.x;
        self.transform.m[1][3] = position.y;
        self.transform.m[2][3] = position.z;
        self.refresh_world_positions();
    }

    /// Return the transform to identity and the vertices to rest pose.
    pub fn reset_transform(&mut self) {
        self.transform = Mat4::identity();
        self.refresh_world_positions();
    }

    /// Bind one of the whole-object texture slots. The previous binding
    /// for that slot, if any, is replaced.
    pub fn set_texture(&mut self, kind: TextureKind, image: ImageData) {
        self.textures.set(kind, image);
    }

    /// Unbind a whole-object texture slot.
    pub fn clear_texture(&mut self, kind: TextureKind) {
        self.textures.clear(kind);
    }

    /// Append an auxiliary texture, returning its slot index.
    ///
    /// Auxiliary slots are what material map indices resolve to; the
    /// caller must push textures in the same order as the name list given
    /// to the loader.
    pub fn push_auxiliary_texture(&mut self, image: ImageData) -> RenderResult<usize> {
        self.textures.push_auxiliary(image)
    }

    fn refresh_world_positions(&mut self) {
        let transform = self.transform;
        for (world, vertex) in self.world_positions.iter_mut().zip(&self.mesh.vertices) {
            *world = transform.transform_point(Vec3::from(vertex.position)).to_array();
        }
    }
}
