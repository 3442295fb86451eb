//! Flat mesh buffers ready for backend upload.
//!
//! The flattener turns an indexed [`Model`] into one global vertex array
//! plus triangle and line index arrays, with per-part draw ranges. Every
//! face corner becomes its own vertex; nothing is welded, so flat shading
//! and per-face materials never bleed across faces.

use crate::assets::obj_parser::Model;
use crate::foundation::math::Vec3;
use bytemuck::{Pod, Zeroable};

/// Normal stamped on line vertices, which carry no surface orientation.
const FALLBACK_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

/// One flat vertex, laid out for direct GPU upload.
///
/// `#[repr(C)]` with no padding: 36 bytes per vertex, positions first.
/// The material field carries the face's material table index so a single
/// draw range can switch materials per primitive in the shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Object-space position
    pub position: [f32; 3],
    /// Unit normal (flat-shaded faces repeat the face normal)
    pub normal: [f32; 3],
    /// Texture coordinates; `[0, 0]` when the source had none
    pub tex_coord: [f32; 2],
    /// Material table index of the owning face
    pub material: u32,
}

/// Draw ranges of one named part within the shared index arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshPart {
    /// Part name from the source model
    pub name: String,
    /// First triangle index belonging to this part
    pub index_offset: usize,
    /// Number of triangle indices (a multiple of 3)
    pub index_count: usize,
    /// First line index belonging to this part
    pub line_index_offset: usize,
    /// Number of line indices (a multiple of 2)
    pub line_index_count: usize,
}

/// Flattened geometry: one vertex buffer, two index buffers, part ranges.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// All vertices, faces first then polylines, in part order
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into [`Mesh::vertices`]
    pub indices: Vec<u32>,
    /// Line list indices into [`Mesh::vertices`]
    pub line_indices: Vec<u32>,
    /// Per-part draw ranges, in part order
    pub parts: Vec<MeshPart>,
}

/// Flat-shading normal of a face spanned by its first three corners.
///
/// Degenerate faces (collinear or coincident corners) produce the zero
/// vector, consistent with [`Vec3::normalize`] on zero input.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize()
}

impl Mesh {
    /// Flatten an indexed model into draw-ready buffers.
    ///
    /// Faces with more than three corners are fan-triangulated around
    /// their first corner, which is exact for convex planar polygons and
    /// an accepted approximation otherwise. Corners without a normal
    /// reference share a synthesized flat normal per face; corners
    /// without texture coordinates get `[0, 0]`.
    pub fn from_model(model: &Model) -> Self {
        let mut mesh = Self::default();

        for part in &model.parts {
            let index_offset = mesh.indices.len();
            let line_index_offset = mesh.line_indices.len();

            for face in &part.faces {
                let base = mesh.vertices.len() as u32;

                // Synthesized once per face, only when some corner needs it.
                let flat = if face.corners.iter().any(|c| c.normal.is_none()) {
                    let a = model.positions[face.corners[0].position];
                    let b = model.positions[face.corners[1].position];
                    let c = model.positions[face.corners[2].position];
                    face_normal(a, b, c).to_array()
                } else {
                    FALLBACK_NORMAL
                };

                for corner in &face.corners {
                    let normal = match corner.normal {
                        Some(index) => model.normals[index].to_array(),
                        None => flat,
                    };
                    let tex_coord = match corner.tex_coord {
                        Some(index) => model.tex_coords[index],
                        None => [0.0, 0.0],
                    };
                    mesh.vertices.push(Vertex {
                        position: model.positions[corner.position].to_array(),
                        normal,
                        tex_coord,
                        material: face.material as u32,
                    });
                }

                // Fan triangulation around the first corner
                for i in 1..(face.corners.len() - 1) {
                    mesh.indices.push(base);
                    mesh.indices.push(base + i as u32);
                    mesh.indices.push(base + i as u32 + 1);
                }
            }

            for line in &part.lines {
                let base = mesh.vertices.len() as u32;
                for &position in &line.positions {
                    mesh.vertices.push(Vertex {
                        position: model.positions[position].to_array(),
                        normal: FALLBACK_NORMAL,
                        tex_coord: [0.0, 0.0],
                        material: 0,
                    });
                }
                for i in 0..(line.positions.len() - 1) {
                    mesh.line_indices.push(base + i as u32);
                    mesh.line_indices.push(base + i as u32 + 1);
                }
            }

            mesh.parts.push(MeshPart {
                name: part.name.clone(),
                index_offset,
                index_count: mesh.indices.len() - index_offset,
                line_index_offset,
                line_index_count: mesh.line_indices.len() - line_index_offset,
            });
        }

        log::debug!(
            "Flattened mesh: {} vertices, {} triangle indices, {} line indices, {} part(s)",
            mesh.vertices.len(),
            mesh.indices.len(),
            mesh.line_indices.len(),
            mesh.parts.len()
        );

        mesh
    }

    /// Axis-aligned bounds over all vertex positions, `None` for an empty
    /// mesh.
    pub fn bounding_box(&self) -> Option<Aabb> {
        let first = self.vertices.first()?;
        let mut min = Vec3::from(first.position);
        let mut max = min;
        for vertex in &self.vertices[1..] {
            let p = vertex.position;
            min = Vec3::new(min.x.min(p[0]), min.y.min(p[1]), min.z.min(p[2]));
            max = Vec3::new(max.x.max(p[0]), max.y.max(p[1]), max.z.max(p[2]));
        }
        Some(Aabb { min, max })
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Smallest corner
    pub min: Vec3,
    /// Largest corner
    pub max: Vec3,
}

impl Aabb {
    /// Geometric center of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full side lengths of the box.
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }
}
