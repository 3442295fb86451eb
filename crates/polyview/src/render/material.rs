//! Material definitions and the ordered material table.
//!
//! Materials follow the Wavefront Phong model. Every table starts with a
//! synthetic fallback entry at index 0 so face records can always carry a
//! valid material index, even when the source files name nothing usable.

use crate::foundation::math::Vec3;
use std::collections::HashMap;

/// Name of the synthetic fallback material present in every table.
pub const DEFAULT_MATERIAL_NAME: &str = "default";

/// Which lighting terms a material participates in (`illum` selector).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IlluminationModel {
    /// Flat color, no lighting (illum 0)
    Color,
    /// Color modulated by the ambient term only (illum 1)
    ColorAmbient,
    /// Ambient, diffuse and specular terms (illum 2 and above)
    Phong,
}

impl IlluminationModel {
    /// Map a raw `illum` selector to its model. Values above 2 select
    /// specular variants this viewer does not distinguish, so they all
    /// collapse to [`IlluminationModel::Phong`].
    pub fn from_mtl(value: u32) -> Self {
        match value {
            0 => Self::Color,
            1 => Self::ColorAmbient,
            _ => Self::Phong,
        }
    }

    /// The canonical `illum` selector for this model.
    pub fn as_mtl(self) -> u32 {
        match self {
            Self::Color => 0,
            Self::ColorAmbient => 1,
            Self::Phong => 2,
        }
    }
}

/// Texture-map slots of a material, resolved to indices into the owning
/// object's auxiliary texture list. `None` means the slot is unmapped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialMaps {
    /// Ambient map (map_Ka)
    pub ambient: Option<usize>,
    /// Diffuse map (map_Kd)
    pub diffuse: Option<usize>,
    /// Specular map (map_Ks)
    pub specular: Option<usize>,
    /// Bump/normal map (map_Bump or bump)
    pub normal: Option<usize>,
    /// Shininess map (map_Ns)
    pub shininess: Option<usize>,
    /// Emission map (map_Ke)
    pub emission: Option<usize>,
}

/// One material record (Wavefront Phong model).
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material name from the `newmtl` statement
    pub name: String,
    /// Ambient color (Ka)
    pub ambient: Vec3,
    /// Diffuse color (Kd)
    pub diffuse: Vec3,
    /// Specular color (Ks)
    pub specular: Vec3,
    /// Emission color (Ke)
    pub emission: Vec3,
    /// Specular exponent (Ns)
    pub shininess: f32,
    /// Opacity; 1.0 is opaque. Written by `d` directly or by `Tr` as
    /// `1.0 - Tr`, last directive wins.
    pub alpha: f32,
    /// Optical density / index of refraction (Ni)
    pub refraction_index: f32,
    /// Transmission filter color (Tf); white passes all light through
    pub transmission_filter: Vec3,
    /// Lighting model selector (illum)
    pub illumination: IlluminationModel,
    /// Resolved texture-map slots
    pub maps: MaterialMaps,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Vec3::new(1.0, 1.0, 1.0),
            diffuse: Vec3::new(0.8, 0.8, 0.8),
            specular: Vec3::new(0.5, 0.5, 0.5),
            emission: Vec3::zero(),
            shininess: 250.0,
            alpha: 1.0,
            refraction_index: 1.0,
            transmission_filter: Vec3::one(),
            illumination: IlluminationModel::Phong,
            maps: MaterialMaps::default(),
        }
    }
}

impl Material {
    /// The synthetic mid-gray material every table carries at index 0.
    pub fn fallback() -> Self {
        Self {
            name: DEFAULT_MATERIAL_NAME.to_string(),
            diffuse: Vec3::new(0.5, 0.5, 0.5),
            shininess: 32.0,
            ..Default::default()
        }
    }
}

/// Ordered material collection with name lookup.
///
/// Index 0 is always the synthetic fallback; parsed materials follow in
/// declaration order, which face records reference by index.
#[derive(Debug, Clone)]
pub struct MaterialTable {
    materials: Vec<Material>,
    index_by_name: HashMap<String, usize>,
}

impl MaterialTable {
    /// Create a table holding only the fallback material.
    pub fn new() -> Self {
        let fallback = Material::fallback();
        let mut index_by_name = HashMap::new();
        index_by_name.insert(fallback.name.clone(), 0);
        Self {
            materials: vec![fallback],
            index_by_name,
        }
    }

    /// Add a material, returning its index.
    ///
    /// A material whose name is already present replaces the existing
    /// record in place and keeps its index.
    pub fn insert(&mut self, material: Material) -> usize {
        if let Some(&index) = self.index_by_name.get(&material.name) {
            self.materials[index] = material;
            return index;
        }
        let index = self.materials.len();
        self.index_by_name.insert(material.name.clone(), index);
        self.materials.push(material);
        index
    }

    /// Look up a material and its index by name.
    pub fn get(&self, name: &str) -> Option<(usize, &Material)> {
        let index = *self.index_by_name.get(name)?;
        Some((index, &self.materials[index]))
    }

    /// The synthetic fallback entry at index 0.
    pub fn fallback_material(&self) -> &Material {
        &self.materials[0]
    }

    /// Look up just the index for a name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index_by_name.get(name).copied()
    }

    /// The material at `index`, if any.
    pub fn by_index(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    /// Number of materials, fallback included.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Always false; the fallback entry is never removed.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterate materials in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::new()
    }
}
