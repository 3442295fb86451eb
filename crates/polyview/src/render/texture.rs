//! Per-object texture bindings.
//!
//! Each object carries up to three whole-object textures plus an ordered
//! auxiliary list that material map slots index into. The auxiliary list
//! is capped so that the combined set always fits a 16-unit backend
//! texture budget (3 whole-object bindings + 13 auxiliary).

use crate::assets::ImageData;
use crate::render::RenderError;

/// Upper bound on auxiliary textures per object.
pub const MAX_AUX_TEXTURES: usize = 13;

/// The three whole-object texture slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    /// Base color applied across the whole object
    Diffuse,
    /// Tangent-space normal map
    Normal,
    /// Specular intensity map
    Specular,
}

impl TextureKind {
    /// The uniform sampler name backends bind this slot under.
    pub fn slot_name(self) -> &'static str {
        match self {
            Self::Diffuse => "u_diffuse_map",
            Self::Normal => "u_normal_map",
            Self::Specular => "u_specular_map",
        }
    }
}

/// Texture set of one render object.
#[derive(Debug, Clone, Default)]
pub struct ObjectTextures {
    diffuse: Option<ImageData>,
    normal: Option<ImageData>,
    specular: Option<ImageData>,
    auxiliary: Vec<ImageData>,
}

impl ObjectTextures {
    /// Create an empty texture set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a whole-object slot, replacing any previous image.
    pub fn set(&mut self, kind: TextureKind, image: ImageData) {
        log::debug!(
            "Setting {:?} texture ({}x{})",
            kind,
            image.width,
            image.height
        );
        *self.slot_mut(kind) = Some(image);
    }

    /// The image bound to a whole-object slot, if any.
    pub fn get(&self, kind: TextureKind) -> Option<&ImageData> {
        match kind {
            TextureKind::Diffuse => self.diffuse.as_ref(),
            TextureKind::Normal => self.normal.as_ref(),
            TextureKind::Specular => self.specular.as_ref(),
        }
    }

    /// Remove the image from a whole-object slot.
    pub fn clear(&mut self, kind: TextureKind) {
        *self.slot_mut(kind) = None;
    }

    /// Append to the auxiliary list, returning the new index.
    ///
    /// Material map slots refer to auxiliary textures by this index, so
    /// the caller must push them in the same order it listed texture
    /// names during the model load.
    pub fn push_auxiliary(&mut self, image: ImageData) -> Result<usize, RenderError> {
        if self.auxiliary.len() >= MAX_AUX_TEXTURES {
            return Err(RenderError::TextureBudgetExceeded);
        }
        self.auxiliary.push(image);
        Ok(self.auxiliary.len() - 1)
    }

    /// The auxiliary textures in binding order.
    pub fn auxiliary(&self) -> &[ImageData] {
        &self.auxiliary
    }

    fn slot_mut(&mut self, kind: TextureKind) -> &mut Option<ImageData> {
        match kind {
            TextureKind::Diffuse => &mut self.diffuse,
            TextureKind::Normal => &mut self.normal,
            TextureKind::Specular => &mut self.specular,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(value: u8) -> ImageData {
        ImageData::solid_color(1, 1, [value, value, value, 255])
    }

    #[test]
    fn test_whole_object_slot_replacement_last_wins() {
        let mut textures = ObjectTextures::new();
        textures.set(TextureKind::Diffuse, pixel(10));
        textures.set(TextureKind::Diffuse, pixel(20));

        let bound = textures.get(TextureKind::Diffuse).unwrap();
        assert_eq!(bound.data[0], 20);
        assert!(textures.get(TextureKind::Normal).is_none());
    }

    #[test]
    fn test_clear_empties_a_slot() {
        let mut textures = ObjectTextures::new();
        textures.set(TextureKind::Specular, pixel(5));
        textures.clear(TextureKind::Specular);
        assert!(textures.get(TextureKind::Specular).is_none());
    }

    #[test]
    fn test_auxiliary_list_is_capped() {
        let mut textures = ObjectTextures::new();
        for i in 0..MAX_AUX_TEXTURES {
            let index = textures.push_auxiliary(pixel(i as u8)).unwrap();
            assert_eq!(index, i);
        }

        let overflow = textures.push_auxiliary(pixel(99));
        assert!(matches!(overflow, Err(RenderError::TextureBudgetExceeded)));
        assert_eq!(textures.auxiliary().len(), MAX_AUX_TEXTURES);
    }

    #[test]
    fn test_slot_names_are_stable() {
        assert_eq!(TextureKind::Diffuse.slot_name(), "u_diffuse_map");
        assert_eq!(TextureKind::Normal.slot_name(), "u_normal_map");
        assert_eq!(TextureKind::Specular.slot_name(), "u_specular_map");
    }
}
