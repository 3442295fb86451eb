//! Texture image decoding.
//!
//! Decodes PNG and JPEG files into RGBA8 pixel buffers the rendering
//! backend can upload directly.

use crate::assets::AssetError;
use std::path::Path;

/// Decoded image pixels ready for texture upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data, row major
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Color channels per pixel, always 4 after decoding
    pub channels: u8,
}

impl ImageData {
    /// Decode an image file from disk.
    ///
    /// Whatever the source format stores, the result is RGBA8.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        let img = image::open(path_ref).map_err(|e| {
            AssetError::LoadFailed(format!("Failed to decode image {}: {}", path_ref.display(), e))
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        log::debug!("Decoded {}x{} image from {}", width, height, path_ref.display());

        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
            channels: 4,
        })
    }

    /// Decode an image already held in memory, such as an embedded resource.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to decode embedded image: {e}")))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
            channels: 4,
        })
    }

    /// Build a single-color image, handy as a placeholder texture.
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self {
            data,
            width,
            height,
            channels: 4,
        }
    }

    /// Total pixel buffer size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
