//! Model and texture loading
//!
//! Wavefront OBJ/MTL sources come in as text, already read by the host
//! application; images come in as encoded bytes. Content problems in the
//! model sources are collected as [`Diagnostics`] and reported alongside
//! the result instead of aborting the load. Only a load that yields no
//! geometry at all fails outright.

pub mod image_loader;
pub mod mtl_parser;
pub mod obj_parser;

pub use image_loader::ImageData;
pub use mtl_parser::MtlParser;
pub use obj_parser::{Face, FaceVertex, Model, ObjParser, Part, Polyline};

use crate::render::material::MaterialTable;
use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The OBJ source produced no faces and no polylines
    #[error("Model sources contain no usable geometry")]
    NoGeometry,

    /// Failed to load or decode an asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),
}

/// A single non-fatal problem found while parsing model sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number in the source the problem was found on
    pub line: usize,
    /// Human-readable description
    pub message: String,
}

/// Ordered collection of parse anomalies.
///
/// Parsers push into this as they go; every entry is also emitted through
/// `log::warn!` so problems show up even when the caller ignores the list.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an anomaly at a 1-based source line.
    pub fn report(&mut self, line: usize, message: impl Into<String>) {
        let message = message.into();
        log::warn!("Model parse anomaly at line {line}: {message}");
        self.entries.push(Diagnostic { line, message });
    }

    /// True when no anomalies were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded anomalies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The recorded anomalies in discovery order.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }
}

/// Result of a successful model load.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    /// Indexed geometry grouped into named parts
    pub model: Model,
    /// Materials in declaration order, fallback at index 0
    pub materials: MaterialTable,
    /// Non-fatal anomalies found in either source
    pub diagnostics: Diagnostics,
}

/// Load a model from OBJ text plus an optional MTL companion.
///
/// The MTL pass runs first so `usemtl` statements in the OBJ pass resolve
/// against a complete material table. `texture_names` lists the texture
/// files the host has available, in the order it will bind them; material
/// map statements resolve against that list by file name.
///
/// # Errors
///
/// Returns [`AssetError::NoGeometry`] when no part of the OBJ source
/// yields a face or polyline. Everything else is reported through the
/// returned [`Diagnostics`].
pub fn load_model(
    obj_src: &str,
    mtl_src: Option<&str>,
    texture_names: &[String],
) -> Result<LoadedModel, AssetError> {
    let mut diagnostics = Diagnostics::new();

    let materials = match mtl_src {
        Some(src) => MtlParser::parse(src, texture_names, &mut diagnostics),
        None => MaterialTable::new(),
    };

    let model = ObjParser::parse(obj_src, &materials, &mut diagnostics);
    if !model.has_geometry() {
        return Err(AssetError::NoGeometry);
    }

    log::info!(
        "Loaded model: {} part(s), {} material(s), {} anomaly(ies)",
        model.parts.len(),
        materials.len(),
        diagnostics.len()
    );

    Ok(LoadedModel {
        model,
        materials,
        diagnostics,
    })
}
