#![forbid(unsafe_code)]

//! `regionmap` compiles a CSV of named polygon regions plus a background image into one
//! self-contained HTML document with an SVG image-map overlay.
//!
//! Every region gets a hover highlight, a shared tooltip (label, description, preview picture)
//! and a link that opens in a new tab. All images are inlined, so the document has no external
//! references.
//!
//! [`compile`] never fails: dataset, schema and image problems come back as a rendered error
//! document. Use [`try_compile`] to get the [`CompileError`] instead.

pub use regionmap_core::*;
pub use regionmap_render::{render_error_document, render_map_document, render_region};

use std::path::{Path, PathBuf};

/// What a compiled document contains.
#[derive(Debug)]
pub enum Outcome {
    Map { regions: usize },
    Error(CompileError),
}

/// A compiled document. `html` is the whole artifact; `outcome` describes it.
#[derive(Debug)]
pub struct MapDocument {
    pub html: String,
    pub outcome: Outcome,
}

impl MapDocument {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }

    pub fn error(&self) -> Option<&CompileError> {
        match &self.outcome {
            Outcome::Error(err) => Some(err),
            Outcome::Map { .. } => None,
        }
    }

    pub fn region_count(&self) -> usize {
        match self.outcome {
            Outcome::Map { regions } => regions,
            Outcome::Error(_) => 0,
        }
    }
}

/// Compiles the map, propagating the first failure.
///
/// Stages run in order: dataset, schema, background image, regions. Preview images are looked
/// up in `config.preview_dir`, or next to the dataset when that is unset.
pub fn try_compile(image: &Path, table: &Path, config: &MapConfig) -> Result<MapDocument> {
    let dataset = Dataset::load(table)?;
    let columns = ColumnMap::resolve(&dataset.headers, &config.description_fields)?;
    let background = load_background(image)?;

    let previews = PreviewResolver::new(config.preview_dir_for(table));
    let regions = compile_regions(&dataset, &columns, &previews);
    tracing::debug!(
        regions = regions.len(),
        preview_dir = %previews.dir().display(),
        "compiled regions"
    );

    let html = render_map_document(&background, &regions, config);
    Ok(MapDocument {
        html,
        outcome: Outcome::Map {
            regions: regions.len(),
        },
    })
}

/// Compiles the map, rendering any failure as an error document.
pub fn compile(image: &Path, table: &Path, config: &MapConfig) -> MapDocument {
    match try_compile(image, table, config) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!(error = %err, "map compilation failed; emitting error document");
            MapDocument {
                html: render_error_document(&err, config),
                outcome: Outcome::Error(err),
            }
        }
    }
}

/// Bundles the input paths and configuration for repeated compilation.
///
/// Nothing is cached: every call re-reads the inputs.
#[derive(Debug, Clone)]
pub struct MapCompiler {
    pub image: PathBuf,
    pub table: PathBuf,
    pub config: MapConfig,
}

impl MapCompiler {
    pub fn new(image: impl Into<PathBuf>, table: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            table: table.into(),
            config: MapConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MapConfig) -> Self {
        self.config = config;
        self
    }

    pub fn compile(&self) -> MapDocument {
        compile(&self.image, &self.table, &self.config)
    }

    pub fn try_compile(&self) -> Result<MapDocument> {
        try_compile(&self.image, &self.table, &self.config)
    }
}
