#![forbid(unsafe_code)]

//! Data side of `regionmap`: CSV region datasets, the canonical schema, preview lookup and
//! inline image embedding. Rendering lives in `regionmap-render`.

pub mod config;
pub mod dataset;
pub mod embed;
pub mod error;
pub mod preview;
pub mod region;
pub mod schema;

pub use config::{DescriptionField, MapConfig};
pub use dataset::Dataset;
pub use embed::{EmbeddedImage, load_background};
pub use error::{CompileError, Result, SchemaError};
pub use preview::{PREVIEW_EXTENSIONS, PreviewLookup, PreviewResolver};
pub use region::{Region, RegionRecord, compile_regions, normalize_link};
pub use schema::{ColumnMap, Field, normalize_header};
