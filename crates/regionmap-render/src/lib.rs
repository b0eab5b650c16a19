#![forbid(unsafe_code)]

//! HTML/SVG rendering for `regionmap`.
//!
//! Output is a single self-contained document: inline CSS, inline script, and every image
//! embedded as a `data:` URI. Rendering is infallible and deterministic.

mod document;
mod error;
mod util;

pub use document::{render_map_document, render_region};
pub use error::render_error_document;
