//! Inline (`data:` URI) image embedding.

use crate::error::{CompileError, Result};
use base64::Engine as _;
use std::io::Cursor;
use std::path::Path;

/// A raster image embedded as a base64 `data:` URI, with its intrinsic pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
    pub data_uri: String,
}

impl EmbeddedImage {
    /// Sniffs the format and reads the dimensions from the image header without decoding pixels.
    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, image::ImageError> {
        let reader = image::ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        let format = reader.format();
        let (width, height) = reader.into_dimensions()?;
        let mime = format
            .map(|f| f.to_mime_type())
            .unwrap_or("application/octet-stream");
        Ok(Self {
            mime,
            width,
            height,
            data_uri: data_uri(mime, bytes),
        })
    }
}

/// Loads the background image. An absent file maps to [`CompileError::ImageNotFound`].
pub fn load_background(path: &Path) -> Result<EmbeddedImage> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(CompileError::ImageNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(err) => return Err(CompileError::io(path, err)),
    };
    let image = EmbeddedImage::from_bytes(&bytes).map_err(|err| CompileError::ImageDecode {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    tracing::debug!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        mime = image.mime,
        "loaded background image"
    );
    Ok(image)
}

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    let mut out = String::with_capacity(
        "data:;base64,".len()
            + mime.len()
            + base64::encoded_len(bytes.len(), true).unwrap_or_default(),
    );
    out.push_str("data:");
    out.push_str(mime);
    out.push_str(";base64,");
    base64::engine::general_purpose::STANDARD.encode_string(bytes, &mut out);
    out
}

/// MIME type for a preview file, from its extension.
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="200" viewBox="0 0 300 200"><rect width="300" height="200" fill="#2a2a2a"/><text x="150" y="100" fill="#888" font-family="Helvetica, Arial, sans-serif" font-size="20" text-anchor="middle" dominant-baseline="middle">No Image</text></svg>"##;

/// The inline "No Image" picture shown when a region has no preview file.
pub fn placeholder_data_uri() -> String {
    data_uri("image/svg+xml", PLACEHOLDER_SVG.as_bytes())
}
