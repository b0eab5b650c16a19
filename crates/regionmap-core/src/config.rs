use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One component of a synthesized description, rendered as `"{caption}: {value}{suffix}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionField {
    /// Header name of the source column (matched trimmed and case-insensitively).
    pub column: String,
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl DescriptionField {
    pub fn new(column: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            caption: caption.into(),
            suffix: None,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }
}

/// Compilation settings, read once per compilation.
///
/// Deserializing a partial JSON object fills the remaining fields from [`MapConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Pins the coordinate frame width. `None` derives it from the background image.
    pub frame_width: Option<u32>,
    /// Pins the coordinate frame height. `None` derives it from the background image.
    pub frame_height: Option<u32>,
    /// Height of the document body in CSS pixels.
    pub embed_height: u32,
    /// When false the document body never scrolls.
    pub scrolling: bool,
    /// Directory searched for preview images. `None` means the dataset's directory.
    pub preview_dir: Option<PathBuf>,
    /// Columns that make up `description` when the dataset has no description column.
    pub description_fields: Vec<DescriptionField>,
    pub title: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            frame_width: None,
            frame_height: None,
            embed_height: 900,
            scrolling: false,
            preview_dir: None,
            description_fields: Vec::new(),
            title: "Interactive Map".to_string(),
        }
    }
}

impl MapConfig {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Resolves the coordinate frame, falling back to the image's intrinsic size per axis.
    pub fn frame_size(&self, image_width: u32, image_height: u32) -> (u32, u32) {
        (
            self.frame_width.filter(|w| *w > 0).unwrap_or(image_width),
            self.frame_height.filter(|h| *h > 0).unwrap_or(image_height),
        )
    }

    /// Directory used for preview lookups when compiling the dataset at `table`.
    pub fn preview_dir_for(&self, table: &Path) -> PathBuf {
        if let Some(dir) = &self.preview_dir {
            return dir.clone();
        }
        match table.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}
