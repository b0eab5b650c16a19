use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, CompileError>;

/// Required fields that the dataset header row does not provide.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing columns: {missing:?} (found columns: {found:?})")]
pub struct SchemaError {
    /// Missing field names, canonical fields first in schema order.
    pub missing: Vec<String>,
    /// Every normalized header actually present, in file order.
    pub found: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Dataset not found: {}", path.display())]
    DatasetNotFound { path: PathBuf },

    #[error("Error reading dataset {}: {message}", path.display())]
    DatasetParse { path: PathBuf, message: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Background image not found: {}", path.display())]
    ImageNotFound { path: PathBuf },

    #[error("Unsupported background image {}: {message}", path.display())]
    ImageDecode { path: PathBuf, message: String },

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    /// Short heading used by error documents and CLI diagnostics.
    pub fn title(&self) -> &'static str {
        match self {
            CompileError::DatasetNotFound { .. } => "Dataset not found",
            CompileError::DatasetParse { .. } => "Dataset error",
            CompileError::Schema(_) => "CSV Error",
            CompileError::ImageNotFound { .. } => "Background image not found",
            CompileError::ImageDecode { .. } => "Background image error",
            CompileError::Io { .. } => "Read error",
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
