//! CSV dataset loading.

use crate::error::{CompileError, Result};
use crate::schema::normalize_header;
use std::io::Read;
use std::path::Path;

/// A parsed table: normalized headers plus raw string rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Reads a CSV file. An absent file maps to [`CompileError::DatasetNotFound`].
    pub fn load(path: &Path) -> Result<Self> {
        let file = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(CompileError::DatasetNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(err) => return Err(CompileError::io(path, err)),
        };
        let dataset = Self::from_reader(file).map_err(|err| CompileError::DatasetParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        tracing::debug!(
            path = %path.display(),
            rows = dataset.rows.len(),
            columns = dataset.headers.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Parses CSV text from any reader. Short rows are allowed; missing cells read as empty.
    pub fn from_reader<R: Read>(reader: R) -> std::result::Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()?
            .iter()
            .map(normalize_header)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn from_csv_str(text: &str) -> std::result::Result<Self, csv::Error> {
        Self::from_reader(text.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Returns the cell at `index`, or `""` for short rows.
pub(crate) fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}
