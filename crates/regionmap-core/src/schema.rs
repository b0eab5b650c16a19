//! The canonical dataset schema and its header alias table.
//!
//! Spreadsheets in the wild name the same column differently (`link_url`, `Link URL`, ...).
//! Headers are normalized (trimmed, lowercased) and then every canonical [`Field`] is looked up
//! by its own name first and by its aliases second. The first matching header wins.

use crate::config::DescriptionField;
use crate::error::SchemaError;
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Coordinates,
    Link,
    Label,
    Description,
    Preview,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Coordinates,
        Field::Link,
        Field::Label,
        Field::Description,
        Field::Preview,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Coordinates => "coordinates",
            Field::Link => "link",
            Field::Label => "label",
            Field::Description => "description",
            Field::Preview => "preview",
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Coordinates => &["coords", "points", "polygon"],
            Field::Link => &["link url", "link_url", "url", "href"],
            Field::Label => &["name", "space", "title"],
            Field::Description => &["desc", "summary", "details"],
            Field::Preview => &["image_url", "image", "preview image", "actual site"],
        }
    }
}

/// Trims surrounding whitespace and lowercases a header name.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Where a row's description comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionSource {
    Column(usize),
    Synthesized(Vec<DescriptionPart>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionPart {
    pub index: usize,
    pub caption: String,
    pub suffix: Option<String>,
}

/// Column indices of every canonical field, resolved against one header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub coordinates: usize,
    pub link: usize,
    pub label: usize,
    pub description: DescriptionSource,
    pub preview: usize,
}

impl ColumnMap {
    /// Resolves canonical fields against already-normalized `headers`.
    ///
    /// The description is taken from a description column when there is one; otherwise it is
    /// synthesized from `description_fields`, each of which must then be present.
    pub fn resolve(
        headers: &[String],
        description_fields: &[DescriptionField],
    ) -> Result<Self, SchemaError> {
        let mut by_name: IndexMap<&str, usize> = IndexMap::new();
        for (idx, header) in headers.iter().enumerate() {
            by_name.entry(header.as_str()).or_insert(idx);
        }

        let lookup = |field: Field| -> Option<usize> {
            std::iter::once(field.name())
                .chain(field.aliases().iter().copied())
                .find_map(|name| by_name.get(name).copied())
        };

        let mut missing: Vec<String> = Vec::new();
        let mut require = |field: Field| -> Option<usize> {
            let found = lookup(field);
            if found.is_none() {
                missing.push(field.name().to_string());
            }
            found
        };

        let coordinates = require(Field::Coordinates);
        let link = require(Field::Link);
        let label = require(Field::Label);
        let description_column = lookup(Field::Description);
        let preview = require(Field::Preview);

        let description = match description_column {
            Some(idx) => DescriptionSource::Column(idx),
            None if description_fields.is_empty() => {
                insert_before_preview(&mut missing, Field::Description.name().to_string());
                DescriptionSource::Synthesized(Vec::new())
            }
            None => {
                let mut parts = Vec::with_capacity(description_fields.len());
                for field in description_fields {
                    let column = normalize_header(&field.column);
                    match by_name.get(column.as_str()) {
                        Some(&index) => parts.push(DescriptionPart {
                            index,
                            caption: field.caption.clone(),
                            suffix: field.suffix.clone(),
                        }),
                        None => insert_before_preview(&mut missing, column),
                    }
                }
                DescriptionSource::Synthesized(parts)
            }
        };

        match (coordinates, link, label, preview) {
            (Some(coordinates), Some(link), Some(label), Some(preview)) if missing.is_empty() => {
                Ok(Self {
                    coordinates,
                    link,
                    label,
                    description,
                    preview,
                })
            }
            _ => Err(SchemaError {
                missing,
                found: headers.to_vec(),
            }),
        }
    }
}

/// Keeps `missing` in schema order: description entries sit before `preview`.
fn insert_before_preview(missing: &mut Vec<String>, name: String) {
    let at = missing
        .iter()
        .position(|m| m == Field::Preview.name())
        .unwrap_or(missing.len());
    missing.insert(at, name);
}
