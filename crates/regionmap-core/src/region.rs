use crate::dataset::{Dataset, cell};
use crate::preview::PreviewResolver;
use crate::schema::{ColumnMap, DescriptionPart, DescriptionSource};

pub const DESCRIPTION_SEPARATOR: &str = " | ";

/// One dataset row, with every field already extracted and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRecord {
    /// Literal polygon point list, passed through without numeric validation.
    pub coordinates: String,
    pub link: String,
    pub label: String,
    pub description: String,
    pub preview: String,
}

impl RegionRecord {
    pub fn from_row(row: &[String], columns: &ColumnMap) -> Self {
        let description = match &columns.description {
            DescriptionSource::Column(idx) => cell(row, *idx).trim().to_string(),
            DescriptionSource::Synthesized(parts) => synthesize_description(row, parts),
        };
        let link = normalize_link(cell(row, columns.link));
        if link != "#" && url::Url::parse(&link).is_err() {
            tracing::warn!(link = %link, "region link does not parse as a URL");
        }
        Self {
            coordinates: cell(row, columns.coordinates).trim().to_string(),
            link,
            label: cell(row, columns.label).trim().to_string(),
            description,
            preview: cell(row, columns.preview).trim().to_string(),
        }
    }
}

/// A region ready for rendering: the record plus its inlined preview picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub record: RegionRecord,
    pub preview_src: String,
}

/// Extracts one [`Region`] per dataset row, in row order.
pub fn compile_regions(
    dataset: &Dataset,
    columns: &ColumnMap,
    previews: &PreviewResolver,
) -> Vec<Region> {
    dataset
        .rows
        .iter()
        .map(|row| {
            let record = RegionRecord::from_row(row, columns);
            let preview_src = previews.resolve_data_uri(&record.preview);
            Region {
                record,
                preview_src,
            }
        })
        .collect()
}

/// Prepends `https://` to scheme-less links; empty links become `#`.
pub fn normalize_link(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "#".to_string();
    }
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }
    format!("https://{raw}")
}

fn synthesize_description(row: &[String], parts: &[DescriptionPart]) -> String {
    let mut out = String::new();
    for part in parts {
        let value = cell(row, part.index).trim();
        if value.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str(DESCRIPTION_SEPARATOR);
        }
        out.push_str(&part.caption);
        out.push_str(": ");
        out.push_str(value);
        if let Some(suffix) = &part.suffix {
            out.push_str(suffix);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DescriptionField;
    use crate::schema::normalize_header;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn link_normalization() {
        assert_eq!(normalize_link("example.com/a"), "https://example.com/a");
        assert_eq!(normalize_link("http://x.com"), "http://x.com");
        assert_eq!(normalize_link("https://x.com/b?c=1"), "https://x.com/b?c=1");
        assert_eq!(normalize_link(""), "#");
        assert_eq!(normalize_link("   "), "#");
    }

    #[test]
    fn description_column_is_used_verbatim() {
        let headers: Vec<String> = ["coordinates", "link", "label", "description", "preview"]
            .iter()
            .map(|h| normalize_header(h))
            .collect();
        let columns = ColumnMap::resolve(&headers, &[]).expect("schema");
        let record = RegionRecord::from_row(
            &row(&["0,0,10,0,10,10", "venue.test/hall", " Hall A ", "Big room", "Hall A"]),
            &columns,
        );
        assert_eq!(record.coordinates, "0,0,10,0,10,10");
        assert_eq!(record.link, "https://venue.test/hall");
        assert_eq!(record.label, "Hall A");
        assert_eq!(record.description, "Big room");
        assert_eq!(record.preview, "Hall A");
    }

    #[test]
    fn description_is_synthesized_from_components() {
        let headers: Vec<String> = ["coordinates", "link url", "space", "actual site", "type", "size"]
            .iter()
            .map(|h| normalize_header(h))
            .collect();
        let fields = [
            DescriptionField::new("Type", "Type"),
            DescriptionField::new("Size", "Size").with_suffix(" sqft"),
        ];
        let columns = ColumnMap::resolve(&headers, &fields).expect("schema");

        let full = RegionRecord::from_row(
            &row(&["1,1,2,2,3,1", "", "Terrace", "terrace", "Outdoor", "1200"]),
            &columns,
        );
        assert_eq!(full.description, "Type: Outdoor | Size: 1200 sqft");
        assert_eq!(full.link, "#");

        let partial = RegionRecord::from_row(&row(&["1,1,2,2,3,1", "", "Terrace", "", "", "80"]), &columns);
        assert_eq!(partial.description, "Size: 80 sqft");
    }

    #[test]
    fn short_rows_degrade_to_empty_fields() {
        let headers: Vec<String> = ["coordinates", "link", "label", "description", "preview"]
            .iter()
            .map(|h| normalize_header(h))
            .collect();
        let columns = ColumnMap::resolve(&headers, &[]).expect("schema");
        let record = RegionRecord::from_row(&row(&["not numbers"]), &columns);
        assert_eq!(record.coordinates, "not numbers");
        assert_eq!(record.link, "#");
        assert_eq!(record.label, "");
        assert_eq!(record.preview, "");
    }
}
