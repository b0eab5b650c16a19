use crate::util::escape_xml_display;
use regionmap_core::{CompileError, MapConfig};
use std::fmt::Write as _;

const ERROR_CSS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/error.css"));

/// Renders a compile failure as a small, visibly styled document.
///
/// Schema failures list the missing fields and every header that was found, so the author of
/// the spreadsheet can see what to rename.
pub fn render_error_document(error: &CompileError, config: &MapConfig) -> String {
    let mut body = String::new();
    match error {
        CompileError::Schema(schema) => {
            let _ = writeln!(
                &mut body,
                "<p>Missing columns: <b>{}</b></p>",
                escape_xml_display(&schema.missing.join(", "))
            );
            let _ = writeln!(
                &mut body,
                "<p>Found columns: <b>{}</b></p>",
                escape_xml_display(&schema.found.join(", "))
            );
        }
        other => {
            let _ = writeln!(&mut body, "<p>{}</p>", escape_xml_display(&other.to_string()));
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
{css}body {{ height: {height}px; overflow: {overflow}; }}
</style>
</head>
<body>
<div class="map-error" role="alert">
<h3>{heading}</h3>
{body}</div>
</body>
</html>
"#,
        title = escape_xml_display(&config.title),
        css = ERROR_CSS,
        height = config.embed_height,
        overflow = if config.scrolling { "auto" } else { "hidden" },
        heading = escape_xml_display(error.title()),
        body = body,
    )
}
