use crate::util::{escape_xml_display, push_attr};
use regionmap_core::{EmbeddedImage, MapConfig, Region};
use std::fmt::Write as _;

const MAP_CSS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/map.css"));
const MAP_JS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/map.js"));

/// Renders the interactive map document.
///
/// The overlay's `viewBox` is the coordinate frame (the image's pixel size unless pinned by
/// `config`) and is stretched with `preserveAspectRatio="none"` so it tracks the backdrop.
/// Regions are emitted in slice order, one `<polygon>` each. Tooltip text travels in data
/// attributes and is written with `textContent`, so no dataset text ends up in script source.
pub fn render_map_document(
    background: &EmbeddedImage,
    regions: &[Region],
    config: &MapConfig,
) -> String {
    let (frame_w, frame_h) = config.frame_size(background.width, background.height);

    let mut out = String::with_capacity(
        MAP_CSS.len()
            + MAP_JS.len()
            + background.data_uri.len()
            + regions
                .iter()
                .map(|r| r.preview_src.len() + 256)
                .sum::<usize>()
            + 1024,
    );

    let _ = write!(
        &mut out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
{css}body {{ height: {height}px; overflow: {overflow}; }}
.map-container {{ aspect-ratio: {img_w} / {img_h}; }}
</style>
</head>
<body>
<div class="map-container">
"#,
        title = escape_xml_display(&config.title),
        css = MAP_CSS,
        height = config.embed_height,
        overflow = if config.scrolling { "auto" } else { "hidden" },
        img_w = background.width.max(1),
        img_h = background.height.max(1),
    );

    out.push_str(r#"<img class="map-image" alt="""#);
    push_attr(&mut out, "src", &background.data_uri);
    let _ = writeln!(
        &mut out,
        r#" width="{}" height="{}">"#,
        background.width, background.height
    );
    let _ = writeln!(
        &mut out,
        r#"<svg class="map-svg" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {frame_w} {frame_h}" preserveAspectRatio="none">"#
    );

    for region in regions {
        render_region_into(&mut out, region);
    }

    out.push_str(
        r#"</svg>
</div>
<div id="tooltip" role="tooltip">
<img id="tt-img" src="" alt="Preview">
<h4 id="tt-name"></h4>
<p id="tt-desc"></p>
</div>
<script>
"#,
    );
    out.push_str(MAP_JS);
    out.push_str("</script>\n</body>\n</html>\n");
    out
}

/// One region fragment: a polygon wrapped in a link that opens in a new browsing context.
pub fn render_region(region: &Region) -> String {
    let mut out = String::new();
    render_region_into(&mut out, region);
    out
}

fn render_region_into(out: &mut String, region: &Region) {
    let record = &region.record;
    out.push_str("<a");
    push_attr(out, "href", &record.link);
    out.push_str(r#" target="_blank" rel="noopener noreferrer"><polygon class="map-poly""#);
    push_attr(out, "points", &record.coordinates);
    push_attr(out, "data-label", &record.label);
    push_attr(out, "data-description", &record.description);
    push_attr(out, "data-preview", &region.preview_src);
    out.push_str("></polygon></a>\n");
}
