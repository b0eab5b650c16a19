// Markup escaping helpers shared by the map and error documents.

/// Escapes `& < > " '`, which makes the result safe in text and in either attribute quoting.
pub(crate) fn escape_xml_into(out: &mut String, text: &str) {
    let _ = write_escaped(out, text);
}

fn write_escaped<W: std::fmt::Write + ?Sized>(out: &mut W, text: &str) -> std::fmt::Result {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => Some("&amp;"),
            b'<' => Some("&lt;"),
            b'>' => Some("&gt;"),
            b'"' => Some("&quot;"),
            b'\'' => Some("&#39;"),
            _ => None,
        };
        let Some(esc) = esc else {
            continue;
        };
        if start < i {
            out.write_str(&text[start..i])?;
        }
        out.write_str(esc)?;
        start = i + 1;
    }
    if start < text.len() {
        out.write_str(&text[start..])?;
    }
    Ok(())
}

pub(crate) fn escape_xml_display(text: &str) -> EscapeXmlDisplay<'_> {
    EscapeXmlDisplay(text)
}

pub(crate) struct EscapeXmlDisplay<'a>(&'a str);

impl std::fmt::Display for EscapeXmlDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_escaped(f, self.0)
    }
}

/// Writes ` name="value"` with the value escaped.
pub(crate) fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_xml_into(out, value);
    out.push('"');
}
