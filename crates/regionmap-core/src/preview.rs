//! Preview image lookup.
//!
//! A region's preview reference is a bare name such as `Hall A`. The resolver tries the
//! extensions in [`PREVIEW_EXTENSIONS`] in order; for each one the exact file name is tried
//! first, then a case-insensitive match among the directory's entries.

use crate::embed::{data_uri, mime_for_extension, placeholder_data_uri};
use std::path::{Path, PathBuf};

pub const PREVIEW_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewLookup {
    Found(PathBuf),
    Placeholder,
}

#[derive(Debug, Clone)]
pub struct PreviewResolver {
    dir: PathBuf,
    entries: Vec<(String, PathBuf)>,
}

impl PreviewResolver {
    /// Snapshots the directory listing once; lookups never touch the directory again.
    ///
    /// An unreadable directory behaves like an empty one.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let mut entries: Vec<(String, PathBuf)> = match std::fs::read_dir(&dir) {
            Ok(read_dir) => read_dir
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
                .filter_map(|entry| {
                    let name = entry.file_name().into_string().ok()?;
                    Some((name.to_lowercase(), entry.path()))
                })
                .collect(),
            Err(err) => {
                tracing::debug!(dir = %dir.display(), error = %err, "preview directory unreadable");
                Vec::new()
            }
        };
        entries.sort();
        Self { dir, entries }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn resolve(&self, reference: &str) -> PreviewLookup {
        let name = reference.trim();
        if name.is_empty() {
            return PreviewLookup::Placeholder;
        }
        if !is_bare_name(name) {
            tracing::warn!(reference = name, "preview reference leaves the preview directory");
            return PreviewLookup::Placeholder;
        }

        for ext in PREVIEW_EXTENSIONS {
            let file_name = format!("{name}{ext}");
            let exact = self.dir.join(&file_name);
            if exact.is_file() {
                return PreviewLookup::Found(exact);
            }
            let folded = file_name.to_lowercase();
            if let Some((_, path)) = self.entries.iter().find(|(n, _)| *n == folded) {
                return PreviewLookup::Found(path.clone());
            }
        }
        PreviewLookup::Placeholder
    }

    /// Resolves `reference` and inlines the hit, falling back to the placeholder picture.
    pub fn resolve_data_uri(&self, reference: &str) -> String {
        let PreviewLookup::Found(path) = self.resolve(reference) else {
            return placeholder_data_uri();
        };
        match std::fs::read(&path) {
            Ok(bytes) => {
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or_default();
                tracing::debug!(path = %path.display(), "embedding preview image");
                data_uri(mime_for_extension(ext), &bytes)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "preview image unreadable");
                placeholder_data_uri()
            }
        }
    }
}

/// A bare file stem: no separators, no root or prefix, not `.` or `..`.
fn is_bare_name(name: &str) -> bool {
    !name.contains(['/', '\\'])
        && !Path::new(name).has_root()
        && !matches!(name, "." | "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"x").expect("write");
        path
    }

    #[test]
    fn falls_back_to_case_insensitive_png() {
        let dir = tempfile::tempdir().expect("tempdir");
        let png = touch(dir.path(), "hall a.png");
        let resolver = PreviewResolver::new(dir.path());
        assert_eq!(resolver.resolve("Hall A"), PreviewLookup::Found(png));
    }

    #[test]
    fn extension_order_wins_over_case() {
        let dir = tempfile::tempdir().expect("tempdir");
        let jpg = touch(dir.path(), "terrace.JPG");
        touch(dir.path(), "Terrace.png");
        let resolver = PreviewResolver::new(dir.path());
        assert_eq!(resolver.resolve("  Terrace "), PreviewLookup::Found(jpg));
    }

    #[test]
    fn exact_name_is_preferred() {
        let dir = tempfile::tempdir().expect("tempdir");
        let exact = touch(dir.path(), "Lobby.jpeg");
        let resolver = PreviewResolver::new(dir.path());
        assert_eq!(resolver.resolve("Lobby"), PreviewLookup::Found(exact));
    }

    #[test]
    fn no_match_is_placeholder() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "other.png");
        let resolver = PreviewResolver::new(dir.path());
        assert_eq!(resolver.resolve("Hall A"), PreviewLookup::Placeholder);
        assert_eq!(resolver.resolve("   "), PreviewLookup::Placeholder);
        assert_eq!(resolver.resolve_data_uri("Hall A"), placeholder_data_uri());
    }

    #[test]
    fn missing_directory_is_placeholder() {
        let dir = tempfile::tempdir().expect("tempdir");
        let resolver = PreviewResolver::new(dir.path().join("nope"));
        assert_eq!(resolver.resolve("Hall A"), PreviewLookup::Placeholder);
    }

    #[test]
    fn hit_is_inlined_with_extension_mime() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "stage.png");
        let resolver = PreviewResolver::new(dir.path());
        assert_eq!(resolver.resolve_data_uri("stage"), "data:image/png;base64,eA==");
    }

    #[test]
    fn references_outside_the_directory_are_placeholders() {
        let root = tempfile::tempdir().expect("tempdir");
        let previews = root.path().join("previews");
        std::fs::create_dir(&previews).expect("mkdir");
        touch(root.path(), "secret.png");
        let nested = root.path().join("other");
        std::fs::create_dir(&nested).expect("mkdir");
        let absolute = touch(&nested, "secret.png");

        let resolver = PreviewResolver::new(&previews);
        assert_eq!(resolver.resolve("../secret"), PreviewLookup::Placeholder);
        assert_eq!(resolver.resolve("..\\secret"), PreviewLookup::Placeholder);
        assert_eq!(resolver.resolve("../other/secret"), PreviewLookup::Placeholder);
        let absolute = absolute.with_extension("");
        assert_eq!(
            resolver.resolve(absolute.to_str().expect("utf8 path")),
            PreviewLookup::Placeholder
        );
        assert_eq!(resolver.resolve_data_uri("../secret"), placeholder_data_uri());
    }
}
