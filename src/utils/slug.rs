//! Document id (slug) generation.
//!
//! Converts a content file path into the id used in post URLs.

use crate::config::SlugMode;
use std::path::{Component, Path};

/// Characters forbidden in URL path segments
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '(', ')', '[', ']', '\t', '\r', '\n', '"', '%',
];

/// File extensions recognized as posts.
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx", "markdown"];

/// Convert a path relative to the content directory into a slug.
///
/// | Relative path             | Slug (`safe`)     |
/// |---------------------------|-------------------|
/// | `hello-world.md`          | `hello-world`     |
/// | `2024/genomics intro.mdx` | `2024/genomics_intro` |
/// | `series/index.md`         | `series`          |
pub fn slugify_id(relative: &Path, mode: SlugMode) -> String {
    let stem = relative.with_extension("");
    let mut segments: Vec<String> = stem
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .map(|segment| match mode {
            SlugMode::Safe => sanitize_text(&segment),
            SlugMode::On => slug::slugify(&segment),
            SlugMode::No => segment,
        })
        .filter(|segment| !segment.is_empty())
        .collect();

    // `series/index.md` is the page for `series`
    if segments.len() > 1 && segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }

    segments.join("/")
}

/// Whether a path looks like a post source file.
pub fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Remove forbidden characters and replace whitespace with underscores
fn sanitize_text(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
