//! Blog post content store.
//!
//! # Architecture
//!
//! ```text
//! collect_sources()            walk content dir → Vec<SourceFile>
//!     │
//!     ▼
//! SourceFile::load()           frontmatter::split → schema::validate
//!     │
//!     ├── Ok(Document)         slug + body + Metadata
//!     └── Err(ValidationError) document excluded, build continues
//!     │
//!     ▼
//! published()                  drop drafts, stable sort newest first
//! ```

pub mod frontmatter;
pub mod schema;

use crate::{
    config::SlugMode,
    utils::slug::{is_content_file, slugify_id},
};
use anyhow::{Context, Result};
use schema::{Metadata, SchemaDefaults, ValidationError};
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// A post file as read from disk, not yet validated.
///
/// A file that could not be read as UTF-8 text keeps the read error so it
/// fails alone in [`SourceFile::load`].
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub slug: String,
    pub path: PathBuf,
    pub content: std::result::Result<String, String>,
}

/// A validated post.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub slug: String,
    pub body: String,
    pub metadata: Metadata,
}

impl SourceFile {
    /// Split and validate this file into a [`Document`].
    pub fn load(&self, defaults: &SchemaDefaults) -> Result<Document, ValidationError> {
        let content = self
            .content
            .as_deref()
            .map_err(|err| ValidationError::MalformedInput(format!("unreadable file: {err}")))?;
        let (record, body) = frontmatter::split(content)?;
        let metadata = schema::validate(&record, defaults)?;

        Ok(Document {
            slug: self.slug.clone(),
            body: body.to_owned(),
            metadata,
        })
    }
}

/// Read every post file under `content_dir`, in path order.
///
/// Only a failure to walk the directory is an error here; unreadable files
/// are kept and rejected individually on load.
pub fn collect_sources(content_dir: &Path, mode: SlugMode) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(content_dir).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to walk content directory: {}", content_dir.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_content_file(path) {
            continue;
        }

        let relative = path.strip_prefix(content_dir).unwrap_or(path);
        let content = fs::read_to_string(path).map_err(|err| err.to_string());

        sources.push(SourceFile {
            slug: slugify_id(relative, mode),
            path: path.to_path_buf(),
            content,
        });
    }

    Ok(sources)
}

/// Publishable documents, newest first.
///
/// Drafts are dropped unless `include_drafts`. The sort is stable: posts
/// sharing a publication date keep their input order.
pub fn published(documents: &[Document], include_drafts: bool) -> Vec<&Document> {
    let mut posts: Vec<_> = documents
        .iter()
        .filter(|doc| include_drafts || !doc.metadata.draft)
        .collect();
    posts.sort_by(|a, b| b.metadata.pub_date.cmp(&a.metadata.pub_date));
    posts
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::utils::date::DateTimeUtc;
    use tempfile::TempDir;

    /// Validated document with the given slug and `YYYY-MM-DD` date.
    pub(crate) fn document(slug: &str, date: &str) -> Document {
        let source = SourceFile {
            slug: slug.to_owned(),
            path: PathBuf::from(format!("{slug}.md")),
            content: Ok(format!(
                "---\ntitle: Post {slug}\ndescription: About {slug}\npubDate: {date}\ntags: [a, b]\n---\nBody of {slug}."
            )),
        };
        source.load(&SchemaDefaults::default()).unwrap()
    }

    #[test]
    fn test_load_valid_source() {
        let doc = document("hello", "2024-01-15");
        assert_eq!(doc.slug, "hello");
        assert_eq!(doc.body, "Body of hello.");
        assert_eq!(doc.metadata.title, "Post hello");
        assert_eq!(doc.metadata.pub_date, DateTimeUtc::from_ymd(2024, 1, 15));
        assert_eq!(doc.metadata.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_load_missing_title() {
        let source = SourceFile {
            slug: "untitled".into(),
            path: PathBuf::from("untitled.md"),
            content: Ok("---\ndescription: x\npubDate: 2024-01-01\n---\nbody".into()),
        };
        let err = source.load(&SchemaDefaults::default()).unwrap_err();
        assert_eq!(err, ValidationError::Missing("title"));
    }

    #[test]
    fn test_load_malformed_frontmatter() {
        let source = SourceFile {
            slug: "broken".into(),
            path: PathBuf::from("broken.md"),
            content: Ok("---\njust a string\n---\nbody".into()),
        };
        let err = source.load(&SchemaDefaults::default()).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedInput(_)));
    }

    #[test]
    fn test_published_sorts_newest_first() {
        let docs = vec![
            document("jan", "2024-01-01"),
            document("mar", "2024-03-01"),
            document("feb", "2024-02-01"),
        ];
        let slugs: Vec<_> = published(&docs, false).iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, ["mar", "feb", "jan"]);
    }

    #[test]
    fn test_published_is_stable_on_ties() {
        let docs = vec![
            document("first", "2024-01-01"),
            document("newer", "2024-05-01"),
            document("second", "2024-01-01"),
            document("third", "2024-01-01"),
        ];
        let slugs: Vec<_> = published(&docs, false).iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, ["newer", "first", "second", "third"]);
    }

    #[test]
    fn test_published_drops_drafts_unless_requested() {
        let mut draft = document("draft", "2024-06-01");
        draft.metadata.draft = true;
        let docs = vec![document("live", "2024-01-01"), draft];

        assert_eq!(published(&docs, false).len(), 1);
        assert_eq!(published(&docs, true).len(), 2);
    }

    #[test]
    fn test_collect_sources() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("2024")).unwrap();
        fs::write(dir.path().join("b-post.md"), "b").unwrap();
        fs::write(dir.path().join("a post.mdx"), "a").unwrap();
        fs::write(dir.path().join("2024/nested.md"), "n").unwrap();
        fs::write(dir.path().join("cover.png"), "not a post").unwrap();

        let sources = collect_sources(dir.path(), SlugMode::Safe).unwrap();
        let slugs: Vec<_> = sources.iter().map(|s| s.slug.as_str()).collect();

        assert_eq!(slugs, ["2024/nested", "a_post", "b-post"]);
        assert_eq!(sources[1].content.as_deref(), Ok("a"));
    }

    #[test]
    fn test_collect_sources_keeps_non_utf8_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("latin1.md"), b"caf\xe9").unwrap();

        let sources = collect_sources(dir.path(), SlugMode::Safe).unwrap();
        assert_eq!(sources.len(), 1);
        assert!(sources[0].content.is_err());

        let err = sources[0].load(&SchemaDefaults::default()).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedInput(_)));
    }

    #[test]
    fn test_collect_sources_missing_dir() {
        assert!(collect_sources(Path::new("/definitely/not/a/dir"), SlugMode::Safe).is_err());
    }
}
