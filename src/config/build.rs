//! `[build]` section configuration.
//!
//! Contains content/output paths, feed, page index and metrics settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Enums
// ============================================================================

/// Slug generation mode for document ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Always convert to an ASCII slug (e.g., "Hello World" → "hello-world").
    On,
    /// Only drop characters that are unsafe in URLs (default).
    #[default]
    Safe,
    /// No slugification; preserve the file stem.
    No,
}

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in folio.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "src/content/blog"   # Markdown source directory
/// output = "dist"                # Output directory
/// drafts = false                 # Publish drafts in feed and index
///
/// [build.rss]
/// path = "rss.xml"
///
/// [build.metrics]
/// words_per_minute = 200
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Markdown content directory.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Minify generated XML.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Include `draft: true` posts in the feed and page index.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub drafts: bool,

    /// RSS feed generation settings.
    #[serde(default)]
    pub rss: RssConfig,

    /// Page index (derived metrics) settings.
    #[serde(default)]
    pub index: IndexConfig,

    /// Reading time and excerpt settings.
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Document id slugification settings.
    #[serde(default)]
    pub slug: SlugConfig,
}

// ============================================================================
// Sub-configurations
// ============================================================================

/// `[build.rss]` section - RSS feed generation configuration.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RssConfig {
    /// Enable RSS feed generation.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = defaults::r#true())]
    pub enable: bool,

    /// Output path for RSS feed file, relative to the output directory.
    #[serde(default = "defaults::build::rss::path")]
    #[educe(Default = defaults::build::rss::path())]
    pub path: PathBuf,

    /// XSL stylesheet referenced by an `<?xml-stylesheet?>` instruction.
    #[serde(default = "defaults::build::rss::stylesheet")]
    #[educe(Default = defaults::build::rss::stylesheet())]
    pub stylesheet: Option<String>,

    /// Path segment between the base URL and the post slug.
    #[serde(default = "defaults::build::rss::link_prefix")]
    #[educe(Default = defaults::build::rss::link_prefix())]
    pub link_prefix: String,
}

/// `[build.index]` section - JSON page index for the page renderer.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Write the page index.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = defaults::r#true())]
    pub enable: bool,

    /// Output path, relative to the output directory.
    #[serde(default = "defaults::build::index::path")]
    #[educe(Default = defaults::build::index::path())]
    pub path: PathBuf,
}

/// `[build.metrics]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Reading speed used for the reading time estimate.
    #[serde(default = "defaults::build::metrics::words_per_minute")]
    #[educe(Default = defaults::build::metrics::words_per_minute())]
    pub words_per_minute: usize,

    /// Maximum excerpt length in characters.
    #[serde(default = "defaults::build::metrics::excerpt_length")]
    #[educe(Default = defaults::build::metrics::excerpt_length())]
    pub excerpt_length: usize,
}

/// `[build.slug]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SlugConfig {
    /// Slugify document ids derived from file paths
    #[serde(default = "defaults::build::slug::path")]
    #[educe(Default = defaults::build::slug::path())]
    pub path: SlugMode,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_build_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.content, PathBuf::from("src/content/blog"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.minify);
        assert!(!config.build.drafts);
        assert!(config.build.rss.enable);
        assert_eq!(config.build.rss.path, PathBuf::from("rss.xml"));
        assert_eq!(config.build.rss.stylesheet.as_deref(), Some("/rss/styles.xsl"));
        assert_eq!(config.build.rss.link_prefix, "blog");
        assert!(config.build.index.enable);
        assert_eq!(config.build.index.path, PathBuf::from("posts.json"));
        assert_eq!(config.build.metrics.words_per_minute, 200);
        assert_eq!(config.build.metrics.excerpt_length, 160);
        assert_eq!(config.build.slug.path, SlugMode::Safe);
    }

    #[test]
    fn test_rss_config() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"

            [build.rss]
            enable = false
            path = "feed/custom.xml"
            link_prefix = "posts"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert!(!config.build.rss.enable);
        assert_eq!(config.build.rss.path, PathBuf::from("feed/custom.xml"));
        assert_eq!(config.build.rss.link_prefix, "posts");
        assert_eq!(config.build.rss.stylesheet.as_deref(), Some("/rss/styles.xsl"));
    }

    #[test]
    fn test_metrics_config() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"

            [build.metrics]
            words_per_minute = 250
            excerpt_length = 120
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.metrics.words_per_minute, 250);
        assert_eq!(config.build.metrics.excerpt_length, 120);
    }

    #[test]
    fn test_slug_mode_parsing() {
        for (raw, expected) in [("on", SlugMode::On), ("safe", SlugMode::Safe), ("no", SlugMode::No)] {
            let config: SiteConfig = toml::from_str(&format!(
                r#"
                [base]
                title = "Test"
                description = "Test"
                [build.slug]
                path = "{raw}"
            "#
            ))
            .unwrap();
            assert_eq!(config.build.slug.path, expected);
        }
    }

    #[test]
    fn test_unknown_build_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"

            [build.rss]
            enabled = true
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
