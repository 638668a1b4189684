//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section           | Purpose                                        |
//! |-------------------|------------------------------------------------|
//! | `[base]`          | Site metadata (title, description, url, author)|
//! | `[build]`         | Content/output paths, drafts, minify           |
//! | `[build.rss]`     | Feed path, stylesheet, link prefix             |
//! | `[build.index]`   | Page index output                              |
//! | `[build.metrics]` | Reading speed and excerpt length               |
//! | `[extra]`         | User-defined custom fields                     |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "AI Research & Genomics"
//! description = "Insights in machine learning and computational biology"
//! url = "https://example.com"
//! author = "Alice"
//!
//! [build]
//! content = "src/content/blog"
//! output = "dist"
//!
//! [build.rss]
//! stylesheet = "/rss/styles.xsl"
//!
//! [extra]
//! analytics_id = "UA-12345"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;

pub use build::SlugMode;

use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;

use crate::{
    cli::{Cli, Commands},
    content::schema::SchemaDefaults,
    generator::rss::FeedSite,
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Defaults the schema validator applies to absent frontmatter keys.
    pub fn schema_defaults(&self) -> SchemaDefaults {
        SchemaDefaults {
            author: self.base.author.clone(),
        }
    }

    /// Channel-level metadata for the feed assembler.
    pub fn feed_site(&self) -> FeedSite {
        FeedSite {
            title: self.base.title.clone(),
            description: self.base.description.clone(),
            base_url: self.base.url.clone().unwrap_or_default(),
            language: Some(self.base.language.clone()).filter(|l| !l.is_empty()),
            link_prefix: self.build.rss.link_prefix.clone(),
            stylesheet: self.build.rss.stylesheet.clone().filter(|s| !s.is_empty()),
        }
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.update_path_with_root(&root);

        if let Commands::Build { build_args } = &cli.command {
            Self::update_option(&mut self.build.minify, build_args.minify.as_ref());
            Self::update_option(&mut self.build.rss.enable, build_args.rss.as_ref());
            if build_args.drafts {
                self.build.drafts = true;
            }
            if let Some(base_url) = &build_args.base_url {
                self.base.url = Some(base_url.clone());
            }
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before building
    pub fn validate(&self) -> Result<()> {
        if self.build.rss.enable && self.base.url.is_none() {
            bail!(ConfigError::Validation(
                "[base.url] is required for RSS generation".into()
            ));
        }

        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.build.metrics.words_per_minute == 0 {
            bail!(ConfigError::Validation(
                "[build.metrics.words_per_minute] must be greater than 0".into()
            ));
        }

        if self.build.rss.path.is_absolute() || self.build.index.path.is_absolute() {
            bail!(ConfigError::Validation(
                "[build.rss.path] and [build.index.path] must be relative to the output directory"
                    .into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
