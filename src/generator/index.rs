//! Page index generation.
//!
//! Writes `posts.json`: one entry per published post, in feed order, carrying
//! the metadata plus reading time and excerpt for the page renderer.

use super::rss::canonical_link;
use crate::{
    config::SiteConfig,
    content::{Document, published, schema::Metadata},
    log,
    metrics::DerivedMetrics,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;

/// One post in the page index.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEntry<'a> {
    pub slug: &'a str,
    pub link: String,
    #[serde(flatten)]
    pub metadata: &'a Metadata,
    /// Long-form publication date, e.g. "January 15, 2024".
    pub display_date: String,
    /// Authored `readingTime` if present, else the computed label.
    pub reading_time_text: String,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

impl<'a> PageEntry<'a> {
    fn new(doc: &'a Document, config: &SiteConfig) -> Self {
        let metrics_config = &config.build.metrics;
        let metrics = DerivedMetrics::compute(
            &doc.body,
            metrics_config.words_per_minute,
            metrics_config.excerpt_length,
        );
        let reading_time_text = doc
            .metadata
            .reading_time
            .clone()
            .unwrap_or_else(|| metrics.reading_time.label.clone());

        Self {
            slug: &doc.slug,
            link: canonical_link(
                config.base.url.as_deref().unwrap_or_default(),
                &config.build.rss.link_prefix,
                &doc.slug,
            ),
            metadata: &doc.metadata,
            display_date: doc.metadata.pub_date.to_display(),
            reading_time_text,
            metrics,
        }
    }
}

/// Derive index entries for every published post, newest first.
pub fn page_entries<'a>(config: &SiteConfig, documents: &'a [Document]) -> Vec<PageEntry<'a>> {
    published(documents, config.build.drafts)
        .into_par_iter()
        .map(|doc| PageEntry::new(doc, config))
        .collect()
}

/// Write the page index if enabled in config.
pub fn build_index(config: &SiteConfig, documents: &[Document]) -> Result<()> {
    if !config.build.index.enable {
        return Ok(());
    }

    let entries = page_entries(config, documents);
    let json = serde_json::to_string_pretty(&entries).context("Failed to serialize page index")?;

    let index_path = config.build.output.join(&config.build.index.path);
    if let Some(parent) = index_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&index_path, json)
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    log!("index"; "{} ({} posts)", index_path.display(), entries.len());
    Ok(())
}
