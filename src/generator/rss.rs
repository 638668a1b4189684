//! RSS feed assembly.
//!
//! Turns validated posts into a [`FeedDocument`] and renders it as RSS 2.0.

use crate::{
    config::SiteConfig,
    content::{Document, published},
    log,
    utils::{date::DateTimeUtc, minify::minify_xml},
};
use anyhow::{Context, Result, anyhow};
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::fs;

// ============================================================================
// Public API
// ============================================================================

/// Build the RSS feed if enabled in config.
pub fn build_rss(config: &SiteConfig, documents: &[Document]) -> Result<()> {
    if !config.build.rss.enable {
        return Ok(());
    }

    let feed = assemble_feed(documents, &config.feed_site(), config.build.drafts);
    let xml = feed.to_xml()?;
    let xml = minify_xml(&xml, config);

    let rss_path = config.build.output.join(&config.build.rss.path);
    if let Some(parent) = rss_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&rss_path, xml.as_bytes())
        .with_context(|| format!("Failed to write {}", rss_path.display()))?;

    log!("rss"; "{} ({} entries)", rss_path.display(), feed.entries.len());
    Ok(())
}

/// Collect publishable posts into a feed, newest first.
///
/// Empty input produces a valid feed with no entries.
pub fn assemble_feed(documents: &[Document], site: &FeedSite, include_drafts: bool) -> FeedDocument {
    let entries = published(documents, include_drafts)
        .into_iter()
        .map(|doc| FeedEntry {
            title: doc.metadata.title.clone(),
            pub_date: doc.metadata.pub_date,
            description: doc.metadata.description.clone(),
            author: doc.metadata.author.clone(),
            link: canonical_link(&site.base_url, &site.link_prefix, &doc.slug),
            categories: doc.metadata.tags.clone(),
        })
        .collect();

    FeedDocument {
        title: site.title.clone(),
        description: site.description.clone(),
        link: site.base_url.clone(),
        language: site.language.clone(),
        stylesheet: site.stylesheet.clone(),
        entries,
    }
}

/// Absolute post URL: `{base_url}/{prefix}/{slug}/`.
pub fn canonical_link(base_url: &str, prefix: &str, slug: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{base}/{slug}/")
    } else {
        format!("{base}/{prefix}/{slug}/")
    }
}

// ============================================================================
// Types
// ============================================================================

/// Channel-level metadata, taken from `[base]` and `[build.rss]`.
#[derive(Debug, Clone, Default)]
pub struct FeedSite {
    pub title: String,
    pub description: String,
    pub base_url: String,
    pub language: Option<String>,
    pub link_prefix: String,
    pub stylesheet: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub pub_date: DateTimeUtc,
    pub description: String,
    pub author: String,
    pub link: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub title: String,
    pub description: String,
    pub link: String,
    pub language: Option<String>,
    pub stylesheet: Option<String>,
    pub entries: Vec<FeedEntry>,
}

impl FeedDocument {
    fn to_channel(&self) -> rss::Channel {
        let items: Vec<_> = self.entries.iter().map(FeedEntry::to_item).collect();

        ChannelBuilder::default()
            .title(&self.title)
            .link(&self.link)
            .description(&self.description)
            .language(self.language.clone())
            .generator("folio".to_string())
            .items(items)
            .build()
    }

    /// Render as validated RSS 2.0 XML.
    pub fn to_xml(&self) -> Result<String> {
        let channel = self.to_channel();
        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;

        let xml = channel.to_string();
        Ok(match &self.stylesheet {
            Some(href) => with_stylesheet(&xml, href),
            None => xml,
        })
    }
}

impl FeedEntry {
    fn to_item(&self) -> rss::Item {
        let categories = self
            .categories
            .iter()
            .map(|tag| CategoryBuilder::default().name(tag.as_str()).build())
            .collect::<Vec<_>>();

        ItemBuilder::default()
            .title(self.title.clone())
            .link(Some(self.link.clone()))
            .guid(GuidBuilder::default().permalink(true).value(&self.link).build())
            .description(self.description.clone())
            .pub_date(self.pub_date.to_rfc2822())
            .author(self.author.clone())
            .categories(categories)
            .build()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Insert an `<?xml-stylesheet?>` instruction after the XML declaration.
fn with_stylesheet(xml: &str, href: &str) -> String {
    let instruction = format!(
        r#"<?xml-stylesheet href="{}" type="text/xsl"?>"#,
        escape_attr(href)
    );
    let split_at = xml
        .starts_with("<?xml")
        .then(|| xml.find("?>").map(|i| i + 2))
        .flatten()
        .unwrap_or(0);

    let mut out = String::with_capacity(xml.len() + instruction.len());
    out.push_str(&xml[..split_at]);
    out.push_str(&instruction);
    out.push_str(&xml[split_at..]);
    out
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
