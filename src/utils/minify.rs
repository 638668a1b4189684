//! XML minification for generated feeds.
//!
//! Enabled or disabled by `[build] minify` in `SiteConfig`.

use crate::config::SiteConfig;
use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

/// Whitespace-only runs between two tags.
static RE_INTER_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s+<").unwrap());

/// Minify XML if enabled in config.
///
/// Returns `Cow::Borrowed` when minification is disabled. Text inside
/// elements is left untouched.
pub fn minify_xml<'a>(xml: &'a str, config: &SiteConfig) -> Cow<'a, str> {
    if !config.build.minify {
        return Cow::Borrowed(xml);
    }
    RE_INTER_TAG.replace_all(xml.trim(), "><")
}
