//! Derived text metrics: reading time and excerpts.
//!
//! Both are computed fresh from the raw body on every build and are
//! advisory only. Neither function can fail.

use crate::text::{CodePolicy, normalize};
use serde::Serialize;

/// Average adult reading speed.
pub const WORDS_PER_MINUTE: usize = 200;

/// Default excerpt budget in characters.
pub const EXCERPT_LENGTH: usize = 160;

/// Marker appended when an excerpt is cut at a word boundary.
const ELLIPSIS: &str = "...";

/// Result of [`estimate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingTime {
    pub word_count: usize,
    pub minutes: usize,
    pub label: String,
}

/// Per-document metrics handed to the page index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    #[serde(flatten)]
    pub reading_time: ReadingTime,
    pub excerpt: String,
}

impl DerivedMetrics {
    pub fn compute(raw_body: &str, words_per_minute: usize, excerpt_length: usize) -> Self {
        Self {
            reading_time: estimate_with(raw_body, words_per_minute),
            excerpt: excerpt(raw_body, excerpt_length),
        }
    }
}

/// Estimate reading time at [`WORDS_PER_MINUTE`].
///
/// Builds go through [`estimate_with`] with the configured rate.
#[cfg(test)]
pub fn estimate(raw_body: &str) -> ReadingTime {
    estimate_with(raw_body, WORDS_PER_MINUTE)
}

/// Estimate reading time at a custom rate.
///
/// Code is not counted. An empty body reads `0 min read`; no floor of one
/// minute is applied. A rate of zero is treated as one word per minute.
pub fn estimate_with(raw_body: &str, words_per_minute: usize) -> ReadingTime {
    let text = normalize(raw_body, CodePolicy::Strip);
    let word_count = text.split(' ').filter(|word| !word.is_empty()).count();
    let minutes = word_count.div_ceil(words_per_minute.max(1));

    ReadingTime {
        word_count,
        minutes,
        label: format!("{minutes} min read"),
    }
}

/// Summarize a body in at most `max_length` characters.
///
/// Prefers ending on a sentence (`.`, `?`, `!`) found in the second half of
/// the window. Otherwise cuts at the last space and appends `...`.
pub fn excerpt(raw_body: &str, max_length: usize) -> String {
    let text = normalize(raw_body, CodePolicy::Placeholder);

    // Byte offset of the `max_length`-th character, if the text is longer.
    let Some((window_end, _)) = text.char_indices().nth(max_length) else {
        return text;
    };
    let window = &text[..window_end];

    if let Some(end) = window.rfind(['.', '?', '!']) {
        let char_index = window[..end].chars().count();
        if char_index as f64 > max_length as f64 * 0.5 {
            return window[..=end].to_owned();
        }
    }

    let cut = match window.rfind(' ') {
        Some(space) if space > 0 => space,
        _ => window.len(),
    };
    format!("{}{ELLIPSIS}", &window[..cut])
}
