//! Plain-text view of markdown bodies.
//!
//! Stripping is pattern based, not a markdown parse. Nested or unusual
//! constructs may survive; the result only feeds approximate metrics.
//!
//! # Steps
//!
//! | # | Pattern                       | Result                     |
//! |---|-------------------------------|----------------------------|
//! | 1 | fenced code (```` ``` ````)   | removed or placeholder     |
//! | 2 | inline code (`` ` ``)         | removed or placeholder     |
//! | 3 | tags (`<...>`)                | removed                    |
//! | 4 | `# * _ ~ [ ] ( )`             | removed                    |
//! | 5 | whitespace runs               | single space               |
//! | 6 | leading / trailing whitespace | trimmed                    |

use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

/// Token substituted for code under [`CodePolicy::Placeholder`].
pub const CODE_PLACEHOLDER: &str = "[code]";

/// Unterminated fences consume the rest of the input.
static RE_FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?(?:```|\z)").unwrap());
static RE_INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]*`").unwrap());
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static RE_MARKDOWN_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#*_~\[\]()]").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// What happens to code blocks and inline code spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePolicy {
    /// Delete code entirely (word counting).
    Strip,
    /// Replace code with [`CODE_PLACEHOLDER`] (excerpts).
    Placeholder,
}

impl CodePolicy {
    const fn replacement(self) -> &'static str {
        match self {
            Self::Strip => "",
            Self::Placeholder => CODE_PLACEHOLDER,
        }
    }
}

/// Reduce a raw markdown body to a single line of plain text.
///
/// The placeholder is inserted before punctuation stripping, so its
/// brackets are removed along with the rest: code reads as `code`.
pub fn normalize(raw: &str, policy: CodePolicy) -> String {
    let code = policy.replacement();

    let text = RE_FENCED_CODE.replace_all(raw, code);
    let text = replace_all(&RE_INLINE_CODE, text, code);
    let text = replace_all(&RE_TAG, text, "");
    let text = replace_all(&RE_MARKDOWN_PUNCT, text, "");
    let text = replace_all(&RE_WHITESPACE, text, " ");

    text.trim().to_owned()
}

/// `Regex::replace_all` over an owned-or-borrowed intermediate.
fn replace_all<'a>(re: &Regex, text: Cow<'a, str>, rep: &str) -> Cow<'a, str> {
    match text {
        Cow::Borrowed(s) => re.replace_all(s, rep),
        Cow::Owned(s) => Cow::Owned(re.replace_all(&s, rep).into_owned()),
    }
}
