//! Frontmatter splitting.
//!
//! A post may open with a YAML block fenced by `---` or a TOML block fenced
//! by `+++`. Either is decoded into an untyped [`Record`]; typing happens
//! later in [`super::schema::validate`].

use super::schema::{Record, ValidationError};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

static RE_YAML: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?sm)\A\x{FEFF}?---[ \t]*\r?\n(.*?)^---[ \t]*(?:\r?\n|\z)").unwrap()
});
static RE_TOML: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?sm)\A\x{FEFF}?\+\+\+[ \t]*\r?\n(.*?)^\+\+\+[ \t]*(?:\r?\n|\z)").unwrap()
});

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("invalid YAML frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML frontmatter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("frontmatter must be a key/value mapping")]
    NotAMapping,

    #[error("frontmatter block opened with `{0}` is never closed")]
    Unterminated(&'static str),
}

impl From<FrontmatterError> for ValidationError {
    fn from(err: FrontmatterError) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

/// Split raw file content into its metadata record and body.
///
/// Content without a frontmatter block yields an empty record and the whole
/// input as body.
pub fn split(content: &str) -> Result<(Record, &str), FrontmatterError> {
    if let Some(caps) = RE_YAML.captures(content) {
        let record = parse_yaml(&caps[1])?;
        return Ok((record, &content[caps.get(0).map_or(0, |m| m.end())..]));
    }
    if let Some(caps) = RE_TOML.captures(content) {
        let record = parse_toml(&caps[1])?;
        return Ok((record, &content[caps.get(0).map_or(0, |m| m.end())..]));
    }

    let first_line = content
        .trim_start_matches('\u{FEFF}')
        .lines()
        .next()
        .map(str::trim_end);
    match first_line {
        Some("---") => Err(FrontmatterError::Unterminated("---")),
        Some("+++") => Err(FrontmatterError::Unterminated("+++")),
        _ => Ok((Record::new(), content)),
    }
}

fn parse_yaml(source: &str) -> Result<Record, FrontmatterError> {
    if source.trim().is_empty() {
        return Ok(Record::new());
    }
    match serde_yaml::from_str::<Value>(source)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Record::new()),
        _ => Err(FrontmatterError::NotAMapping),
    }
}

fn parse_toml(source: &str) -> Result<Record, FrontmatterError> {
    let table: toml::Table = toml::from_str(source)?;
    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect())
}

/// TOML datetimes become their RFC 3339 text so date coercion sees a string.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_yaml() {
        let content = "---\ntitle: My Post\npubDate: 2024-01-01\ntags:\n  - rust\n---\n# Hello World\n";
        let (record, body) = split(content).unwrap();

        assert_eq!(record["title"], "My Post");
        assert_eq!(record["pubDate"], "2024-01-01");
        assert_eq!(record["tags"], serde_json::json!(["rust"]));
        assert_eq!(body, "# Hello World\n");
    }

    #[test]
    fn test_split_yaml_crlf_and_bom() {
        let content = "\u{FEFF}---\r\ntitle: Windows\r\n---\r\nBody";
        let (record, body) = split(content).unwrap();
        assert_eq!(record["title"], "Windows");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_empty_yaml_block() {
        let (record, body) = split("---\n---\nJust body").unwrap();
        assert!(record.is_empty());
        assert_eq!(body, "Just body");
    }

    #[test]
    fn test_split_toml() {
        let content = "+++\ntitle = \"Toml Post\"\npub_date = 2024-02-01\nseries_order = 2\n+++\nBody text";
        let (record, body) = split(content).unwrap();

        assert_eq!(record["title"], "Toml Post");
        assert_eq!(record["pub_date"], "2024-02-01");
        assert_eq!(record["series_order"], 2);
        assert_eq!(body, "Body text");
    }

    #[test]
    fn test_split_without_frontmatter() {
        let (record, body) = split("# Only a body").unwrap();
        assert!(record.is_empty());
        assert_eq!(body, "# Only a body");
    }

    #[test]
    fn test_split_body_with_horizontal_rule() {
        let content = "---\ntitle: A\n---\nIntro\n\n---\n\nMore";
        let (record, body) = split(content).unwrap();
        assert_eq!(record["title"], "A");
        assert_eq!(body, "Intro\n\n---\n\nMore");
    }

    #[test]
    fn test_split_unterminated() {
        let err = split("---\ntitle: never closed\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Unterminated("---")));
    }

    #[test]
    fn test_split_not_a_mapping() {
        let err = split("---\n- a\n- b\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontmatterError::NotAMapping));
    }

    #[test]
    fn test_split_invalid_yaml() {
        let err = split("---\ntitle: [unclosed\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn test_error_converts_to_malformed_input() {
        let err: ValidationError = FrontmatterError::NotAMapping.into();
        assert!(matches!(err, ValidationError::MalformedInput(_)));
    }
}
