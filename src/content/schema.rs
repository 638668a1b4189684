//! Frontmatter schema for blog posts.
//!
//! Validation is all-or-nothing: a record either becomes a complete
//! [`Metadata`] or yields the first [`ValidationError`] found. Nothing is
//! repaired. Defaults are applied only when a key is absent, never when it
//! is present but empty.
//!
//! | Key            | Type                     | Absent            |
//! |----------------|--------------------------|-------------------|
//! | `title`        | non-empty string         | error             |
//! | `description`  | non-empty string         | error             |
//! | `pubDate`      | date (coerced)           | error             |
//! | `updatedDate`  | date (coerced)           | none              |
//! | `author`       | string                   | configured author |
//! | `tags`         | list of strings          | `[]`              |
//! | `category`     | string                   | none              |
//! | `series`       | string                   | none              |
//! | `seriesOrder`  | integer (coerced)        | none              |
//! | `difficulty`   | beginner / intermediate / advanced | none    |
//! | `readingTime`  | string                   | none              |
//! | `featured`     | boolean                  | `false`           |
//! | `draft`        | boolean                  | `false`           |
//! | `image`        | string                   | none              |
//! | `imageAlt`     | string                   | none              |
//!
//! Unknown keys are ignored.

use crate::{config::defaults, utils::date::DateTimeUtc};
use serde::Serialize;
use serde_json::Value;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Untyped frontmatter as decoded from YAML or TOML.
pub type Record = serde_json::Map<String, Value>;

// Accepted spellings per field; the first is the canonical name.
const TITLE: &[&str] = &["title"];
const DESCRIPTION: &[&str] = &["description"];
const PUB_DATE: &[&str] = &["pubDate", "pub_date"];
const UPDATED_DATE: &[&str] = &["updatedDate", "updated_date"];
const AUTHOR: &[&str] = &["author"];
const TAGS: &[&str] = &["tags"];
const CATEGORY: &[&str] = &["category"];
const SERIES: &[&str] = &["series"];
const SERIES_ORDER: &[&str] = &["seriesOrder", "series_order"];
const DIFFICULTY: &[&str] = &["difficulty"];
const READING_TIME: &[&str] = &["readingTime", "reading_time"];
const FEATURED: &[&str] = &["featured"];
const DRAFT: &[&str] = &["draft"];
const IMAGE: &[&str] = &["image"];
const IMAGE_ALT: &[&str] = &["imageAlt", "image_alt"];

// ============================================================================
// Types
// ============================================================================

/// Why a document was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    Missing(&'static str),

    #[error("`{0}` must not be empty")]
    Empty(&'static str),

    #[error("`{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("`{field}` is not a valid date: `{value}`")]
    InvalidDate { field: &'static str, value: String },

    #[error("`{field}` must be one of {allowed}, got `{value}`")]
    InvalidVariant {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("duplicate slug `{0}`")]
    DuplicateSlug(String),
}

type Result<T> = std::result::Result<T, ValidationError>;

/// Reader skill level a post targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    const ALLOWED: &'static str = "beginner, intermediate, advanced";

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values substituted for absent optional keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDefaults {
    pub author: String,
}

impl Default for SchemaDefaults {
    fn default() -> Self {
        Self {
            author: defaults::base::author(),
        }
    }
}

/// Validated post metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub pub_date: DateTimeUtc,
    pub updated_date: Option<DateTimeUtc>,
    pub author: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub series: Option<String>,
    pub series_order: Option<i64>,
    pub difficulty: Option<Difficulty>,
    pub reading_time: Option<String>,
    pub featured: bool,
    pub draft: bool,
    pub image: Option<String>,
    pub image_alt: Option<String>,
}

impl Metadata {
    /// Non-fatal inconsistencies worth reporting.
    ///
    /// The record is never corrected; callers decide whether to log.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(updated) = self.updated_date
            && updated < self.pub_date
        {
            warnings.push(format!(
                "`updatedDate` ({updated}) precedes `pubDate` ({})",
                self.pub_date
            ));
        }
        warnings
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validate an untyped frontmatter record.
pub fn validate(raw: &Record, defaults: &SchemaDefaults) -> Result<Metadata> {
    Ok(Metadata {
        title: required_string(raw, TITLE)?,
        description: required_string(raw, DESCRIPTION)?,
        pub_date: required_date(raw, PUB_DATE)?,
        updated_date: optional_date(raw, UPDATED_DATE)?,
        author: optional_string(raw, AUTHOR)?.unwrap_or_else(|| defaults.author.clone()),
        tags: string_list(raw, TAGS)?,
        category: optional_string(raw, CATEGORY)?,
        series: optional_string(raw, SERIES)?,
        series_order: optional_integer(raw, SERIES_ORDER)?,
        difficulty: optional_difficulty(raw, DIFFICULTY)?,
        reading_time: optional_string(raw, READING_TIME)?,
        featured: bool_or(raw, FEATURED, false)?,
        draft: bool_or(raw, DRAFT, false)?,
        image: optional_string(raw, IMAGE)?,
        image_alt: optional_string(raw, IMAGE_ALT)?,
    })
}

/// First present spelling of a field.
fn lookup<'a>(raw: &'a Record, keys: &[&'static str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| raw.get(*key))
}

fn required_string(raw: &Record, keys: &[&'static str]) -> Result<String> {
    let field = keys[0];
    match lookup(raw, keys) {
        None | Some(Value::Null) => Err(ValidationError::Missing(field)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ValidationError::Empty(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "a string",
        }),
    }
}

fn optional_string(raw: &Record, keys: &[&'static str]) -> Result<Option<String>> {
    match lookup(raw, keys) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::WrongType {
            field: keys[0],
            expected: "a string",
        }),
    }
}

fn string_list(raw: &Record, keys: &[&'static str]) -> Result<Vec<String>> {
    let wrong_type = || ValidationError::WrongType {
        field: keys[0],
        expected: "a list of strings",
    };

    match lookup(raw, keys) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_owned).ok_or_else(wrong_type))
            .collect(),
        Some(_) => Err(wrong_type()),
    }
}

fn bool_or(raw: &Record, keys: &[&'static str], default: bool) -> Result<bool> {
    match lookup(raw, keys) {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(ValidationError::WrongType {
            field: keys[0],
            expected: "a boolean",
        }),
    }
}

fn required_date(raw: &Record, keys: &[&'static str]) -> Result<DateTimeUtc> {
    match lookup(raw, keys) {
        None | Some(Value::Null) => Err(ValidationError::Missing(keys[0])),
        Some(value) => coerce_date(keys[0], value),
    }
}

fn optional_date(raw: &Record, keys: &[&'static str]) -> Result<Option<DateTimeUtc>> {
    lookup(raw, keys)
        .map(|value| coerce_date(keys[0], value))
        .transpose()
}

/// Strings are parsed, numbers are epoch milliseconds.
fn coerce_date(field: &'static str, value: &Value) -> Result<DateTimeUtc> {
    let invalid = || ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    };

    match value {
        Value::String(s) => DateTimeUtc::parse(s).ok_or_else(invalid),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .and_then(DateTimeUtc::from_timestamp_millis)
            .ok_or_else(invalid),
        _ => Err(ValidationError::WrongType {
            field,
            expected: "a date",
        }),
    }
}

/// Integers, integral floats and numeric strings.
fn optional_integer(raw: &Record, keys: &[&'static str]) -> Result<Option<i64>> {
    let Some(value) = lookup(raw, keys) else {
        return Ok(None);
    };

    let integral = |f: f64| (f.is_finite() && f.fract() == 0.0).then_some(f as i64);
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    };

    parsed.map(Some).ok_or(ValidationError::WrongType {
        field: keys[0],
        expected: "an integer",
    })
}

fn optional_difficulty(raw: &Record, keys: &[&'static str]) -> Result<Option<Difficulty>> {
    let Some(value) = optional_string(raw, keys)? else {
        return Ok(None);
    };

    value
        .parse()
        .map(Some)
        .map_err(|()| ValidationError::InvalidVariant {
            field: keys[0],
            value,
            allowed: Difficulty::ALLOWED,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn minimal() -> Record {
        record(json!({
            "title": "Hello",
            "description": "A first post",
            "pubDate": "2024-01-15",
        }))
    }

    fn check(raw: &Record) -> Result<Metadata> {
        validate(raw, &SchemaDefaults::default())
    }

    #[test]
    fn test_validate_minimal_applies_defaults() {
        let meta = check(&minimal()).unwrap();

        assert_eq!(meta.title, "Hello");
        assert_eq!(meta.description, "A first post");
        assert_eq!(meta.pub_date, DateTimeUtc::from_ymd(2024, 1, 15));
        assert_eq!(meta.updated_date, None);
        assert_eq!(meta.author, "Dr. Sanjeeva Dodlapati");
        assert!(meta.tags.is_empty());
        assert!(!meta.featured);
        assert!(!meta.draft);
        assert_eq!(meta.difficulty, None);
        assert_eq!(meta.series_order, None);
    }

    #[test]
    fn test_validate_full_record() {
        let raw = record(json!({
            "title": "Variant calling",
            "description": "From reads to VCF",
            "pubDate": "2024-03-01T09:00:00Z",
            "updatedDate": "2024-03-05",
            "author": "Alice",
            "tags": ["genomics", "ml"],
            "category": "research",
            "series": "Pipelines",
            "seriesOrder": 2,
            "difficulty": "advanced",
            "readingTime": "12 min read",
            "featured": true,
            "draft": false,
            "image": "/img/cover.png",
            "imageAlt": "A cover",
            "layout": "ignored",
        }));
        let meta = check(&raw).unwrap();

        assert_eq!(meta.pub_date, DateTimeUtc::new(2024, 3, 1, 9, 0, 0));
        assert_eq!(meta.updated_date, Some(DateTimeUtc::from_ymd(2024, 3, 5)));
        assert_eq!(meta.author, "Alice");
        assert_eq!(meta.tags, vec!["genomics", "ml"]);
        assert_eq!(meta.category.as_deref(), Some("research"));
        assert_eq!(meta.series.as_deref(), Some("Pipelines"));
        assert_eq!(meta.series_order, Some(2));
        assert_eq!(meta.difficulty, Some(Difficulty::Advanced));
        assert_eq!(meta.reading_time.as_deref(), Some("12 min read"));
        assert!(meta.featured);
        assert_eq!(meta.image.as_deref(), Some("/img/cover.png"));
        assert_eq!(meta.image_alt.as_deref(), Some("A cover"));
        assert!(meta.warnings().is_empty());
    }

    #[test]
    fn test_missing_title_fails() {
        let mut raw = minimal();
        raw.remove("title");
        assert_eq!(check(&raw), Err(ValidationError::Missing("title")));
    }

    #[test]
    fn test_blank_description_fails() {
        let mut raw = minimal();
        raw.insert("description".into(), json!("   "));
        assert_eq!(check(&raw), Err(ValidationError::Empty("description")));
    }

    #[test]
    fn test_wrong_type_title_fails() {
        let mut raw = minimal();
        raw.insert("title".into(), json!(42));
        assert!(matches!(
            check(&raw),
            Err(ValidationError::WrongType { field: "title", .. })
        ));
    }

    #[test]
    fn test_unknown_difficulty_fails() {
        let mut raw = minimal();
        raw.insert("difficulty".into(), json!("expert"));
        let err = check(&raw).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidVariant { field: "difficulty", ref value, .. } if value == "expert"
        ));
        assert!(err.to_string().contains("beginner, intermediate, advanced"));
    }

    #[test]
    fn test_missing_or_invalid_pub_date_fails() {
        let mut raw = minimal();
        raw.remove("pubDate");
        assert_eq!(check(&raw), Err(ValidationError::Missing("pubDate")));

        raw.insert("pubDate".into(), json!("someday"));
        assert!(matches!(
            check(&raw),
            Err(ValidationError::InvalidDate { field: "pubDate", .. })
        ));

        raw.insert("pubDate".into(), json!("0000-01-15"));
        assert!(matches!(
            check(&raw),
            Err(ValidationError::InvalidDate { field: "pubDate", .. })
        ));

        raw.insert("pubDate".into(), json!(true));
        assert!(matches!(
            check(&raw),
            Err(ValidationError::WrongType { field: "pubDate", .. })
        ));
    }

    #[test]
    fn test_pub_date_from_epoch_millis() {
        let mut raw = minimal();
        raw.insert("pubDate".into(), json!(1_704_067_200_000_i64));
        let meta = check(&raw).unwrap();
        assert_eq!(meta.pub_date, DateTimeUtc::from_ymd(2024, 1, 1));
    }

    #[test]
    fn test_snake_case_aliases() {
        let raw = record(json!({
            "title": "T",
            "description": "D",
            "pub_date": "2024-02-01",
            "series_order": "3",
            "image_alt": "alt",
        }));
        let meta = check(&raw).unwrap();
        assert_eq!(meta.pub_date, DateTimeUtc::from_ymd(2024, 2, 1));
        assert_eq!(meta.series_order, Some(3));
        assert_eq!(meta.image_alt.as_deref(), Some("alt"));
    }

    #[test]
    fn test_present_but_empty_author_is_kept() {
        let mut raw = minimal();
        raw.insert("author".into(), json!(""));
        assert_eq!(check(&raw).unwrap().author, "");
    }

    #[test]
    fn test_configured_default_author() {
        let defaults = SchemaDefaults {
            author: "Site Owner".into(),
        };
        assert_eq!(validate(&minimal(), &defaults).unwrap().author, "Site Owner");
    }

    #[test]
    fn test_optional_null_fails() {
        let mut raw = minimal();
        raw.insert("category".into(), Value::Null);
        assert!(matches!(
            check(&raw),
            Err(ValidationError::WrongType { field: "category", .. })
        ));
    }

    #[test]
    fn test_tags_must_be_strings() {
        let mut raw = minimal();
        raw.insert("tags".into(), json!(["ok", 1]));
        assert!(matches!(
            check(&raw),
            Err(ValidationError::WrongType { field: "tags", .. })
        ));

        raw.insert("tags".into(), json!("single"));
        assert!(check(&raw).is_err());
    }

    #[test]
    fn test_series_order_coercion() {
        let mut raw = minimal();
        for (input, expected) in [(json!(4), 4), (json!(5.0), 5), (json!(" 6 "), 6), (json!("7.0"), 7)] {
            raw.insert("seriesOrder".into(), input);
            assert_eq!(check(&raw).unwrap().series_order, Some(expected));
        }

        raw.insert("seriesOrder".into(), json!(1.5));
        assert!(check(&raw).is_err());
        raw.insert("seriesOrder".into(), json!("first"));
        assert!(check(&raw).is_err());
    }

    #[test]
    fn test_booleans_are_not_coerced() {
        let mut raw = minimal();
        raw.insert("draft".into(), json!("yes"));
        assert!(matches!(
            check(&raw),
            Err(ValidationError::WrongType { field: "draft", .. })
        ));
    }

    #[test]
    fn test_updated_before_published_is_flagged_not_fixed() {
        let mut raw = minimal();
        raw.insert("updatedDate".into(), json!("2023-12-31"));
        let meta = check(&raw).unwrap();

        assert_eq!(meta.updated_date, Some(DateTimeUtc::from_ymd(2023, 12, 31)));
        let warnings = meta.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("precedes"));
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let meta = check(&minimal()).unwrap();
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["pubDate"], "2024-01-15T00:00:00.000Z");
        assert_eq!(json["seriesOrder"], Value::Null);
        assert_eq!(json["featured"], false);
    }
}
