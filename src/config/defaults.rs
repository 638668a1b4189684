//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "Dr. Sanjeeva Dodlapati".into()
    }

    pub fn language() -> String {
        "en-us".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "src/content/blog".into()
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }

    pub mod rss {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "rss.xml".into()
        }

        pub fn stylesheet() -> Option<String> {
            Some("/rss/styles.xsl".into())
        }

        pub fn link_prefix() -> String {
            "blog".into()
        }
    }

    pub mod index {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "posts.json".into()
        }
    }

    pub mod metrics {
        use crate::metrics;

        pub fn words_per_minute() -> usize {
            metrics::WORDS_PER_MINUTE
        }

        pub fn excerpt_length() -> usize {
            metrics::EXCERPT_LENGTH
        }
    }

    pub mod slug {
        use super::super::super::SlugMode;

        pub fn path() -> SlugMode {
            SlugMode::default()
        }
    }
}
