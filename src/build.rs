//! Build orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── load_corpus()
//!     │       │
//!     │       ├── collect_sources()      read *.md / *.mdx
//!     │       └── par_iter → load()      validate each post in parallel
//!     │                                  (failures logged, never fatal)
//!     │
//!     └── rayon::join
//!             ├── build_rss()            rss.xml
//!             └── build_index()          posts.json
//! ```

use crate::{
    config::SiteConfig,
    content::{
        Document, collect_sources,
        schema::{SchemaDefaults, ValidationError},
    },
    generator::{index::build_index, rss::build_rss},
    log,
};
use anyhow::{Result, bail};
use rayon::prelude::*;
use std::{collections::HashSet, path::PathBuf};

/// A post that failed validation and was left out of the build.
#[derive(Debug, Clone)]
pub struct Failure {
    pub path: PathBuf,
    pub error: ValidationError,
}

/// Every post under the content directory, split by validity.
#[derive(Debug, Default)]
pub struct Corpus {
    pub documents: Vec<Document>,
    pub failures: Vec<Failure>,
}

/// Load and validate every post, isolating failures per document.
///
/// Documents keep their path order. A slug already taken by an earlier
/// document is reported as [`ValidationError::DuplicateSlug`].
pub fn load_corpus(config: &SiteConfig) -> Result<Corpus> {
    let sources = collect_sources(&config.build.content, config.build.slug.path)?;
    let defaults: SchemaDefaults = config.schema_defaults();

    let results: Vec<_> = sources
        .par_iter()
        .map(|source| (source, source.load(&defaults)))
        .collect();

    let mut corpus = Corpus::default();
    let mut seen = HashSet::new();
    for (source, result) in results {
        let result = result.and_then(|doc| {
            if seen.insert(doc.slug.clone()) {
                Ok(doc)
            } else {
                Err(ValidationError::DuplicateSlug(doc.slug))
            }
        });

        match result {
            Ok(doc) => {
                for warning in doc.metadata.warnings() {
                    log!("warn"; "{}: {}", source.path.display(), warning);
                }
                corpus.documents.push(doc);
            }
            Err(error) => {
                log!("error"; "{}: {}", source.path.display(), error);
                corpus.failures.push(Failure {
                    path: source.path.clone(),
                    error,
                });
            }
        }
    }

    log!(
        "load";
        "{} posts ({} invalid)",
        corpus.documents.len(),
        corpus.failures.len()
    );
    Ok(corpus)
}

/// Validate all posts and write the feed and page index.
///
/// Invalid posts are excluded; they do not fail the build.
pub fn build_site(config: &SiteConfig) -> Result<Corpus> {
    let corpus = load_corpus(config)?;

    let (rss_result, index_result) = rayon::join(
        || build_rss(config, &corpus.documents),
        || build_index(config, &corpus.documents),
    );
    rss_result?;
    index_result?;

    log!("done"; "output in {}", config.build.output.display());
    Ok(corpus)
}

/// Validate all posts without writing anything.
///
/// Fails if any post is invalid.
pub fn check_site(config: &SiteConfig) -> Result<Corpus> {
    let corpus = load_corpus(config)?;

    if !corpus.failures.is_empty() {
        bail!(
            "{} of {} posts failed validation",
            corpus.failures.len(),
            corpus.failures.len() + corpus.documents.len()
        );
    }

    log!("check"; "all {} posts valid", corpus.documents.len());
    Ok(corpus)
}
