//! Build outputs: RSS feed and page index.

pub mod index;
pub mod rss;
