//! Shared helpers: dates, slugs and XML minification.

pub mod date;
pub mod minify;
pub mod slug;
