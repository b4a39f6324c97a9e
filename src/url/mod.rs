//! URL handling module for Wordforge
//!
//! This module provides URL canonicalization for the visited set, host
//! comparison for the crawl boundary, and the link filter that decides which
//! harvested links are followed.

mod domain;
mod filter;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, host_label, same_host};
pub use filter::{follow_target, should_follow};
pub use normalize::{canonicalize, canonicalize_url, fetch_target, parse_fetch_target, visit_key};
