// src/page/mod.rs
// =============================================================================
// This module turns an article URL into its outbound article links.
//
// Submodules:
// - sentence: Finds the sentence a link's anchor text appears in
// - links: Extracts article links from paragraph HTML
// - fetch: Downloads pages over HTTP (and the PageFetcher trait)
// =============================================================================

mod fetch;
mod links;
mod sentence;

pub use fetch::{FetchConfig, HttpFetcher, PageFetcher};
pub use links::{canonicalize_url, PageLinks};
