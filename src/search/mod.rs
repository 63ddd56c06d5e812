// src/search/mod.rs
// =============================================================================
// This module searches the live link graph for a path between two articles.
//
// Features:
// - Breadth-first search, so the path found has the fewest clicks
// - Pages fetched lazily, one at a time, as the search reaches them
// - Each step remembers the sentence its link appeared in
// - Optional page-count and time limits
//
// Submodules:
// - arena: the discovered nodes and their predecessor links
// - log: where visitation events go (a file, or memory in tests)
// - finder: the search itself
// =============================================================================

mod arena;
mod finder;
mod log;

pub use finder::{find_path, FoundPath, PathStep, SearchLimits};
pub use log::FileVisitLog;
