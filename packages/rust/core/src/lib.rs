//! Core navigation and search logic for docnav.
//!
//! This crate owns the corpus store, route resolution, search, the
//! navigation tree, and the renderer contract the front end implements.

pub mod corpus;
pub mod render;
pub mod route;
pub mod search;
pub mod toc;

#[cfg(test)]
mod test_support;

pub use corpus::{Corpus, CorpusStats, bundled, load_corpus};
pub use render::{BlockRenderer, anchor_slug, render_block, render_page};
pub use route::{Resolution, Route, page_path, resolve, resolve_route};
pub use search::{SearchOptions, TITLE_MATCH_SNIPPET, is_blank_query, search, search_with};
pub use toc::build_toc;
