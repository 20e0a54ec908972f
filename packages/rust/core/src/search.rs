//! In-memory search over a corpus.
//!
//! Matching is case-insensitive substring containment. Pages are visited in
//! corpus order and each page yields at most one result: a page title match
//! takes precedence, otherwise the first block with string content containing
//! the query supplies the snippet. That covers header, text, code and mermaid
//! blocks plus malformed blocks whose raw value is a string. List blocks are
//! not searched.

use tracing::{debug, instrument};

use docnav_shared::{
    ContentBlock, DEFAULT_ELLIPSIS, DEFAULT_SNIPPET_CHARS, Page, SearchConfig, SearchResult,
    Section,
};

use crate::corpus::Corpus;

/// Snippet used when the page title itself matches.
pub const TITLE_MATCH_SNIPPET: &str = "Page Title Match";

/// Tunables for snippet rendering and result count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Characters of block text kept in a content snippet.
    pub snippet_chars: usize,
    /// Marker appended to every content snippet.
    pub ellipsis: String,
    /// Stop after this many results.
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            snippet_chars: DEFAULT_SNIPPET_CHARS,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            limit: None,
        }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            snippet_chars: config.snippet_chars,
            ellipsis: config.ellipsis.clone(),
            limit: config.limit,
        }
    }
}

/// Whether a query counts as "nothing typed yet".
///
/// A blank query yields no results, and so does a query without hits; the
/// two states are told apart by the query, not by the result list.
pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

/// Search with default options.
pub fn search(corpus: &Corpus, query: &str) -> Vec<SearchResult> {
    search_with(corpus, query, &SearchOptions::default())
}

/// Search with explicit options.
#[instrument(skip_all, fields(query = %query))]
pub fn search_with(corpus: &Corpus, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
    if is_blank_query(query) {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let limit = options.limit.unwrap_or(usize::MAX);

    let hits: Vec<SearchResult> = corpus
        .pages()
        .filter_map(|(section, page)| match_page(section, page, &needle, options))
        .take(limit)
        .collect();

    debug!(hits = hits.len(), "search complete");
    hits
}

/// The single result a page contributes for `needle` (already lowercased).
fn match_page(
    section: &Section,
    page: &Page,
    needle: &str,
    options: &SearchOptions,
) -> Option<SearchResult> {
    let snippet = if contains_folded(&page.title, needle) {
        TITLE_MATCH_SNIPPET.to_string()
    } else {
        let text = page
            .content
            .iter()
            .filter_map(ContentBlock::searchable_text)
            .find(|text| contains_folded(text, needle))?;
        truncate_snippet(text, options)
    };

    Some(SearchResult {
        section_id: section.id.clone(),
        page_id: page.id.clone(),
        title: format!("{} > {}", section.title, page.title),
        snippet,
    })
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// First `snippet_chars` characters of `text` plus the ellipsis.
///
/// The ellipsis is appended even when nothing was cut.
fn truncate_snippet(text: &str, options: &SearchOptions) -> String {
    let mut out: String = text.chars().take(options.snippet_chars).collect();
    out.push_str(&options.ellipsis);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
