//! Block renderer contract.
//!
//! The presentation layer implements [`BlockRenderer`]; [`render_page`] does
//! the dispatch over block kinds in declared order. Diagram sources are handed
//! over verbatim. Malformed blocks are skipped unless the renderer opts in.

use std::sync::LazyLock;

use regex::Regex;

use docnav_shared::{ContentBlock, Page};

/// Output side of page rendering, one method per block kind.
pub trait BlockRenderer {
    /// Called once before the page's blocks.
    fn page_title(&mut self, _title: &str) {}

    fn header(&mut self, text: &str);

    fn text(&mut self, text: &str);

    fn code(&mut self, language: Option<&str>, source: &str);

    /// Diagram source, unparsed and unvalidated.
    fn mermaid(&mut self, source: &str);

    fn list(&mut self, items: &[String]);

    /// A block with an unknown kind or a payload of the wrong shape.
    fn malformed(&mut self, _kind: &str, _raw: &serde_json::Value) {}
}

/// Render a page through `renderer`.
pub fn render_page<R: BlockRenderer + ?Sized>(page: &Page, renderer: &mut R) {
    renderer.page_title(&page.title);
    for block in &page.content {
        render_block(block, renderer);
    }
}

/// Dispatch a single block.
pub fn render_block<R: BlockRenderer + ?Sized>(block: &ContentBlock, renderer: &mut R) {
    match block {
        ContentBlock::Header(text) => renderer.header(text),
        ContentBlock::Text(text) => renderer.text(text),
        ContentBlock::Code { language, source } => renderer.code(language.as_deref(), source),
        ContentBlock::Mermaid(source) => renderer.mermaid(source),
        ContentBlock::List(items) => renderer.list(items),
        ContentBlock::Malformed { kind, value, .. } => renderer.malformed(kind, value),
    }
}

/// Anchor fragment for a header: lowercased, whitespace runs become `-`.
pub fn anchor_slug(header: &str) -> String {
    static WS_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
    WS_RE.replace_all(&header.to_lowercase(), "-").into_owned()
}
