//! Builders for synthetic corpora in unit tests.

use docnav_shared::{ContentBlock, Page, Section};

pub(crate) fn section(id: &str, title: &str, pages: Vec<Page>) -> Section {
    Section {
        id: id.into(),
        title: title.into(),
        pages,
    }
}

pub(crate) fn page(id: &str, title: &str, content: Vec<ContentBlock>) -> Page {
    Page {
        id: id.into(),
        title: title.into(),
        content,
    }
}

pub(crate) fn header(s: &str) -> ContentBlock {
    ContentBlock::Header(s.into())
}

pub(crate) fn text(s: &str) -> ContentBlock {
    ContentBlock::Text(s.into())
}

pub(crate) fn code(language: Option<&str>, source: &str) -> ContentBlock {
    ContentBlock::Code {
        language: language.map(String::from),
        source: source.into(),
    }
}

pub(crate) fn mermaid(s: &str) -> ContentBlock {
    ContentBlock::Mermaid(s.into())
}

pub(crate) fn list(items: &[&str]) -> ContentBlock {
    ContentBlock::List(items.iter().map(|s| s.to_string()).collect())
}
