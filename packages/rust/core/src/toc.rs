//! Navigation tree builder.
//!
//! Turns the corpus into a two-level `Toc` (sections, then pages) for
//! sidebar-style navigation. Declared order is kept as-is.

use tracing::{debug, instrument};

use docnav_shared::{Toc, TocEntry};

use crate::corpus::Corpus;
use crate::route::page_path;

/// Build the navigation tree for a corpus.
#[instrument(skip_all)]
pub fn build_toc(corpus: &Corpus) -> Toc {
    let sections: Vec<TocEntry> = corpus
        .sections()
        .iter()
        .map(|section| TocEntry {
            id: section.id.clone(),
            title: section.title.clone(),
            path: format!("/{}", section.id),
            children: section
                .pages
                .iter()
                .map(|page| TocEntry {
                    id: page.id.clone(),
                    title: page.title.clone(),
                    path: page_path(&section.id, &page.id),
                    children: vec![],
                })
                .collect(),
        })
        .collect();

    debug!(sections = sections.len(), "TOC built");

    Toc { sections }
}
