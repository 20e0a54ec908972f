//! Corpus store.
//!
//! An immutable, ordered collection of sections with a prebuilt id index.
//! Structural preconditions are checked once at construction so that route
//! resolution and search never see an empty corpus or an empty section.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use docnav_shared::{
    CURRENT_SCHEMA_VERSION, ContentBlock, CorpusManifest, DocNavError, Page, Result, Section,
};

/// The sample corpus compiled into the binary.
const BUNDLED_CORPUS: &str = include_str!("../data/webstudio-docs.json");

/// A validated, read-only documentation corpus.
#[derive(Debug, Clone)]
pub struct Corpus {
    name: Option<String>,
    sections: Vec<Section>,
    /// Section id -> position in `sections` (first declaration wins).
    section_index: HashMap<String, usize>,
    /// Per section: page id -> position in `pages` (first declaration wins).
    page_index: Vec<HashMap<String, usize>>,
}

/// Size summary of a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub sections: usize,
    pub pages: usize,
    pub blocks: usize,
    pub malformed_blocks: usize,
}

impl Corpus {
    /// Build a corpus from sections in declared order.
    ///
    /// Fails when there are no sections or a section has no pages. Blank ids
    /// are kept with a warning; such entries stay searchable and reachable
    /// through fallback, but no route names them.
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        Self::build(None, sections)
    }

    /// Build a named corpus.
    pub fn with_name(name: impl Into<String>, sections: Vec<Section>) -> Result<Self> {
        Self::build(Some(name.into()), sections)
    }

    #[instrument(skip_all, fields(sections = sections.len()))]
    fn build(name: Option<String>, sections: Vec<Section>) -> Result<Self> {
        if sections.is_empty() {
            return Err(DocNavError::corpus("corpus has no sections"));
        }

        let mut section_index = HashMap::with_capacity(sections.len());
        let mut page_index = Vec::with_capacity(sections.len());

        for (pos, section) in sections.iter().enumerate() {
            if section.id.trim().is_empty() {
                warn!(position = pos + 1, title = %section.title, "section has a blank id");
            }
            if section.pages.is_empty() {
                return Err(DocNavError::corpus(format!(
                    "section '{}' has no pages",
                    section.id
                )));
            }

            if section_index.contains_key(&section.id) {
                warn!(section = %section.id, "duplicate section id, first declaration wins");
            } else {
                section_index.insert(section.id.clone(), pos);
            }

            let mut pages = HashMap::with_capacity(section.pages.len());
            for (page_pos, page) in section.pages.iter().enumerate() {
                if page.id.trim().is_empty() {
                    warn!(
                        section = %section.id,
                        position = page_pos + 1,
                        title = %page.title,
                        "page has a blank id"
                    );
                }
                if pages.contains_key(&page.id) {
                    warn!(
                        section = %section.id,
                        page = %page.id,
                        "duplicate page id, first declaration wins"
                    );
                } else {
                    pages.insert(page.id.clone(), page_pos);
                }
            }
            page_index.push(pages);
        }

        let corpus = Self {
            name,
            sections,
            section_index,
            page_index,
        };
        debug!(stats = ?corpus.stats(), "corpus built");
        Ok(corpus)
    }

    /// Parse a corpus from JSON: either a manifest object or a bare section array.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| DocNavError::parse(format!("invalid corpus JSON: {e}")))?;

        match value {
            serde_json::Value::Array(_) => {
                let sections: Vec<Section> = serde_json::from_value(value)
                    .map_err(|e| DocNavError::parse(format!("invalid section list: {e}")))?;
                Self::new(sections)
            }
            serde_json::Value::Object(_) => {
                let manifest: CorpusManifest = serde_json::from_value(value)
                    .map_err(|e| DocNavError::parse(format!("invalid corpus manifest: {e}")))?;
                if manifest.schema_version != CURRENT_SCHEMA_VERSION {
                    return Err(DocNavError::validation(format!(
                        "schema_version {} not supported (expected {CURRENT_SCHEMA_VERSION})",
                        manifest.schema_version
                    )));
                }
                Self::build(manifest.name, manifest.sections)
            }
            _ => Err(DocNavError::parse(
                "expected a section array or a corpus manifest object",
            )),
        }
    }

    /// The corpus name, if the source declared one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// All sections in declared order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The first section in declared order.
    pub fn first_section(&self) -> &Section {
        // Non-empty by construction.
        &self.sections[0]
    }

    /// Exact-key section lookup.
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.section_position(section_id)
            .map(|pos| &self.sections[pos])
    }

    /// Exact-key page lookup within a section.
    pub fn page(&self, section_id: &str, page_id: &str) -> Option<&Page> {
        let section_pos = self.section_position(section_id)?;
        let page_pos = self.page_position(section_pos, page_id)?;
        Some(&self.sections[section_pos].pages[page_pos])
    }

    /// Every (section, page) pair in traversal order.
    pub fn pages(&self) -> impl Iterator<Item = (&Section, &Page)> {
        self.sections
            .iter()
            .flat_map(|section| section.pages.iter().map(move |page| (section, page)))
    }

    pub fn stats(&self) -> CorpusStats {
        let mut stats = CorpusStats {
            sections: self.sections.len(),
            ..CorpusStats::default()
        };
        for (_, page) in self.pages() {
            stats.pages += 1;
            stats.blocks += page.content.len();
            stats.malformed_blocks += page
                .content
                .iter()
                .filter(|b| b.is_malformed())
                .count();
        }
        stats
    }

    /// Malformed blocks as `(section id, page id, block)` triples.
    pub fn malformed_blocks(&self) -> impl Iterator<Item = (&str, &str, &ContentBlock)> {
        self.pages().flat_map(|(section, page)| {
            page.content
                .iter()
                .filter(|b| b.is_malformed())
                .map(move |b| (section.id.as_str(), page.id.as_str(), b))
        })
    }

    pub(crate) fn section_position(&self, section_id: &str) -> Option<usize> {
        self.section_index.get(section_id).copied()
    }

    pub(crate) fn page_position(&self, section_pos: usize, page_id: &str) -> Option<usize> {
        self.page_index.get(section_pos)?.get(page_id).copied()
    }
}

/// Load a corpus from a JSON file on disk.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let content = std::fs::read_to_string(path).map_err(|e| DocNavError::io(path, e))?;
    let corpus = Corpus::from_json_str(&content)?;

    let stats = corpus.stats();
    info!(
        sections = stats.sections,
        pages = stats.pages,
        "corpus loaded"
    );
    if stats.malformed_blocks > 0 {
        warn!(
            count = stats.malformed_blocks,
            "corpus contains blocks with unknown kinds or mismatched payloads"
        );
    }

    Ok(corpus)
}

/// The sample corpus shipped with docnav.
pub fn bundled() -> Result<Corpus> {
    Corpus::from_json_str(BUNDLED_CORPUS)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
