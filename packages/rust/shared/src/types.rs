//! Core domain types for docnav corpora.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Current schema version for the corpus manifest format.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Section / Page
// ---------------------------------------------------------------------------

/// A top-level grouping of pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Stable identifier, unique across the corpus.
    pub id: String,
    /// Display title (e.g., `1. Architecture Overview`).
    pub title: String,
    /// Pages in declared order.
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Section {
    /// Look up a page of this section by exact id.
    ///
    /// When ids repeat, the first declaration wins.
    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    /// The first page in declared order.
    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first()
    }
}

/// An addressable document within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Identifier, unique within the owning section.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Content blocks in declared order.
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

// ---------------------------------------------------------------------------
// ContentBlock
// ---------------------------------------------------------------------------

/// The kinds of content a page can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Header,
    Text,
    Code,
    Mermaid,
    List,
}

impl BlockKind {
    /// Wire name used in the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Text => "text",
            Self::Code => "code",
            Self::Mermaid => "mermaid",
            Self::List => "list",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "header" => Ok(Self::Header),
            "text" => Ok(Self::Text),
            "code" => Ok(Self::Code),
            "mermaid" => Ok(Self::Mermaid),
            "list" => Ok(Self::List),
            other => Err(format!("unknown block kind '{other}'")),
        }
    }
}

/// One typed unit of page content.
///
/// The payload shape is fixed by the kind. Blocks that arrive with an unknown
/// kind or a payload of the wrong shape are kept as [`ContentBlock::Malformed`]
/// with their raw data, so a renderer can skip or flag them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub enum ContentBlock {
    Header(String),
    Text(String),
    Code {
        language: Option<String>,
        source: String,
    },
    /// Diagram source. Opaque to the core.
    Mermaid(String),
    List(Vec<String>),
    Malformed {
        kind: String,
        value: serde_json::Value,
        language: Option<String>,
    },
}

impl ContentBlock {
    /// The block kind, or `None` for malformed blocks.
    pub fn kind(&self) -> Option<BlockKind> {
        match self {
            Self::Header(_) => Some(BlockKind::Header),
            Self::Text(_) => Some(BlockKind::Text),
            Self::Code { .. } => Some(BlockKind::Code),
            Self::Mermaid(_) => Some(BlockKind::Mermaid),
            Self::List(_) => Some(BlockKind::List),
            Self::Malformed { .. } => None,
        }
    }

    /// The single-string payload of header, text, code and mermaid blocks.
    pub fn text_payload(&self) -> Option<&str> {
        match self {
            Self::Header(s) | Self::Text(s) | Self::Mermaid(s) => Some(s),
            Self::Code { source, .. } => Some(source),
            Self::List(_) | Self::Malformed { .. } => None,
        }
    }

    /// Text that free-text search may match: the typed string payloads plus
    /// any malformed block whose raw value is a single string. Well-formed
    /// lists are never included.
    pub fn searchable_text(&self) -> Option<&str> {
        match self {
            Self::Malformed {
                value: serde_json::Value::String(s),
                ..
            } => Some(s),
            other => other.text_payload(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

/// Wire shape of a block: `{ "type": ..., "value": ..., "language"?: ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
}

impl From<RawBlock> for ContentBlock {
    fn from(raw: RawBlock) -> Self {
        use serde_json::Value;

        let kind = match raw.kind.parse::<BlockKind>() {
            Ok(kind) => kind,
            Err(_) => {
                return Self::Malformed {
                    kind: raw.kind,
                    value: raw.value,
                    language: raw.language,
                };
            }
        };

        match (kind, raw.value) {
            (BlockKind::Header, Value::String(s)) => Self::Header(s),
            (BlockKind::Text, Value::String(s)) => Self::Text(s),
            (BlockKind::Mermaid, Value::String(s)) => Self::Mermaid(s),
            (BlockKind::Code, Value::String(source)) => Self::Code {
                language: raw.language,
                source,
            },
            (BlockKind::List, Value::Array(items))
                if items.iter().all(|item| item.is_string()) =>
            {
                Self::List(
                    items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::String(s) => Some(s),
                            _ => None,
                        })
                        .collect(),
                )
            }
            (kind, value) => Self::Malformed {
                kind: kind.as_str().to_string(),
                value,
                language: raw.language,
            },
        }
    }
}

impl From<ContentBlock> for RawBlock {
    fn from(block: ContentBlock) -> Self {
        use serde_json::Value;

        let simple = |kind: BlockKind, s: String| RawBlock {
            kind: kind.as_str().to_string(),
            value: Value::String(s),
            language: None,
        };

        match block {
            ContentBlock::Header(s) => simple(BlockKind::Header, s),
            ContentBlock::Text(s) => simple(BlockKind::Text, s),
            ContentBlock::Mermaid(s) => simple(BlockKind::Mermaid, s),
            ContentBlock::Code { language, source } => RawBlock {
                kind: BlockKind::Code.as_str().to_string(),
                value: Value::String(source),
                language,
            },
            ContentBlock::List(items) => RawBlock {
                kind: BlockKind::List.as_str().to_string(),
                value: Value::Array(items.into_iter().map(Value::String).collect()),
                language: None,
            },
            ContentBlock::Malformed {
                kind,
                value,
                language,
            } => RawBlock {
                kind,
                value,
                language,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// CorpusManifest
// ---------------------------------------------------------------------------

/// The manifest form of a corpus file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusManifest {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    /// Human-readable corpus name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Sections in declared order.
    pub sections: Vec<Section>,
}

// ---------------------------------------------------------------------------
// SearchResult
// ---------------------------------------------------------------------------

/// One matching page for a query. Holds identifiers only, never references
/// into the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub section_id: String,
    pub page_id: String,
    /// `"<section title> > <page title>"`.
    pub title: String,
    pub snippet: String,
}

// ---------------------------------------------------------------------------
// TocEntry
// ---------------------------------------------------------------------------

/// A single entry in the navigation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Section or page id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Route path (`/{section}` or `/{section}/{page}`).
    pub path: String,
    /// Nested page entries (empty for pages).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocEntry>,
}

/// Root of the navigation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toc {
    /// Top-level sections.
    pub sections: Vec<TocEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(json: &str) -> ContentBlock {
        serde_json::from_str(json).expect("deserialize block")
    }

    #[test]
    fn blocks_decode_by_kind() {
        assert_eq!(
            block(r#"{"type":"header","value":"High-Level Overview"}"#),
            ContentBlock::Header("High-Level Overview".into())
        );
        assert_eq!(
            block(r#"{"type":"code","language":"bash","value":"pnpm dev"}"#),
            ContentBlock::Code {
                language: Some("bash".into()),
                source: "pnpm dev".into(),
            }
        );
        assert_eq!(
            block(r#"{"type":"list","value":["a","b"]}"#),
            ContentBlock::List(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn mismatched_payload_is_preserved() {
        let b = block(r#"{"type":"text","value":["not","a","string"]}"#);
        match &b {
            ContentBlock::Malformed { kind, value, .. } => {
                assert_eq!(kind, "text");
                assert!(value.is_array());
            }
            other => panic!("expected malformed block, got {other:?}"),
        }
        assert_eq!(b.kind(), None);
        assert_eq!(b.text_payload(), None);

        let b = block(r#"{"type":"list","value":"flat string"}"#);
        assert!(b.is_malformed());

        let b = block(r#"{"type":"list","value":["ok", 3]}"#);
        assert!(b.is_malformed());
    }

    #[test]
    fn unknown_kind_is_preserved() {
        let b = block(r#"{"type":"video","value":"intro.mp4"}"#);
        assert_eq!(
            b,
            ContentBlock::Malformed {
                kind: "video".into(),
                value: serde_json::Value::String("intro.mp4".into()),
                language: None,
            }
        );
    }

    #[test]
    fn malformed_block_keeps_language_on_the_wire() {
        let raw = serde_json::json!({ "type": "snippet", "language": "rust", "value": "fn main() {}" });
        let b: ContentBlock = serde_json::from_value(raw.clone()).expect("deserialize");
        assert_eq!(
            b,
            ContentBlock::Malformed {
                kind: "snippet".into(),
                value: serde_json::Value::String("fn main() {}".into()),
                language: Some("rust".into()),
            }
        );
        assert_eq!(serde_json::to_value(&b).expect("serialize"), raw);

        let raw = serde_json::json!({ "type": "code", "language": "ts", "value": ["a", "b"] });
        let b: ContentBlock = serde_json::from_value(raw.clone()).expect("deserialize");
        assert!(b.is_malformed());
        assert_eq!(serde_json::to_value(&b).expect("serialize"), raw);
    }

    #[test]
    fn blocks_serialize_to_wire_shape() {
        let json = serde_json::to_value(ContentBlock::Code {
            language: None,
            source: "x".into(),
        })
        .expect("serialize");
        assert_eq!(json, serde_json::json!({ "type": "code", "value": "x" }));

        let json = serde_json::to_value(ContentBlock::List(vec!["one".into()]))
            .expect("serialize");
        assert_eq!(json, serde_json::json!({ "type": "list", "value": ["one"] }));
    }

    #[test]
    fn text_payload_excludes_lists() {
        assert_eq!(ContentBlock::Mermaid("graph TD".into()).text_payload(), Some("graph TD"));
        assert_eq!(ContentBlock::List(vec!["item".into()]).text_payload(), None);
    }

    #[test]
    fn searchable_text_includes_string_valued_malformed_blocks() {
        assert_eq!(
            block(r#"{"type":"list","value":"flat string"}"#).searchable_text(),
            Some("flat string")
        );
        assert_eq!(
            block(r#"{"type":"note","value":"remember this"}"#).searchable_text(),
            Some("remember this")
        );
        assert_eq!(block(r#"{"type":"text","value":["a"]}"#).searchable_text(), None);
        assert_eq!(ContentBlock::List(vec!["item".into()]).searchable_text(), None);
        assert_eq!(ContentBlock::Text("body".into()).searchable_text(), Some("body"));
    }

    #[test]
    fn block_kind_parse() {
        assert_eq!("mermaid".parse::<BlockKind>(), Ok(BlockKind::Mermaid));
        assert!("Mermaid".parse::<BlockKind>().is_err());
        assert_eq!(BlockKind::List.to_string(), "list");
    }

    #[test]
    fn section_page_lookup() {
        let section: Section = serde_json::from_str(
            r#"{
                "id": "architecture",
                "title": "1. Architecture Overview",
                "pages": [
                    { "id": "system-architecture", "title": "1.1 System Architecture", "content": [] },
                    { "id": "core-patterns", "title": "1.2 Core Patterns", "content": [] }
                ]
            }"#,
        )
        .expect("deserialize section");

        assert_eq!(
            section.page("core-patterns").map(|p| p.title.as_str()),
            Some("1.2 Core Patterns")
        );
        assert!(section.page("missing").is_none());
        assert_eq!(
            section.first_page().map(|p| p.id.as_str()),
            Some("system-architecture")
        );
    }

    #[test]
    fn toc_entry_serialization() {
        let toc = Toc {
            sections: vec![TocEntry {
                id: "architecture".into(),
                title: "1. Architecture Overview".into(),
                path: "/architecture".into(),
                children: vec![TocEntry {
                    id: "system-architecture".into(),
                    title: "1.1 System Architecture".into(),
                    path: "/architecture/system-architecture".into(),
                    children: vec![],
                }],
            }],
        };

        let json = serde_json::to_string(&toc).expect("serialize");
        assert!(!json.contains("\"children\":[]"));
        let parsed: Toc = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, toc);
    }
}
