//! Shared types, error model, and configuration for docnav.
//!
//! This crate is the foundation depended on by all other docnav crates.
//! It provides:
//! - [`DocNavError`]: the unified error type
//! - Content model ([`Section`], [`Page`], [`ContentBlock`], [`SearchResult`], [`Toc`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CorpusConfig, DEFAULT_ELLIPSIS, DEFAULT_SNIPPET_CHARS, SearchConfig, config_dir,
    config_file_path, init_config, init_config_in, load_config, load_config_from,
    validate_config,
};
pub use error::{DocNavError, Result};
pub use types::{
    BlockKind, CURRENT_SCHEMA_VERSION, ContentBlock, CorpusManifest, Page, SearchResult, Section,
    Toc, TocEntry,
};
