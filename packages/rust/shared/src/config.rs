//! Application configuration for docnav.
//!
//! User config lives at `~/.docnav/docnav.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocNavError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docnav.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docnav";

/// Characters of block text kept in a content-match snippet.
pub const DEFAULT_SNIPPET_CHARS: usize = 80;

/// Marker appended to every content-match snippet.
pub const DEFAULT_ELLIPSIS: &str = "...";

// ---------------------------------------------------------------------------
// Config structs (matching docnav.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the corpus comes from.
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Search presentation settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// `[corpus]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Corpus JSON file. The bundled corpus is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// `[search]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Characters of matching block text shown in a snippet.
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,

    /// Marker appended to content snippets.
    #[serde(default = "default_ellipsis")]
    pub ellipsis: String,

    /// Maximum number of results to show (unlimited when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            snippet_chars: default_snippet_chars(),
            ellipsis: default_ellipsis(),
            limit: None,
        }
    }
}

fn default_snippet_chars() -> usize {
    DEFAULT_SNIPPET_CHARS
}
fn default_ellipsis() -> String {
    DEFAULT_ELLIPSIS.into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docnav/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocNavError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docnav/docnav.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocNavError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        DocNavError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_config(&config)?;
    Ok(config)
}

/// Write a default config file into `dir`, creating it if needed.
/// Returns the path to the created file.
pub fn init_config_in(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| DocNavError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocNavError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocNavError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Create the config directory and write a default config file.
pub fn init_config() -> Result<PathBuf> {
    init_config_in(&config_dir()?)
}

/// Reject settings that would make search output meaningless.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.search.snippet_chars == 0 {
        return Err(DocNavError::config(
            "search.snippet_chars must be greater than zero",
        ));
    }
    if config.search.limit == Some(0) {
        return Err(DocNavError::config("search.limit must be greater than zero"));
    }
    Ok(())
}
