//! Configuration loading
//!
//! Settings are read from YAML files. The workspace is searched first, then
//! the user configuration directory.

use crate::location::DocsRoot;
use crate::{DocError, Result, DEFAULT_DOCS_ROOT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names searched in a workspace, in order
const CONFIG_FILE_NAMES: [&str; 4] = [
    ".ahk-docs.yaml",
    ".ahk-docs.yml",
    "ahk-docs.yaml",
    "ahk-docs.yml",
];

/// Documentation lookup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Where pages are loaded from: local directory or base URL
    pub docs_root: String,
    /// Base for user-facing URLs, when different from `docs_root`
    pub browse_root: Option<String>,
    /// Network and caching settings
    pub fetch: FetchSettings,
}

/// Settings for loading pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// HTTP timeout
    pub timeout_seconds: u64,
    /// User-Agent header sent with HTTP requests
    pub user_agent: String,
    /// Pages kept in the in-memory cache
    pub cache_capacity: usize,
    /// Directory for cached remote pages (disabled when unset)
    pub cache_dir: Option<PathBuf>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            docs_root: DEFAULT_DOCS_ROOT.to_string(),
            browse_root: None,
            fetch: FetchSettings::default(),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            user_agent: format!("ahk-docs/{}", crate::VERSION),
            cache_capacity: 64,
            cache_dir: None,
        }
    }
}

impl DocsConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DocError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_yaml::from_str(&content)
            .map_err(|e| DocError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load configuration from default locations, falling back to defaults
    pub fn load_default(workspace_root: &Path) -> Self {
        let candidates = CONFIG_FILE_NAMES
            .iter()
            .map(|name| workspace_root.join(name))
            .chain(Self::user_config_path());

        for candidate in candidates {
            if candidate.exists() {
                match Self::load(&candidate) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {}", candidate.display());
                        return config;
                    }
                    Err(e) => tracing::warn!("{}", e),
                }
            }
        }

        Self::default()
    }

    /// Per-user config file (e.g., `~/.config/ahk-docs/config.yaml`)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ahk-docs").join("config.yaml"))
    }

    /// Replace the root pages are loaded from
    pub fn with_docs_root(mut self, root: impl Into<String>) -> Self {
        self.docs_root = root.into();
        self
    }

    /// Replace the root used for user-facing URLs
    pub fn with_browse_root(mut self, root: impl Into<String>) -> Self {
        self.browse_root = Some(root.into());
        self
    }

    /// Parsed root pages are loaded from
    pub fn docs_root(&self) -> Result<DocsRoot> {
        parse_root("docs_root", &self.docs_root)
    }

    /// Parsed root for user-facing URLs
    pub fn browse_root(&self) -> Result<DocsRoot> {
        match &self.browse_root {
            Some(root) => parse_root("browse_root", root),
            None => self.docs_root(),
        }
    }
}

fn parse_root(key: &str, value: &str) -> Result<DocsRoot> {
    if value.trim().is_empty() {
        return Err(DocError::Config(format!("{} must not be empty", key)));
    }
    Ok(DocsRoot::parse(value))
}
