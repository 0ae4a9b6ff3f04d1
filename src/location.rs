//! Documentation roots and page locations.
//!
//! The AutoHotkey reference is laid out as one page per command under
//! `commands/`, one shared `Variables.htm` with an anchor per built-in
//! variable, and miscellaneous topics under `misc/`. A [`DocsRoot`] is either
//! a local copy of that tree or the base URL of a hosted one.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A page relative to the documentation root, with an optional anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPage {
    /// Root-relative path using `/` separators (e.g., "commands/WinSet.htm")
    pub path: String,
    /// Fragment identifier without the leading `#`
    pub anchor: Option<String>,
}

impl DocPage {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            anchor: None,
        }
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    /// Directory part of the page path ("commands" for "commands/WinSet.htm").
    pub fn dir(&self) -> &str {
        self.path.rsplit_once('/').map_or("", |(dir, _)| dir)
    }

    /// Resolve a relative reference (`../misc/WinTitle.htm`) against this
    /// page's directory. Returns `None` if the result would leave the root.
    pub fn join(&self, reference: &str) -> Option<DocPage> {
        let mut segments: Vec<&str> = self.dir().split('/').filter(|s| !s.is_empty()).collect();

        for segment in reference.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop()?;
                }
                other => segments.push(other),
            }
        }

        if segments.is_empty() {
            return None;
        }
        Some(DocPage::new(segments.join("/")))
    }
}

impl fmt::Display for DocPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.anchor {
            Some(anchor) => write!(f, "{}#{}", self.path, anchor),
            None => write!(f, "{}", self.path),
        }
    }
}

/// Where the documentation tree lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocsRoot {
    /// Local directory (e.g., an unpacked help file next to AutoHotkey.exe)
    Local(PathBuf),
    /// Base URL of a hosted copy, without trailing slash
    Remote(String),
}

impl DocsRoot {
    /// Parse a root from configuration: `http(s)://` is remote, anything
    /// else (optionally `file://`-prefixed) is a local path.
    pub fn parse(root: &str) -> Self {
        let root = root.trim();
        let lower = root.to_ascii_lowercase();

        if lower.starts_with("http://") || lower.starts_with("https://") {
            DocsRoot::Remote(root.trim_end_matches('/').to_string())
        } else {
            let path = root.strip_prefix("file://").unwrap_or(root);
            let trimmed = path.trim_end_matches(['/', '\\']);
            // Keep a bare "/" instead of trimming it to nothing
            let path = if trimmed.is_empty() { path } else { trimmed };
            DocsRoot::Local(PathBuf::from(path))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DocsRoot::Remote(_))
    }

    /// User-facing URL of a page, including its anchor.
    pub fn url(&self, page: &DocPage) -> String {
        let base = match self {
            DocsRoot::Local(path) => path.display().to_string(),
            DocsRoot::Remote(url) => url.clone(),
        };
        format!("{}/{}", base, page)
    }

    /// The resource to load for a page. Anchors are not part of the resource.
    pub fn locate(&self, page: &DocPage) -> DocLocation {
        match self {
            DocsRoot::Local(path) => DocLocation::File(join_relative(path, &page.path)),
            DocsRoot::Remote(url) => DocLocation::Url(format!("{}/{}", url, page.path)),
        }
    }
}

impl fmt::Display for DocsRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocsRoot::Local(path) => write!(f, "{}", path.display()),
            DocsRoot::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// A concrete document to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocLocation {
    File(PathBuf),
    Url(String),
}

impl fmt::Display for DocLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocLocation::File(path) => write!(f, "{}", path.display()),
            DocLocation::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Join a `/`-separated relative path onto a directory, ignoring anything
/// that would escape it.
fn join_relative(base: &Path, relative: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for component in Path::new(relative).components() {
        if let Component::Normal(segment) = component {
            path.push(segment);
        }
    }
    path
}
