//! # ahk-docs
//!
//! AutoHotkey documentation provider and literal offset utilities.
//!
//! This library is meant to be embedded by editor integrations (LSP servers,
//! IDE plugins, CLI tools). It covers two independent concerns:
//!
//! - Literal decomposition: split a quoted or delimited token into prefix,
//!   delimiters, value and suffix ranges for fine-grained highlighting.
//! - Documentation lookup: classify the symbol under the caret, build the
//!   documentation URL for it and extract a title/description fragment from
//!   the AutoHotkey reference pages, loaded from disk or over HTTP.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ahk_docs::{DocsConfig, DocumentationProvider};
//!
//! let config = DocsConfig::default().with_docs_root("C:/Program Files/AutoHotkey/docs");
//! let provider = DocumentationProvider::from_config(&config)?;
//!
//! assert_eq!(
//!     provider.url_for("WinSet"),
//!     vec!["C:/Program Files/AutoHotkey/docs/commands/WinSet.htm".to_string()]
//! );
//! if let Some(html) = provider.generate_doc("WinSet") {
//!     println!("{}", html);
//! }
//! ```

pub mod config;
mod extract;
mod links;
mod literal;
pub mod loader;
mod location;
mod offsets;
mod provider;
mod symbol;
mod types;

pub use config::{DocsConfig, FetchSettings};
pub use extract::{extract_fragment, DocFragment};
pub use links::{can_fetch, is_internal_link, ExternalLink};
pub use literal::literal_offsets;
pub use loader::{CachedLoader, DocumentLoader, FileLoader, HttpLoader, RootLoader};
pub use location::{DocLocation, DocPage, DocsRoot};
pub use offsets::{LiteralOffsets, OffsetsError, TextRange};
pub use provider::DocumentationProvider;
pub use symbol::{symbol_at, DocumentationTarget};
pub use types::{Range, SymbolAtCaret};

use thiserror::Error;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Public AutoHotkey documentation site.
pub const DEFAULT_DOCS_ROOT: &str = "https://www.autohotkey.com/docs";

/// Errors that can occur while resolving documentation.
#[derive(Error, Debug)]
pub enum DocError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("No documentation for symbol: {0}")]
    UnresolvedSymbol(String),

    #[error("No documentation could be extracted from {0}")]
    Extraction(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DocError>;
