//! Shared types for caret lookups.

use crate::offsets::TextRange;
use crate::symbol::DocumentationTarget;
use serde::Serialize;

/// Source range for highlighting.
///
/// All positions are 1-based (line 1, column 1 is the start).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

/// The identifier found under the caret.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolAtCaret {
    /// Identifier text (e.g., "WinSet", "A_LineNumber")
    pub name: String,
    /// Byte range of the identifier in the source
    pub span: TextRange,
    /// Line/column range of the identifier
    pub range: Range,
}

impl SymbolAtCaret {
    /// Classify the identifier for documentation lookup.
    pub fn target(&self) -> DocumentationTarget {
        DocumentationTarget::classify(&self.name)
    }
}
