//! Symbol classification and caret lookup.

use crate::location::DocPage;
use crate::offsets::TextRange;
use crate::types::{Range, SymbolAtCaret};
use regex::Regex;
use std::sync::LazyLock;

/// Built-in variables: `A_` followed by a name (`A_LineNumber`, `a_index`)
static VARIABLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:A_)([A-Za-z0-9_]+)$").unwrap());

/// Commands, functions and `#` directives
static COMMAND_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Page holding every built-in variable, one anchor per variable.
const VARIABLES_PAGE: &str = "Variables.htm";

/// Directory holding one page per command.
const COMMANDS_DIR: &str = "commands";

/// What a symbol is documented as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentationTarget {
    /// Command, function or directive, documented on its own page
    Command(String),
    /// Built-in `A_` variable, documented under an anchor of the variables page
    Variable(String),
    /// Nothing to document
    Unknown,
}

impl DocumentationTarget {
    /// Classify a symbol by its naming convention.
    pub fn classify(text: &str) -> Self {
        let text = text.trim();

        if VARIABLE_PATTERN.is_match(text) {
            DocumentationTarget::Variable(text.to_string())
        } else if COMMAND_PATTERN.is_match(text) {
            DocumentationTarget::Command(text.to_string())
        } else {
            DocumentationTarget::Unknown
        }
    }

    /// Symbol name as written, if the symbol is documentable.
    pub fn name(&self) -> Option<&str> {
        match self {
            DocumentationTarget::Command(name) | DocumentationTarget::Variable(name) => Some(name),
            DocumentationTarget::Unknown => None,
        }
    }

    /// The documentation page (and anchor) describing this symbol.
    pub fn page(&self) -> Option<DocPage> {
        match self {
            DocumentationTarget::Command(name) => {
                // Directive pages drop the '#': #Include -> _Include.htm
                let file = match name.strip_prefix('#') {
                    Some(rest) => format!("_{}", rest),
                    None => name.clone(),
                };
                Some(DocPage::new(format!("{}/{}.htm", COMMANDS_DIR, file)))
            }
            DocumentationTarget::Variable(name) => {
                let anchor = VARIABLE_PATTERN
                    .captures(name)
                    .map(|caps| caps[1].to_string())?;
                Some(DocPage::new(VARIABLES_PAGE).with_anchor(anchor))
            }
            DocumentationTarget::Unknown => None,
        }
    }
}

/// Find the identifier under a 1-based line/column caret.
///
/// A caret right after the last character of an identifier still selects it.
pub fn symbol_at(source: &str, line: u32, column: u32) -> Option<SymbolAtCaret> {
    let offset = line_col_to_offset(source, line, column)?;

    let mut start = offset;
    for (i, ch) in source[..offset].char_indices().rev() {
        if !is_ident_char(ch) {
            break;
        }
        start = i;
    }
    if source[..start].ends_with('#') {
        start -= 1;
    }

    let end = source[offset..]
        .char_indices()
        .find(|&(_, ch)| !is_ident_char(ch))
        .map_or(source.len(), |(i, _)| offset + i);

    if start == end {
        return None;
    }

    let (start_line, start_col) = offset_to_line_col(source, start);
    let (end_line, end_col) = offset_to_line_col(source, end);

    Some(SymbolAtCaret {
        name: source[start..end].to_string(),
        span: TextRange::new(start, end),
        range: Range {
            start_line,
            start_col,
            end_line,
            end_col,
        },
    })
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '@' | '$')
}

/// Convert line/column (1-based) to byte offset
fn line_col_to_offset(source: &str, line: u32, column: u32) -> Option<usize> {
    let mut current_line = 1u32;
    let mut current_col = 1u32;

    for (i, ch) in source.char_indices() {
        if current_line == line && current_col == column {
            return Some(i);
        }
        if current_line == line && ch == '\n' {
            return None;
        }

        if ch == '\n' {
            current_line += 1;
            current_col = 1;
        } else {
            current_col += 1;
        }
    }

    // Caret at the very end of the text
    (current_line == line && current_col == column).then_some(source.len())
}

/// Convert byte offset to line/column (1-based)
fn offset_to_line_col(source: &str, target_offset: usize) -> (u32, u32) {
    let mut line = 1u32;
    let mut col = 1u32;

    for (i, ch) in source.char_indices() {
        if i == target_offset {
            return (line, col);
        }

        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}
