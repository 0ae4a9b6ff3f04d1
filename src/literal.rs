//! Literal token scanning for AutoHotkey.
//!
//! Computes the end offsets of the parts of a string literal or a `%Var%`
//! deref and hands them to [`LiteralOffsets`].

use crate::offsets::LiteralOffsets;

/// AutoHotkey escape character.
const ESCAPE: char = '`';

/// Decompose a literal token into its parts.
///
/// Supported tokens:
/// - `"..."` and `'...'` strings, where a backtick escapes the next character
///   and a doubled quote stands for a literal quote;
/// - `%Name%` derefs.
///
/// Returns `None` when the token does not start with a literal delimiter.
/// Unterminated literals have no close delimiter.
pub fn literal_offsets(token: &str) -> Option<LiteralOffsets> {
    let delim = token.chars().next()?;
    let open_delim_end = delim.len_utf8();

    let value_end = match delim {
        '"' | '\'' => scan_quoted(token, open_delim_end, delim),
        '%' => token[open_delim_end..]
            .find('%')
            .map_or(token.len(), |i| open_delim_end + i),
        _ => return None,
    };

    let close_delim_end = if token[value_end..].starts_with(delim) {
        value_end + delim.len_utf8()
    } else {
        value_end
    };

    Some(LiteralOffsets::from_end_offsets(
        0,
        open_delim_end,
        value_end,
        close_delim_end,
        token.len(),
    ))
}

/// Find the offset of the closing quote, or the token end if there is none.
fn scan_quoted(token: &str, start: usize, quote: char) -> usize {
    let mut chars = token[start..].char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if ch == ESCAPE {
            chars.next();
        } else if ch == quote {
            if chars.peek().is_some_and(|&(_, next)| next == quote) {
                chars.next();
            } else {
                return start + i;
            }
        }
    }

    token.len()
}
