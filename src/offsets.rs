//! Offsets of the distinguishable parts of a literal token.
//!
//! A literal such as `"abc"` is split into up to five consecutive slots:
//!
//! ```text
//! prefix | open delimiter | value | close delimiter | suffix
//! ```
//!
//! Absent slots are `None`. The one exception to "present means non-empty"
//! is the value: once an open delimiter exists, an empty value is still a
//! value and is kept as a zero-length range.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Half-open byte range `[start, end)` within a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    /// Create a range. `start` must not exceed `end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start {} after end {}", start, end);
        Self { start, end }
    }

    /// Zero-length range anchored at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The part of `text` covered by this range, if it lies on char boundaries.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// End offsets passed out of order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OffsetsError {
    #[error("{later} end offset {later_end} is before {earlier} end offset {earlier_end}")]
    NonMonotonic {
        earlier: &'static str,
        earlier_end: usize,
        later: &'static str,
        later_end: usize,
    },
}

/// Stores offsets of distinguishable parts of a literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LiteralOffsets {
    pub prefix: Option<TextRange>,
    pub open_delim: Option<TextRange>,
    pub value: Option<TextRange>,
    pub close_delim: Option<TextRange>,
    pub suffix: Option<TextRange>,
}

impl LiteralOffsets {
    /// Build the slots from cumulative end offsets.
    ///
    /// # Panics
    ///
    /// Panics if the offsets are not non-decreasing. Use
    /// [`try_from_end_offsets`](Self::try_from_end_offsets) to handle that case.
    pub fn from_end_offsets(
        prefix_end: usize,
        open_delim_end: usize,
        value_end: usize,
        close_delim_end: usize,
        suffix_end: usize,
    ) -> Self {
        match Self::try_from_end_offsets(
            prefix_end,
            open_delim_end,
            value_end,
            close_delim_end,
            suffix_end,
        ) {
            Ok(offsets) => offsets,
            Err(e) => panic!("invalid literal offsets: {}", e),
        }
    }

    /// Build the slots from cumulative end offsets, rejecting offsets that
    /// go backwards.
    pub fn try_from_end_offsets(
        prefix_end: usize,
        open_delim_end: usize,
        value_end: usize,
        close_delim_end: usize,
        suffix_end: usize,
    ) -> Result<Self, OffsetsError> {
        let ends = [
            ("prefix", prefix_end),
            ("open delimiter", open_delim_end),
            ("value", value_end),
            ("close delimiter", close_delim_end),
            ("suffix", suffix_end),
        ];
        for pair in ends.windows(2) {
            let (earlier, earlier_end) = pair[0];
            let (later, later_end) = pair[1];
            if later_end < earlier_end {
                return Err(OffsetsError::NonMonotonic {
                    earlier,
                    earlier_end,
                    later,
                    later_end,
                });
            }
        }

        let prefix = make_range(0, prefix_end);
        let open_delim = make_range(prefix_end, open_delim_end);

        // empty value is still a value provided we have open delimiter
        let value = make_range(open_delim_end, value_end)
            .or_else(|| open_delim.map(|_| TextRange::empty(open_delim_end)));

        let close_delim = make_range(value_end, close_delim_end);
        let suffix = make_range(close_delim_end, suffix_end);

        Ok(Self {
            prefix,
            open_delim,
            value,
            close_delim,
            suffix,
        })
    }

    /// End of the last present slot, or 0 when every slot is absent.
    pub fn end(&self) -> usize {
        self.slots()
            .iter()
            .rev()
            .find_map(|slot| slot.map(|r| r.end))
            .unwrap_or(0)
    }

    /// The value text of `token`, if the value slot exists.
    pub fn slice_value<'a>(&self, token: &'a str) -> Option<&'a str> {
        self.value.and_then(|r| r.slice(token))
    }

    /// Slots in source order.
    pub fn slots(&self) -> [Option<TextRange>; 5] {
        [
            self.prefix,
            self.open_delim,
            self.value,
            self.close_delim,
            self.suffix,
        ]
    }
}

fn make_range(start: usize, end: usize) -> Option<TextRange> {
    if end > start {
        Some(TextRange::new(start, end))
    } else {
        None
    }
}
