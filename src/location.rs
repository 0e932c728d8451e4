//! Source location tracking
//!
//! A location is a byte offset paired with a 1-based line/column pair.
//! Columns are shifted by raw byte offset, not by Unicode scalar count —
//! this is incorrect across multi-byte characters but matches the
//! behavior we need to stay compatible with (spec Open Questions).

use serde::{Deserialize, Serialize};

/// A single point in the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the original input (0-based).
    pub offset: usize,
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based).
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

/// A half-open range `[start, end)` over the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: Position,
    pub end: Position,
}

impl SourceRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Shift a position forward by `k` bytes.
///
/// Only valid within a single line: every rule we parse is exactly one
/// line, so a shift never needs to cross a newline.
pub fn shift_loc(loc: Position, k: usize) -> Position {
    Position {
        offset: loc.offset + k,
        line: loc.line,
        column: loc.column + k,
    }
}

/// Build a range relative to `base`, where `start`/`end` are byte offsets
/// relative to the start of the slice `base` anchors.
pub fn loc_range(base: Position, start: usize, end: usize) -> SourceRange {
    SourceRange {
        start: shift_loc(base, start),
        end: shift_loc(base, end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_loc_advances_offset_and_column_together() {
        let base = Position::new(10, 3, 5);
        let shifted = shift_loc(base, 4);
        assert_eq!(shifted.offset, 14);
        assert_eq!(shifted.line, 3);
        assert_eq!(shifted.column, 9);
    }

    #[test]
    fn loc_range_shifts_both_endpoints() {
        let base = Position::new(100, 1, 1);
        let range = loc_range(base, 2, 7);
        assert_eq!(range.start.offset, 102);
        assert_eq!(range.end.offset, 107);
    }
}
