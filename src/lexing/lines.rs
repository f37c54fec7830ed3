//! Line table and line/column positions
//!
//! The scanner discovers line breaks while it moves forward through the input and appends the
//! offset where each new line starts. Offsets arrive in increasing order, so the table is sorted
//! by construction and a binary search over it is valid at any time.
//!
//! The table only knows about lines the scanner has already passed. Resolving an offset beyond
//! the furthest scanned position reports it on the last discovered line; callers must scan at
//! least up to an offset before asking for its position.

use serde::Serialize;
use std::fmt;

/// A resolved source position.
///
/// `line` and `column` are 1-based; the column counts characters, not bytes. `line_offset` is
/// the byte offset where the line starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub line_offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, line_offset: usize) -> Self {
        Self {
            line,
            column,
            line_offset,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Append-only table of line start offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offsets where each line starts. The first entry is always 0.
    starts: Vec<usize>,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl LineIndex {
    pub fn new() -> Self {
        Self { starts: vec![0] }
    }

    /// Build a complete table for `source` in one pass.
    pub fn from_source(source: &str) -> Self {
        let mut index = Self::new();
        let mut chars = source.char_indices().peekable();
        while let Some((offset, ch)) = chars.next() {
            if ch == '\r' {
                if let Some((_, '\n')) = chars.peek() {
                    chars.next();
                    index.record(offset + 2);
                    continue;
                }
            }
            if super::chars::is_line_break(ch) {
                index.record(offset + ch.len_utf8());
            }
        }
        index
    }

    /// Record the start of a new line.
    ///
    /// Offsets at or before the last recorded start are ignored, which makes re-scanning after a
    /// rewind harmless.
    pub fn record(&mut self, line_start: usize) {
        if line_start > self.last_start() {
            self.starts.push(line_start);
        }
    }

    fn last_start(&self) -> usize {
        *self.starts.last().unwrap_or(&0)
    }

    /// Number of lines discovered so far.
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Byte offset where a 1-based line starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1).and_then(|i| self.starts.get(i)).copied()
    }

    /// 1-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }

    /// Resolve `offset` within `source` to a position.
    pub fn position(&self, source: &str, offset: usize) -> Position {
        let offset = offset.min(source.len());
        let line = self.line_of(offset);
        let line_offset = self.starts[line - 1];
        let column = source
            .get(line_offset..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - line_offset)
            + 1;

        Position::new(line, column, line_offset)
    }
}
