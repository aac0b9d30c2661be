//! Positions and selections in a line-addressable buffer
//!
//! Columns count characters, not bytes.

use serde::{Deserialize, Serialize};

/// A position in text (line, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TextPos {
    pub line: usize,
    #[serde(rename = "ch")]
    pub col: usize,
}

impl TextPos {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Create a position at the start of a line
    pub fn line_start(line: usize) -> Self {
        Self { line, col: 0 }
    }

    /// Create a position at (0, 0)
    pub fn zero() -> Self {
        Self { line: 0, col: 0 }
    }

    /// Same column, `delta` lines away. Moving above line 0 saturates.
    pub fn offset_lines(self, delta: isize) -> Self {
        let line = if delta < 0 {
            self.line.saturating_sub(delta.unsigned_abs())
        } else {
            self.line + delta as usize
        };
        Self { line, col: self.col }
    }
}

/// A range of text from start (inclusive) to end (exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: TextPos,
    pub end: TextPos,
}

impl TextRange {
    pub fn new(start: TextPos, end: TextPos) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// An empty range at `pos` (an insertion point)
    pub fn point(pos: TextPos) -> Self {
        Self { start: pos, end: pos }
    }

    /// Check if this range is empty (start == end)
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this range is on a single line
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Check if a position is contained within this range
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.start && pos < self.end
    }
}

/// Selection state (anchor + head)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Where the selection started
    pub anchor: TextPos,
    /// The active caret end
    pub head: TextPos,
}

impl Selection {
    pub fn new(anchor: TextPos, head: TextPos) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (cursor only, no selection)
    pub fn collapsed(pos: TextPos) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Check if selection is collapsed (anchor == head)
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Get the range covered by this selection (ordered start to end)
    pub fn range(&self) -> TextRange {
        TextRange::new(self.anchor, self.head)
    }

    /// First line touched by the selection
    pub fn start_line(&self) -> usize {
        self.anchor.line.min(self.head.line)
    }

    /// Last line touched by the selection
    pub fn end_line(&self) -> usize {
        self.anchor.line.max(self.head.line)
    }

    /// Number of whole lines the selection touches
    pub fn line_span(&self) -> usize {
        self.end_line() - self.start_line() + 1
    }

    /// Both ends moved by `delta` lines, columns untouched
    pub fn shifted(&self, delta: isize) -> Self {
        Self {
            anchor: self.anchor.offset_lines(delta),
            head: self.head.offset_lines(delta),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::collapsed(TextPos::zero())
    }
}
