//! Line-addressable text buffer
//!
//! The buffer mirrors the widget's document. Mutations are grouped into
//! operations: every replace and selection update made between
//! `begin_operation` and the matching `end_operation` reaches change
//! listeners as a single coalesced `BufferChange`.

use std::fmt;

use super::cursor::{Selection, TextPos, TextRange};
use serde::{Deserialize, Serialize};

/// One replaced span, recorded for change listeners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferEdit {
    pub range: TextRange,
    pub removed: String,
    pub inserted: String,
}

/// Coalesced notification delivered once per operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferChange {
    pub edits: Vec<BufferEdit>,
    pub selection: Selection,
    pub line_count: usize,
    pub revision: u64,
    pub text: String,
}

/// Handle returned by `LineBuffer::on_change`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// Core text buffer trait
///
/// Minimal surface the line transformations need. Implementations must
/// always hold at least one line.
pub trait TextBuffer {
    /// Get the text of a line
    fn get_line(&self, line: usize) -> Option<&str>;

    /// Get the number of lines
    fn line_count(&self) -> usize;

    /// All selections, primary first
    fn selections(&self) -> &[Selection];

    /// Replace a (possibly multi-line) range with new text
    fn replace_range(&mut self, range: TextRange, text: &str);

    /// Replace every selection with a single one
    fn set_selection(&mut self, selection: Selection);

    fn begin_operation(&mut self);

    fn end_operation(&mut self);

    /// First selection, or a caret at (0, 0) when there is none
    fn primary_selection(&self) -> Selection {
        self.selections().first().copied().unwrap_or_default()
    }

    /// Character length of a line (0 for lines past the end)
    fn line_len(&self, line: usize) -> usize {
        self.get_line(line).map(|l| l.chars().count()).unwrap_or(0)
    }

    /// Lines `[start, end]` joined with '\n'
    fn text_of_lines(&self, start: usize, end: usize) -> String {
        (start..=end)
            .filter_map(|i| self.get_line(i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Run `f` as one atomic operation
    fn operation<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        self.begin_operation();
        let result = f(self);
        self.end_operation();
        result
    }
}

type ChangeListener = Box<dyn FnMut(&BufferChange)>;

/// String-per-line buffer
pub struct LineBuffer {
    lines: Vec<String>,
    selections: Vec<Selection>,
    depth: usize,
    pending: Vec<BufferEdit>,
    revision: u64,
    listeners: Vec<(ListenerId, ChangeListener)>,
    next_listener: usize,
}

impl LineBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::from_lines(Vec::new())
    }

    /// Create a buffer from a string. A trailing newline yields a trailing empty line.
    pub fn from_str(s: &str) -> Self {
        Self::from_lines(s.split('\n').map(str::to_string).collect())
    }

    /// Create a buffer from lines
    pub fn from_lines(lines: Vec<String>) -> Self {
        let lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };

        Self {
            lines,
            selections: vec![Selection::default()],
            depth: 0,
            pending: Vec::new(),
            revision: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Convert buffer to string
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Get all lines as a slice
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Bumped once per operation that changed text
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Position just past the last character of the buffer
    pub fn end_pos(&self) -> TextPos {
        let last = self.lines.len() - 1;
        TextPos::new(last, self.line_len(last))
    }

    /// Clamp a position into the buffer
    pub fn clamp(&self, pos: TextPos) -> TextPos {
        let line = pos.line.min(self.lines.len() - 1);
        TextPos::new(line, pos.col.min(self.line_len(line)))
    }

    /// Replace the whole text. No-op (and no notification) when unchanged.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text() == text {
            return false;
        }
        let whole = TextRange::new(TextPos::zero(), self.end_pos());
        self.operation(|buf| {
            buf.replace_range(whole, text);
            let selections: Vec<Selection> = buf
                .selections
                .iter()
                .map(|s| Selection::new(buf.clamp(s.anchor), buf.clamp(s.head)))
                .collect();
            buf.selections = selections;
        });
        true
    }

    /// Replace the selection set; positions are clamped. An empty list leaves a caret at (0, 0).
    pub fn set_selections(&mut self, selections: Vec<Selection>) {
        let clamped: Vec<Selection> = selections
            .into_iter()
            .map(|s| Selection::new(self.clamp(s.anchor), self.clamp(s.head)))
            .collect();
        self.selections = if clamped.is_empty() {
            vec![Selection::default()]
        } else {
            clamped
        };
    }

    /// Register a change listener
    pub fn on_change(&mut self, listener: impl FnMut(&BufferChange) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        self.revision += 1;
        let change = BufferChange {
            edits: std::mem::take(&mut self.pending),
            selection: self.primary_selection(),
            line_count: self.lines.len(),
            revision: self.revision,
            text: self.text(),
        };
        log::debug!(
            "buffer change r{}: {} edit(s), {} lines",
            change.revision,
            change.edits.len(),
            change.line_count
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LineBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineBuffer")
            .field("lines", &self.lines)
            .field("selections", &self.selections)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

impl TextBuffer for LineBuffer {
    fn get_line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(|s| s.as_str())
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn selections(&self) -> &[Selection] {
        &self.selections
    }

    fn replace_range(&mut self, range: TextRange, text: &str) {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end);

        let start_byte = byte_index(&self.lines[start.line], start.col);
        let end_byte = byte_index(&self.lines[end.line], end.col);

        let removed = if start.line == end.line {
            self.lines[start.line][start_byte..end_byte].to_string()
        } else {
            let mut parts = vec![&self.lines[start.line][start_byte..]];
            parts.extend(self.lines[start.line + 1..end.line].iter().map(String::as_str));
            parts.push(&self.lines[end.line][..end_byte]);
            parts.join("\n")
        };

        let joined = format!(
            "{}{}{}",
            &self.lines[start.line][..start_byte],
            text,
            &self.lines[end.line][end_byte..]
        );
        let replacement: Vec<String> = joined.split('\n').map(str::to_string).collect();
        self.lines.splice(start.line..=end.line, replacement);

        self.begin_operation();
        self.pending.push(BufferEdit {
            range: TextRange::new(start, end),
            removed,
            inserted: text.to_string(),
        });
        self.end_operation();
    }

    fn set_selection(&mut self, selection: Selection) {
        self.set_selections(vec![selection]);
    }

    fn begin_operation(&mut self) {
        self.depth += 1;
    }

    fn end_operation(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.notify();
        }
    }
}
