//! Line move / duplicate
//!
//! Each command is planned as a single `LineEdit` (one replaced range plus
//! the selection to restore) and then applied inside one buffer operation.
//! The same plan is handed to the widget so both sides see one change.

use super::buffer::TextBuffer;
use super::cursor::{Selection, TextPos, TextRange};
use crate::keys::Direction;
use serde::{Deserialize, Serialize};

/// A planned line edit: replace `from..to` with `text`, then select `selection`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineEdit {
    pub from: TextPos,
    pub to: TextPos,
    pub text: String,
    pub anchor: TextPos,
    pub head: TextPos,
}

impl LineEdit {
    pub fn range(&self) -> TextRange {
        TextRange::new(self.from, self.to)
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.anchor, self.head)
    }

    /// Apply to a buffer as one atomic operation
    pub fn apply<B: TextBuffer>(&self, buffer: &mut B) {
        buffer.operation(|buf| {
            buf.replace_range(self.range(), &self.text);
            buf.set_selection(self.selection());
        });
    }
}

/// Plan swapping the primary selection's lines with the neighbouring line.
///
/// Returns `None` at the buffer edges.
pub fn plan_move<B: TextBuffer>(buffer: &B, direction: Direction) -> Option<LineEdit> {
    let sel = buffer.primary_selection();
    let start = sel.start_line();
    let end = sel.end_line();
    let last = buffer.line_count().saturating_sub(1);
    let block = buffer.text_of_lines(start, end);

    match direction {
        Direction::Up => {
            if start == 0 {
                return None;
            }
            let above = buffer.get_line(start - 1)?;
            let moved = sel.shifted(-1);
            Some(LineEdit {
                from: TextPos::line_start(start - 1),
                to: TextPos::new(end, buffer.line_len(end)),
                text: format!("{}\n{}", block, above),
                anchor: moved.anchor,
                head: moved.head,
            })
        }
        Direction::Down => {
            if end >= last {
                return None;
            }
            let below = buffer.get_line(end + 1)?;
            let moved = sel.shifted(1);
            Some(LineEdit {
                from: TextPos::line_start(start),
                to: TextPos::new(end + 1, buffer.line_len(end + 1)),
                text: format!("{}\n{}", below, block),
                anchor: moved.anchor,
                head: moved.head,
            })
        }
    }
}

/// Plan copying the primary selection's lines above or below themselves.
///
/// The selection stays on the original block: for `Up` that block is pushed
/// down by the copy, for `Down` it keeps its line numbers.
pub fn plan_duplicate<B: TextBuffer>(buffer: &B, direction: Direction) -> LineEdit {
    let sel = buffer.primary_selection();
    let start = sel.start_line();
    let end = sel.end_line();
    let block = buffer.text_of_lines(start, end);

    match direction {
        Direction::Up => {
            let at = TextPos::line_start(start);
            let kept = sel.shifted(sel.line_span() as isize);
            LineEdit {
                from: at,
                to: at,
                text: format!("{}\n", block),
                anchor: kept.anchor,
                head: kept.head,
            }
        }
        Direction::Down => {
            let at = TextPos::new(end, buffer.line_len(end));
            LineEdit {
                from: at,
                to: at,
                text: format!("\n{}", block),
                anchor: sel.anchor,
                head: sel.head,
            }
        }
    }
}

/// Move the selected lines one line up or down. Returns the applied edit.
pub fn move_lines<B: TextBuffer>(buffer: &mut B, direction: Direction) -> Option<LineEdit> {
    let edit = plan_move(buffer, direction)?;
    edit.apply(buffer);
    Some(edit)
}

/// Duplicate the selected lines. Returns the applied edit.
pub fn duplicate_lines<B: TextBuffer>(buffer: &mut B, direction: Direction) -> LineEdit {
    let edit = plan_duplicate(buffer, direction);
    edit.apply(buffer);
    edit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::buffer::LineBuffer;

    fn buffer_with(text: &str, anchor: (usize, usize), head: (usize, usize)) -> LineBuffer {
        let mut buffer = LineBuffer::from_str(text);
        buffer.set_selection(Selection::new(
            TextPos::new(anchor.0, anchor.1),
            TextPos::new(head.0, head.1),
        ));
        buffer
    }

    #[test]
    fn test_move_down_single_line() {
        let mut buffer = buffer_with("a\nb\nc", (1, 0), (1, 1));
        assert!(move_lines(&mut buffer, Direction::Down).is_some());
        assert_eq!(buffer.text(), "a\nc\nb");
        assert_eq!(buffer.primary_selection(), Selection::new(TextPos::new(2, 0), TextPos::new(2, 1)));
    }

    #[test]
    fn test_move_up_single_line() {
        let mut buffer = buffer_with("a\nb\nc", (1, 0), (1, 1));
        assert!(move_lines(&mut buffer, Direction::Up).is_some());
        assert_eq!(buffer.text(), "b\na\nc");
        assert_eq!(buffer.primary_selection().start_line(), 0);
    }

    #[test]
    fn test_move_block_keeps_columns() {
        let mut buffer = buffer_with("x\nfirst\nsecond\ny", (2, 3), (1, 2));
        move_lines(&mut buffer, Direction::Up);
        assert_eq!(buffer.text(), "first\nsecond\nx\ny");
        let sel = buffer.primary_selection();
        assert_eq!(sel.anchor, TextPos::new(1, 3));
        assert_eq!(sel.head, TextPos::new(0, 2));
    }

    #[test]
    fn test_move_at_edges_is_noop() {
        let mut buffer = buffer_with("a\nb", (0, 0), (0, 0));
        assert_eq!(move_lines(&mut buffer, Direction::Up), None);
        buffer.set_selection(Selection::collapsed(TextPos::new(1, 1)));
        assert_eq!(move_lines(&mut buffer, Direction::Down), None);
        assert_eq!(buffer.text(), "a\nb");
        assert_eq!(buffer.revision(), 0);
    }

    #[test]
    fn test_move_on_empty_buffer() {
        let mut buffer = LineBuffer::new();
        assert_eq!(move_lines(&mut buffer, Direction::Up), None);
        assert_eq!(move_lines(&mut buffer, Direction::Down), None);
        assert_eq!(buffer.line_count(), 1);
    }

    #[test]
    fn test_duplicate_up_shifts_selection() {
        let mut buffer = buffer_with("a\nb", (0, 0), (0, 1));
        duplicate_lines(&mut buffer, Direction::Up);
        assert_eq!(buffer.text(), "a\na\nb");
        assert_eq!(buffer.primary_selection(), Selection::new(TextPos::new(1, 0), TextPos::new(1, 1)));
    }

    #[test]
    fn test_duplicate_down_keeps_selection() {
        let mut buffer = buffer_with("a\nb", (0, 0), (0, 1));
        duplicate_lines(&mut buffer, Direction::Down);
        assert_eq!(buffer.text(), "a\na\nb");
        assert_eq!(buffer.primary_selection(), Selection::new(TextPos::new(0, 0), TextPos::new(0, 1)));
    }

    #[test]
    fn test_duplicate_block_up() {
        let mut buffer = buffer_with("p\nq\nr", (0, 0), (1, 1));
        duplicate_lines(&mut buffer, Direction::Up);
        assert_eq!(buffer.text(), "p\nq\np\nq\nr");
        assert_eq!(buffer.primary_selection(), Selection::new(TextPos::new(2, 0), TextPos::new(3, 1)));
    }

    #[test]
    fn test_duplicate_empty_buffer() {
        let mut buffer = LineBuffer::new();
        duplicate_lines(&mut buffer, Direction::Down);
        assert_eq!(buffer.lines(), &[String::new(), String::new()]);
    }

    #[test]
    fn test_plan_serializes_for_widget() {
        let buffer = buffer_with("a\nb", (1, 0), (1, 0));
        let edit = plan_move(&buffer, Direction::Up).unwrap();
        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(json["from"]["line"], 0);
        assert_eq!(json["to"]["ch"], 1);
        assert_eq!(json["text"], "b\na");
        assert_eq!(json["head"]["line"], 0);
    }
}
