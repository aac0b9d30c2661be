//! Text editing core
//!
//! Pure buffer logic with no knowledge of the browser or the widget.
//!
//! ## Modules
//!
//! - `cursor`: positions, ranges and anchor/head selections
//! - `buffer`: line storage with atomic operations and change listeners
//! - `transform`: move-lines and duplicate-lines

pub mod buffer;
pub mod cursor;
pub mod transform;

// Re-exports for convenience
pub use buffer::{BufferChange, BufferEdit, LineBuffer, ListenerId, TextBuffer};
pub use cursor::{Selection, TextPos, TextRange};
pub use transform::{duplicate_lines, move_lines, plan_duplicate, plan_move, LineEdit};
