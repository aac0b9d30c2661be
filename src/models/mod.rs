//! Editor data models
//!
//! - `mode`: file extension to syntax mode
//! - `settings`: settings mirror and widget options
//! - `document`: the active document record

pub mod document;
pub mod mode;
pub mod settings;

pub use document::ActiveDocument;
pub use mode::{is_yaml_mode, mode_for_path};
pub use settings::{EditorSettings, WidgetOptions};
