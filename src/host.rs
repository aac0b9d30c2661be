//! Host application capabilities
//!
//! Everything outside line editing (file I/O, command palette, search UI,
//! YAML validation, settings persistence, status bar) belongs to the host.
//! Required capabilities have no default, so a native host that forgets one
//! fails to compile; the optional ones default to doing nothing.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::models::EditorSettings;
use crate::text::LineEdit;

/// What the status bar shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    /// 1-based
    pub line: usize,
    /// 1-based
    pub column: usize,
    pub line_count: usize,
    pub mode: Option<String>,
    pub modified: bool,
}

pub trait Collaborators {
    /// Mirror a line edit into the widget as one operation
    fn apply_edit(&self, edit: &LineEdit) -> Result<(), EditorError>;

    fn save_current_file(&self) -> Result<(), EditorError>;

    fn show_command_palette(&self) -> Result<(), EditorError>;

    fn open_search_widget(&self) -> Result<(), EditorError>;

    fn validate_yaml(&self, _content: &str) -> Result<(), EditorError> {
        Ok(())
    }

    fn save_settings(&self, _settings: &EditorSettings) -> Result<(), EditorError> {
        Ok(())
    }

    fn update_status_bar(&self, _status: &StatusSnapshot) -> Result<(), EditorError> {
        Ok(())
    }
}
