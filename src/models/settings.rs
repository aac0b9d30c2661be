//! Editor settings mirror and the widget options derived from it
//!
//! Settings are owned and persisted by the host; this is a read-through copy
//! used to configure the widget at creation and on every apply.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

pub const MIN_FONT_SIZE: u32 = 6;
pub const MAX_FONT_SIZE: u32 = 72;
pub const MAX_TAB_SIZE: u32 = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    /// Theme preset name
    pub theme: String,
    pub font_size: u32,
    pub font_family: String,
    pub show_line_numbers: bool,
    pub word_wrap: bool,
    pub tab_size: u32,
    pub indent_with_tabs: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            theme: "dracula".to_string(),
            font_size: 14,
            font_family: "'Fira Code', 'Consolas', monospace".to_string(),
            show_line_numbers: true,
            word_wrap: false,
            tab_size: 2,
            indent_with_tabs: false,
        }
    }
}

impl EditorSettings {
    /// Parse from JSON text; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| EditorError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.font_size) {
            return Err(EditorError::InvalidSettings(format!(
                "font size {} out of range ({}-{})",
                self.font_size, MIN_FONT_SIZE, MAX_FONT_SIZE
            )));
        }
        if self.tab_size == 0 || self.tab_size > MAX_TAB_SIZE {
            return Err(EditorError::InvalidSettings(format!(
                "tab size {} out of range (1-{})",
                self.tab_size, MAX_TAB_SIZE
            )));
        }
        if self.theme.trim().is_empty() {
            return Err(EditorError::InvalidSettings("theme name is empty".to_string()));
        }
        Ok(())
    }

    /// Widget configuration for a document in `mode`
    pub fn widget_options(&self, mode: Option<&str>, extra_keys: Vec<String>) -> WidgetOptions {
        WidgetOptions {
            mode: mode.map(str::to_string),
            theme: self.theme.clone(),
            line_numbers: self.show_line_numbers,
            line_wrapping: self.word_wrap,
            indent_unit: self.tab_size,
            tab_size: self.tab_size,
            indent_with_tabs: self.indent_with_tabs,
            font_size: self.font_size,
            font_family: self.font_family.clone(),
            match_brackets: true,
            auto_close_brackets: true,
            style_active_line: true,
            extra_keys,
        }
    }
}

/// Options handed to the widget, named the way the widget expects them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    pub mode: Option<String>,
    pub theme: String,
    pub line_numbers: bool,
    pub line_wrapping: bool,
    pub indent_unit: u32,
    pub tab_size: u32,
    pub indent_with_tabs: bool,
    pub font_size: u32,
    pub font_family: String,
    pub match_brackets: bool,
    pub auto_close_brackets: bool,
    pub style_active_line: bool,
    /// Key combination names routed back through `handleWidgetKey`
    pub extra_keys: Vec<String>,
}
