//! Active document record
//!
//! The host renders tabs from this record; the session keeps its content and
//! modified flag current on every buffer change.

use serde::{Deserialize, Serialize};

use super::mode::mode_for_path;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveDocument {
    pub path: Option<String>,
    pub mode: Option<String>,
    pub content: String,
    /// Content as last loaded or saved
    #[serde(skip)]
    saved_content: String,
    pub modified: bool,
}

impl ActiveDocument {
    pub fn open(path: Option<&str>, content: &str) -> Self {
        Self {
            path: path.map(str::to_string),
            mode: mode_for_path(path).map(str::to_string),
            content: content.to_string(),
            saved_content: content.to_string(),
            modified: false,
        }
    }

    /// Record new buffer content
    pub fn update_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.modified = self.content != self.saved_content;
    }

    /// Current content is now the saved baseline
    pub fn mark_saved(&mut self) {
        self.saved_content = self.content.clone();
        self.modified = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_sets_mode() {
        let doc = ActiveDocument::open(Some("automations.YAML"), "a: 1");
        assert_eq!(doc.mode.as_deref(), Some("ha-yaml"));
        assert!(!doc.modified);
    }

    #[test]
    fn test_modified_tracks_saved_content() {
        let mut doc = ActiveDocument::open(Some("a.py"), "x = 1");
        doc.update_content("x = 2");
        assert!(doc.modified);
        doc.update_content("x = 1");
        assert!(!doc.modified);
        doc.update_content("x = 3");
        doc.mark_saved();
        assert!(!doc.modified);
        doc.update_content("x = 1");
        assert!(doc.modified);
    }
}
