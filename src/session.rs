//! Editor session state
//!
//! One session per widget: the buffer mirror, the active document record,
//! the settings mirror and the focus flag. The session never calls into the
//! host; `EditorController` does that once the session borrow is released.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::EditorError;
use crate::host::StatusSnapshot;
use crate::keys::{self, Action, KeyInput, WidgetKeymap};
use crate::models::{ActiveDocument, EditorSettings, WidgetOptions};
use crate::text::{self, LineBuffer, LineEdit, ListenerId, Selection, TextBuffer};

#[derive(Debug)]
pub struct EditorSession {
    buffer: LineBuffer,
    document: Rc<RefCell<ActiveDocument>>,
    settings: EditorSettings,
    keymap: WidgetKeymap,
    focused: bool,
    document_listener: Option<ListenerId>,
}

impl EditorSession {
    pub fn new(settings: EditorSettings) -> Self {
        let mut session = Self {
            buffer: LineBuffer::new(),
            document: Rc::new(RefCell::new(ActiveDocument::default())),
            settings,
            keymap: WidgetKeymap::standard().clone(),
            focused: false,
            document_listener: None,
        };
        session.attach_document();
        session
    }

    /// Load a document, replacing the buffer and resetting the selection
    pub fn open(&mut self, path: Option<&str>, content: &str) -> WidgetOptions {
        if let Some(id) = self.document_listener.take() {
            self.buffer.remove_listener(id);
        }
        self.buffer = LineBuffer::from_str(content);
        *self.document.borrow_mut() = ActiveDocument::open(path, content);
        self.attach_document();
        log::info!(
            "opened {} ({} lines, mode {:?})",
            path.unwrap_or("<untitled>"),
            self.buffer.line_count(),
            self.document.borrow().mode
        );
        self.widget_options()
    }

    fn attach_document(&mut self) {
        let document = Rc::clone(&self.document);
        let id = self.buffer.on_change(move |change| {
            document.borrow_mut().update_content(&change.text);
        });
        self.document_listener = Some(id);
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn content(&self) -> String {
        self.buffer.text()
    }

    pub fn document(&self) -> ActiveDocument {
        self.document.borrow().clone()
    }

    pub fn mode(&self) -> Option<String> {
        self.document.borrow().mode.clone()
    }

    pub fn is_modified(&self) -> bool {
        self.document.borrow().modified
    }

    pub fn mark_saved(&mut self) {
        self.document.borrow_mut().mark_saved();
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn selection(&self) -> Selection {
        self.buffer.primary_selection()
    }

    pub fn set_selections(&mut self, selections: Vec<Selection>) {
        self.buffer.set_selections(selections);
    }

    /// Take the widget's full text after user typing. Returns whether it changed.
    pub fn sync_from_widget(&mut self, text: &str) -> bool {
        self.buffer.set_text(text)
    }

    pub fn route_widget_key(&self, name: &str) -> Result<Option<Action>, EditorError> {
        self.keymap.lookup_name(name)
    }

    pub fn route_captured_key(&self, input: &KeyInput) -> Option<Action> {
        keys::route_captured(self.focused, input)
    }

    /// Plan a line command against the buffer without touching it. `None`
    /// for boundary no-ops and for actions that are not line commands.
    pub fn plan_line_action(&self, action: Action) -> Option<LineEdit> {
        match action {
            Action::MoveLines(direction) => text::plan_move(&self.buffer, direction),
            Action::DuplicateLines(direction) => Some(text::plan_duplicate(&self.buffer, direction)),
            Action::Save | Action::CommandPalette | Action::Search => None,
        }
    }

    /// Apply an edit the widget has accepted. `planned_at` is the buffer
    /// revision the edit was planned against; if the widget already synced its
    /// text since then, only the selection is taken over.
    pub fn commit_edit(&mut self, edit: &LineEdit, planned_at: u64) {
        if self.buffer.revision() == planned_at {
            edit.apply(&mut self.buffer);
        } else {
            self.buffer.set_selection(edit.selection());
        }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn apply_settings(&mut self, settings: EditorSettings) -> Result<WidgetOptions, EditorError> {
        settings.validate()?;
        self.settings = settings;
        Ok(self.widget_options())
    }

    pub fn extra_keys(&self) -> Vec<String> {
        self.keymap.names()
    }

    pub fn widget_options(&self) -> WidgetOptions {
        self.settings
            .widget_options(self.mode().as_deref(), self.extra_keys())
    }

    pub fn status(&self) -> StatusSnapshot {
        let head = self.buffer.primary_selection().head;
        let document = self.document.borrow();
        StatusSnapshot {
            line: head.line + 1,
            column: head.col + 1,
            line_count: self.buffer.line_count(),
            mode: document.mode.clone(),
            modified: document.modified,
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}
