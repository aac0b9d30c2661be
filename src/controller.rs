//! Shortcut dispatch
//!
//! Both key layers end up in `EditorController::dispatch`, so a shortcut
//! produces the same mutation whichever layer saw it first. Host callbacks
//! run only after the session borrow is dropped; the widget's own change
//! event can then call back into `sync_from_widget` safely.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::error::EditorError;
use crate::host::Collaborators;
use crate::keys::{Action, CaptureSlot, CaptureTarget, KeyHandler, KeyInput};
use crate::models::{is_yaml_mode, EditorSettings, WidgetOptions};
use crate::session::EditorSession;
use crate::text::{LineEdit, Selection};

pub struct EditorController<C: Collaborators> {
    session: Rc<RefCell<EditorSession>>,
    host: Rc<C>,
}

impl<C: Collaborators> Clone for EditorController<C> {
    fn clone(&self) -> Self {
        Self {
            session: Rc::clone(&self.session),
            host: Rc::clone(&self.host),
        }
    }
}

impl<C: Collaborators + 'static> EditorController<C> {
    pub fn new(session: EditorSession, host: C) -> Self {
        Self {
            session: Rc::new(RefCell::new(session)),
            host: Rc::new(host),
        }
    }

    pub fn session(&self) -> Ref<'_, EditorSession> {
        self.session.borrow()
    }

    pub fn session_mut(&self) -> RefMut<'_, EditorSession> {
        self.session.borrow_mut()
    }

    pub fn host(&self) -> &C {
        &self.host
    }

    /// Execute an action. Returns the applied edit for line commands that
    /// changed the buffer.
    pub fn dispatch(&self, action: Action) -> Result<Option<LineEdit>, EditorError> {
        log::debug!("dispatch {:?}", action);
        match action {
            Action::MoveLines(_) | Action::DuplicateLines(_) => {
                let (edit, planned_at) = {
                    let session = self.session.try_borrow().map_err(|_| EditorError::SessionBusy)?;
                    (session.plan_line_action(action), session.buffer().revision())
                };
                if let Some(edit) = &edit {
                    // The mirror only follows once the widget has taken the edit
                    self.host.apply_edit(edit)?;
                    self.session
                        .try_borrow_mut()
                        .map_err(|_| EditorError::SessionBusy)?
                        .commit_edit(edit, planned_at);
                    self.after_change()?;
                }
                Ok(edit)
            }
            Action::Save => self.host.save_current_file().map(|_| None),
            Action::CommandPalette => self.host.show_command_palette().map(|_| None),
            Action::Search => self.host.open_search_widget().map(|_| None),
        }
    }

    /// Widget-scope binding fired. Returns whether the combination is bound.
    pub fn handle_widget_key(&self, name: &str) -> Result<bool, EditorError> {
        let action = self
            .session
            .try_borrow()
            .map_err(|_| EditorError::SessionBusy)?
            .route_widget_key(name)?;
        match action {
            Some(action) => {
                self.dispatch(action)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Window capture listener fired. `true` means the event must be suppressed.
    pub fn handle_captured_key(&self, input: &KeyInput) -> Result<bool, EditorError> {
        let action = self
            .session
            .try_borrow()
            .map_err(|_| EditorError::SessionBusy)?
            .route_captured_key(input);
        match action {
            Some(action) => {
                self.dispatch(action)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Handler for the window capture layer
    pub fn key_handler(&self) -> KeyHandler {
        let controller = self.clone();
        Rc::new(move |input: &KeyInput| match controller.handle_captured_key(input) {
            Ok(handled) => handled,
            Err(EditorError::SessionBusy) => {
                log::warn!("key event skipped: session busy");
                false
            }
            Err(e) => {
                // The shortcut was claimed even though its action failed
                log::error!("captured shortcut failed: {}", e);
                true
            }
        })
    }

    /// Install this controller's key handler, replacing whatever the slot held
    pub fn install_capture<T: CaptureTarget>(&self, slot: &mut CaptureSlot<T>) -> Result<(), EditorError> {
        slot.install(self.key_handler())
    }

    pub fn open(&self, path: Option<&str>, content: &str) -> Result<WidgetOptions, EditorError> {
        let options = self.session.borrow_mut().open(path, content);
        self.refresh_status()?;
        Ok(options)
    }

    /// The widget reported a change (typing, paste, undo)
    pub fn sync_from_widget(&self, text: &str) -> Result<bool, EditorError> {
        let changed = self
            .session
            .try_borrow_mut()
            .map_err(|_| EditorError::SessionBusy)?
            .sync_from_widget(text);
        if changed {
            self.after_change()?;
        }
        Ok(changed)
    }

    pub fn set_selections(&self, selections: Vec<Selection>) -> Result<(), EditorError> {
        self.session.borrow_mut().set_selections(selections);
        self.refresh_status()
    }

    pub fn set_focused(&self, focused: bool) {
        self.session.borrow_mut().set_focused(focused);
    }

    pub fn mark_saved(&self) -> Result<(), EditorError> {
        self.session.borrow_mut().mark_saved();
        self.refresh_status()
    }

    /// Mirror new settings and return widget options; nothing is persisted
    pub fn apply_settings(&self, settings: EditorSettings) -> Result<WidgetOptions, EditorError> {
        self.session.borrow_mut().apply_settings(settings)
    }

    /// Mirror, then ask the host to persist
    pub fn update_settings(&self, settings: EditorSettings) -> Result<WidgetOptions, EditorError> {
        let options = self.session.borrow_mut().apply_settings(settings.clone())?;
        self.host.save_settings(&settings)?;
        Ok(options)
    }

    fn after_change(&self) -> Result<(), EditorError> {
        let (content, yaml) = {
            let session = self.session.borrow();
            (session.content(), is_yaml_mode(session.mode().as_deref()))
        };
        if yaml {
            if let Err(e) = self.host.validate_yaml(&content) {
                log::warn!("yaml validation failed: {}", e);
            }
        }
        self.refresh_status()
    }

    fn refresh_status(&self) -> Result<(), EditorError> {
        let status = self.session.borrow().status();
        self.host.update_status_bar(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StatusSnapshot;
    use crate::keys::capture::testing::FakeTarget;
    use crate::keys::Direction;
    use crate::text::TextPos;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
        edits: RefCell<Vec<LineEdit>>,
        reject_yaml: bool,
    }

    impl Collaborators for Recorder {
        fn apply_edit(&self, edit: &LineEdit) -> Result<(), EditorError> {
            self.edits.borrow_mut().push(edit.clone());
            Ok(())
        }

        fn save_current_file(&self) -> Result<(), EditorError> {
            self.calls.borrow_mut().push("save".into());
            Ok(())
        }

        fn show_command_palette(&self) -> Result<(), EditorError> {
            self.calls.borrow_mut().push("palette".into());
            Ok(())
        }

        fn open_search_widget(&self) -> Result<(), EditorError> {
            self.calls.borrow_mut().push("search".into());
            Ok(())
        }

        fn validate_yaml(&self, _content: &str) -> Result<(), EditorError> {
            self.calls.borrow_mut().push("validate".into());
            if self.reject_yaml {
                return Err(EditorError::CallbackFailed {
                    name: "validateYaml",
                    message: "linter crashed".into(),
                });
            }
            Ok(())
        }

        fn update_status_bar(&self, status: &StatusSnapshot) -> Result<(), EditorError> {
            self.calls.borrow_mut().push(format!("status {}:{}", status.line, status.column));
            Ok(())
        }
    }

    fn controller(path: &str, text: &str) -> EditorController<Recorder> {
        let controller = EditorController::new(EditorSession::default(), Recorder::default());
        controller.open(Some(path), text).unwrap();
        controller.host().calls.borrow_mut().clear();
        controller
    }

    #[test]
    fn test_widget_key_dispatches_edit() {
        let c = controller("a.yaml", "a\nb\nc");
        c.set_selections(vec![Selection::collapsed(TextPos::new(1, 0))]).unwrap();
        c.host().calls.borrow_mut().clear();

        assert!(c.handle_widget_key("Alt-Down").unwrap());
        assert_eq!(c.session().content(), "a\nc\nb");
        assert_eq!(c.host().edits.borrow().len(), 1);
        assert_eq!(*c.host().calls.borrow(), vec!["validate", "status 3:1"]);
    }

    #[test]
    fn test_widget_key_while_session_borrowed() {
        let c = controller("a.yaml", "a\nb");
        let _held = c.session_mut();
        assert_eq!(c.handle_widget_key("Alt-Down"), Err(EditorError::SessionBusy));
    }

    #[test]
    fn test_validation_failure_keeps_edit_and_status() {
        let host = Recorder { reject_yaml: true, ..Recorder::default() };
        let c = EditorController::new(EditorSession::default(), host);
        c.open(Some("a.yaml"), "a\nb").unwrap();
        c.host().calls.borrow_mut().clear();

        let edit = c.dispatch(Action::MoveLines(Direction::Down)).unwrap();
        assert!(edit.is_some());
        assert_eq!(c.session().content(), "b\na");
        assert_eq!(*c.host().calls.borrow(), vec!["validate", "status 2:1"]);
    }

    #[test]
    fn test_non_yaml_skips_validation() {
        let c = controller("a.py", "a\nb");
        c.dispatch(Action::DuplicateLines(Direction::Down)).unwrap();
        assert_eq!(*c.host().calls.borrow(), vec!["status 1:1"]);
    }

    #[test]
    fn test_boundary_is_silent() {
        let c = controller("a.yaml", "a\nb");
        assert_eq!(c.dispatch(Action::MoveLines(Direction::Up)).unwrap(), None);
        assert!(c.host().edits.borrow().is_empty());
        assert!(c.host().calls.borrow().is_empty());
    }

    #[test]
    fn test_callback_bindings() {
        let c = controller("a.md", "x");
        assert!(c.handle_widget_key("Ctrl-S").unwrap());
        assert!(c.handle_widget_key("Shift-Cmd-P").unwrap());
        assert!(c.handle_widget_key("Cmd-F").unwrap());
        assert!(!c.handle_widget_key("Ctrl-Q").unwrap());
        assert_eq!(*c.host().calls.borrow(), vec!["save", "palette", "search"]);
    }

    #[test]
    fn test_capture_layer_matches_widget_layer() {
        let via_widget = controller("a.js", "1\n2\n3");
        let via_capture = controller("a.js", "1\n2\n3");
        via_capture.set_focused(true);

        via_widget.handle_widget_key("Shift-Alt-Up").unwrap();
        let handled = via_capture
            .handle_captured_key(&KeyInput::from_dom("ArrowUp", true, true, false, false))
            .unwrap();

        assert!(handled);
        assert_eq!(via_widget.session().content(), via_capture.session().content());
        assert_eq!(via_widget.session().selection(), via_capture.session().selection());
        assert_eq!(*via_widget.host().edits.borrow(), *via_capture.host().edits.borrow());
    }

    #[test]
    fn test_reinstall_keeps_one_listener() {
        let c = controller("a.txt", "a\nb\nc");
        c.set_focused(true);
        let target = FakeTarget::default();
        let mut slot = CaptureSlot::new(target.clone());

        c.install_capture(&mut slot).unwrap();
        c.install_capture(&mut slot).unwrap();
        assert_eq!(target.listener_count(), 1);

        let claimed = target.fire(&KeyInput::from_dom("ArrowDown", true, true, false, false));
        assert_eq!(claimed, 1);
        assert_eq!(c.session().content(), "a\na\nb\nc");
    }

    #[test]
    fn test_unfocused_capture_passes_through() {
        let c = controller("a.txt", "a\nb");
        let handled = c
            .handle_captured_key(&KeyInput::from_dom("ArrowDown", true, false, false, false))
            .unwrap();
        assert!(!handled);
        assert_eq!(c.session().content(), "a\nb");
    }

    #[test]
    fn test_sync_from_widget() {
        let c = controller("a.yaml", "a: 1");
        assert!(!c.sync_from_widget("a: 1").unwrap());
        assert!(c.host().calls.borrow().is_empty());
        assert!(c.sync_from_widget("a: 2").unwrap());
        assert!(c.session().is_modified());
        c.mark_saved().unwrap();
        assert!(!c.session().is_modified());
    }

    #[test]
    fn test_settings_persist_only_on_update() {
        struct Persisting(RefCell<u32>);
        impl Collaborators for Persisting {
            fn apply_edit(&self, _: &LineEdit) -> Result<(), EditorError> {
                Ok(())
            }
            fn save_current_file(&self) -> Result<(), EditorError> {
                Ok(())
            }
            fn show_command_palette(&self) -> Result<(), EditorError> {
                Ok(())
            }
            fn open_search_widget(&self) -> Result<(), EditorError> {
                Ok(())
            }
            fn save_settings(&self, _: &EditorSettings) -> Result<(), EditorError> {
                *self.0.borrow_mut() += 1;
                Ok(())
            }
        }

        let c = EditorController::new(EditorSession::default(), Persisting(RefCell::new(0)));
        let wrapped = EditorSettings { word_wrap: true, ..EditorSettings::default() };
        assert!(c.apply_settings(wrapped.clone()).unwrap().line_wrapping);
        assert_eq!(*c.host().0.borrow(), 0);
        c.update_settings(wrapped).unwrap();
        assert_eq!(*c.host().0.borrow(), 1);

        let bad = EditorSettings { font_size: 1, ..EditorSettings::default() };
        assert!(c.update_settings(bad).is_err());
        assert_eq!(*c.host().0.borrow(), 1);
    }
}
