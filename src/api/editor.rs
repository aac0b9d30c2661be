//! `StudioEditor`: the JavaScript-facing editor binding
//!
//! The host creates one per widget, forwards widget events into it
//! (changes, cursor activity, focus, keymap hits) and receives edits and
//! collaborator calls back through the callbacks object.

use wasm_bindgen::prelude::*;

use super::callbacks::JsCollaborators;
use super::capture::{remove_window_capture, window_capture_installed, with_window_capture};
use super::helpers::{deserialize, is_absent, serialize, to_js_error};
use crate::controller::EditorController;
use crate::keys::{Action, Direction};
use crate::models::{self, EditorSettings};
use crate::session::EditorSession;
use crate::text::{Selection, TextPos};

#[wasm_bindgen]
pub struct StudioEditor {
    controller: EditorController<JsCollaborators>,
}

fn parse_direction(direction: &str) -> Result<Direction, JsValue> {
    Direction::from_str(direction)
        .ok_or_else(|| JsValue::from_str(&format!("Invalid direction: '{}'", direction)))
}

fn settings_from_js(value: JsValue) -> Result<EditorSettings, JsValue> {
    if is_absent(&value) {
        return Ok(EditorSettings::default());
    }
    let settings: EditorSettings = deserialize(value, "Invalid settings")?;
    settings.validate().map_err(to_js_error)?;
    Ok(settings)
}

#[wasm_bindgen]
impl StudioEditor {
    /// Create an editor binding.
    ///
    /// `callbacks` is an object of host functions (`applyEdit`,
    /// `saveCurrentFile`, `showCommandPalette`, `openSearchWidget`,
    /// `validateYaml`, `saveSettings`, `updateStatusBar`); `settings` may be
    /// omitted for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(callbacks: JsValue, settings: JsValue) -> Result<StudioEditor, JsValue> {
        let settings = settings_from_js(settings)?;
        let host = JsCollaborators::from_object(&callbacks);
        log::info!("StudioEditor created (theme {})", settings.theme);
        Ok(StudioEditor {
            controller: EditorController::new(EditorSession::new(settings), host),
        })
    }

    /// Install the window-level shortcut listener, replacing any previous one
    #[wasm_bindgen(js_name = installKeyCapture)]
    pub fn install_key_capture(&self) -> Result<(), JsValue> {
        with_window_capture(|slot| self.controller.install_capture(slot)).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = removeKeyCapture)]
    pub fn remove_key_capture() -> bool {
        remove_window_capture()
    }

    #[wasm_bindgen(js_name = isKeyCaptureInstalled)]
    pub fn is_key_capture_installed() -> bool {
        window_capture_installed()
    }

    /// Load a document; returns the widget options for it
    #[wasm_bindgen(js_name = openDocument)]
    pub fn open_document(&self, path: Option<String>, content: &str) -> Result<JsValue, JsValue> {
        let options = self
            .controller
            .open(path.as_deref(), content)
            .map_err(to_js_error)?;
        serialize(&options, "Failed to serialize widget options")
    }

    pub fn content(&self) -> String {
        self.controller.session().content()
    }

    /// The active document record (path, mode, content, modified)
    pub fn document(&self) -> Result<JsValue, JsValue> {
        let document = self.controller.session().document();
        serialize(&document, "Failed to serialize document")
    }

    #[wasm_bindgen(js_name = isModified)]
    pub fn is_modified(&self) -> bool {
        self.controller.session().is_modified()
    }

    #[wasm_bindgen(js_name = markSaved)]
    pub fn mark_saved(&self) -> Result<(), JsValue> {
        self.controller.mark_saved().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setFocused)]
    pub fn set_focused(&self, focused: bool) {
        self.controller.set_focused(focused);
    }

    #[wasm_bindgen(js_name = setSelection)]
    pub fn set_selection(
        &self,
        anchor_line: usize,
        anchor_ch: usize,
        head_line: usize,
        head_ch: usize,
    ) -> Result<(), JsValue> {
        let selection = Selection::new(
            TextPos::new(anchor_line, anchor_ch),
            TextPos::new(head_line, head_ch),
        );
        self.controller
            .set_selections(vec![selection])
            .map_err(to_js_error)
    }

    /// Accepts the widget's `listSelections()` array
    #[wasm_bindgen(js_name = setSelections)]
    pub fn set_selections(&self, selections: JsValue) -> Result<(), JsValue> {
        let selections: Vec<Selection> = deserialize(selections, "Invalid selections")?;
        self.controller
            .set_selections(selections)
            .map_err(to_js_error)
    }

    pub fn selection(&self) -> Result<JsValue, JsValue> {
        let selection = self.controller.session().selection();
        serialize(&selection, "Failed to serialize selection")
    }

    /// Widget change event: take the full text. Returns whether it differed.
    #[wasm_bindgen(js_name = syncFromWidget)]
    pub fn sync_from_widget(&self, text: &str) -> Result<bool, JsValue> {
        self.controller.sync_from_widget(text).map_err(to_js_error)
    }

    /// Widget keymap hit, e.g. "Shift-Alt-Down". Returns whether it is bound.
    #[wasm_bindgen(js_name = handleWidgetKey)]
    pub fn handle_widget_key(&self, name: &str) -> Result<bool, JsValue> {
        self.controller.handle_widget_key(name).map_err(to_js_error)
    }

    /// Returns whether the buffer changed
    #[wasm_bindgen(js_name = moveLines)]
    pub fn move_lines(&self, direction: &str) -> Result<bool, JsValue> {
        let action = Action::MoveLines(parse_direction(direction)?);
        let edit = self.controller.dispatch(action).map_err(to_js_error)?;
        Ok(edit.is_some())
    }

    #[wasm_bindgen(js_name = duplicateLines)]
    pub fn duplicate_lines(&self, direction: &str) -> Result<bool, JsValue> {
        let action = Action::DuplicateLines(parse_direction(direction)?);
        let edit = self.controller.dispatch(action).map_err(to_js_error)?;
        Ok(edit.is_some())
    }

    /// Mirror settings without persisting; returns new widget options
    #[wasm_bindgen(js_name = applySettings)]
    pub fn apply_settings(&self, settings: JsValue) -> Result<JsValue, JsValue> {
        let settings = settings_from_js(settings)?;
        let options = self.controller.apply_settings(settings).map_err(to_js_error)?;
        serialize(&options, "Failed to serialize widget options")
    }

    /// Mirror settings and hand them to `saveSettings`
    #[wasm_bindgen(js_name = updateSettings)]
    pub fn update_settings(&self, settings: JsValue) -> Result<JsValue, JsValue> {
        let settings = settings_from_js(settings)?;
        let options = self.controller.update_settings(settings).map_err(to_js_error)?;
        serialize(&options, "Failed to serialize widget options")
    }

    pub fn settings(&self) -> Result<JsValue, JsValue> {
        let settings = self.controller.session().settings().clone();
        serialize(&settings, "Failed to serialize settings")
    }

    #[wasm_bindgen(js_name = widgetOptions)]
    pub fn widget_options(&self) -> Result<JsValue, JsValue> {
        let options = self.controller.session().widget_options();
        serialize(&options, "Failed to serialize widget options")
    }

    /// Combination names to register in the widget keymap
    #[wasm_bindgen(js_name = extraKeys)]
    pub fn extra_keys(&self) -> js_sys::Array {
        self.controller
            .session()
            .extra_keys()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }

    pub fn status(&self) -> Result<JsValue, JsValue> {
        let status = self.controller.session().status();
        serialize(&status, "Failed to serialize status")
    }
}

/// Syntax mode for a file path, or `undefined`
#[wasm_bindgen(js_name = modeForPath)]
pub fn mode_for_path(path: Option<String>) -> Option<String> {
    models::mode_for_path(path.as_deref()).map(str::to_string)
}
