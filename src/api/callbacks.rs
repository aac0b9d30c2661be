//! Host callbacks supplied from JavaScript
//!
//! The host passes one object whose function-valued properties are the
//! collaborator callbacks. Required callbacks fail with `MissingCallback`
//! when absent; optional ones are skipped.

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;

use super::helpers::{js_message, serialize};
use crate::error::EditorError;
use crate::host::{Collaborators, StatusSnapshot};
use crate::models::EditorSettings;
use crate::text::LineEdit;

#[derive(Debug, Default)]
pub struct JsCollaborators {
    apply_edit: Option<Function>,
    save_current_file: Option<Function>,
    show_command_palette: Option<Function>,
    open_search_widget: Option<Function>,
    validate_yaml: Option<Function>,
    save_settings: Option<Function>,
    update_status_bar: Option<Function>,
}

fn callback(obj: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(obj, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

impl JsCollaborators {
    pub fn from_object(obj: &JsValue) -> Self {
        if !obj.is_object() {
            return Self::default();
        }
        let callbacks = Self {
            apply_edit: callback(obj, "applyEdit"),
            save_current_file: callback(obj, "saveCurrentFile"),
            show_command_palette: callback(obj, "showCommandPalette"),
            open_search_widget: callback(obj, "openSearchWidget"),
            validate_yaml: callback(obj, "validateYaml"),
            save_settings: callback(obj, "saveSettings"),
            update_status_bar: callback(obj, "updateStatusBar"),
        };
        log::debug!("host callbacks: {:?}", callbacks.supplied());
        callbacks
    }

    fn supplied(&self) -> Vec<&'static str> {
        [
            ("applyEdit", &self.apply_edit),
            ("saveCurrentFile", &self.save_current_file),
            ("showCommandPalette", &self.show_command_palette),
            ("openSearchWidget", &self.open_search_widget),
            ("validateYaml", &self.validate_yaml),
            ("saveSettings", &self.save_settings),
            ("updateStatusBar", &self.update_status_bar),
        ]
        .into_iter()
        .filter(|(_, f)| f.is_some())
        .map(|(name, _)| name)
        .collect()
    }
}

fn required<'a>(f: &'a Option<Function>, name: &'static str) -> Result<&'a Function, EditorError> {
    f.as_ref().ok_or(EditorError::MissingCallback(name))
}

fn call(f: &Function, name: &'static str, arg: Option<JsValue>) -> Result<(), EditorError> {
    let result = match arg {
        Some(arg) => f.call1(&JsValue::NULL, &arg),
        None => f.call0(&JsValue::NULL),
    };
    result.map(|_| ()).map_err(|e| EditorError::CallbackFailed {
        name,
        message: js_message(&e),
    })
}

fn to_arg<T: serde::Serialize>(value: &T, name: &'static str) -> Result<JsValue, EditorError> {
    serialize(value, name).map_err(|e| EditorError::CallbackFailed {
        name,
        message: js_message(&e),
    })
}

impl Collaborators for JsCollaborators {
    fn apply_edit(&self, edit: &LineEdit) -> Result<(), EditorError> {
        let f = required(&self.apply_edit, "applyEdit")?;
        call(f, "applyEdit", Some(to_arg(edit, "applyEdit")?))
    }

    fn save_current_file(&self) -> Result<(), EditorError> {
        call(required(&self.save_current_file, "saveCurrentFile")?, "saveCurrentFile", None)
    }

    fn show_command_palette(&self) -> Result<(), EditorError> {
        call(
            required(&self.show_command_palette, "showCommandPalette")?,
            "showCommandPalette",
            None,
        )
    }

    fn open_search_widget(&self) -> Result<(), EditorError> {
        call(required(&self.open_search_widget, "openSearchWidget")?, "openSearchWidget", None)
    }

    fn validate_yaml(&self, content: &str) -> Result<(), EditorError> {
        match &self.validate_yaml {
            Some(f) => call(f, "validateYaml", Some(JsValue::from_str(content))),
            None => Ok(()),
        }
    }

    fn save_settings(&self, settings: &EditorSettings) -> Result<(), EditorError> {
        match &self.save_settings {
            Some(f) => call(f, "saveSettings", Some(to_arg(settings, "saveSettings")?)),
            None => Ok(()),
        }
    }

    fn update_status_bar(&self, status: &StatusSnapshot) -> Result<(), EditorError> {
        match &self.update_status_bar {
            Some(f) => call(f, "updateStatusBar", Some(to_arg(status, "updateStatusBar")?)),
            None => Ok(()),
        }
    }
}
