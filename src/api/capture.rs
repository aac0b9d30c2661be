//! Window-level keydown listener in the capture phase
//!
//! The slot is global to the module: re-initialising any editor replaces
//! the previous listener rather than stacking another one.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, Window};

use super::helpers::js_message;
use crate::error::EditorError;
use crate::keys::{CaptureSlot, CaptureTarget, KeyHandler, KeyInput};

const KEYDOWN: &str = "keydown";

pub struct WindowTarget {
    window: Window,
}

impl WindowTarget {
    pub fn current() -> Result<Self, EditorError> {
        let window = web_sys::window()
            .ok_or_else(|| EditorError::Listener("no global window".to_string()))?;
        Ok(Self { window })
    }
}

impl CaptureTarget for WindowTarget {
    type Registration = Closure<dyn FnMut(KeyboardEvent)>;

    fn register(&self, handler: KeyHandler) -> Result<Self::Registration, EditorError> {
        let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let input = KeyInput::from_dom(
                &event.key(),
                event.alt_key(),
                event.shift_key(),
                event.ctrl_key(),
                event.meta_key(),
            );
            if handler(&input) {
                event.prevent_default();
                event.stop_immediate_propagation();
            }
        });

        self.window
            .add_event_listener_with_callback_and_bool(KEYDOWN, closure.as_ref().unchecked_ref(), true)
            .map_err(|e| EditorError::Listener(js_message(&e)))?;
        Ok(closure)
    }

    fn unregister(&self, registration: Self::Registration) {
        if let Err(e) = self.window.remove_event_listener_with_callback_and_bool(
            KEYDOWN,
            registration.as_ref().unchecked_ref(),
            true,
        ) {
            log::warn!("failed to remove key capture listener: {}", js_message(&e));
        }
    }
}

thread_local! {
    static WINDOW_CAPTURE: RefCell<Option<CaptureSlot<WindowTarget>>> = RefCell::new(None);
}

/// Run `f` against the global slot, creating it on first use
pub fn with_window_capture<R>(
    f: impl FnOnce(&mut CaptureSlot<WindowTarget>) -> Result<R, EditorError>,
) -> Result<R, EditorError> {
    WINDOW_CAPTURE.with(|cell| {
        let mut cell = cell.borrow_mut();
        if cell.is_none() {
            *cell = Some(CaptureSlot::new(WindowTarget::current()?));
        }
        match cell.as_mut() {
            Some(slot) => f(slot),
            None => Err(EditorError::Listener("capture slot unavailable".to_string())),
        }
    })
}

/// Remove the global listener. Returns whether one was installed.
pub fn remove_window_capture() -> bool {
    WINDOW_CAPTURE.with(|cell| {
        cell.borrow_mut()
            .as_mut()
            .map(|slot| slot.uninstall())
            .unwrap_or(false)
    })
}

pub fn window_capture_installed() -> bool {
    WINDOW_CAPTURE.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|slot| slot.is_installed())
            .unwrap_or(false)
    })
}
