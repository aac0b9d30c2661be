//! Blueprint Studio editor bindings (WASM)
//!
//! Line move/duplicate commands and shortcut routing for the code editor
//! widget embedded in Blueprint Studio. The widget, file I/O and the rest of
//! the UI live in the host page; this module owns a mirror of the buffer,
//! decides what each shortcut does, and reports edits back to the host.

pub mod api;
pub mod controller;
pub mod error;
pub mod host;
pub mod keys;
pub mod models;
pub mod session;
pub mod text;

// Re-export commonly used types
pub use controller::EditorController;
pub use error::EditorError;
pub use host::{Collaborators, StatusSnapshot};
pub use keys::{Action, Direction, KeyCombo, KeyInput, Modifiers};
pub use models::{mode_for_path, ActiveDocument, EditorSettings, WidgetOptions};
pub use session::EditorSession;
pub use text::{LineBuffer, LineEdit, Selection, TextBuffer, TextPos};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            log::warn!("console logger not installed: {}", e);
        }
    }

    log::info!("Blueprint Studio editor module initialized");
}
