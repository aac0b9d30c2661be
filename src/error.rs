//! Error types for the editor bindings
//!
//! Boundary cases of the line commands are not errors; everything here is a
//! contract violation by the host or a failure reported by it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// A binding invoked a required host callback that was never supplied
    #[error("Required callback '{0}' is not set")]
    MissingCallback(&'static str),

    /// A host callback threw
    #[error("Callback '{name}' failed: {message}")]
    CallbackFailed { name: &'static str, message: String },

    #[error("Invalid key combination: '{0}'")]
    InvalidKeyCombo(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Attaching or detaching the window listener failed
    #[error("Key listener error: {0}")]
    Listener(String),

    /// The session is already borrowed by an outer dispatch
    #[error("Editor session is busy")]
    SessionBusy,
}
