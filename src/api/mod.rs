//! WASM API for the editor bindings
//!
//! # Module Structure
//!
//! - `helpers`: serialization and error conversion across the JS boundary
//! - `callbacks`: host collaborator callbacks read from a JS object
//! - `capture`: the global capture-phase keydown listener
//! - `editor`: the `StudioEditor` class and `modeForPath`

pub mod helpers;
pub mod callbacks;
pub mod capture;
pub mod editor;

pub use callbacks::JsCollaborators;
pub use editor::{mode_for_path, StudioEditor};
