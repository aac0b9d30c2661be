//! Keyboard input types and shortcut routing
//!
//! - `combo`: named combinations in the widget's keymap syntax ("Shift-Alt-Up")
//! - `router`: key state to `Action`, for both the widget keymap and the window capture layer
//! - `capture`: the single window-level listener registration

pub mod capture;
pub mod combo;
pub mod router;

pub use capture::{CaptureSlot, CaptureTarget, KeyHandler};
pub use combo::KeyCombo;
pub use router::{route_captured, Action, CaptureRule, WidgetKeymap, CAPTURE_RULES};

use serde::{Deserialize, Serialize};

/// Vertical direction for line commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// A key, independent of modifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    /// Printable key, stored uppercase
    Char(char),
    /// Anything else, by its DOM/widget name
    Other(String),
}

impl Key {
    /// From a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            _ => Self::single_char(key).unwrap_or_else(|| Key::Other(key.to_string())),
        }
    }

    /// From a key name in widget keymap syntax
    pub fn from_name(name: &str) -> Self {
        match name {
            "Up" => Key::Up,
            "Down" => Key::Down,
            _ => Self::single_char(name).unwrap_or_else(|| Key::Other(name.to_string())),
        }
    }

    fn single_char(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Key::Char(c.to_ascii_uppercase())),
            _ => None,
        }
    }

    /// Arrow keys map to a line direction
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Key::Up => "Up".to_string(),
            Key::Down => "Down".to_string(),
            Key::Char(c) => c.to_string(),
            Key::Other(s) => s.clone(),
        }
    }
}

/// Modifier keys held during a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub alt: bool,
    pub shift: bool,
    pub ctrl: bool,
    /// Cmd on macOS, Windows key elsewhere
    pub meta: bool,
}

impl Modifiers {
    /// Returns true if no modifier keys are held.
    pub fn is_empty(&self) -> bool {
        !self.alt && !self.shift && !self.ctrl && !self.meta
    }
}

/// A key press as seen by the capture layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Build from the fields of a DOM keyboard event
    pub fn from_dom(key: &str, alt: bool, shift: bool, ctrl: bool, meta: bool) -> Self {
        Self {
            key: Key::from_dom(key),
            modifiers: Modifiers { alt, shift, ctrl, meta },
        }
    }
}
