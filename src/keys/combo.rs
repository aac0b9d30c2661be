//! Named key combinations ("Shift-Ctrl-Down")
//!
//! Modifier order in the name is irrelevant; `Display` writes the widget's
//! canonical order `Shift-Cmd-Ctrl-Alt-<key>`.

use std::fmt;
use std::str::FromStr;

use super::{Key, KeyInput, Modifiers};
use crate::error::EditorError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub modifiers: Modifiers,
    pub key: Key,
}

impl KeyCombo {
    pub fn new(modifiers: Modifiers, key: Key) -> Self {
        Self { modifiers, key }
    }

    pub fn matches(&self, input: &KeyInput) -> bool {
        self.key == input.key && self.modifiers == input.modifiers
    }
}

impl FromStr for KeyCombo {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split('-').collect();
        let key = match parts.pop() {
            Some(k) if !k.is_empty() => Key::from_name(k),
            _ => return Err(EditorError::InvalidKeyCombo(s.to_string())),
        };

        let mut modifiers = Modifiers::default();
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "shift" => modifiers.shift = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "cmd" | "meta" => modifiers.meta = true,
                _ => return Err(EditorError::InvalidKeyCombo(s.to_string())),
            }
        }

        Ok(Self { modifiers, key })
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.shift {
            f.write_str("Shift-")?;
        }
        if self.modifiers.meta {
            f.write_str("Cmd-")?;
        }
        if self.modifiers.ctrl {
            f.write_str("Ctrl-")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt-")?;
        }
        f.write_str(&self.key.name())
    }
}
