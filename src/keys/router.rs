//! Shortcut routing
//!
//! Two layers claim the same shortcuts: the widget's own keymap (fires only
//! while the widget has focus and the browser lets the key through) and a
//! window-level capture listener that overrides browser/OS bindings of
//! Alt+Arrow and Cmd+Shift+Arrow. Both resolve to the same `Action`, which
//! the controller executes through one code path.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{Direction, KeyCombo, KeyInput, Modifiers};
use crate::error::EditorError;

/// What a shortcut does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "direction", rename_all = "camelCase")]
pub enum Action {
    MoveLines(Direction),
    DuplicateLines(Direction),
    Save,
    CommandPalette,
    Search,
}

/// One capture-layer rule: a modifier predicate and the action it selects
pub struct CaptureRule {
    pub name: &'static str,
    pub matches: fn(&Modifiers) -> bool,
    pub action: fn(Direction) -> Action,
}

/// Evaluated in order; the first match wins.
pub static CAPTURE_RULES: [CaptureRule; 3] = [
    CaptureRule {
        name: "alt",
        matches: |m| m.alt && !m.shift && !m.meta && !m.ctrl,
        action: Action::MoveLines,
    },
    CaptureRule {
        name: "alt+shift",
        matches: |m| m.alt && m.shift && !m.meta && !m.ctrl,
        action: Action::DuplicateLines,
    },
    // Platform fallback; Alt and Ctrl state are irrelevant
    CaptureRule {
        name: "meta+shift",
        matches: |m| m.meta && m.shift,
        action: Action::MoveLines,
    },
];

/// Decide whether the window-level listener handles `input`.
///
/// Only arrow keys pressed while the editor has focus are considered.
/// `Some` means the event must be consumed (default prevented and
/// propagation stopped); `None` lets it through untouched.
pub fn route_captured(focused: bool, input: &KeyInput) -> Option<Action> {
    if !focused {
        return None;
    }
    let direction = input.key.direction()?;
    CAPTURE_RULES
        .iter()
        .find(|rule| (rule.matches)(&input.modifiers))
        .map(|rule| {
            log::debug!("capture rule '{}' matched {:?}", rule.name, direction);
            (rule.action)(direction)
        })
}

const DEFAULT_BINDINGS: &[(&str, Action)] = &[
    ("Alt-Up", Action::MoveLines(Direction::Up)),
    ("Alt-Down", Action::MoveLines(Direction::Down)),
    ("Shift-Alt-Up", Action::DuplicateLines(Direction::Up)),
    ("Shift-Alt-Down", Action::DuplicateLines(Direction::Down)),
    ("Shift-Cmd-Up", Action::MoveLines(Direction::Up)),
    ("Shift-Cmd-Down", Action::MoveLines(Direction::Down)),
    ("Shift-Ctrl-Up", Action::MoveLines(Direction::Up)),
    ("Shift-Ctrl-Down", Action::MoveLines(Direction::Down)),
    ("Ctrl-S", Action::Save),
    ("Cmd-S", Action::Save),
    ("Shift-Ctrl-P", Action::CommandPalette),
    ("Shift-Cmd-P", Action::CommandPalette),
    ("Ctrl-F", Action::Search),
    ("Cmd-F", Action::Search),
];

static DEFAULT_KEYMAP: Lazy<WidgetKeymap> = Lazy::new(|| {
    WidgetKeymap::from_bindings(DEFAULT_BINDINGS).unwrap_or_else(|e| {
        log::error!("built-in keymap rejected: {}", e);
        WidgetKeymap::default()
    })
});

/// Static widget-scope keymap
#[derive(Debug, Clone, Default)]
pub struct WidgetKeymap {
    bindings: Vec<(KeyCombo, Action)>,
}

impl WidgetKeymap {
    /// The built-in editor bindings
    pub fn standard() -> &'static WidgetKeymap {
        &DEFAULT_KEYMAP
    }

    pub fn from_bindings(bindings: &[(&str, Action)]) -> Result<Self, EditorError> {
        let bindings = bindings
            .iter()
            .map(|(name, action)| Ok((name.parse::<KeyCombo>()?, *action)))
            .collect::<Result<Vec<_>, EditorError>>()?;
        Ok(Self { bindings })
    }

    pub fn lookup(&self, combo: &KeyCombo) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(c, _)| c == combo)
            .map(|(_, action)| *action)
    }

    /// Look up by combination name as the widget reports it
    pub fn lookup_name(&self, name: &str) -> Result<Option<Action>, EditorError> {
        let combo: KeyCombo = name.parse()?;
        Ok(self.lookup(&combo))
    }

    /// Combination names to register with the widget
    pub fn names(&self) -> Vec<String> {
        self.bindings.iter().map(|(c, _)| c.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrow(key: &str, alt: bool, shift: bool, ctrl: bool, meta: bool) -> KeyInput {
        KeyInput::from_dom(key, alt, shift, ctrl, meta)
    }

    #[test]
    fn test_capture_requires_focus() {
        assert_eq!(route_captured(false, &arrow("ArrowUp", true, false, false, false)), None);
    }

    #[test]
    fn test_capture_rules() {
        assert_eq!(
            route_captured(true, &arrow("ArrowUp", true, false, false, false)),
            Some(Action::MoveLines(Direction::Up))
        );
        assert_eq!(
            route_captured(true, &arrow("ArrowDown", true, true, false, false)),
            Some(Action::DuplicateLines(Direction::Down))
        );
        assert_eq!(
            route_captured(true, &arrow("ArrowDown", false, true, false, true)),
            Some(Action::MoveLines(Direction::Down))
        );
        // Alt state irrelevant for the meta+shift fallback
        assert_eq!(
            route_captured(true, &arrow("ArrowUp", true, true, false, true)),
            Some(Action::MoveLines(Direction::Up))
        );
    }

    #[test]
    fn test_capture_ignores_other_combinations() {
        assert_eq!(route_captured(true, &arrow("ArrowUp", false, false, false, false)), None);
        assert_eq!(route_captured(true, &arrow("ArrowUp", true, false, true, false)), None);
        assert_eq!(route_captured(true, &arrow("ArrowUp", false, true, false, false)), None);
        assert_eq!(route_captured(true, &arrow("ArrowLeft", true, false, false, false)), None);
        assert_eq!(route_captured(true, &arrow("s", true, false, false, false)), None);
    }

    #[test]
    fn test_standard_keymap() {
        let keymap = WidgetKeymap::standard();
        assert_eq!(keymap.len(), DEFAULT_BINDINGS.len());
        assert_eq!(
            keymap.lookup_name("Alt-Shift-Down").unwrap(),
            Some(Action::DuplicateLines(Direction::Down))
        );
        assert_eq!(keymap.lookup_name("Ctrl-Shift-P").unwrap(), Some(Action::CommandPalette));
        assert_eq!(keymap.lookup_name("Cmd-s").unwrap(), Some(Action::Save));
        assert_eq!(keymap.lookup_name("Ctrl-Q").unwrap(), None);
        assert!(keymap.lookup_name("Bogus-Up").is_err());
        assert!(keymap.names().contains(&"Shift-Cmd-Up".to_string()));
    }

    #[test]
    fn test_layers_agree_on_line_commands() {
        let keymap = WidgetKeymap::standard();
        for (name, dom) in [
            ("Alt-Up", arrow("ArrowUp", true, false, false, false)),
            ("Shift-Alt-Down", arrow("ArrowDown", true, true, false, false)),
            ("Shift-Cmd-Down", arrow("ArrowDown", false, true, false, true)),
        ] {
            assert_eq!(keymap.lookup_name(name).unwrap(), route_captured(true, &dom), "{}", name);
        }
    }

    #[test]
    fn test_action_serialization() {
        let json = serde_json::to_string(&Action::MoveLines(Direction::Up)).unwrap();
        assert_eq!(json, r#"{"type":"moveLines","direction":"up"}"#);
    }
}
