//! Keyboard state and key-to-command mapping.
//!
//! Physical key codes are used so bindings are independent of the keyboard
//! layout. Commands fire once per physical press; auto-repeat is ignored.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Viewer-level action triggered by a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Close the detail overlay (Escape).
    Dismiss,
    /// Ask the catalog service to log its planet list (F12).
    DebugPrint,
}

impl KeyCommand {
    fn for_key(key: PhysicalKey) -> Option<Self> {
        match key {
            PhysicalKey::Code(KeyCode::Escape) => Some(Self::Dismiss),
            PhysicalKey::Code(KeyCode::F12) => Some(Self::DebugPrint),
            _ => None,
        }
    }
}

/// Minimal description of a key event, constructible without a winit event.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<PhysicalKey>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a winit [`KeyEvent`]; returns the command it triggers.
    pub fn process_event(&mut self, event: &KeyEvent) -> Option<KeyCommand> {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        })
    }

    pub fn process_raw(&mut self, event: RawKeyEvent) -> Option<KeyCommand> {
        match event.state {
            ElementState::Pressed => {
                let fresh = self.pressed.insert(event.key);
                if fresh && !event.repeat {
                    KeyCommand::for_key(event.key)
                } else {
                    None
                }
            }
            ElementState::Released => {
                self.pressed.remove(&event.key);
                None
            }
        }
    }

    #[must_use]
    pub fn is_pressed(&self, key: PhysicalKey) -> bool {
        self.pressed.contains(&key)
    }

    /// Forget held keys, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(code: KeyCode, state: ElementState, repeat: bool) -> RawKeyEvent {
        RawKeyEvent {
            key: PhysicalKey::Code(code),
            state,
            repeat,
        }
    }

    #[test]
    fn test_escape_dismisses() {
        let mut kb = KeyboardState::new();
        let command = kb.process_raw(raw(KeyCode::Escape, ElementState::Pressed, false));
        assert_eq!(command, Some(KeyCommand::Dismiss));
        assert!(kb.is_pressed(PhysicalKey::Code(KeyCode::Escape)));
    }

    #[test]
    fn test_f12_requests_debug_print() {
        let mut kb = KeyboardState::new();
        let command = kb.process_raw(raw(KeyCode::F12, ElementState::Pressed, false));
        assert_eq!(command, Some(KeyCommand::DebugPrint));
    }

    #[test]
    fn test_unbound_key_has_no_command() {
        let mut kb = KeyboardState::new();
        assert_eq!(
            kb.process_raw(raw(KeyCode::KeyW, ElementState::Pressed, false)),
            None
        );
    }

    #[test]
    fn test_held_key_fires_once() {
        let mut kb = KeyboardState::new();
        assert!(
            kb.process_raw(raw(KeyCode::Escape, ElementState::Pressed, false))
                .is_some()
        );
        assert_eq!(
            kb.process_raw(raw(KeyCode::Escape, ElementState::Pressed, true)),
            None
        );
        kb.process_raw(raw(KeyCode::Escape, ElementState::Released, false));
        assert!(!kb.is_pressed(PhysicalKey::Code(KeyCode::Escape)));
        assert!(
            kb.process_raw(raw(KeyCode::Escape, ElementState::Pressed, false))
                .is_some()
        );
    }

    #[test]
    fn test_clear_forgets_held_keys() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::Escape, ElementState::Pressed, false));
        kb.clear();
        assert!(!kb.is_pressed(PhysicalKey::Code(KeyCode::Escape)));
    }
}
