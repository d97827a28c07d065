//! Mouse state and click detection.
//!
//! [`MouseState`] follows winit cursor and button events. A press followed by
//! a release of the same button, with the cursor moving less than
//! [`CLICK_TOLERANCE`] pixels in between, is reported as a [`Click`].

use glam::Vec2;
use winit::event::{ElementState, MouseButton};

/// Maximum cursor travel, in physical pixels, between press and release for
/// the pair to count as a click.
pub const CLICK_TOLERANCE: f32 = 4.0;

/// A completed click at a cursor position in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    pub position: Vec2,
    pub button: MouseButton,
}

fn button_index(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back | MouseButton::Forward | MouseButton::Other(_) => 3,
    }
}

#[derive(Debug, Clone)]
pub struct MouseState {
    position: Vec2,
    /// Cursor position at the last press of each button, while held.
    press_origin: [Option<Vec2>; 4],
    cursor_in_window: bool,
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new()
    }
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            press_origin: [None; 4],
            cursor_in_window: false,
        }
    }

    /// Process a `CursorMoved` event.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.position = Vec2::new(x as f32, y as f32);
        self.cursor_in_window = true;
    }

    /// Process a `MouseInput` event. Returns the click it completes, if any.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) -> Option<Click> {
        let slot = &mut self.press_origin[button_index(button)];
        match state {
            ElementState::Pressed => {
                *slot = Some(self.position);
                None
            }
            ElementState::Released => {
                let origin = slot.take()?;
                (origin.distance(self.position) <= CLICK_TOLERANCE).then_some(Click {
                    position: self.position,
                    button,
                })
            }
        }
    }

    pub fn on_cursor_entered(&mut self) {
        self.cursor_in_window = true;
    }

    /// Leaving the window abandons any press in progress.
    pub fn on_cursor_left(&mut self) {
        self.cursor_in_window = false;
        self.press_origin = [None; 4];
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.press_origin[button_index(button)].is_some()
    }

    #[must_use]
    pub fn is_cursor_in_window(&self) -> bool {
        self.cursor_in_window
    }
}
