//! Pointer and keyboard state for the orbital viewer: click detection with a
//! drag tolerance, and key presses mapped to viewer commands.

pub mod keyboard;
pub mod mouse;

pub use keyboard::{KeyCommand, KeyboardState, RawKeyEvent};
pub use mouse::{Click, MouseState};
