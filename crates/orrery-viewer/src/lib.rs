//! Orbital viewer: fetches the planet catalog, animates the planets around
//! the sun and shows a detail panel for the planet under a click.
//!
//! [`run`] opens the window and blocks until it is closed.

pub mod animation;
pub mod app;
pub mod error;
pub mod fetch;
pub mod lifecycle;
pub mod listeners;
pub mod overlay;
pub mod renderer;
pub mod state;
pub mod text;

pub use animation::AnimationLoop;
pub use app::{ViewerApp, camera_from_config, pick_planet, run, window_attributes_from_config};
pub use error::ViewerError;
pub use fetch::{EventSink, ViewerEvent, spawn_debug_print, spawn_fetch};
pub use lifecycle::SceneLifecycle;
pub use listeners::{Listener, ListenerRegistry};
pub use overlay::{DetailPanel, OverlayClick, PixelRect, TextLabel, detail_text, spinner_vertices};
pub use renderer::{FrameSnapshot, SceneRenderer};
pub use state::{LOADING_TITLE, Phase, ViewerState};
pub use text::TextLayer;
