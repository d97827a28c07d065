//! UI state of the viewer: the fetched planet list, the loading phase and the
//! current selection. Owned by the application and mutated only on the event
//! loop thread.

use orrery_catalog::{Planet, PlanetId};
use orrery_rpc::ClientError;
use tracing::{error, info};

use crate::overlay::detail_text;

/// Title shown while the catalog fetch is in flight.
pub const LOADING_TITLE: &str = "Loading planets…";

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Waiting for the catalog fetch.
    Loading,
    /// A planet list (possibly empty) is available.
    Ready,
    /// The catalog answered with data that cannot be shown.
    Failed(String),
}

#[derive(Debug)]
pub struct ViewerState {
    phase: Phase,
    planets: Vec<Planet>,
    selected: Option<PlanetId>,
    generation: u64,
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            planets: Vec::new(),
            selected: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    /// Bumped every time the planet list is replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply the outcome of a catalog fetch.
    ///
    /// An unreachable or failing service is logged and treated as an empty
    /// catalog. Malformed or invalid data moves to [`Phase::Failed`].
    /// Returns `true` when the planet list changed and the scene must be
    /// rebuilt.
    pub fn apply_fetch(&mut self, result: Result<Vec<Planet>, ClientError>) -> bool {
        match result {
            Ok(planets) => {
                info!("Fetched {} planets", planets.len());
                self.set_planets(planets);
                true
            }
            Err(e) if e.is_fetch_failure() => {
                error!("Catalog fetch failed: {e}");
                self.set_planets(Vec::new());
                true
            }
            Err(e) => {
                error!("Catalog data rejected: {e}");
                self.phase = Phase::Failed(e.to_string());
                self.planets.clear();
                self.selected = None;
                false
            }
        }
    }

    fn set_planets(&mut self, planets: Vec<Planet>) {
        self.planets = planets;
        self.selected = None;
        self.generation += 1;
        self.phase = Phase::Ready;
    }

    /// Select the planet with `id`, replacing any previous selection.
    /// Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: PlanetId) -> Option<&Planet> {
        let planet = self.planets.iter().find(|p| p.id == id)?;
        self.selected = Some(id);
        Some(planet)
    }

    /// Close the detail overlay. Returns whether a planet was selected.
    pub fn close_overlay(&mut self) -> bool {
        self.selected.take().is_some()
    }

    pub fn selected_id(&self) -> Option<PlanetId> {
        self.selected
    }

    pub fn selected_planet(&self) -> Option<&Planet> {
        let id = self.selected?;
        self.planets.iter().find(|p| p.id == id)
    }

    /// Window title for the current state; `base` when there is nothing to
    /// report.
    pub fn window_title(&self, base: &str) -> String {
        match &self.phase {
            Phase::Loading => LOADING_TITLE.to_string(),
            Phase::Failed(message) => format!("Error: {message}"),
            Phase::Ready => self
                .selected_planet()
                .map(detail_text)
                .unwrap_or_else(|| base.to_string()),
        }
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}
