//! The catalog snapshot and the read-only service operations over it.

use std::path::Path;

use crate::{CatalogError, Planet, PlanetId, solar_system, validate_planets};

/// The three operations every planet catalog service answers.
///
/// All operations are queries except [`debug_print`](Self::debug_print),
/// and none of them mutate the catalog.
pub trait PlanetCatalog: Send + Sync {
    /// Every planet, in catalog order.
    fn get_planets(&self) -> Vec<Planet>;

    /// The planet with the given id, or `None` when no such planet exists.
    fn get_planet_info(&self, id: PlanetId) -> Option<Planet>;

    /// Emit a diagnostic line to the operational log.
    fn debug_print(&self);
}

/// An immutable, validated snapshot of planets.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    planets: Vec<Planet>,
}

impl Catalog {
    /// Build a catalog, checking id uniqueness and value invariants.
    pub fn new(planets: Vec<Planet>) -> Result<Self, CatalogError> {
        validate_planets(&planets)?;
        Ok(Self { planets })
    }

    /// The built-in solar system catalog.
    pub fn builtin() -> Self {
        Self {
            planets: solar_system(),
        }
    }

    /// Load a catalog from a RON file containing a list of planets.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(CatalogError::ReadError)?;
        let planets: Vec<Planet> = ron::from_str(&contents).map_err(CatalogError::ParseError)?;
        let catalog = Self::new(planets)?;
        tracing::info!("Loaded {} planets from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Number of planets in the catalog.
    pub fn len(&self) -> usize {
        self.planets.len()
    }

    /// Whether the catalog holds no planets.
    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    /// Borrow the planets in catalog order.
    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }
}

impl PlanetCatalog for Catalog {
    fn get_planets(&self) -> Vec<Planet> {
        self.planets.clone()
    }

    fn get_planet_info(&self, id: PlanetId) -> Option<Planet> {
        self.planets.iter().find(|p| p.id == id).cloned()
    }

    fn debug_print(&self) {
        let names: Vec<&str> = self.planets.iter().map(|p| p.name.as_str()).collect();
        tracing::info!(planets = self.planets.len(), "Catalog debug print: {names:?}");
    }
}
