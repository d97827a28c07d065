//! The planet record and its invariants.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Identifier of a planet, unique within a catalog snapshot.
pub type PlanetId = u64;

/// A single planetary body.
///
/// Serialized with camelCase field names; absent optional values travel as
/// `null` and mean "unknown", never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    /// Stable identifier.
    pub id: PlanetId,
    /// Display name. Never empty in a valid catalog.
    pub name: String,
    /// Orbital period in Earth days.
    #[serde(default)]
    pub orbital_period: Option<f64>,
    /// Surface gravity in m/s².
    #[serde(default)]
    pub gravity: Option<f64>,
}

impl Planet {
    /// Create a planet with both optional attributes known.
    pub fn new(id: PlanetId, name: impl Into<String>, orbital_period: f64, gravity: f64) -> Self {
        Self {
            id,
            name: name.into(),
            orbital_period: Some(orbital_period),
            gravity: Some(gravity),
        }
    }

    /// Create a planet whose optional attributes are unknown.
    pub fn with_unknown_attributes(id: PlanetId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            orbital_period: None,
            gravity: None,
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName(self.id));
        }
        for (field, value) in [
            ("orbitalPeriod", self.orbital_period),
            ("gravity", self.gravity),
        ] {
            if let Some(value) = value
                && (!value.is_finite() || value < 0.0)
            {
                return Err(CatalogError::InvalidValue {
                    id: self.id,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Check every catalog invariant over a snapshot of planets.
///
/// Used both when the service builds its catalog and when a viewer receives a
/// snapshot over the wire.
pub fn validate_planets(planets: &[Planet]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(planets.len());
    for planet in planets {
        if !seen.insert(planet.id) {
            return Err(CatalogError::DuplicateId(planet.id));
        }
        planet.validate()?;
    }
    Ok(())
}
