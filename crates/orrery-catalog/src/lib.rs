//! Planet catalog for Orrery.
//!
//! Holds the fixed collection of [`Planet`] records served to viewers, validates
//! catalog invariants (unique ids, non-empty names, finite non-negative optional
//! values), and defines the [`PlanetCatalog`] service trait with its three
//! read-only operations.

mod catalog;
mod dataset;
mod error;
mod planet;

pub use catalog::{Catalog, PlanetCatalog};
pub use dataset::solar_system;
pub use error::CatalogError;
pub use planet::{Planet, PlanetId, validate_planets};
