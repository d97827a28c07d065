//! Catalog error types.

use crate::PlanetId;

/// Errors raised while building or loading a catalog snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Two records share the same identifier.
    #[error("duplicate planet id {0}")]
    DuplicateId(PlanetId),

    /// A record has an empty (or whitespace-only) display name.
    #[error("planet {0} has an empty name")]
    EmptyName(PlanetId),

    /// An optional numeric field is present but negative or not finite.
    #[error("planet {id} has invalid {field}: {value}")]
    InvalidValue {
        id: PlanetId,
        field: &'static str,
        value: f64,
    },

    /// Failed to read a catalog file from disk.
    #[error("failed to read catalog: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to parse RON catalog content.
    #[error("failed to parse catalog: {0}")]
    ParseError(#[source] ron::error::SpannedError),
}
