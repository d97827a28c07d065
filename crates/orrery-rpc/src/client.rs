//! Blocking client for the catalog RPC endpoints.

use orrery_catalog::{CatalogError, Planet, PlanetId, validate_planets};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{DEBUG_PRINT_PATH, GET_PLANET_INFO_PATH, GET_PLANETS_PATH};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("catalog service unreachable: {0}")]
    Transport(String),
    #[error("catalog service returned HTTP {code} for {url}")]
    Status { code: u16, url: String },
    #[error("malformed catalog response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("invalid catalog data: {0}")]
    Invalid(#[from] CatalogError),
}

impl ClientError {
    /// True when the service could not be reached or refused the call, as
    /// opposed to answering with data that cannot be trusted.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}

impl From<ureq::Error> for ClientError {
    fn from(error: ureq::Error) -> Self {
        match error {
            ureq::Error::Status(code, response) => Self::Status {
                code,
                url: response.get_url().to_string(),
            },
            ureq::Error::Transport(transport) => Self::Transport(transport.to_string()),
        }
    }
}

/// Client for a running catalog service.
///
/// Calls block the current thread; the viewer runs them off the event loop.
/// No timeout or retry is applied.
#[derive(Clone)]
pub struct CatalogClient {
    agent: ureq::Agent,
    base_url: String,
}

impl CatalogClient {
    /// `base_url` is the scheme and authority, e.g. `http://127.0.0.1:4943`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every planet in the catalog.
    ///
    /// The returned list is checked for unique ids and sane attribute values;
    /// a response that fails the check is reported as [`ClientError::Invalid`].
    pub fn get_planets(&self) -> Result<Vec<Planet>, ClientError> {
        let planets: Vec<Planet> = self.get_json(GET_PLANETS_PATH)?;
        validate_planets(&planets)?;
        debug!("Fetched {} planets from {}", planets.len(), self.base_url);
        Ok(planets)
    }

    /// Fetch one planet; `Ok(None)` when the catalog has no planet with `id`.
    pub fn get_planet_info(&self, id: PlanetId) -> Result<Option<Planet>, ClientError> {
        let planet: Option<Planet> = self.get_json(&format!("{GET_PLANET_INFO_PATH}{id}"))?;
        if let Some(ref planet) = planet {
            validate_planets(std::slice::from_ref(planet))?;
        }
        Ok(planet)
    }

    /// Ask the service to log its planet list.
    pub fn debug_print(&self) -> Result<(), ClientError> {
        self.agent
            .post(&self.url(DEBUG_PRINT_PATH))
            .send_string("")?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let body = self
            .agent
            .get(&self.url(path))
            .call()?
            .into_string()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(ClientError::Decode)
    }
}
