//! HTTP server exposing a planet catalog.

use std::io::Cursor;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use orrery_catalog::{PlanetCatalog, PlanetId};
use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, Server};
use tracing::{debug, info, warn};

use crate::{DEBUG_PRINT_PATH, GET_PLANET_INFO_PATH, GET_PLANETS_PATH, HEALTH_PATH};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind to {address}:{port}: {error}")]
    BindError {
        address: String,
        port: u16,
        error: String,
    },
    #[error("failed to spawn server thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Query responses may be cached by clients for this long.
const QUERY_CACHE_CONTROL: &[u8] = b"public, max-age=60";

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    planets: usize,
}

/// HTTP server for the catalog RPC endpoints.
/// Serves requests on a background thread; the catalog is shared immutably.
pub struct CatalogServer {
    address: String,
    port: u16,
    actual_port: Option<u16>,
    handle: Option<JoinHandle<()>>,
}

impl CatalogServer {
    /// Create a server that will bind to `address:port`. Port 0 asks the OS
    /// for a free port; see [`actual_port`](Self::actual_port).
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
            actual_port: None,
            handle: None,
        }
    }

    /// Bind the socket and start serving `catalog` on a background thread.
    pub fn start(&mut self, catalog: Arc<dyn PlanetCatalog>) -> Result<(), ServerError> {
        let server = Server::http(format!("{}:{}", self.address, self.port)).map_err(|e| {
            ServerError::BindError {
                address: self.address.clone(),
                port: self.port,
                error: e.to_string(),
            }
        })?;

        let actual_port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .unwrap_or(self.port);
        self.actual_port = Some(actual_port);

        let handle = thread::Builder::new()
            .name("catalog-rpc".to_string())
            .spawn(move || Self::run_server(server, catalog))
            .map_err(ServerError::Spawn)?;

        info!("Catalog service listening on {}:{}", self.address, actual_port);
        self.handle = Some(handle);
        Ok(())
    }

    /// Block the calling thread until the serving thread exits.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("Catalog server thread panicked");
        }
    }

    pub fn stop(&mut self) {
        // tiny_http has no graceful shutdown; the thread may be blocked in
        // incoming_requests(), so detach it instead of joining.
        if let Some(handle) = self.handle.take() {
            std::mem::forget(handle);
        }
    }

    pub fn actual_port(&self) -> u16 {
        self.actual_port.unwrap_or(self.port)
    }

    fn run_server(server: Server, catalog: Arc<dyn PlanetCatalog>) {
        for request in server.incoming_requests() {
            if let Err(e) = Self::handle_request(request, catalog.as_ref()) {
                warn!("Catalog server error: {}", e);
            }
        }
    }

    fn handle_request(
        request: Request,
        catalog: &dyn PlanetCatalog,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let path = request.url().split('?').next().unwrap_or_default().to_string();
        debug!("{} {}", request.method(), path);

        let response = match (request.method(), path.as_str()) {
            (&Method::Get, GET_PLANETS_PATH) => {
                let json = serde_json::to_string(&catalog.get_planets())?;
                query_response(json)
            }
            (&Method::Get, p) if p.starts_with(GET_PLANET_INFO_PATH) => {
                match parse_planet_id(&p[GET_PLANET_INFO_PATH.len()..]) {
                    Some(id) => {
                        let json = serde_json::to_string(&catalog.get_planet_info(id))?;
                        query_response(json)
                    }
                    None => Response::from_string("planet id must be a natural number")
                        .with_status_code(400),
                }
            }
            (&Method::Post, DEBUG_PRINT_PATH) => {
                catalog.debug_print();
                Response::from_string("").with_status_code(204)
            }
            (&Method::Get, HEALTH_PATH) => {
                let json = serde_json::to_string(&HealthResponse {
                    status: "ok",
                    planets: catalog.get_planets().len(),
                })?;
                json_response(json)
            }
            _ => Response::from_string("Not Found").with_status_code(404),
        };

        request.respond(response)?;
        Ok(())
    }
}

impl Drop for CatalogServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn parse_planet_id(segment: &str) -> Option<PlanetId> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

fn with_header(
    response: Response<Cursor<Vec<u8>>>,
    name: &[u8],
    value: &[u8],
) -> Response<Cursor<Vec<u8>>> {
    match Header::from_bytes(name, value) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

fn json_response(json: String) -> Response<Cursor<Vec<u8>>> {
    with_header(
        Response::from_string(json),
        b"Content-Type",
        b"application/json",
    )
}

fn query_response(json: String) -> Response<Cursor<Vec<u8>>> {
    with_header(json_response(json), b"Cache-Control", QUERY_CACHE_CONTROL)
}
