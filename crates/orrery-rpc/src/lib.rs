//! RPC boundary between the orbital viewer and the planet catalog service.
//!
//! The service is exposed as JSON over HTTP. Query calls (`getPlanets`,
//! `getPlanetInfo`) are `GET` requests and cacheable; the update call
//! (`debugPrint`) is a `POST`. [`CatalogServer`] serves any
//! [`PlanetCatalog`](orrery_catalog::PlanetCatalog) on a background thread and
//! [`CatalogClient`] is the blocking client used by the viewer.

pub mod client;
pub mod server;

pub use client::{CatalogClient, ClientError};
pub use server::{CatalogServer, ServerError};


/// Path of the `getPlanets` query.
pub const GET_PLANETS_PATH: &str = "/rpc/getPlanets";
/// Path prefix of the `getPlanetInfo` query; the planet id follows.
pub const GET_PLANET_INFO_PATH: &str = "/rpc/getPlanetInfo/";
/// Path of the `debugPrint` update call.
pub const DEBUG_PRINT_PATH: &str = "/rpc/debugPrint";
/// Path of the liveness probe.
pub const HEALTH_PATH: &str = "/health";
