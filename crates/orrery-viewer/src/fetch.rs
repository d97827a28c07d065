//! Catalog calls made off the event loop thread.
//!
//! Each call runs on its own named thread and posts its result back as a
//! [`ViewerEvent`]. No timeout or retry is applied.

use std::io;
use std::thread::{self, JoinHandle};

use orrery_catalog::Planet;
use orrery_rpc::{CatalogClient, ClientError};
use tracing::{debug, info, warn};
use winit::event_loop::EventLoopProxy;

/// Events delivered to the viewer's event loop from worker threads.
#[derive(Debug)]
pub enum ViewerEvent {
    PlanetsFetched(Result<Vec<Planet>, ClientError>),
    DebugPrinted(Result<(), ClientError>),
}

/// Destination for worker results.
pub trait EventSink: Send + 'static {
    /// Returns `false` when the receiver is gone.
    fn send(&self, event: ViewerEvent) -> bool;
}

impl EventSink for EventLoopProxy<ViewerEvent> {
    fn send(&self, event: ViewerEvent) -> bool {
        self.send_event(event).is_ok()
    }
}

impl EventSink for std::sync::mpsc::Sender<ViewerEvent> {
    fn send(&self, event: ViewerEvent) -> bool {
        std::sync::mpsc::Sender::send(self, event).is_ok()
    }
}

/// Fetch the planet list on a background thread.
pub fn spawn_fetch(client: CatalogClient, sink: impl EventSink) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("catalog-fetch".into())
        .spawn(move || {
            info!("Fetching planets from {}", client.base_url());
            let result = client.get_planets();
            if !sink.send(ViewerEvent::PlanetsFetched(result)) {
                warn!("Viewer closed before the planet list arrived");
            }
        })
}

/// Ask the service to log its catalog, on a background thread.
pub fn spawn_debug_print(
    client: CatalogClient,
    sink: impl EventSink,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("catalog-debug".into())
        .spawn(move || {
            debug!("Requesting debugPrint from {}", client.base_url());
            let result = client.debug_print();
            if !sink.send(ViewerEvent::DebugPrinted(result)) {
                debug!("Viewer closed before debugPrint completed");
            }
        })
}
