use orrery_render::RenderContextError;

/// Errors that end a viewer session.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("graphics initialization failed: {0}")]
    Render(#[from] RenderContextError),
}
