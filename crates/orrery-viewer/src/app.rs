//! Window creation and event handling via winit.
//!
//! [`ViewerApp`] implements winit's [`ApplicationHandler`]: it owns the
//! window, the GPU context, the [`ViewerState`] and the [`SceneLifecycle`],
//! and drives the animation through redraw requests.

use std::sync::Arc;

use glam::{Vec2, Vec3};
use orrery_catalog::PlanetId;
use orrery_config::{CameraConfig, Config};
use orrery_input::{Click, KeyCommand, KeyboardState, MouseState};
use orrery_render::{
    Camera, OverlayVertex, RenderContext, SPACE_BLACK, SurfaceError,
    init_render_context_blocking, ndc_from_cursor,
};
use orrery_rpc::{CatalogClient, ClientError};
use orrery_scene::{Ray, Scene};
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::{MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::error::ViewerError;
use crate::fetch::{ViewerEvent, spawn_debug_print, spawn_fetch};
use crate::lifecycle::SceneLifecycle;
use crate::listeners::Listener;
use crate::overlay::{DetailPanel, OverlayClick, TextLabel, detail_text, spinner_vertices};
use crate::renderer::{FrameSnapshot, SceneRenderer};
use crate::state::{Phase, ViewerState};

/// Background once the session has failed.
const FAILED_BACKGROUND: wgpu::Color = wgpu::Color {
    r: 0.3,
    g: 0.02,
    b: 0.02,
    a: 1.0,
};

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ))
}

/// Perspective camera on the +Z axis looking at the sun.
pub fn camera_from_config(config: &CameraConfig, width: u32, height: u32) -> Camera {
    let mut camera = Camera::perspective(config.fov_y_degrees, 1.0, config.near, config.far);
    camera.set_aspect_ratio(width as f32, height as f32);
    camera.position = Vec3::new(0.0, 0.0, config.distance);
    camera.look_at(Vec3::ZERO);
    camera
}

/// Planet under the cursor, if any.
pub fn pick_planet(
    camera: &Camera,
    scene: &Scene,
    cursor: Vec2,
    width: u32,
    height: u32,
) -> Option<PlanetId> {
    let ndc = ndc_from_cursor(f64::from(cursor.x), f64::from(cursor.y), width, height);
    let (origin, direction) = camera.ray_through_ndc(ndc);
    scene.pick(&Ray::new(origin, direction))
}

/// The detail panel for the selected planet, if any.
fn detail_panel(state: &ViewerState, width: u32, height: u32, scale: f32) -> Option<DetailPanel> {
    let planet = state.selected_planet()?;
    Some(DetailPanel::centered(planet, width, height, scale))
}

/// Screen-space geometry and text for the current state: the spinner while
/// loading, the detail panel while a planet is selected.
fn overlay_contents(
    state: &ViewerState,
    elapsed_seconds: f64,
    (width, height): (u32, u32),
    scale: f32,
) -> (Vec<OverlayVertex>, Vec<TextLabel>) {
    if state.is_loading() {
        return (spinner_vertices(elapsed_seconds, width, height), Vec::new());
    }
    match detail_panel(state, width, height, scale) {
        Some(panel) => (panel.vertices(), panel.labels().to_vec()),
        None => (Vec::new(), Vec::new()),
    }
}

pub struct ViewerApp {
    config: Config,
    client: CatalogClient,
    proxy: EventLoopProxy<ViewerEvent>,
    /// Fixes star placement and planet colors for the session.
    seed: u64,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    renderer: Option<SceneRenderer>,
    camera: Camera,
    state: ViewerState,
    lifecycle: SceneLifecycle,
    mouse: MouseState,
    keyboard: KeyboardState,
    /// Error that ended the session, returned from [`run`].
    fatal: Option<ViewerError>,
}

impl ViewerApp {
    pub fn new(config: Config, proxy: EventLoopProxy<ViewerEvent>) -> Self {
        let seed = config.scene.seed.unwrap_or_else(rand::random);
        info!("Scene seed: {seed}");

        let client = CatalogClient::new(config.catalog.base_url());
        let camera = camera_from_config(&config.camera, config.window.width, config.window.height);

        Self {
            config,
            client,
            proxy,
            seed,
            window: None,
            gpu: None,
            renderer: None,
            camera,
            state: ViewerState::new(),
            lifecycle: SceneLifecycle::new(),
            mouse: MouseState::new(),
            keyboard: KeyboardState::new(),
            fatal: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let attributes = window_attributes_from_config(&self.config);
        let window = Arc::new(event_loop.create_window(attributes)?);
        let size = window.inner_size();
        info!(
            "Window created: {}x{} (scale: {:.2})",
            size.width,
            size.height,
            window.scale_factor()
        );

        let ctx = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        self.renderer = Some(SceneRenderer::new(&ctx));
        self.camera
            .set_aspect_ratio(size.width as f32, size.height as f32);
        self.gpu = Some(ctx);
        self.window = Some(window);
        Ok(())
    }

    fn start_fetch(&mut self) {
        // Drives the loading spinner until the scene replaces it.
        self.lifecycle.start_loading();
        if let Err(e) = spawn_fetch(self.client.clone(), self.proxy.clone()) {
            error!("Failed to start catalog fetch: {e}");
            let event = ViewerEvent::PlanetsFetched(Err(ClientError::Transport(e.to_string())));
            if self.proxy.send_event(event).is_err() {
                warn!("Event loop closed");
            }
        }
        self.refresh_title();
        self.request_frame();
    }

    fn request_debug_print(&self) {
        info!("Requesting debugPrint from {}", self.client.base_url());
        if let Err(e) = spawn_debug_print(self.client.clone(), self.proxy.clone()) {
            warn!("Failed to start debugPrint call: {e}");
        }
    }

    /// Replace the scene with one built from the current planet list.
    fn rebuild_scene(&mut self) {
        if let Some(renderer) = &mut self.renderer {
            renderer.release_scene();
        }
        let scene = self.lifecycle.rebuild(
            self.state.planets(),
            &self.config.scene,
            self.seed,
            self.state.generation(),
        );
        if let (Some(renderer), Some(gpu)) = (&mut self.renderer, &self.gpu) {
            renderer.upload_scene(&gpu.device, scene);
            let (width, height) = gpu.size();
            self.camera.set_aspect_ratio(width as f32, height as f32);
        }
        self.request_frame();
    }

    /// Drop the scene and its GPU data, clear its listeners and stop the
    /// animation loop.
    fn teardown(&mut self) {
        if self.lifecycle.teardown()
            && let Some(renderer) = &mut self.renderer
        {
            renderer.release_scene();
        }
    }

    fn scale_factor(&self) -> f32 {
        self.window
            .as_ref()
            .map_or(1.0, |window| window.scale_factor() as f32)
    }

    fn handle_click(&mut self, click: Click) {
        if click.button != MouseButton::Left || !self.lifecycle.is_listening(Listener::Click) {
            return;
        }
        let Some(gpu) = &self.gpu else {
            return;
        };
        let (width, height) = gpu.size();

        // The overlay is modal: clicks never pick while it is open.
        if let Some(panel) = detail_panel(&self.state, width, height, self.scale_factor()) {
            match panel.hit(click.position) {
                OverlayClick::Inside => {}
                OverlayClick::Close | OverlayClick::Outside => self.close_overlay(),
            }
            return;
        }

        let Some(scene) = self.lifecycle.scene() else {
            return;
        };
        let Some(id) = pick_planet(&self.camera, scene, click.position, width, height) else {
            debug!("Click at {:?} hit no planet", click.position);
            return;
        };
        if let Some(planet) = self.state.select(id) {
            info!("{}", detail_text(planet));
        }
        self.refresh_title();
        self.request_redraw();
    }

    fn close_overlay(&mut self) {
        if self.state.close_overlay() {
            debug!("Detail overlay closed");
            self.refresh_title();
            self.request_redraw();
        }
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
            let (width, height) = gpu.size();
            if let Some(renderer) = &mut self.renderer {
                renderer.resize(&gpu.device, width, height);
            }
        }
        if self.lifecycle.is_listening(Listener::Resize) {
            self.camera.set_aspect_ratio(width as f32, height as f32);
        }
        debug!("Window resized to {width}x{height}");
        self.request_redraw();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let elapsed = self
            .lifecycle
            .frame()
            .unwrap_or_else(|| self.lifecycle.animation().elapsed());
        let scale = self.scale_factor();

        let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer) else {
            return;
        };
        let (overlay, labels) = overlay_contents(&self.state, elapsed, gpu.size(), scale);
        let clear_color = match self.state.phase() {
            Phase::Failed(_) => FAILED_BACKGROUND,
            Phase::Loading | Phase::Ready => SPACE_BLACK,
        };
        let frame = FrameSnapshot {
            camera: &self.camera,
            scene: self.lifecycle.scene(),
            clear_color,
            overlay: &overlay,
            labels: &labels,
        };

        match renderer.render(gpu, &frame) {
            Ok(()) => {}
            Err(SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, shutting down");
                self.teardown();
                event_loop.exit();
                return;
            }
            Err(e) => warn!("Frame skipped: {e}"),
        }

        self.request_frame();
    }

    /// Ask for the next animation frame if the loop is running and no
    /// request is outstanding.
    fn request_frame(&mut self) {
        if self.lifecycle.animation_mut().request_frame()
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
    }

    /// One-off redraw after a state change.
    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn refresh_title(&self) {
        if let Some(window) = &self.window {
            window.set_title(&self.state.window_title(&self.config.window.title));
        }
    }
}

impl ApplicationHandler<ViewerEvent> for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match self.init_window(event_loop) {
            Ok(()) => self.start_fetch(),
            Err(e) => {
                error!("{e}");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: ViewerEvent) {
        match event {
            ViewerEvent::PlanetsFetched(result) => {
                if self.state.apply_fetch(result) {
                    self.rebuild_scene();
                } else {
                    self.teardown();
                }
                self.refresh_title();
                self.request_redraw();
            }
            ViewerEvent::DebugPrinted(Ok(())) => info!("Catalog service printed its planets"),
            ViewerEvent::DebugPrinted(Err(e)) => warn!("debugPrint failed: {e}"),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                self.teardown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.handle_resize(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => {
                match self.keyboard.process_event(&event) {
                    Some(KeyCommand::Dismiss) => self.close_overlay(),
                    Some(KeyCommand::DebugPrint) => self.request_debug_print(),
                    None => {}
                }
            }
            WindowEvent::Focused(false) => self.keyboard.clear(),
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(click) = self.mouse.on_button(button, state) {
                    self.handle_click(click);
                }
            }
            WindowEvent::CursorEntered { .. } => self.mouse.on_cursor_entered(),
            WindowEvent::CursorLeft { .. } => self.mouse.on_cursor_left(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}

/// Open the viewer window and block until it is closed.
///
/// Returns an error when the window or the graphics context cannot be
/// created.
#[instrument(skip(config))]
pub fn run(config: Config) -> Result<(), ViewerError> {
    let event_loop = EventLoop::<ViewerEvent>::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = ViewerApp::new(config, event_loop.create_proxy());
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
