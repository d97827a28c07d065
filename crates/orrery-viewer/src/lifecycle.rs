//! Scene ownership without a window.
//!
//! [`SceneLifecycle`] holds the current [`Scene`] together with the listeners
//! and the animation loop that live exactly as long as it does. Building a
//! scene tears the previous one down first, so listeners are never
//! registered twice and at most one animation loop runs.

use orrery_catalog::Planet;
use orrery_config::SceneConfig;
use orrery_scene::Scene;
use tracing::debug;

use crate::animation::AnimationLoop;
use crate::listeners::{Listener, ListenerRegistry};

#[derive(Debug, Default)]
pub struct SceneLifecycle {
    scene: Option<Scene>,
    listeners: ListenerRegistry,
    animation: AnimationLoop,
}

impl SceneLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the animation loop without a scene, for the loading spinner.
    pub fn start_loading(&mut self) {
        self.teardown();
        self.animation.start();
    }

    /// Replace the current scene with one built from `planets`, register its
    /// listeners and restart the animation clock.
    pub fn rebuild(
        &mut self,
        planets: &[Planet],
        config: &SceneConfig,
        seed: u64,
        generation: u64,
    ) -> &Scene {
        self.teardown();

        let scene = Scene::build(planets, config, seed, generation);
        self.listeners.register(Listener::Resize);
        self.listeners.register(Listener::Click);
        self.animation.start();
        self.scene.insert(scene)
    }

    /// Drop the scene, clear its listeners and stop the animation loop.
    /// Returns whether a scene was dropped.
    pub fn teardown(&mut self) -> bool {
        let removed = self.listeners.clear();
        self.animation.stop();
        let had_scene = self.scene.take().is_some();
        if had_scene {
            debug!("Scene torn down, {removed} listeners removed");
        }
        had_scene
    }

    /// Run one animation frame and move the planets. Returns the seconds
    /// since the loop started, or `None` while it is stopped.
    pub fn frame(&mut self) -> Option<f64> {
        let elapsed = self.animation.frame()?;
        if let Some(scene) = &mut self.scene {
            scene.update(elapsed);
        }
        Some(elapsed)
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn is_listening(&self, listener: Listener) -> bool {
        self.listeners.is_listening(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn animation(&self) -> &AnimationLoop {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut AnimationLoop {
        &mut self.animation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Phase, ViewerState};
    use orrery_catalog::{Catalog, CatalogError};
    use orrery_rpc::ClientError;

    fn small_config() -> SceneConfig {
        SceneConfig {
            star_count: 200,
            ..SceneConfig::default()
        }
    }

    /// Feed a fetch result through the state and into the lifecycle the way
    /// the viewer does.
    fn apply(
        state: &mut ViewerState,
        lifecycle: &mut SceneLifecycle,
        result: Result<Vec<Planet>, ClientError>,
    ) {
        if state.apply_fetch(result) {
            lifecycle.rebuild(state.planets(), &small_config(), 7, state.generation());
        } else {
            lifecycle.teardown();
        }
    }

    #[test]
    fn test_new_lifecycle_is_idle() {
        let lifecycle = SceneLifecycle::new();
        assert!(lifecycle.scene().is_none());
        assert_eq!(lifecycle.listener_count(), 0);
        assert!(!lifecycle.animation().is_running());
    }

    #[test]
    fn test_rebuild_registers_listeners_and_starts_loop() {
        let mut lifecycle = SceneLifecycle::new();
        let planets = Catalog::builtin().planets().to_vec();
        let scene = lifecycle.rebuild(&planets, &small_config(), 7, 1);
        assert_eq!(scene.planet_count(), 8);

        assert!(lifecycle.is_listening(Listener::Resize));
        assert!(lifecycle.is_listening(Listener::Click));
        assert!(lifecycle.animation().is_running());
    }

    #[test]
    fn test_rebuild_does_not_double_register() {
        let mut lifecycle = SceneLifecycle::new();
        let planets = Catalog::builtin().planets().to_vec();
        lifecycle.rebuild(&planets, &small_config(), 7, 1);
        lifecycle.animation_mut().request_frame();
        lifecycle.rebuild(&planets, &small_config(), 7, 2);

        assert_eq!(lifecycle.listener_count(), 2);
        assert_eq!(lifecycle.scene().map(Scene::generation), Some(2));
        // The old loop's request died with it.
        assert!(!lifecycle.animation().is_frame_pending());
        assert_eq!(lifecycle.animation().frame_count(), 0);
    }

    #[test]
    fn test_teardown_clears_listeners_and_stops_loop() {
        let mut lifecycle = SceneLifecycle::new();
        let planets = Catalog::builtin().planets().to_vec();
        lifecycle.rebuild(&planets, &small_config(), 7, 1);
        lifecycle.animation_mut().request_frame();

        assert!(lifecycle.teardown());
        assert!(lifecycle.scene().is_none());
        assert_eq!(lifecycle.listener_count(), 0);
        assert!(!lifecycle.animation().is_running());
        assert!(!lifecycle.animation_mut().request_frame());
        assert_eq!(lifecycle.frame(), None);

        // A second teardown has nothing left to drop.
        assert!(!lifecycle.teardown());
    }

    #[test]
    fn test_loading_runs_loop_without_listeners() {
        let mut lifecycle = SceneLifecycle::new();
        lifecycle.start_loading();
        assert!(lifecycle.animation().is_running());
        assert_eq!(lifecycle.listener_count(), 0);
        assert!(lifecycle.frame().is_some());
        assert!(lifecycle.scene().is_none());
    }

    #[test]
    fn test_frame_moves_planets() {
        let mut lifecycle = SceneLifecycle::new();
        let planets = Catalog::builtin().planets().to_vec();
        lifecycle.rebuild(&planets, &small_config(), 7, 1);
        let before = lifecycle.scene().map(Scene::sphere_instances);
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert!(lifecycle.frame().is_some_and(|t| t > 0.0));
        assert_ne!(lifecycle.scene().map(Scene::sphere_instances), before);
    }

    #[test]
    fn test_fetch_failure_builds_sun_and_stars_only() {
        let mut state = ViewerState::new();
        let mut lifecycle = SceneLifecycle::new();
        lifecycle.start_loading();
        apply(
            &mut state,
            &mut lifecycle,
            Err(ClientError::Transport("connection refused".into())),
        );

        let scene = lifecycle.scene().unwrap();
        assert_eq!(state.phase(), &Phase::Ready);
        assert_eq!(scene.planet_count(), 0);
        // The sun is the only sphere.
        assert_eq!(scene.sphere_instances().len(), 1);
        assert_eq!(scene.stars.len(), 200);
        assert!(!scene.star_vertices().is_empty());
        assert!(lifecycle.is_listening(Listener::Click));
        assert!(lifecycle.animation().is_running());
    }

    #[test]
    fn test_invalid_data_leaves_nothing_running() {
        let mut state = ViewerState::new();
        let mut lifecycle = SceneLifecycle::new();
        lifecycle.start_loading();
        apply(
            &mut state,
            &mut lifecycle,
            Err(ClientError::Invalid(CatalogError::DuplicateId(3))),
        );

        assert!(matches!(state.phase(), Phase::Failed(_)));
        assert!(lifecycle.scene().is_none());
        assert_eq!(lifecycle.listener_count(), 0);
        assert!(!lifecycle.animation().is_running());
    }

    #[test]
    fn test_refetch_after_success_replaces_scene() {
        let mut state = ViewerState::new();
        let mut lifecycle = SceneLifecycle::new();
        let planets = Catalog::builtin().planets().to_vec();
        apply(&mut state, &mut lifecycle, Ok(planets.clone()));
        apply(&mut state, &mut lifecycle, Ok(planets[..3].to_vec()));

        let scene = lifecycle.scene().unwrap();
        assert_eq!(scene.planet_count(), 3);
        assert_eq!(scene.generation(), 2);
        assert_eq!(lifecycle.listener_count(), 2);
    }
}
