//! The orbital scene assembled from a planet list.

use orrery_catalog::{Planet, PlanetId};
use orrery_config::SceneConfig;
use orrery_render::{SphereInstance, VertexPositionColor};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::bodies::{OrbitModel, PlanetBody, random_color};
use crate::picking::{Ray, pick_nearest};
use crate::starfield::{Star, StarfieldGenerator, star_vertices};
use crate::sun::Sun;

/// Starfield, sun and one body per planet, in fetched-list order.
///
/// A scene is immutable apart from body positions; a changed planet list
/// means building a new scene with the next generation number.
#[derive(Debug, Clone)]
pub struct Scene {
    pub stars: Vec<Star>,
    pub sun: Sun,
    pub bodies: Vec<PlanetBody>,
    orbit: OrbitModel,
    generation: u64,
}

impl Scene {
    /// Build the scene for `planets`. `seed` fixes star placement and body
    /// colors.
    pub fn build(planets: &[Planet], config: &SceneConfig, seed: u64, generation: u64) -> Self {
        let orbit = OrbitModel::from_config(config);
        let stars =
            StarfieldGenerator::new(seed, config.star_count, config.star_cube_size).generate();

        let mut color_rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
        let bodies = planets
            .iter()
            .enumerate()
            .map(|(index, planet)| {
                PlanetBody::new(
                    planet.id,
                    index,
                    config.planet_radius,
                    random_color(&mut color_rng),
                    &orbit,
                )
            })
            .collect::<Vec<_>>();

        log::info!(
            "Built scene generation {}: {} stars, {} planets",
            generation,
            stars.len(),
            bodies.len()
        );

        Self {
            stars,
            sun: Sun::new(config.sun_radius),
            bodies,
            orbit,
            generation,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn planet_count(&self) -> usize {
        self.bodies.len()
    }

    /// Move every body to its orbit position after `elapsed_seconds`.
    pub fn update(&mut self, elapsed_seconds: f64) {
        for body in &mut self.bodies {
            body.advance(&self.orbit, elapsed_seconds);
        }
    }

    /// Planet under `ray`. The sun and stars are not pickable.
    pub fn pick(&self, ray: &Ray) -> Option<PlanetId> {
        pick_nearest(ray, &self.bodies)
    }

    /// Sun first, then the bodies.
    pub fn sphere_instances(&self) -> Vec<SphereInstance> {
        std::iter::once(self.sun.instance())
            .chain(self.bodies.iter().map(PlanetBody::instance))
            .collect()
    }

    pub fn star_vertices(&self) -> Vec<VertexPositionColor> {
        star_vertices(&self.stars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn inner_planets() -> Vec<Planet> {
        vec![
            Planet::new(1, "Mercury", 88.0, 3.7),
            Planet::new(2, "Venus", 225.0, 8.87),
        ]
    }

    fn small_config() -> SceneConfig {
        SceneConfig {
            star_count: 200,
            ..SceneConfig::default()
        }
    }

    #[test]
    fn test_default_scene_has_ten_thousand_stars() {
        let scene = Scene::build(&inner_planets(), &SceneConfig::default(), 1, 0);
        assert_eq!(scene.stars.len(), 10_000);
    }

    #[test]
    fn test_one_body_per_planet_tagged_by_id() {
        let scene = Scene::build(&inner_planets(), &small_config(), 1, 0);
        assert_eq!(scene.planet_count(), 2);
        let ids: Vec<PlanetId> = scene.bodies.iter().map(|b| b.planet_id).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn test_initial_positions_along_x() {
        let scene = Scene::build(&inner_planets(), &small_config(), 1, 0);
        assert_eq!(scene.bodies[0].position, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(scene.bodies[1].position, Vec3::new(15.0, 0.0, 0.0));
        assert!(scene.bodies.iter().all(|b| b.radius == 1.0));
    }

    #[test]
    fn test_sun_present_and_first_instance() {
        let scene = Scene::build(&inner_planets(), &small_config(), 1, 0);
        let instances = scene.sphere_instances();
        assert_eq!(instances.len(), 3);
        assert_eq!(instances[0].radius, 5.0);
        assert_eq!(instances[0].center, [0.0, 0.0, 0.0]);
        assert_eq!(instances[0].emissive, 1.0);
    }

    #[test]
    fn test_empty_planet_list_keeps_sun_and_stars() {
        let scene = Scene::build(&[], &small_config(), 1, 0);
        assert_eq!(scene.planet_count(), 0);
        assert_eq!(scene.stars.len(), 200);
        assert_eq!(scene.sphere_instances().len(), 1);
    }

    #[test]
    fn test_update_moves_bodies_at_list_rate() {
        let mut scene = Scene::build(&inner_planets(), &small_config(), 1, 0);
        scene.update(std::f64::consts::FRAC_PI_2);
        // Mercury turns a quarter, Venus an eighth.
        assert!((scene.bodies[0].position - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
        let venus = scene.bodies[1].position;
        let expected = Vec3::new(
            15.0 * std::f32::consts::FRAC_PI_4.cos(),
            0.0,
            15.0 * std::f32::consts::FRAC_PI_4.sin(),
        );
        assert!((venus - expected).length() < 1e-4);
    }

    #[test]
    fn test_pick_venus_from_camera() {
        let scene = Scene::build(&inner_planets(), &small_config(), 1, 0);
        let origin = Vec3::new(0.0, 0.0, 50.0);
        let ray = Ray::new(origin, Vec3::new(15.0, 0.0, 0.0) - origin);
        assert_eq!(scene.pick(&ray), Some(2));
    }

    #[test]
    fn test_sun_not_pickable() {
        let scene = Scene::build(&inner_planets(), &small_config(), 1, 0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::NEG_Z);
        assert_eq!(scene.pick(&ray), None);
    }

    #[test]
    fn test_same_seed_same_colors() {
        let a = Scene::build(&inner_planets(), &small_config(), 9, 0);
        let b = Scene::build(&inner_planets(), &small_config(), 9, 1);
        assert_eq!(a.bodies, b.bodies);
        assert_eq!(b.generation(), 1);
    }

    #[test]
    fn test_star_vertices_match_stars() {
        let scene = Scene::build(&[], &small_config(), 4, 0);
        assert_eq!(scene.star_vertices().len(), scene.stars.len());
    }
}
