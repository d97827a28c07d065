//! Orbiting planet bodies and the circular orbit model.
//!
//! Orbits are circular and coplanar in the XZ plane. A body's orbit depends
//! only on its position in the fetched list: radius `base + spacing * index`
//! and angular speed `rate / (index + 1)`. Catalog attributes such as the
//! orbital period are display-only and do not affect motion.

use glam::Vec3;
use orrery_catalog::PlanetId;
use orrery_config::SceneConfig;
use orrery_render::SphereInstance;
use rand::Rng;

/// Parameters of the orbit model, taken from [`SceneConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitModel {
    pub base_radius: f32,
    pub spacing: f32,
    /// Radians per second of the innermost body.
    pub angular_rate: f64,
}

impl OrbitModel {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            base_radius: config.base_orbit_radius,
            spacing: config.orbit_spacing,
            angular_rate: config.angular_rate,
        }
    }
}

impl Default for OrbitModel {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

/// Orbit radius of the body at `index`.
pub fn orbit_radius(model: &OrbitModel, index: usize) -> f32 {
    model.base_radius + model.spacing * index as f32
}

/// Orbit angle in radians after `elapsed_seconds`.
pub fn orbit_angle(model: &OrbitModel, index: usize, elapsed_seconds: f64) -> f64 {
    elapsed_seconds * model.angular_rate / (index as f64 + 1.0)
}

/// Position on the orbit circle; `height` is carried through unchanged.
pub fn orbit_position(model: &OrbitModel, index: usize, elapsed_seconds: f64, height: f32) -> Vec3 {
    let radius = orbit_radius(model, index);
    let angle = orbit_angle(model, index, elapsed_seconds);
    Vec3::new(
        (angle.cos() as f32) * radius,
        height,
        (angle.sin() as f32) * radius,
    )
}

/// A renderable sphere standing for one catalog planet.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetBody {
    /// Picking resolves through this id, never through `index`.
    pub planet_id: PlanetId,
    /// Position in the fetched planet list.
    pub index: usize,
    pub radius: f32,
    pub color: [f32; 3],
    pub position: Vec3,
}

impl PlanetBody {
    /// Place the body at its starting point on the +X axis.
    pub fn new(
        planet_id: PlanetId,
        index: usize,
        radius: f32,
        color: [f32; 3],
        model: &OrbitModel,
    ) -> Self {
        Self {
            planet_id,
            index,
            radius,
            color,
            position: orbit_position(model, index, 0.0, 0.0),
        }
    }

    /// Move along the orbit to where it is after `elapsed_seconds`.
    pub fn advance(&mut self, model: &OrbitModel, elapsed_seconds: f64) {
        self.position = orbit_position(model, self.index, elapsed_seconds, self.position.y);
    }

    pub fn instance(&self) -> SphereInstance {
        SphereInstance {
            center: self.position.to_array(),
            radius: self.radius,
            color: self.color,
            emissive: 0.0,
        }
    }
}

/// Random display color, kept away from black so bodies stay visible.
pub fn random_color(rng: &mut impl Rng) -> [f32; 3] {
    [
        0.25 + 0.75 * rng.random::<f32>(),
        0.25 + 0.75 * rng.random::<f32>(),
        0.25 + 0.75 * rng.random::<f32>(),
    ]
}
