//! The central star: a fixed, self-lit sphere at the origin.

use glam::Vec3;
use orrery_render::SphereInstance;

/// Pure yellow.
pub const SUN_COLOR: [f32; 3] = [1.0, 1.0, 0.0];

/// Never moves and is never pickable.
#[derive(Clone, Debug, PartialEq)]
pub struct Sun {
    pub position: Vec3,
    pub radius: f32,
    pub color: [f32; 3],
}

impl Sun {
    pub fn new(radius: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            radius,
            color: SUN_COLOR,
        }
    }

    pub fn instance(&self) -> SphereInstance {
        SphereInstance {
            center: self.position.to_array(),
            radius: self.radius,
            color: self.color,
            emissive: 1.0,
        }
    }
}
