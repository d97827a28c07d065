//! Random star placement in a cube around the origin, rendered as points.

use glam::Vec3;
use orrery_render::VertexPositionColor;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub position: Vec3,
    /// Linear RGB, already scaled by brightness.
    pub color: [f32; 3],
}

/// Deterministic star generator: the same seed always yields the same field.
pub struct StarfieldGenerator {
    seed: u64,
    star_count: u32,
    cube_size: f32,
}

impl StarfieldGenerator {
    /// `cube_size` is the side length of the cube centered at the origin.
    pub fn new(seed: u64, star_count: u32, cube_size: f32) -> Self {
        Self {
            seed,
            star_count,
            cube_size,
        }
    }

    pub fn generate(&self) -> Vec<Star> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let half = self.cube_size * 0.5;

        (0..self.star_count)
            .map(|_| {
                let position = Vec3::new(
                    (rng.random::<f32>() - 0.5) * self.cube_size,
                    (rng.random::<f32>() - 0.5) * self.cube_size,
                    (rng.random::<f32>() - 0.5) * self.cube_size,
                )
                .clamp(Vec3::splat(-half), Vec3::splat(half));

                // Mostly white stars with a faint warm-to-cool tint.
                let tint = blackbody_to_rgb(4000.0 + rng.random::<f32>() * 8000.0);
                let brightness = 0.5 + 0.5 * rng.random::<f32>();
                let color = tint.map(|c| (0.6 + 0.4 * c) * brightness);

                Star { position, color }
            })
            .collect()
    }
}

/// Point-list vertices for a set of stars.
pub fn star_vertices(stars: &[Star]) -> Vec<VertexPositionColor> {
    stars
        .iter()
        .map(|star| VertexPositionColor {
            position: star.position.to_array(),
            color: [star.color[0], star.color[1], star.color[2], 1.0],
        })
        .collect()
}

/// Approximate sRGB color of a blackbody at `temperature_k` Kelvin
/// (Tanner Helland fit of the Planckian locus).
pub fn blackbody_to_rgb(temperature_k: f32) -> [f32; 3] {
    let t = temperature_k / 100.0;
    let r = if t <= 66.0 {
        1.0
    } else {
        (329.698_73 * (t - 60.0).powf(-0.133_204_76) / 255.0).clamp(0.0, 1.0)
    };
    let g = if t <= 66.0 {
        (99.470_8 * t.ln() - 161.119_57).clamp(0.0, 255.0) / 255.0
    } else {
        (288.122_17 * (t - 60.0).powf(-0.075_514_85) / 255.0).clamp(0.0, 1.0)
    };
    let b = if t >= 66.0 {
        1.0
    } else if t <= 19.0 {
        0.0
    } else {
        (138.517_73 * (t - 10.0).ln() - 305.044_8).clamp(0.0, 255.0) / 255.0
    };
    [r, g, b]
}
