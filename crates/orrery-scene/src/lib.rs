//! CPU-side orbital scene: a random starfield, the sun, one orbiting body per
//! catalog planet, the shared sphere mesh, and ray picking against the
//! planet bodies.

pub mod bodies;
pub mod mesh;
pub mod picking;
pub mod scene;
pub mod starfield;
pub mod sun;

pub use bodies::{OrbitModel, PlanetBody, orbit_angle, orbit_position, orbit_radius, random_color};
pub use mesh::{DEFAULT_SUBDIVISIONS, SphereMesh, icosphere};
pub use picking::{Ray, pick_nearest, ray_sphere_intersect};
pub use scene::Scene;
pub use starfield::{Star, StarfieldGenerator, blackbody_to_rgb, star_vertices};
pub use sun::Sun;
