//! Ray picking against planet bodies.

use glam::Vec3;
use orrery_catalog::PlanetId;

use crate::bodies::PlanetBody;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    /// The direction is normalized here.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Distance along `ray` to the first point on the sphere in front of the
/// origin, or `None` when the ray misses or the sphere is behind it.
///
/// A ray starting inside the sphere reports the exit point.
pub fn ray_sphere_intersect(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let (t_near, t_far) = (-b - sqrt_disc, -b + sqrt_disc);
    if t_near >= 0.0 {
        Some(t_near)
    } else if t_far >= 0.0 {
        Some(t_far)
    } else {
        None
    }
}

/// Id of the planet whose body the ray hits first.
pub fn pick_nearest<'a>(
    ray: &Ray,
    bodies: impl IntoIterator<Item = &'a PlanetBody>,
) -> Option<PlanetId> {
    bodies
        .into_iter()
        .filter_map(|body| {
            ray_sphere_intersect(ray, body.position, body.radius).map(|t| (t, body.planet_id))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::OrbitModel;

    fn body(planet_id: PlanetId, position: Vec3) -> PlanetBody {
        let mut body = PlanetBody::new(planet_id, 0, 1.0, [1.0; 3], &OrbitModel::default());
        body.position = position;
        body
    }

    #[test]
    fn test_ray_hits_sphere_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::NEG_Z);
        let t = ray_sphere_intersect(&ray, Vec3::ZERO, 5.0).unwrap();
        assert!((t - 45.0).abs() < 1e-4);
        assert!((ray.at(t) - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_ray_misses_sphere() {
        let ray = Ray::new(Vec3::new(0.0, 10.0, 50.0), Vec3::NEG_Z);
        assert_eq!(ray_sphere_intersect(&ray, Vec3::ZERO, 5.0), None);
    }

    #[test]
    fn test_sphere_behind_ray() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::Z);
        assert_eq!(ray_sphere_intersect(&ray, Vec3::ZERO, 5.0), None);
    }

    #[test]
    fn test_origin_inside_sphere_reports_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray_sphere_intersect(&ray, Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_direction_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(ray.direction, Vec3::NEG_Z);
    }

    #[test]
    fn test_pick_nearest_prefers_closer_body() {
        let bodies = [
            body(8, Vec3::new(0.0, 0.0, -20.0)),
            body(3, Vec3::new(0.0, 0.0, 10.0)),
            body(5, Vec3::new(0.0, 0.0, 0.0)),
        ];
        let ray = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::NEG_Z);
        assert_eq!(pick_nearest(&ray, &bodies), Some(3));
    }

    #[test]
    fn test_pick_resolves_by_id_not_index() {
        let bodies = [
            body(42, Vec3::new(30.0, 0.0, 0.0)),
            body(7, Vec3::new(15.0, 0.0, 0.0)),
        ];
        let ray = Ray::new(Vec3::new(15.0, 0.0, 50.0), Vec3::NEG_Z);
        assert_eq!(pick_nearest(&ray, &bodies), Some(7));
    }

    #[test]
    fn test_pick_miss_is_none() {
        let bodies = [body(1, Vec3::new(10.0, 0.0, 0.0))];
        let ray = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::NEG_Z);
        assert_eq!(pick_nearest(&ray, &bodies), None);
    }

    #[test]
    fn test_pick_empty_scene() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::NEG_Z);
        assert_eq!(pick_nearest(&ray, &[]), None);
    }
}
