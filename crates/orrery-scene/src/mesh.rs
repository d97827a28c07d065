//! Unit icosphere shared by the sun and every planet body.

use std::collections::HashMap;

use glam::Vec3;
use orrery_render::VertexPositionNormal;

/// Subdivision level used by the viewer: 320 triangles per sphere.
pub const DEFAULT_SUBDIVISIONS: u32 = 2;

pub struct SphereMesh {
    pub vertices: Vec<VertexPositionNormal>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Build a unit icosphere by repeatedly splitting each face of an
/// icosahedron into four. Triangles wind counter-clockwise seen from outside.
pub fn icosphere(subdivisions: u32) -> SphereMesh {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let mut positions: Vec<Vec3> = [
        (-1.0, t, 0.0),
        (1.0, t, 0.0),
        (-1.0, -t, 0.0),
        (1.0, -t, 0.0),
        (0.0, -1.0, t),
        (0.0, 1.0, t),
        (0.0, -1.0, -t),
        (0.0, 1.0, -t),
        (t, 0.0, -1.0),
        (t, 0.0, 1.0),
        (-t, 0.0, -1.0),
        (-t, 0.0, 1.0),
    ]
    .into_iter()
    .map(|(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    let mut indices: Vec<u32> = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, //
        1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8, //
        3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, //
        4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
    ];

    for _ in 0..subdivisions {
        indices = split_faces(&mut positions, &indices);
    }

    let vertices = positions
        .iter()
        .map(|p| VertexPositionNormal {
            position: p.to_array(),
            normal: p.to_array(),
        })
        .collect();

    SphereMesh { vertices, indices }
}

/// Split every triangle at its edge midpoints, sharing midpoints between
/// neighbouring triangles.
fn split_faces(positions: &mut Vec<Vec3>, indices: &[u32]) -> Vec<u32> {
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
    let mut midpoint = |a: u32, b: u32, positions: &mut Vec<Vec3>| -> u32 {
        let key = (a.min(b), a.max(b));
        *midpoints.entry(key).or_insert_with(|| {
            let mid = (positions[a as usize] + positions[b as usize]).normalize();
            positions.push(mid);
            (positions.len() - 1) as u32
        })
    };

    let mut split = Vec::with_capacity(indices.len() * 4);
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let ab = midpoint(a, b, positions);
        let bc = midpoint(b, c, positions);
        let ca = midpoint(c, a, positions);
        split.extend_from_slice(&[a, ab, ca, b, bc, ab, c, ca, bc, ab, bc, ca]);
    }
    split
}
