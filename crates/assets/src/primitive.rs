use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::types::Vertex;

/// Unit cube centred on the origin, four vertices per face so normals stay flat.
pub fn cube() -> (Vec<Vertex>, Vec<u32>) {
    // (normal, u axis, v axis) per face; corners are normal/2 +- u/2 +- v/2.
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];
    let corners = [
        (Vec2::new(-0.5, -0.5), Vec2::new(0.0, 1.0)),
        (Vec2::new(0.5, -0.5), Vec2::new(1.0, 1.0)),
        (Vec2::new(0.5, 0.5), Vec2::new(1.0, 0.0)),
        (Vec2::new(-0.5, 0.5), Vec2::new(0.0, 0.0)),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let base = vertices.len() as u32;
        for (offset, uv) in corners {
            let position = normal * 0.5 + u * offset.x + v * offset.y;
            vertices.push(Vertex::new(position, normal, uv));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    (vertices, indices)
}

/// Latitude/longitude sphere of radius 1.
///
/// With `inside_out` the winding and normals are flipped so the surface is
/// visible from within, as a sky sphere needs.
pub fn uv_sphere(rings: u32, segments: u32, inside_out: bool) -> (Vec<Vertex>, Vec<u32>) {
    let rings = rings.max(2);
    let segments = segments.max(3);

    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let theta = v * PI;
        for segment in 0..=segments {
            let u = segment as f32 / segments as f32;
            let phi = u * TAU;
            let position = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
            let normal = if inside_out { -position } else { position };
            vertices.push(Vertex::new(position, normal, Vec2::new(u, v)));
        }
    }

    let stride = segments + 1;
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    for ring in 0..rings {
        for segment in 0..segments {
            let a = ring * stride + segment;
            let b = a + stride;
            let quad = if inside_out {
                [a, b, a + 1, a + 1, b, b + 1]
            } else {
                [a, a + 1, b, a + 1, b + 1, b]
            };
            indices.extend_from_slice(&quad);
        }
    }
    (vertices, indices)
}
