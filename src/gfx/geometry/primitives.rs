//! # Primitive Shape Generation
//!
//! Boxes, cylinders and planes centred at the origin in a Y-up world.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a box centred at the origin
///
/// # Arguments
/// * `width` - Extent along X
/// * `height` - Extent along Y
/// * `depth` - Extent along Z
///
/// Each face gets its own four vertices so normals stay flat.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);

    // (normal, four corners counter-clockwise when viewed from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // +Z
        (
            [0.0, 0.0, 1.0],
            [[-hx, -hy, hz], [hx, -hy, hz], [hx, hy, hz], [-hx, hy, hz]],
        ),
        // -Z
        (
            [0.0, 0.0, -1.0],
            [[hx, -hy, -hz], [-hx, -hy, -hz], [-hx, hy, -hz], [hx, hy, -hz]],
        ),
        // -X
        (
            [-1.0, 0.0, 0.0],
            [[-hx, -hy, -hz], [-hx, -hy, hz], [-hx, hy, hz], [-hx, hy, -hz]],
        ),
        // +X
        (
            [1.0, 0.0, 0.0],
            [[hx, -hy, hz], [hx, -hy, -hz], [hx, hy, -hz], [hx, hy, hz]],
        ),
        // +Y
        (
            [0.0, 1.0, 0.0],
            [[-hx, hy, hz], [hx, hy, hz], [hx, hy, -hz], [-hx, hy, -hz]],
        ),
        // -Y
        (
            [0.0, -1.0, 0.0],
            [[-hx, -hy, -hz], [hx, -hy, -hz], [hx, -hy, hz], [-hx, -hy, hz]],
        ),
    ];

    for (normal, corners) in faces {
        let base = data.vertices.len() as u32;
        for corner in corners {
            data.push_vertex(corner, normal);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate an upright cylinder
///
/// # Arguments
/// * `radius` - Radius of both caps
/// * `height` - Extent along Y, centred on the origin
/// * `segments` - Number of sides around the circumference (at least 3)
pub fn generate_cylinder(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let segs = segments.max(3);
    let half_height = height * 0.5;

    let ring = |i: u32| {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        (angle.sin(), angle.cos())
    };

    // Side: one bottom/top pair per ring position, seam duplicated
    for i in 0..=segs {
        let (sin_a, cos_a) = ring(i);
        let normal = [sin_a, 0.0, cos_a];
        data.push_vertex([radius * sin_a, -half_height, radius * cos_a], normal);
        data.push_vertex([radius * sin_a, half_height, radius * cos_a], normal);
    }
    for i in 0..segs {
        let bottom = i * 2;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;
        data.indices
            .extend_from_slice(&[bottom, next_bottom, top, top, next_bottom, next_top]);
    }

    // Caps: separate vertices so the cap normals stay flat
    for (y, normal_y) in [(half_height, 1.0_f32), (-half_height, -1.0)] {
        let center = data.push_vertex([0.0, y, 0.0], [0.0, normal_y, 0.0]);
        let first = data.vertices.len() as u32;
        for i in 0..segs {
            let (sin_a, cos_a) = ring(i);
            data.push_vertex([radius * sin_a, y, radius * cos_a], [0.0, normal_y, 0.0]);
        }
        for i in 0..segs {
            let current = first + i;
            let next = first + (i + 1) % segs;
            if normal_y > 0.0 {
                data.indices.extend_from_slice(&[center, current, next]);
            } else {
                data.indices.extend_from_slice(&[center, next, current]);
            }
        }
    }

    data
}

/// Generate a flat rectangle in the XY plane facing +Z
///
/// Rotate the owning object to lay it down as a floor or stand it up as a
/// wall.
pub fn generate_plane(width: f32, height: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let (hw, hh) = (width * 0.5, height * 0.5);
    let normal = [0.0, 0.0, 1.0];

    data.push_vertex([-hw, -hh, 0.0], normal);
    data.push_vertex([hw, -hh, 0.0], normal);
    data.push_vertex([hw, hh, 0.0], normal);
    data.push_vertex([-hw, hh, 0.0], normal);
    data.indices.extend_from_slice(&[0, 1, 2, 2, 3, 0]);

    data
}
