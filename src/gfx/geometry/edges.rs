//! Outline extraction
//!
//! Finds the "hard" edges of a triangle mesh: edges used by a single
//! triangle, and edges where the two adjacent faces meet at more than a
//! threshold angle. Vertices are matched by position, so meshes with split
//! per-face vertices (like [`generate_box`](super::generate_box)) outline
//! correctly.

use std::collections::HashMap;

use cgmath::{InnerSpace, Vector3};

use super::GeometryData;

/// Positions are snapped to this grid when matching shared edges.
const WELD_PRECISION: f32 = 1.0e4;

type PointKey = [i64; 3];

fn point_key(p: [f32; 3]) -> PointKey {
    p.map(|c| (c * WELD_PRECISION).round() as i64)
}

struct HalfEdge {
    start: [f32; 3],
    end: [f32; 3],
    normal: Vector3<f32>,
}

/// Returns line-list points (two per edge) for every edge whose faces differ
/// by more than `threshold_degrees`.
pub fn generate_edges(geometry: &GeometryData, threshold_degrees: f32) -> Vec<[f32; 3]> {
    let threshold_dot = threshold_degrees.to_radians().cos();
    let mut open: HashMap<(PointKey, PointKey), HalfEdge> = HashMap::new();
    let mut lines = Vec::new();

    for tri in geometry.indices.chunks_exact(3) {
        let corners = [tri[0], tri[1], tri[2]].map(|i| geometry.vertices[i as usize]);
        let [a, b, c] = corners.map(Vector3::from);
        let face = (b - a).cross(c - a);
        if face.magnitude2() <= f32::EPSILON {
            continue;
        }
        let normal = face.normalize();

        for (start, end) in [(0, 1), (1, 2), (2, 0)] {
            let (start, end) = (corners[start], corners[end]);
            let (ks, ke) = (point_key(start), point_key(end));
            if ks == ke {
                continue;
            }

            // A neighbouring triangle traverses the shared edge the other way,
            // but tolerate inconsistent winding too.
            let twin = open.remove(&(ke, ks)).or_else(|| open.remove(&(ks, ke)));
            match twin {
                Some(twin) => {
                    if twin.normal.dot(normal) <= threshold_dot {
                        lines.push(twin.start);
                        lines.push(twin.end);
                    }
                }
                None => {
                    open.insert((ks, ke), HalfEdge { start, end, normal });
                }
            }
        }
    }

    // Boundary edges belong to one triangle only
    let mut boundary: Vec<_> = open.into_iter().collect();
    boundary.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (_, edge) in boundary {
        lines.push(edge.start);
        lines.push(edge.end);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{generate_box, generate_cylinder, generate_plane};

    #[test]
    fn box_outline_is_its_twelve_edges() {
        let lines = generate_edges(&generate_box(2.0, 1.0, 1.0), 1.0);
        assert_eq!(lines.len(), 24);

        // No face diagonal: every edge runs along exactly one axis
        for pair in lines.chunks(2) {
            let delta = Vector3::from(pair[1]) - Vector3::from(pair[0]);
            let axes = [delta.x, delta.y, delta.z]
                .iter()
                .filter(|c| c.abs() > 1e-6)
                .count();
            assert_eq!(axes, 1, "diagonal edge {pair:?}");
        }
    }

    #[test]
    fn plane_outline_is_its_border() {
        let lines = generate_edges(&generate_plane(8.0, 8.0), 1.0);
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn cylinder_outline_has_rings_and_seams() {
        let segments = 16;
        let lines = generate_edges(&generate_cylinder(0.1, 2.0, segments), 1.0);
        // top ring + bottom ring + one vertical per side
        assert_eq!(lines.len() / 2, (segments * 3) as usize);
    }

    #[test]
    fn smooth_surfaces_lose_edges_above_threshold() {
        let segments = 16;
        // Sides meet at 22.5 degrees, so a 30 degree threshold hides the seams
        let lines = generate_edges(&generate_cylinder(0.1, 2.0, segments), 30.0);
        assert_eq!(lines.len() / 2, (segments * 2) as usize);
    }
}
