//! # Procedural Geometry Generation
//!
//! The room is assembled entirely from primitives generated here, so no model
//! files are loaded at runtime.
//!
//! ## Supported Primitives
//!
//! - **Box**: axis-aligned cuboid with per-face normals
//! - **Cylinder**: upright (Y axis) cylinder with capped ends
//! - **Plane**: flat rectangle in the XY plane facing +Z
//!
//! [`generate_edges`] derives outline line segments from any of them.
//!
//! ## Usage
//!
//! ```rust
//! use trundle::gfx::geometry::{generate_box, generate_edges};
//!
//! let drawer = generate_box(1.8, 0.35, 0.9);
//! let outline = generate_edges(&drawer, 1.0);
//! assert_eq!(outline.len(), 24); // 12 edges, two points each
//! ```

pub mod edges;
pub mod primitives;

pub use edges::generate_edges;
pub use primitives::*;

/// Generated triangle geometry ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends a vertex and returns its index.
    fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3]) -> u32 {
        self.vertices.push(position);
        self.normals.push(normal);
        (self.vertices.len() - 1) as u32
    }

    /// Interleaves positions and normals into the renderer's vertex format.
    pub fn to_scene_format(&self) -> (Vec<crate::gfx::scene::vertex::Vertex3D>, Vec<u32>) {
        use crate::gfx::scene::vertex::Vertex3D;

        let vertices = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect();

        (vertices, self.indices.clone())
    }
}
