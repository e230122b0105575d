//! # Scene Management Module
//!
//! Object hierarchy, transforms and vertex data for the room.
//!
//! ## Key Components
//!
//! - [`Scene`] - Container for objects, camera and materials
//! - [`Object`] - A named group of meshes with a material, a [`Transform`]
//!   and an optional parent
//! - [`Vertex3D`] - Position/normal vertex format
//!
//! Objects are addressed by [`ObjectId`], their index in the scene. A child
//! is always added after its parent, and its transform is relative to the
//! parent's world transform, so handles and outlines ride along with the
//! drawer they belong to.
//!
//! ```no_run
//! use trundle::gfx::scene::{Object, Transform};
//!
//! // let id = scene.add_object(
//! //     Object::new("mattress", meshes).with_transform(Transform::from_position(0.0, 2.25, 0.0)),
//! // );
//! ```

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{DrawObject, MeshTopology, Object, ObjectId, Transform};
pub use scene::{Scene, SceneStatistics};
pub use vertex::Vertex3D;
