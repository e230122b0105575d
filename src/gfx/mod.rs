//! # Graphics Module
//!
//! Everything needed to draw the room: camera, geometry, picking, GPU
//! resources and the forward renderer.
//!
//! - **Camera System** ([`camera`]) - Damped orbit camera with clamped angles
//! - **Geometry** ([`geometry`]) - Procedural boxes, cylinders, planes and edge outlines
//! - **Picking** ([`picking`]) - Pointer rays and bounding-box hit tests
//! - **Rendering Pipeline** ([`rendering`]) - Shadowed forward shading plus outlines
//! - **Scene Management** ([`scene`]) - Object hierarchy with parented transforms
//! - **Resource Management** ([`resources`]) - Materials, lights and depth textures
//!
//! The scene is plain data and can be built and queried without a GPU;
//! [`scene::Scene::init_gpu_resources`] uploads it once a [`RenderEngine`]
//! exists.

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
