//! GPU resource management
//!
//! Materials, global uniforms and depth textures for rendering.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightRig};
pub use material::{Material, MaterialId, MaterialManager};
pub use texture_resource::TextureResource;
