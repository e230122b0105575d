//! Material system
//!
//! Materials are stored centrally in [`MaterialManager`] and objects
//! reference them by ID. Each material owns one small uniform buffer, so
//! changing a material (a hover tint, say) affects every object using it
//! and nothing else.

use std::collections::HashMap;
use wgpu::Device;

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Material ID for referencing materials
pub type MaterialId = String;

const DEFAULT_MATERIAL: &str = "default";

/// Splits a `0xRRGGBB` colour into normalized channels.
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// GPU uniform data for materials. MUST match `Material` in `scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub roughness: f32,
    pub metallic: f32,
    _padding: [f32; 3],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Layout shared by every material bind group (one fragment-stage uniform).
pub fn create_material_layout(device: &Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_fragment(binding_types::uniform())
        .create(device, "Material Bind Group Layout")
}

/// Surface description for the forward shader
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],

    // GPU resources - shared by all objects using this material
    material_ubo: Option<MaterialUBO>,
    bind_group: Option<wgpu::BindGroup>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(DEFAULT_MATERIAL, [0.8, 0.8, 0.8, 1.0], 0.0, 0.5)
    }
}

impl Material {
    /// Creates a new opaque material
    ///
    /// # Arguments
    /// * `name` - Unique name for this material
    /// * `base_color` - RGBA base color
    /// * `metallic` - Metallic factor (0.0 = dielectric, 1.0 = metallic)
    /// * `roughness` - Surface roughness (0.0 = mirror, 1.0 = rough)
    pub fn new(name: &str, base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            emissive: [0.0, 0.0, 0.0],
            material_ubo: None,
            bind_group: None,
        }
    }

    /// Creates a material from a `0xRRGGBB` colour.
    pub fn from_hex(name: &str, hex: u32, roughness: f32, metallic: f32) -> Self {
        let [r, g, b] = hex_to_rgb(hex);
        Self::new(name, [r, g, b, 1.0], metallic, roughness)
    }

    pub fn with_emission_hex(mut self, hex: u32) -> Self {
        self.emissive = hex_to_rgb(hex);
        self
    }

    /// Copies the surface properties under a new name. GPU resources are not
    /// shared with the original.
    pub fn duplicate(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_color: self.base_color,
            metallic: self.metallic,
            roughness: self.roughness,
            emissive: self.emissive,
            material_ubo: None,
            bind_group: None,
        }
    }

    pub fn set_emissive_hex(&mut self, hex: u32) {
        self.emissive = hex_to_rgb(hex);
    }

    pub fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            base_color: self.base_color,
            emissive: self.emissive,
            roughness: self.roughness,
            metallic: self.metallic,
            _padding: [0.0; 3],
        }
    }

    /// Creates GPU resources on first use and syncs the current properties.
    ///
    /// Unchanged properties do not touch the queue.
    pub fn update_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) {
        let uniform = self.uniform();
        let ubo = self
            .material_ubo
            .get_or_insert_with(|| MaterialUBO::new(device));
        ubo.update_content(queue, uniform);

        if self.bind_group.is_none() {
            self.bind_group = Some(
                BindGroupBuilder::new(layout)
                    .resource(ubo.binding_resource())
                    .create(device, &format!("{} Material Bind Group", self.name)),
            );
        }
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.bind_group.as_ref()
    }
}

/// Manages all materials in the scene
///
/// Objects reference materials by ID rather than storing material data
/// directly. A missing or unknown ID falls back to the default material.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material: Material,
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialManager {
    /// Creates a new material manager with a default material
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            default_material: Material::default(),
        }
    }

    /// Adds a material, replacing any with the same name
    pub fn add_material(&mut self, material: Material) {
        if self.materials.contains_key(&material.name) {
            log::debug!("Replacing material '{}'", material.name);
        }
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    pub fn get_default_material(&self) -> &Material {
        &self.default_material
    }

    /// Gets material for an object with fallback to default
    pub fn get_material_for_object(&self, material_id: Option<&MaterialId>) -> &Material {
        material_id
            .and_then(|id| self.get_material(id))
            .unwrap_or(&self.default_material)
    }

    /// Registers a copy of `source` named `name` and returns its ID.
    ///
    /// Returns `None` if `source` does not exist.
    pub fn clone_material(&mut self, source: &str, name: &str) -> Option<MaterialId> {
        let copy = self.get_material(source)?.duplicate(name);
        self.add_material(copy);
        Some(name.to_string())
    }

    /// Lists all material IDs, the default included
    pub fn list_materials(&self) -> Vec<&str> {
        std::iter::once(self.default_material.name.as_str())
            .chain(self.materials.keys().map(String::as_str))
            .collect()
    }

    /// Updates GPU resources for all materials
    pub fn update_all_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) {
        self.default_material
            .update_gpu_resources(device, queue, layout);
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue, layout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_channels_are_normalized() {
        assert_eq!(hex_to_rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_to_rgb(0x000000), [0.0, 0.0, 0.0]);
        let [r, g, b] = hex_to_rgb(0x333333);
        assert!((r - 0.2).abs() < 1e-6 && r == g && g == b);
    }

    #[test]
    fn uniform_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 48);
    }

    #[test]
    fn unknown_material_falls_back_to_default() {
        let manager = MaterialManager::new();
        let missing = "nope".to_string();
        assert_eq!(manager.get_material_for_object(Some(&missing)).name, "default");
        assert_eq!(manager.get_material_for_object(None).name, "default");
    }

    #[test]
    fn cloned_materials_tint_independently() {
        let mut manager = MaterialManager::new();
        manager.add_material(Material::from_hex("drawer", 0xcd853f, 0.6, 0.1));
        let first = manager.clone_material("drawer", "drawer1").unwrap();
        let second = manager.clone_material("drawer", "drawer2").unwrap();

        manager.get_material_mut(&first).unwrap().set_emissive_hex(0x333333);

        assert_ne!(manager.get_material(&first).unwrap().emissive, [0.0; 3]);
        assert_eq!(manager.get_material(&second).unwrap().emissive, [0.0; 3]);
        assert_eq!(manager.get_material("drawer").unwrap().emissive, [0.0; 3]);
        assert!(manager.clone_material("missing", "x").is_none());
    }
}
