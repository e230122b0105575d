//! Global uniform bindings for camera and lighting
//!
//! Everything shared by all objects in a frame lives in one uniform buffer
//! bound at group 0: the camera, the light rig and the light's shadow
//! projection.

use cgmath::{Matrix4, Point3, Vector3};

use crate::{
    gfx::{
        camera::{camera_utils::CameraUniform, orbit_camera::OPENGL_TO_WGPU_MATRIX},
        resources::material::hex_to_rgb,
    },
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content. MUST match `Globals` in the shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    light_view_proj: [[f32; 4]; 4],
    /// xyz: unit vector towards the light, w: intensity
    light_direction: [f32; 4],
    light_color: [f32; 4],
    /// rgb: colour, a: intensity
    ambient: [f32; 4],
    /// rgb: sky colour, a: hemisphere intensity
    sky_color: [f32; 4],
    ground_color: [f32; 4],
}

/// Lights of the room: ambient fill, sky/ground hemisphere and one
/// shadow-casting directional light aimed at the origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightRig {
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub sky_color: u32,
    pub ground_color: u32,
    pub hemisphere_intensity: f32,
    pub directional_color: u32,
    pub directional_intensity: f32,
    pub directional_position: Point3<f32>,
    /// Half-width of the orthographic shadow frustum.
    pub shadow_extent: f32,
    pub shadow_near: f32,
    pub shadow_far: f32,
    pub shadow_map_size: u32,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient_color: 0xffffff,
            ambient_intensity: 0.3,
            sky_color: 0xffffff,
            ground_color: 0x444444,
            hemisphere_intensity: 0.5,
            directional_color: 0xffffff,
            directional_intensity: 0.8,
            directional_position: Point3::new(4.0, 4.0, 4.0),
            shadow_extent: 5.0,
            shadow_near: 0.5,
            shadow_far: 50.0,
            shadow_map_size: 1024,
        }
    }
}

impl LightRig {
    /// Light-space view-projection used for both rendering and sampling the
    /// shadow map.
    pub fn light_view_proj(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(
            self.directional_position,
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        );
        let e = self.shadow_extent;
        let proj = cgmath::ortho(-e, e, -e, e, self.shadow_near, self.shadow_far);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }

    pub fn uniform(&self, camera: CameraUniform) -> GlobalUBOContent {
        let to_light = cgmath::InnerSpace::normalize(Vector3::new(
            self.directional_position.x,
            self.directional_position.y,
            self.directional_position.z,
        ));
        let rgba = |hex: u32, w: f32| {
            let [r, g, b] = hex_to_rgb(hex);
            [r, g, b, w]
        };

        GlobalUBOContent {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            light_view_proj: self.light_view_proj().into(),
            light_direction: [to_light.x, to_light.y, to_light.z, self.directional_intensity],
            light_color: rgba(self.directional_color, 1.0),
            ambient: rgba(self.ambient_color, self.ambient_intensity),
            sky_color: rgba(self.sky_color, self.hemisphere_intensity),
            ground_color: rgba(self.ground_color, 1.0),
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Writes this frame's camera and lights to the global uniform buffer
pub fn update_global_ubo(ubo: &mut GlobalUBO, queue: &wgpu::Queue, camera: CameraUniform, lights: &LightRig) {
    ubo.update_content(queue, lights.uniform(camera));
}

/// Layout and bind group for the global uniforms (slot 0 in every pipeline)
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform()) // camera + lights
            .create(device, "Globals Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Global Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn uniform_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 224);
    }

    #[test]
    fn room_fits_inside_the_shadow_frustum() {
        let light = LightRig::default().light_view_proj();
        for corner in [
            Vector4::new(-2.0, 0.0, -2.0, 1.0),
            Vector4::new(2.0, 2.4, 2.0, 1.0),
            Vector4::new(0.0, 0.0, 0.0, 1.0),
        ] {
            let clip = light * corner;
            assert!(clip.x.abs() <= 1.0 && clip.y.abs() <= 1.0, "{corner:?} -> {clip:?}");
            assert!((0.0..=1.0).contains(&clip.z), "{corner:?} depth {}", clip.z);
        }
    }

    #[test]
    fn light_direction_points_at_the_light() {
        let content = LightRig::default().uniform(CameraUniform::default());
        let d = content.light_direction;
        let expected = 1.0 / 3.0_f32.sqrt();
        assert!((d[0] - expected).abs() < 1e-6);
        assert!((d[3] - 0.8).abs() < 1e-6);
        assert!((content.ambient[3] - 0.3).abs() < 1e-6);
    }
}
