//! WGPU-based forward renderer
//!
//! Three passes per frame: the directional light's shadow map, the lit
//! scene with black edge outlines on top, and the UI overlay.

use std::sync::Arc;
use wgpu::TextureFormat;

use crate::{
    error::RenderError,
    gfx::{
        camera::camera_utils::CameraUniform,
        resources::{
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightRig},
            material::{create_material_layout, hex_to_rgb},
            texture_resource::TextureResource,
        },
        scene::{object::DrawObject, MeshTopology, Scene},
    },
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
    },
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

/// Background behind the room
pub const CLEAR_COLOR: u32 = 0x663399;

const SHADOW_PIPELINE: &str = "Shadow";
const MESH_PIPELINE: &str = "Mesh";
const OUTLINE_PIPELINE: &str = "Outline";

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    transform_layout: BindGroupLayoutWithDesc,
    material_layout: BindGroupLayoutWithDesc,

    shadow_map: TextureResource,
    shadow_bind_group: wgpu::BindGroup,

    lights: LightRig,

    /// Pipeline failure found after the device came up
    setup_error: Option<RenderError>,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `vsync` - Present with `Fifo` instead of `AutoNoVsync`
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RenderError::UnsupportedSurface)?;

        let present_mode = if vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let lights = LightRig::default();
        let shadow_map = TextureResource::create_shadow_map(&device, lights.shadow_map_size);

        let shadow_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::texture_depth_2d())
            .next_binding_fragment(binding_types::sampler(
                wgpu::SamplerBindingType::Comparison,
            ))
            .create(&device, "Shadow Bind Group Layout");
        let shadow_bind_group = BindGroupBuilder::new(&shadow_layout)
            .texture(&shadow_map.view)
            .sampler(&shadow_map.sampler)
            .create(&device, "Shadow Bind Group");

        // Initialize global uniform bindings for camera and lighting
        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);

        // Per-object model matrix and shadow flag
        let transform_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(&device, "Transform Bind Group Layout");

        let material_layout = create_material_layout(&device);

        let device_handle: Arc<wgpu::Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("scene", include_str!("shaders/scene.wgsl"));
        pipeline_manager.load_shader("shadow", include_str!("shaders/shadow.wgsl"));
        pipeline_manager.load_shader("line", include_str!("shaders/line.wgsl"));

        // No culling so thin planes still cast shadows
        pipeline_manager.register_pipeline(
            SHADOW_PIPELINE,
            PipelineConfig::default()
                .with_label("SHADOW")
                .with_shader("shadow")
                .with_vertex_only()
                .with_cull_mode(None)
                .with_depth(TextureResource::DEPTH_FORMAT, wgpu::CompareFunction::Less)
                .with_depth_bias(wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                })
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    transform_layout.layout.clone(),
                ]),
        );

        pipeline_manager.register_pipeline(
            MESH_PIPELINE,
            PipelineConfig::default()
                .with_label("MESH")
                .with_shader("scene")
                .with_color_format(format)
                .with_depth(TextureResource::DEPTH_FORMAT, wgpu::CompareFunction::Less)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    transform_layout.layout.clone(),
                    material_layout.layout.clone(),
                    shadow_layout.layout.clone(),
                ]),
        );

        pipeline_manager.register_pipeline(
            OUTLINE_PIPELINE,
            PipelineConfig::default()
                .with_label("OUTLINE")
                .with_shader("line")
                .with_color_format(format)
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_cull_mode(None)
                .with_depth(TextureResource::DEPTH_FORMAT, wgpu::CompareFunction::LessEqual)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    transform_layout.layout.clone(),
                ]),
        );

        // The device and surface still work for the error screen
        let setup_error = pipeline_manager.create_all_pipelines().err().map(RenderError::Pipelines);
        if let Some(err) = &setup_error {
            log::error!("{err}");
        }

        log::info!("Render engine ready: {width}x{height}, {format:?}, {present_mode:?}");

        Ok(RenderEngine {
            device: device_handle,
            config,
            format,
            surface,
            queue: queue_handle,
            depth_texture,
            pipeline_manager,
            global_bindings,
            global_ubo,
            transform_layout,
            material_layout,
            shadow_map,
            shadow_bind_group,
            lights,
            setup_error,
        })
    }

    /// Takes the error that left the engine able to present but not to
    /// draw the scene.
    pub fn take_setup_error(&mut self) -> Option<RenderError> {
        self.setup_error.take()
    }

    /// Renders a frame with optional scene and a UI overlay
    ///
    /// Without a scene only the background is cleared, which is what the
    /// error screen draws on.
    pub fn render_frame<F>(&mut self, scene: Option<&Scene>, ui_callback: F)
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::debug!("Surface timeout, skipping frame");
                return;
            }
            Err(e) => {
                log::error!("Failed to acquire surface texture: {e}");
                return;
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // PASS 1: Shadow map from the directional light
        {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Depth Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let (Some(scene), Some(pipeline)) =
                (scene, self.pipeline_manager.pipeline(SHADOW_PIPELINE))
            {
                shadow_pass.set_pipeline(pipeline);
                shadow_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);
                for object in scene.objects.iter().filter(|o| o.visible && o.cast_shadow) {
                    shadow_pass.draw_object(object, MeshTopology::Triangles);
                }
            }
        }

        // PASS 2: Lit meshes, then outlines over them
        {
            let [r, g, b] = hex_to_rgb(CLEAR_COLOR);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(scene) = scene {
                render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

                if let Some(pipeline) = self.pipeline_manager.pipeline(MESH_PIPELINE) {
                    render_pass.set_pipeline(pipeline);
                    render_pass.set_bind_group(3, &self.shadow_bind_group, &[]);

                    for object in scene.objects.iter().filter(|o| o.visible) {
                        if !object.has_topology(MeshTopology::Triangles) {
                            continue;
                        }
                        let material = scene.get_material_for_object(object);
                        if let Some(material_bind_group) = material.get_bind_group() {
                            render_pass.set_bind_group(2, material_bind_group, &[]);
                            render_pass.draw_object(object, MeshTopology::Triangles);
                        } else {
                            log::trace!(
                                "Skipping '{}' - material '{}' has no GPU resources",
                                object.name,
                                material.name
                            );
                        }
                    }
                }

                if let Some(pipeline) = self.pipeline_manager.pipeline(OUTLINE_PIPELINE) {
                    render_pass.set_pipeline(pipeline);
                    for object in scene.objects.iter().filter(|o| o.visible) {
                        render_pass.draw_object(object, MeshTopology::Lines);
                    }
                }
            }
        }

        // PASS 3: UI overlay
        ui_callback(
            &self.device,
            &self.queue,
            &mut encoder,
            &surface_texture_view,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    /// Updates camera and light uniform buffers
    pub fn update(&mut self, camera_uniform: CameraUniform) {
        update_global_ubo(&mut self.global_ubo, &self.queue, camera_uniform, &self.lights);
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
        log::debug!("Surface resized to {width}x{height}");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Layout for per-object transform bind groups (slot 1)
    pub fn transform_layout(&self) -> &wgpu::BindGroupLayout {
        &self.transform_layout.layout
    }

    /// Layout for material bind groups (slot 2)
    pub fn material_layout(&self) -> &BindGroupLayoutWithDesc {
        &self.material_layout
    }
}
