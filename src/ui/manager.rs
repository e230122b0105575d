// src/ui/manager.rs
//! ImGui UI manager
//!
//! Handles ImGui integration with wgpu and winit: frame management, input
//! forwarding and drawing the overlay on top of the 3D scene.

use imgui::{ConfigFlags, Context, FontConfig, FontSource};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use std::time::Instant;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{Event, WindowEvent},
    window::Window,
};

/// ImGui UI manager
///
/// Owns the ImGui context, the winit platform glue and the wgpu renderer.
/// The mouse cursor belongs to the scene (pointer over drawers), so ImGui
/// is told not to change it.
pub struct UiManager {
    pub context: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
}

impl UiManager {
    /// Creates a new UI manager
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating renderer resources
    /// * `queue` - WGPU queue for renderer operations
    /// * `output_color_format` - Target texture format for rendering
    /// * `window` - Window for platform integration
    pub fn new(
        device: &Device,
        queue: &Queue,
        output_color_format: TextureFormat,
        window: &Window,
    ) -> Self {
        let mut context = Context::create();
        context.set_ini_filename(None);
        context.io_mut().config_flags |= ConfigFlags::NO_MOUSE_CURSOR_CHANGE;

        // Locked DPI: positions and sizes are in physical pixels, matching picking
        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Locked(1.0));

        let font_size = 16.0;
        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: font_size,
                ..Default::default()
            }),
        }]);

        let renderer_config = RendererConfig {
            texture_format: output_color_format,
            ..Default::default()
        };
        let renderer = Renderer::new(&mut context, device, queue, renderer_config);

        Self {
            context,
            platform,
            renderer,
            last_frame: Instant::now(),
        }
    }

    /// Updates ImGui's display size to match the render target
    pub fn update_display_size(&mut self, width: u32, height: u32) {
        self.context.io_mut().display_size = [width as f32, height as f32];
    }

    /// Forwards pointer, wheel, keyboard and focus events to ImGui.
    ///
    /// Returns true if the UI wants the input, in which case the scene
    /// should not see it.
    pub fn handle_input<T>(&mut self, window: &Window, event: &Event<T>) -> bool {
        let Event::WindowEvent {
            event: window_event,
            ..
        } = event
        else {
            return false;
        };
        let Some(kind) = InputKind::of(window_event) else {
            return false;
        };

        self.platform
            .handle_event(self.context.io_mut(), window, event);

        let io = self.context.io();
        kind.captured(io.want_capture_mouse, io.want_capture_keyboard)
    }

    /// Builds this frame's UI.
    pub fn update_logic<F>(&mut self, window: &Window, run_ui: F)
    where
        F: FnOnce(&imgui::Ui),
    {
        let now = Instant::now();
        self.context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        if let Err(err) = self.platform.prepare_frame(self.context.io_mut(), window) {
            log::warn!("Failed to prepare UI frame: {err}");
        }

        let ui = self.context.frame();
        run_ui(&ui);
        self.platform.prepare_render(&ui, window);
    }

    /// Draws the UI built by the last `update_logic()` call over
    /// `color_attachment`, keeping the scene underneath.
    pub fn render_display_only(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        color_attachment: &TextureView,
    ) {
        let draw_data = self.context.render();

        if draw_data.display_size[0] <= 0.0 || draw_data.display_size[1] <= 0.0 {
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("imgui_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_attachment,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Err(err) = self
            .renderer
            .render(draw_data, queue, device, &mut render_pass)
        {
            log::error!("Failed to render UI: {err:?}");
        }
    }

    /// `update_logic()` followed by `render_display_only()`.
    pub fn draw<F>(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        window: &Window,
        color_attachment: &TextureView,
        run_ui: F,
    ) where
        F: FnOnce(&imgui::Ui),
    {
        self.update_logic(window, run_ui);
        self.render_display_only(device, queue, encoder, color_attachment);
    }
}

/// Window events ImGui cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    Pointer,
    Keyboard,
    Focus,
}

impl InputKind {
    fn of(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CursorMoved { .. }
            | WindowEvent::CursorLeft { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. } => Some(Self::Pointer),
            WindowEvent::KeyboardInput { .. } => Some(Self::Keyboard),
            WindowEvent::Focused(_) => Some(Self::Focus),
            _ => None,
        }
    }

    /// Keys only go to the UI while a text field has focus, wherever the
    /// pointer is.
    fn captured(self, want_mouse: bool, want_keyboard: bool) -> bool {
        match self {
            Self::Pointer => want_mouse,
            Self::Keyboard => want_keyboard,
            Self::Focus => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_reach_the_scene_while_the_pointer_is_over_a_panel() {
        assert!(!InputKind::Keyboard.captured(true, false));
        assert!(InputKind::Keyboard.captured(false, true));
    }

    #[test]
    fn pointer_is_captured_only_over_a_panel() {
        assert!(InputKind::Pointer.captured(true, false));
        assert!(!InputKind::Pointer.captured(false, true));
        assert!(!InputKind::Focus.captured(true, true));
    }

    #[test]
    fn only_input_events_are_classified() {
        assert_eq!(InputKind::of(&WindowEvent::Focused(true)), Some(InputKind::Focus));
        assert_eq!(InputKind::of(&WindowEvent::CloseRequested), None);
        assert_eq!(
            InputKind::of(&WindowEvent::Resized(winit::dpi::PhysicalSize::new(800, 600))),
            None
        );
    }
}
