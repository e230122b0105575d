use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{DeviceEvent, ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorIcon, Window, WindowAttributes, WindowId},
};

use crate::{
    config::ShowroomConfig,
    error::{RenderError, SceneError},
    gfx::rendering::RenderEngine,
    performance::PerformanceMonitor,
    showroom::Showroom,
    ui::{angle_readout, error_screen, overlay_panel, UiManager},
};

/// A press and release further apart than this (in pixels) is a drag, not
/// a click.
const CLICK_THRESHOLD: f32 = 4.0;

/// Window, GPU and event loop around a [`Showroom`].
pub struct TrundleApp {
    config: ShowroomConfig,
}

struct AppState {
    config: ShowroomConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    showroom: Option<Showroom>,
    /// Shown instead of the room when the scene failed to build.
    init_error: Option<String>,
    /// Ends the event loop with an error; nothing can be drawn.
    fatal: Option<anyhow::Error>,
    performance: PerformanceMonitor,
    last_frame: Instant,
    cursor_position: (f32, f32),
    press_position: Option<(f32, f32)>,
    cursor_icon: CursorIcon,
}

impl TrundleApp {
    pub fn new(config: ShowroomConfig) -> Self {
        Self { config }
    }

    /// Opens the window and runs until it is closed.
    ///
    /// Returns an error when the GPU cannot be brought up.
    pub fn run(self) -> anyhow::Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState::new(self.config);
        event_loop.run_app(&mut state)?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn new(config: ShowroomConfig) -> Self {
        Self {
            config,
            window: None,
            render_engine: None,
            ui_manager: None,
            showroom: None,
            init_error: None,
            fatal: None,
            performance: PerformanceMonitor::new(),
            last_frame: Instant::now(),
            cursor_position: (0.0, 0.0),
            press_position: None,
            cursor_icon: CursorIcon::Default,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("Error initializing scene: {err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn sync_cursor(&mut self) {
        let (Some(window), Some(showroom)) = (self.window.as_ref(), self.showroom.as_ref()) else {
            return;
        };
        let icon = showroom.cursor();
        if icon != self.cursor_icon {
            window.set_cursor(icon);
            self.cursor_icon = icon;
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let frame_time = now - self.last_frame;
        self.last_frame = now;
        self.performance.record_frame(frame_time);

        let (Some(window), Some(render_engine), Some(ui_manager)) = (
            self.window.as_ref(),
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
        ) else {
            return;
        };

        let Some(showroom) = self.showroom.as_mut() else {
            let reason = self.init_error.as_deref().unwrap_or("unknown error");
            render_engine.render_frame(None, |device, queue, encoder, view| {
                ui_manager.draw(device, queue, encoder, window, view, |ui| {
                    error_screen(ui, reason);
                });
            });
            return;
        };

        showroom.frame(frame_time.as_secs_f32());
        {
            let scene = showroom.scene_mut();
            scene.update_all_transforms(render_engine.queue());
            scene.update_materials(
                render_engine.device(),
                render_engine.queue(),
                render_engine.material_layout(),
            );
            render_engine.update(scene.camera_manager.camera.uniform);
        }

        let show_stats = self.config.show_stats;
        let performance = &self.performance;
        let showroom_ref: &Showroom = showroom;
        let (azimuth, polar) = showroom_ref.angles();
        let mut close_requested = false;

        render_engine.render_frame(Some(showroom_ref.scene()), |device, queue, encoder, view| {
            ui_manager.draw(device, queue, encoder, window, view, |ui| {
                if let Some(entry) = showroom_ref.overlay().entry() {
                    close_requested = overlay_panel(ui, entry);
                }
                angle_readout(ui, azimuth, polar);
                if show_stats {
                    performance.render_overlay(ui);
                }
            });
        });

        if close_requested {
            showroom.close_open();
        }
    }
}

/// The showroom, unless the renderer came up unable to draw it.
fn build_showroom(
    config: &ShowroomConfig,
    render_setup: Option<RenderError>,
) -> Result<Showroom, SceneError> {
    if let Some(err) = render_setup {
        return Err(err.into());
    }
    Showroom::new(config.clone())
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.config.window_size;
        let attributes = WindowAttributes::default()
            .with_title("Trundle")
            .with_inner_size(PhysicalSize::new(width, height));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        let vsync = self.config.vsync;
        let surface_target = window.clone();
        let mut render_engine = match pollster::block_on(RenderEngine::new(
            surface_target,
            width,
            height,
            vsync,
        )) {
            Ok(render_engine) => render_engine,
            Err(err) => return self.fail(event_loop, err.into()),
        };

        match build_showroom(&self.config, render_engine.take_setup_error()) {
            Ok(mut showroom) => {
                showroom.resize(width, height);
                showroom.scene_mut().init_gpu_resources(
                    render_engine.device(),
                    render_engine.queue(),
                    render_engine.transform_layout(),
                    render_engine.material_layout(),
                );
                self.showroom = Some(showroom);
            }
            Err(err) => {
                log::error!("Error initializing scene: {err}");
                self.init_error = Some(err.to_string());
            }
        }

        let mut ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
        );
        ui_manager.update_display_size(width, height);

        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(render_engine);
        self.last_frame = Instant::now();
        log::info!("Window ready at {width}x{height}");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // A drag ends wherever the button is released
        if let WindowEvent::MouseInput {
            state: ElementState::Released,
            button: MouseButton::Left,
            ..
        } = event
        {
            if let Some(showroom) = self.showroom.as_mut() {
                showroom.scene_mut().camera_manager.controller.set_dragging(false);
            }
        }
        if let WindowEvent::CursorMoved { position, .. } = event {
            self.cursor_position = (position.x as f32, position.y as f32);
        }

        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                // The pointer is over a panel: nothing behind it is hovered
                if let Some(showroom) = self.showroom.as_mut() {
                    showroom.pointer_left();
                }
                self.press_position = None;
                self.sync_cursor();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(showroom) = self.showroom.as_mut() {
                    showroom.close_open();
                }
            }
            WindowEvent::CursorMoved {
                position: PhysicalPosition { x, y },
                ..
            } => {
                if let Some(showroom) = self.showroom.as_mut() {
                    showroom.pointer_moved((x as f32, y as f32));
                }
                self.sync_cursor();
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(showroom) = self.showroom.as_mut() {
                    showroom.pointer_left();
                }
                self.sync_cursor();
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    self.press_position = Some(self.cursor_position);
                    if let Some(showroom) = self.showroom.as_mut() {
                        showroom.scene_mut().camera_manager.controller.set_dragging(true);
                    }
                }
                ElementState::Released => {
                    let Some((start_x, start_y)) = self.press_position.take() else {
                        return;
                    };
                    let (x, y) = self.cursor_position;
                    let moved = ((x - start_x).powi(2) + (y - start_y).powi(2)).sqrt();
                    if moved <= CLICK_THRESHOLD {
                        if let Some(showroom) = self.showroom.as_mut() {
                            showroom.click((x, y));
                        }
                    }
                }
            },
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(showroom) = self.showroom.as_mut() {
                    showroom.scene_mut().camera_manager.process_scroll(&delta);
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(showroom) = self.showroom.as_mut() {
                    showroom.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        let Some(showroom) = self.showroom.as_mut() else {
            return;
        };
        showroom.scene_mut().camera_manager.process_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // UI and GPU resources go before the window they draw into
        self.ui_manager = None;
        self.showroom = None;
        self.render_engine = None;
        self.window = None;
        log::info!("Shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_failure_becomes_a_scene_error() {
        let failure = RenderError::Pipelines(vec!["Pipeline 'Mesh': Shader 'scene' not found".into()]);
        let err = build_showroom(&ShowroomConfig::default(), Some(failure))
            .err()
            .expect("scene must not build");

        assert!(matches!(err, SceneError::Render(RenderError::Pipelines(_))));
        assert!(err.to_string().contains("Shader 'scene' not found"));
    }

    #[test]
    fn healthy_renderer_builds_the_showroom() {
        assert!(build_showroom(&ShowroomConfig::default(), None).is_ok());
    }
}
