//! # Showroom
//!
//! The interactive room: furniture, the four trundle drawers, and the
//! controllers that react to the pointer.
//!
//! ## Flow
//!
//! 1. Pointer moves go to the [`PickingController`], which highlights the
//!    drawer under the cursor.
//! 2. A click on a drawer goes to the [`DrawerStateMachine`], which flips
//!    `is_open`, starts the depth tween and asks the [`CameraDirector`] and
//!    [`OverlayPresenter`] to follow.
//! 3. [`Showroom::frame`] advances every tween and re-derives the orbit
//!    camera once per frame.
//!
//! [`Showroom`] owns no GPU resources, so everything here runs headless.
//!
//! ```no_run
//! use trundle::{config::ShowroomConfig, showroom::Showroom};
//!
//! let mut room = Showroom::new(ShowroomConfig::default())?;
//! room.resize(1280, 800);
//! if let Some(drawer) = room.click((640.0, 500.0)) {
//!     println!("toggled {drawer}");
//! }
//! room.frame(1.0 / 60.0);
//! # Ok::<(), trundle::error::SceneError>(())
//! ```

pub mod director;
pub mod drawers;
pub mod furniture;
pub mod overlay;
pub mod picking;
pub mod state;

pub use director::{CameraDirector, CameraProperty, Framing};
pub use drawers::{DrawerId, DrawerRegistry, DrawerState, DrawerTable};
pub use overlay::OverlayPresenter;
pub use picking::PickingController;
pub use state::{DrawerStateMachine, Stage};

use winit::window::CursorIcon;

use crate::config::ShowroomConfig;
use crate::error::SceneError;
use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
use crate::gfx::scene::Scene;

pub struct Showroom {
    config: ShowroomConfig,
    scene: Scene,
    drawers: DrawerTable,
    picking: PickingController,
    state: DrawerStateMachine,
    director: CameraDirector,
    overlay: OverlayPresenter,
    viewport: (u32, u32),
}

impl Showroom {
    /// Builds the room with the camera at its overview framing.
    pub fn new(config: ShowroomConfig) -> Result<Self, SceneError> {
        config.validate()?;

        let (width, height) = config.window_size;
        let mut camera = OrbitCamera::new(config.orbit, width as f32 / height as f32)
            .with_projection(config.fov_degrees, config.znear, config.zfar);
        camera.set_target(config.framing.default_target);
        camera.set_eye(config.framing.default_eye);
        camera.update();

        let mut controller = CameraController::new(config.orbit.rotate_speed, config.orbit.zoom_speed);
        controller.set_viewport_height(height);

        let mut scene = Scene::new(CameraManager::new(camera, controller));
        furniture::register_materials(&mut scene.material_manager);
        furniture::build_room(&mut scene, config.outlines);

        let mut picking = PickingController::default();
        let drawers = DrawerRegistry::default().build(&mut scene, &mut picking, config.outlines);
        drawers.apply_to_scene(&mut scene);
        scene.update();

        let stats = scene.get_statistics();
        log::info!(
            "Scene ready: {} objects, {} materials, {} triangles, {} outline segments",
            stats.object_count,
            stats.material_count,
            stats.total_triangles,
            stats.total_line_segments
        );

        Ok(Self {
            state: DrawerStateMachine::new(config.drawers),
            director: CameraDirector::new(config.framing),
            overlay: OverlayPresenter::new(),
            viewport: config.window_size,
            config,
            scene,
            drawers,
            picking,
        })
    }

    pub fn config(&self) -> &ShowroomConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.scene.camera_manager.camera
    }

    pub fn drawers(&self) -> &DrawerTable {
        &self.drawers
    }

    pub fn state(&self) -> &DrawerStateMachine {
        &self.state
    }

    pub fn director(&self) -> &CameraDirector {
        &self.director
    }

    pub fn overlay(&self) -> &OverlayPresenter {
        &self.overlay
    }

    pub fn picking(&self) -> &PickingController {
        &self.picking
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    fn viewport_f32(&self) -> (f32, f32) {
        (self.viewport.0 as f32, self.viewport.1 as f32)
    }

    /// Updates the camera aspect and drag scale. Zero sizes (minimized
    /// windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.scene.camera_manager.resize(width, height);
        self.scene.update();
        log::debug!("Viewport resized to {width}x{height}");
    }

    /// Returns `true` when the hovered object changed.
    pub fn pointer_moved(&mut self, position: (f32, f32)) -> bool {
        let viewport = self.viewport_f32();
        self.picking.on_pointer_move(position, viewport, &mut self.scene)
    }

    pub fn pointer_left(&mut self) {
        self.picking.clear_hover(&mut self.scene);
    }

    pub fn cursor(&self) -> CursorIcon {
        self.picking.cursor()
    }

    /// Toggles the drawer under `position`. Clicks on anything else do
    /// nothing.
    pub fn click(&mut self, position: (f32, f32)) -> Option<DrawerId> {
        let viewport = self.viewport_f32();
        let object = self.picking.on_click(position, viewport, &self.scene)?;
        let id = self.drawers.find_by_object(object)?;
        self.toggle(id);
        Some(id)
    }

    pub fn toggle(&mut self, id: DrawerId) {
        let mut stage = Stage {
            drawers: &mut self.drawers,
            director: &mut self.director,
            overlay: &mut self.overlay,
            camera: &self.scene.camera_manager.camera,
        };
        self.state.toggle(id, &mut stage);
    }

    /// Closes whichever drawer is open.
    pub fn close_open(&mut self) -> Option<DrawerId> {
        let mut stage = Stage {
            drawers: &mut self.drawers,
            director: &mut self.director,
            overlay: &mut self.overlay,
            camera: &self.scene.camera_manager.camera,
        };
        self.state.close_open(&mut stage)
    }

    /// Advances all animation by `dt` seconds and refreshes the camera.
    pub fn frame(&mut self, dt: f32) {
        self.state.advance(dt, &mut self.drawers);
        self.drawers.apply_to_scene(&mut self.scene);

        let camera = &mut self.scene.camera_manager.camera;
        self.director.advance(dt, camera);
        camera.update();
        self.scene.update();
    }

    /// Camera (azimuth, polar) in radians.
    pub fn angles(&self) -> (f32, f32) {
        let camera = self.camera();
        (camera.azimuth_angle(), camera.polar_angle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_the_overview() {
        let room = Showroom::new(ShowroomConfig::default()).expect("default config is valid");
        let (azimuth, polar) = room.angles();
        assert!((azimuth - std::f32::consts::FRAC_PI_4).abs() < 1e-4);
        assert!((polar - (1.0_f32 / 3.0_f32.sqrt()).acos()).abs() < 1e-4);
        assert_eq!(room.drawers().len(), 4);
        assert_eq!(room.drawers().open_identity(), None);
        assert!(!room.overlay().is_visible());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = ShowroomConfig::default();
        config.orbit.min_distance = 20.0;
        assert!(matches!(Showroom::new(config), Err(SceneError::InvalidConfig(_))));
    }

    #[test]
    fn zero_resize_is_ignored() {
        let mut room = Showroom::new(ShowroomConfig::default()).expect("valid");
        room.resize(0, 600);
        assert_eq!(room.viewport(), (1280, 800));
    }

    #[test]
    fn drawer_depth_reaches_the_scene() {
        let mut room = Showroom::new(ShowroomConfig::default()).expect("valid");
        room.toggle(DrawerId::Drawer1);
        for _ in 0..60 {
            room.frame(1.0 / 60.0);
        }
        let drawer = room.drawers().get(DrawerId::Drawer1).expect("drawer1");
        assert_eq!(drawer.depth, 1.0);
        assert_eq!(room.scene().objects[drawer.object].transform.position.z, 1.0);
    }
}
