//! Opening and closing drawers.
//!
//! `is_open` flips the moment a transition is requested, not when the slide
//! finishes, so a second click during an animation already sees the new
//! state and reverses it.

use crate::animation::{Easing, TweenHandle, Tweener};
use crate::config::DrawerMotion;
use crate::gfx::camera::OrbitCamera;

use super::director::CameraDirector;
use super::drawers::{DrawerId, DrawerTable};
use super::overlay::OverlayPresenter;

/// Everything a drawer transition touches.
pub struct Stage<'a> {
    pub drawers: &'a mut DrawerTable,
    pub director: &'a mut CameraDirector,
    pub overlay: &'a mut OverlayPresenter,
    pub camera: &'a OrbitCamera,
}

/// Enforces that at most one drawer is open and drives the depth tweens.
#[derive(Debug, Clone)]
pub struct DrawerStateMachine {
    motion: DrawerMotion,
    depth_tweens: Tweener<DrawerId, f32>,
}

impl DrawerStateMachine {
    pub fn new(motion: DrawerMotion) -> Self {
        Self {
            motion,
            depth_tweens: Tweener::new(),
        }
    }

    /// Closes `id` if it is open; otherwise closes whichever drawer is open
    /// and opens `id`.
    pub fn toggle(&mut self, id: DrawerId, stage: &mut Stage<'_>) {
        if stage.drawers.is_open(id) {
            self.close(id, stage);
            return;
        }

        let others: Vec<DrawerId> = stage
            .drawers
            .iter()
            .filter(|drawer| drawer.is_open && drawer.id != id)
            .map(|drawer| drawer.id)
            .collect();
        for other in others {
            self.close(other, stage);
        }
        self.open(id, stage);
    }

    pub fn open(&mut self, id: DrawerId, stage: &mut Stage<'_>) -> Option<TweenHandle> {
        let drawer = stage.drawers.get_mut(id)?;
        drawer.is_open = true;
        let focus = drawer.position();
        let handle = self.depth_tweens.animate(
            id,
            drawer.depth,
            drawer.rest_depth + self.motion.open_offset,
            self.motion.open_duration,
            Easing::Power2Out,
        );

        stage.director.frame_drawer(focus, stage.camera);
        stage.overlay.show(id.name());
        log::info!("Opened {id}");
        Some(handle)
    }

    pub fn close(&mut self, id: DrawerId, stage: &mut Stage<'_>) -> Option<TweenHandle> {
        let drawer = stage.drawers.get_mut(id)?;
        drawer.is_open = false;
        let handle = self.depth_tweens.animate(
            id,
            drawer.depth,
            drawer.rest_depth,
            self.motion.close_duration,
            Easing::Power2In,
        );

        stage.director.frame_default(stage.camera);
        stage.overlay.hide();
        log::info!("Closed {id}");
        Some(handle)
    }

    /// Closes the open drawer, if there is one.
    pub fn close_open(&mut self, stage: &mut Stage<'_>) -> Option<DrawerId> {
        let id = stage.drawers.open_identity()?;
        self.close(id, stage);
        Some(id)
    }

    /// Where `id` is sliding to, if it is moving.
    pub fn depth_destination(&self, id: DrawerId) -> Option<f32> {
        self.depth_tweens.destination(id)
    }

    pub fn is_animating(&self) -> bool {
        !self.depth_tweens.is_empty()
    }

    /// Steps the depth tweens and writes the results into the table.
    pub fn advance(&mut self, dt: f32, drawers: &mut DrawerTable) {
        for (id, depth) in self.depth_tweens.advance(dt) {
            if let Some(drawer) = drawers.get_mut(id) {
                drawer.depth = depth;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraFraming;
    use crate::gfx::camera::{CameraController, CameraManager};
    use crate::gfx::scene::Scene;
    use crate::showroom::{drawers::DrawerRegistry, furniture, picking::PickingController};

    struct Fixture {
        drawers: DrawerTable,
        director: CameraDirector,
        overlay: OverlayPresenter,
        camera: OrbitCamera,
        machine: DrawerStateMachine,
    }

    impl Fixture {
        fn new() -> Self {
            let camera = OrbitCamera::new(Default::default(), 1.0);
            let mut scene = Scene::new(CameraManager::new(camera, CameraController::new(1.0, 1.0)));
            furniture::register_materials(&mut scene.material_manager);
            let drawers =
                DrawerRegistry::default().build(&mut scene, &mut PickingController::default(), false);
            Self {
                drawers,
                director: CameraDirector::new(CameraFraming::default()),
                overlay: OverlayPresenter::new(),
                camera,
                machine: DrawerStateMachine::new(DrawerMotion::default()),
            }
        }

        fn toggle(&mut self, id: DrawerId) {
            let mut stage = Stage {
                drawers: &mut self.drawers,
                director: &mut self.director,
                overlay: &mut self.overlay,
                camera: &self.camera,
            };
            self.machine.toggle(id, &mut stage);
        }
    }

    #[test]
    fn open_flips_immediately() {
        let mut fx = Fixture::new();
        fx.toggle(DrawerId::Drawer3);
        assert!(fx.drawers.is_open(DrawerId::Drawer3));
        assert_eq!(fx.drawers.open_identity(), Some(DrawerId::Drawer3));
        assert_eq!(fx.machine.depth_destination(DrawerId::Drawer3), Some(1.0));
        assert_eq!(fx.overlay.identity(), Some("drawer3"));
    }

    #[test]
    fn opening_another_closes_the_first() {
        let mut fx = Fixture::new();
        fx.toggle(DrawerId::Drawer1);
        fx.toggle(DrawerId::Drawer4);
        assert!(!fx.drawers.is_open(DrawerId::Drawer1));
        assert!(fx.drawers.is_open(DrawerId::Drawer4));
        assert_eq!(fx.machine.depth_destination(DrawerId::Drawer1), Some(-0.5));
        assert_eq!(fx.overlay.entry().map(|entry| entry.title), Some("Interests & Hobbies"));
    }

    #[test]
    fn reversing_mid_slide_starts_from_current_depth() {
        let mut fx = Fixture::new();
        fx.toggle(DrawerId::Drawer2);
        fx.machine.advance(0.4, &mut fx.drawers);
        let midway = fx.drawers.get(DrawerId::Drawer2).map(|d| d.depth).unwrap_or_default();
        assert!(midway > -0.5 && midway < 1.0, "{midway}");

        fx.toggle(DrawerId::Drawer2);
        fx.machine.advance(0.0, &mut fx.drawers);
        let after = fx.drawers.get(DrawerId::Drawer2).map(|d| d.depth).unwrap_or_default();
        assert!((after - midway).abs() < 1e-6);

        fx.machine.advance(1.0, &mut fx.drawers);
        assert_eq!(fx.drawers.get(DrawerId::Drawer2).map(|d| d.depth), Some(-0.5));
        assert!(!fx.machine.is_animating());
    }

    #[test]
    fn close_open_is_a_no_op_when_nothing_is_open() {
        let mut fx = Fixture::new();
        let mut stage = Stage {
            drawers: &mut fx.drawers,
            director: &mut fx.director,
            overlay: &mut fx.overlay,
            camera: &fx.camera,
        };
        assert_eq!(fx.machine.close_open(&mut stage), None);
        assert!(!fx.machine.is_animating());
        assert!(!fx.director.is_animating());
    }
}
