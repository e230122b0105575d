//! Camera choreography that follows the drawers.

use cgmath::Vector3;

use crate::animation::{Easing, TweenHandle, Tweener};
use crate::config::CameraFraming;
use crate::gfx::camera::OrbitCamera;

/// What a camera tween drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraProperty {
    Eye,
    Target,
}

/// Handles for one framing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framing {
    pub eye: TweenHandle,
    pub target: TweenHandle,
}

/// Moves the camera between the overview and a close look at a drawer.
///
/// Every request replaces the camera tweens in flight, so the most recent
/// framing always wins.
#[derive(Debug, Clone)]
pub struct CameraDirector {
    framing: CameraFraming,
    tweens: Tweener<CameraProperty, Vector3<f32>>,
}

impl CameraDirector {
    pub fn new(framing: CameraFraming) -> Self {
        Self {
            framing,
            tweens: Tweener::new(),
        }
    }

    pub fn framing(&self) -> &CameraFraming {
        &self.framing
    }

    /// Looks at `focus` from the configured offset.
    pub fn frame_drawer(&mut self, focus: Vector3<f32>, camera: &OrbitCamera) -> Framing {
        self.frame(focus + self.framing.drawer_offset, focus, camera)
    }

    /// Returns to the overview.
    pub fn frame_default(&mut self, camera: &OrbitCamera) -> Framing {
        self.frame(self.framing.default_eye, self.framing.default_target, camera)
    }

    fn frame(&mut self, eye: Vector3<f32>, target: Vector3<f32>, camera: &OrbitCamera) -> Framing {
        let duration = self.framing.duration;
        Framing {
            eye: self
                .tweens
                .animate(CameraProperty::Eye, camera.eye, eye, duration, Easing::Power2InOut),
            target: self.tweens.animate(
                CameraProperty::Target,
                camera.target,
                target,
                duration,
                Easing::Power2InOut,
            ),
        }
    }

    /// Writes the tweened eye and target onto the camera. The caller runs
    /// [`OrbitCamera::update`] afterwards so the orbit state is re-derived
    /// from the new position. Returns `false` when nothing is animating.
    pub fn advance(&mut self, dt: f32, camera: &mut OrbitCamera) -> bool {
        let samples = self.tweens.advance(dt);
        for (property, value) in &samples {
            match property {
                CameraProperty::Eye => camera.set_eye(*value),
                CameraProperty::Target => camera.set_target(*value),
            }
        }
        !samples.is_empty()
    }

    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.tweens.is_active(handle)
    }

    pub fn destination(&self, property: CameraProperty) -> Option<Vector3<f32>> {
        self.tweens.destination(property)
    }

    /// Destinations of the running camera tweens.
    pub fn destinations(&self) -> Vec<(CameraProperty, Vector3<f32>)> {
        self.tweens.destinations().collect()
    }

    /// Stops the camera where it is.
    pub fn cancel(&mut self) {
        for property in [CameraProperty::Eye, CameraProperty::Target] {
            if let Some(handle) = self.tweens.active_handle(property) {
                self.tweens.cancel(handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    fn camera() -> OrbitCamera {
        let mut camera = OrbitCamera::new(Default::default(), 1.0);
        camera.set_eye(Vector3::new(8.0, 8.0, 8.0));
        camera.update();
        camera
    }

    #[test]
    fn drawer_framing_uses_the_offset() {
        let camera = camera();
        let mut director = CameraDirector::new(CameraFraming::default());
        let focus = Vector3::new(0.0, 0.2, -0.5);
        director.frame_drawer(focus, &camera);

        assert_eq!(director.destination(CameraProperty::Eye), Some(Vector3::new(4.0, 2.2, 3.5)));
        assert_eq!(director.destination(CameraProperty::Target), Some(focus));
    }

    #[test]
    fn later_request_supersedes_earlier() {
        let camera = camera();
        let mut director = CameraDirector::new(CameraFraming::default());
        let first = director.frame_drawer(Vector3::new(0.0, 0.2, -0.5), &camera);
        let second = director.frame_default(&camera);

        assert!(!director.is_active(first.eye));
        assert!(!director.is_active(first.target));
        assert!(director.is_active(second.eye));
        assert_eq!(director.destinations().len(), 2);
        assert_eq!(director.destination(CameraProperty::Eye), Some(Vector3::new(8.0, 8.0, 8.0)));
    }

    #[test]
    fn advancing_reaches_the_framing() {
        let mut camera = camera();
        let mut director = CameraDirector::new(CameraFraming::default());
        let focus = Vector3::new(0.0, 0.6, -0.5);
        director.frame_drawer(focus, &camera);

        let mut steps = 0;
        while director.advance(1.0 / 60.0, &mut camera) {
            camera.update();
            steps += 1;
            assert!(steps < 200, "tween never finished");
        }
        assert!(!director.is_animating());
        assert!((camera.target - focus).magnitude() < 1e-5);
        assert!((camera.eye - (focus + Vector3::new(4.0, 2.0, 4.0))).magnitude() < 1e-3);
    }

    #[test]
    fn cancel_leaves_camera_in_place() {
        let mut camera = camera();
        let mut director = CameraDirector::new(CameraFraming::default());
        director.frame_drawer(Vector3::new(0.0, 1.0, -0.5), &camera);
        director.advance(0.25, &mut camera);
        let eye = camera.eye;
        director.cancel();
        assert!(!director.advance(0.25, &mut camera));
        assert_eq!(camera.eye, eye);
    }
}
