use std::f32::consts::PI;

use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, MouseScrollDelta},
};

use super::orbit_camera::OrbitCamera;

/// Pixel scroll distance treated as one wheel notch.
const PIXELS_PER_NOTCH: f64 = 100.0;

/// Turns mouse input into orbit rotation and zoom.
///
/// Dragging across the full viewport height turns the camera by a full
/// circle.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    is_dragging: bool,
    viewport_height: f32,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            is_dragging: false,
            viewport_height: 1.0,
        }
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height.max(1) as f32;
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.is_dragging = dragging;
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.is_dragging {
                self.rotate_by_pixels(delta.0 as f32, delta.1 as f32, camera);
            }
        }
    }

    pub fn rotate_by_pixels(&self, dx: f32, dy: f32, camera: &mut OrbitCamera) {
        let turn = 2.0 * PI * self.rotate_speed / self.viewport_height;
        camera.rotate_left(dx * turn);
        camera.rotate_up(dy * turn);
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta, camera: &mut OrbitCamera) {
        let notches = match delta {
            MouseScrollDelta::LineDelta(_, scroll) => *scroll,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => (*y / PIXELS_PER_NOTCH) as f32,
        };
        if notches != 0.0 {
            camera.dolly(notches * self.zoom_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrbitLimits;
    use cgmath::Vector3;

    fn camera() -> OrbitCamera {
        let mut camera = OrbitCamera::new(OrbitLimits::default(), 1.0);
        camera.set_eye(Vector3::new(8.0, 8.0, 8.0));
        camera.update();
        camera
    }

    #[test]
    fn motion_is_ignored_unless_dragging() {
        let mut controller = CameraController::new(1.0, 1.0);
        controller.set_viewport_height(800);
        let mut camera = camera();
        let before = camera.azimuth_angle();

        controller.process_events(&DeviceEvent::MouseMotion { delta: (40.0, 0.0) }, &mut camera);
        camera.update();
        assert!((camera.azimuth_angle() - before).abs() < 1e-6);

        controller.set_dragging(true);
        controller.process_events(&DeviceEvent::MouseMotion { delta: (40.0, 0.0) }, &mut camera);
        camera.update();
        assert!(camera.azimuth_angle() < before);
    }

    #[test]
    fn pixel_scroll_is_converted_to_notches() {
        let mut controller = CameraController::new(1.0, 1.0);
        let mut camera = camera();
        let before = camera.distance();

        let delta = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 100.0));
        controller.process_scroll(&delta, &mut camera);
        camera.update();
        assert!((camera.distance() - before * 0.95).abs() < 1e-3);
    }
}
