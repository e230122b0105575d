use std::f32::consts::PI;

use cgmath::*;

use super::camera_utils::{Camera, CameraUniform};
use crate::config::OrbitLimits;

/// Maps OpenGL clip depth (-1..1) to wgpu's (0..1). Arguments are columns.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Keeps the polar angle off the poles so `look_at` never degenerates.
const POLE_EPSILON: f32 = 1.0e-6;

/// Damped orbit camera around a target point, Y up.
///
/// Angles follow the usual spherical convention: the azimuth is measured
/// around +Y starting at +Z and turning towards +X, the polar angle is
/// measured down from +Y. Input accumulates into a pending rotation that
/// [`OrbitCamera::update`] applies a fraction of each frame.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitLimits,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
    /// Pending (azimuth, polar) rotation.
    spherical_delta: (f32, f32),
    /// Pending radius multiplier.
    scale: f32,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection_gl() * self.view_matrix()
    }
}

impl OrbitCamera {
    /// Camera at the minimum distance in front of the origin.
    pub fn new(bounds: OrbitLimits, aspect: f32) -> Self {
        let mut camera = Self {
            eye: Vector3::new(0.0, 0.0, bounds.min_distance),
            target: Vector3::zero(),
            up: Vector3::unit_y(),
            bounds,
            aspect,
            fovy: Deg(75.0).into(),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
            spherical_delta: (0.0, 0.0),
            scale: 1.0,
        };
        camera.update();
        camera
    }

    pub fn with_projection(mut self, fov_degrees: f32, znear: f32, zfar: f32) -> Self {
        self.fovy = Deg(fov_degrees).into();
        self.znear = znear;
        self.zfar = zfar;
        self
    }

    /// Queues a rotation around the vertical axis.
    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.0 -= angle;
    }

    /// Queues a rotation towards (positive) or away from the pole.
    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.1 -= angle;
    }

    /// Queues a zoom. Positive notches move the eye closer.
    pub fn dolly(&mut self, notches: f32) {
        self.scale *= 0.95_f32.powf(notches);
    }

    pub fn set_eye(&mut self, eye: Vector3<f32>) {
        self.eye = eye;
    }

    pub fn set_target(&mut self, target: Vector3<f32>) {
        self.target = target;
    }

    /// Applies pending input, then re-derives the eye from clamped
    /// spherical coordinates around the target.
    pub fn update(&mut self) {
        let offset = self.eye - self.target;
        let radius = offset.magnitude();
        let damping = self.bounds.damping_factor;

        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = polar_of(offset, radius);

        azimuth += self.spherical_delta.0 * damping;
        polar += self.spherical_delta.1 * damping;

        azimuth = azimuth.clamp(self.bounds.min_azimuth, self.bounds.max_azimuth);
        polar = polar
            .clamp(self.bounds.min_polar, self.bounds.max_polar)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);

        let radius = (radius * self.scale).clamp(self.bounds.min_distance, self.bounds.max_distance);

        self.eye = self.target
            + Vector3::new(
                radius * polar.sin() * azimuth.sin(),
                radius * polar.cos(),
                radius * polar.sin() * azimuth.cos(),
            );

        self.spherical_delta.0 *= 1.0 - damping;
        self.spherical_delta.1 *= 1.0 - damping;
        self.scale = 1.0;
    }

    /// Horizontal orbit angle in radians.
    pub fn azimuth_angle(&self) -> f32 {
        let offset = self.eye - self.target;
        offset.x.atan2(offset.z)
    }

    /// Angle down from straight overhead in radians.
    pub fn polar_angle(&self) -> f32 {
        let offset = self.eye - self.target;
        polar_of(offset, offset.magnitude())
    }

    pub fn distance(&self) -> f32 {
        (self.eye - self.target).magnitude()
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::from_vec(self.eye),
            Point3::from_vec(self.target),
            self.up,
        )
    }

    /// Projection with OpenGL clip depth (-1..1), used for unprojection.
    pub fn projection_gl(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = self.eye.extend(1.0).into();
        self.uniform.view_proj = self.build_view_projection_matrix().into();
    }
}

fn polar_of(offset: Vector3<f32>, radius: f32) -> f32 {
    if radius <= f32::EPSILON {
        0.0
    } else {
        (offset.y / radius).clamp(-1.0, 1.0).acos()
    }
}
