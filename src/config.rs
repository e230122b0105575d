//! Scene configuration
//!
//! All of the room's tunable numbers live here: orbit limits, drawer motion,
//! camera framing and window settings. [`ShowroomConfig::default`] reproduces
//! the shipped experience; [`ShowroomConfig::from_env`] layers a handful of
//! environment overrides on top for development.
//!
//! | Variable | Meaning |
//! |---|---|
//! | `TRUNDLE_SHOW_STATS` | show the frame statistics panel (`1`/`0`) |
//! | `TRUNDLE_VSYNC` | present with vsync instead of immediate mode |
//! | `TRUNDLE_WINDOW_SIZE` | initial window size, e.g. `1600x900` |

use std::f32::consts::FRAC_PI_2;

use cgmath::Vector3;

use crate::error::SceneError;

/// Limits and feel of the orbit camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle range in radians, measured from straight up.
    pub min_polar: f32,
    pub max_polar: f32,
    /// Azimuth range in radians, measured around +Y from +Z towards +X.
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    /// Fraction of the pending rotation applied each frame.
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: 4.0,
            max_distance: 16.0,
            min_polar: 0.0,
            max_polar: FRAC_PI_2,
            min_azimuth: 0.0,
            max_azimuth: FRAC_PI_2,
            damping_factor: 0.25,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

/// How far and how fast a drawer slides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerMotion {
    /// Distance travelled along +Z when opening.
    pub open_offset: f32,
    /// Seconds.
    pub open_duration: f32,
    /// Seconds.
    pub close_duration: f32,
}

impl Default for DrawerMotion {
    fn default() -> Self {
        Self {
            open_offset: 1.5,
            open_duration: 0.8,
            close_duration: 0.6,
        }
    }
}

/// Where the camera sits by default and when looking into a drawer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFraming {
    pub default_eye: Vector3<f32>,
    pub default_target: Vector3<f32>,
    /// Eye offset relative to the focused drawer.
    pub drawer_offset: Vector3<f32>,
    /// Seconds.
    pub duration: f32,
}

impl Default for CameraFraming {
    fn default() -> Self {
        Self {
            default_eye: Vector3::new(8.0, 8.0, 8.0),
            default_target: Vector3::new(0.0, 0.0, 0.0),
            drawer_offset: Vector3::new(4.0, 2.0, 4.0),
            duration: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowroomConfig {
    pub orbit: OrbitLimits,
    pub drawers: DrawerMotion,
    pub framing: CameraFraming,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub window_size: (u32, u32),
    pub show_stats: bool,
    pub vsync: bool,
    /// Draw black edge outlines over the furniture.
    pub outlines: bool,
}

impl Default for ShowroomConfig {
    fn default() -> Self {
        Self {
            orbit: OrbitLimits::default(),
            drawers: DrawerMotion::default(),
            framing: CameraFraming::default(),
            fov_degrees: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            window_size: (1280, 800),
            show_stats: true,
            vsync: false,
            outlines: true,
        }
    }
}

impl ShowroomConfig {
    /// Defaults with overrides read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("TRUNDLE_SHOW_STATS") {
            match parse_flag(&raw) {
                Some(flag) => config.show_stats = flag,
                None => log::warn!("Ignoring TRUNDLE_SHOW_STATS={raw:?}: expected a boolean"),
            }
        }

        if let Some(raw) = lookup("TRUNDLE_VSYNC") {
            match parse_flag(&raw) {
                Some(flag) => config.vsync = flag,
                None => log::warn!("Ignoring TRUNDLE_VSYNC={raw:?}: expected a boolean"),
            }
        }

        if let Some(raw) = lookup("TRUNDLE_WINDOW_SIZE") {
            match parse_window_size(&raw) {
                Some(size) => config.window_size = size,
                None => log::warn!("Ignoring TRUNDLE_WINDOW_SIZE={raw:?}: expected WIDTHxHEIGHT"),
            }
        }

        config
    }

    /// Rejects combinations the camera and animation code cannot honour.
    pub fn validate(&self) -> Result<(), SceneError> {
        let orbit = &self.orbit;
        if !(orbit.min_distance > 0.0 && orbit.min_distance < orbit.max_distance) {
            return Err(SceneError::InvalidConfig(format!(
                "orbit distance range {}..{} is empty",
                orbit.min_distance, orbit.max_distance
            )));
        }
        if orbit.min_polar > orbit.max_polar || orbit.min_azimuth > orbit.max_azimuth {
            return Err(SceneError::InvalidConfig(
                "orbit angle ranges must have min <= max".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&orbit.damping_factor) {
            return Err(SceneError::InvalidConfig(format!(
                "damping factor {} is outside 0..=1",
                orbit.damping_factor
            )));
        }

        let durations = [
            ("drawer open", self.drawers.open_duration),
            ("drawer close", self.drawers.close_duration),
            ("camera framing", self.framing.duration),
        ];
        for (what, seconds) in durations {
            if !(seconds.is_finite() && seconds > 0.0) {
                return Err(SceneError::InvalidConfig(format!(
                    "{what} duration must be positive, got {seconds}"
                )));
            }
        }

        if !(self.znear > 0.0 && self.znear < self.zfar) {
            return Err(SceneError::InvalidConfig(format!(
                "clip planes {}..{} are invalid",
                self.znear, self.zfar
            )));
        }
        if self.window_size.0 == 0 || self.window_size.1 == 0 {
            return Err(SceneError::InvalidConfig(
                "window size must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_window_size(raw: &str) -> Option<(u32, u32)> {
    let (width, height) = raw.trim().split_once(['x', 'X'])?;
    let width = width.trim().parse().ok()?;
    let height = height.trim().parse().ok()?;
    (width > 0 && height > 0).then_some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = ShowroomConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.orbit.min_distance, 4.0);
        assert_eq!(config.orbit.max_distance, 16.0);
        assert_eq!(config.drawers.open_offset, 1.5);
        assert!(config.show_stats);
        assert!(!config.vsync);
    }

    #[test]
    fn environment_overrides_apply() {
        let config = ShowroomConfig::from_lookup(lookup_from(&[
            ("TRUNDLE_SHOW_STATS", "off"),
            ("TRUNDLE_VSYNC", "1"),
            ("TRUNDLE_WINDOW_SIZE", "1600x900"),
        ]));
        assert!(!config.show_stats);
        assert!(config.vsync);
        assert_eq!(config.window_size, (1600, 900));
    }

    #[test]
    fn malformed_overrides_are_ignored() {
        let config = ShowroomConfig::from_lookup(lookup_from(&[
            ("TRUNDLE_SHOW_STATS", "maybe"),
            ("TRUNDLE_WINDOW_SIZE", "0x900"),
        ]));
        assert_eq!(config, ShowroomConfig::default());
    }

    #[test]
    fn inverted_distance_range_is_rejected() {
        let mut config = ShowroomConfig::default();
        config.orbit.min_distance = 20.0;
        assert!(matches!(
            config.validate(),
            Err(SceneError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut config = ShowroomConfig::default();
        config.drawers.close_duration = 0.0;
        assert!(config.validate().is_err());
    }
}
