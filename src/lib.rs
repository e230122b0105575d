// src/lib.rs
//! Trundle
//!
//! An interactive 3D bunk-bed portfolio built on wgpu and winit. Orbit the
//! room, click one of the four trundle drawers under the bed, and the drawer
//! slides out while the camera moves in and the drawer's portfolio entry
//! appears.
//!
//! The interactive core lives in [`showroom`] and runs without a GPU; the
//! [`app`] module wraps it in a window.

pub mod animation;
pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod gfx;
pub mod performance;
pub mod prelude;
pub mod showroom;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::TrundleApp;
pub use config::ShowroomConfig;
pub use showroom::{DrawerId, Showroom};

/// Creates an application with the default configuration plus environment
/// overrides.
pub fn default() -> TrundleApp {
    TrundleApp::new(ShowroomConfig::from_env())
}
