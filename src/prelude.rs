//! # Trundle Prelude
//!
//! The types most code driving the room needs.
//!
//! ```rust
//! use trundle::prelude::*;
//!
//! let mut room = Showroom::new(ShowroomConfig::default()).expect("default config is valid");
//! room.toggle(DrawerId::Drawer1);
//! assert_eq!(room.overlay().entry().map(|entry| entry.title), Some("Featured Projects"));
//! ```

// Core application types
pub use crate::app::TrundleApp;
pub use crate::config::{CameraFraming, DrawerMotion, OrbitLimits, ShowroomConfig};
pub use crate::error::{RenderError, SceneError};

// Interaction
pub use crate::showroom::{
    CameraDirector, CameraProperty, DrawerId, DrawerStateMachine, DrawerTable, OverlayPresenter,
    PickingController, Showroom,
};
pub use crate::content::{portfolio_entry, Block, PortfolioEntry};

// Animation
pub use crate::animation::{Easing, TweenHandle, Tweener};

// Graphics and scene types
pub use crate::gfx::camera::OrbitCamera;
pub use crate::gfx::picking::{screen_to_ray, world_to_screen, Ray};
pub use crate::gfx::scene::{Object, ObjectId, Scene, Transform};

// Performance monitoring
pub use crate::performance::{PerformanceMetrics, PerformanceMonitor};

// Common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
pub use imgui::Ui;
