//! # User Interface Module
//!
//! Dear ImGui overlay drawn on top of the room.
//!
//! ## Key Components
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu
//! - [`overlay_panel`] - the open drawer's portfolio entry, with a close button
//! - [`angle_readout`] - orbit angles in the bottom-left corner
//! - [`error_screen`] - replaces the view when the scene fails to start
//!
//! ## Input Handling
//!
//! While the pointer is over an ImGui window the scene does not see clicks,
//! so pressing the overlay's close button never toggles a drawer behind it.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::{angle_readout, error_screen, format_angle_readout, overlay_panel};
