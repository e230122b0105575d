//! Error types for the Trundle scene
//!
//! Everything that can go wrong happens while the window, GPU and scene are
//! being brought up. Once the first frame is drawn, hit-testing, drawer
//! toggling and animation are total and never produce errors.

use thiserror::Error;

/// Failures while acquiring the GPU surface, adapter or device.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create a rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to acquire a graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("the surface reports no supported texture formats")]
    UnsupportedSurface,

    #[error("render pipeline setup failed: {}", .0.join("; "))]
    Pipelines(Vec<String>),
}

/// Failures while building the interactive scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Render(#[from] RenderError),
}
