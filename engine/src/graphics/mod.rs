//! Graphics module
//!
//! GPU context and frame management, off-screen render targets, and the line
//! pipeline used to draw the editor grid.

pub mod context;
pub mod mesh;
pub mod pipeline;
pub mod render_target;
pub mod uniform;

pub use context::{Frame, RenderContext};
pub use mesh::{grid_lines, LineVertex, GRID_COLOR, GRID_EXTENT};
pub use pipeline::LinePipeline;
pub use render_target::RenderTarget;
pub use uniform::{CameraUniform, UniformBuffer};

use thiserror::Error;

/// Errors raised by GPU setup and frame submission
#[derive(Debug, Error)]
pub enum GraphicsError {
    #[error("Failed to create window surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("No compatible GPU adapter: {0}")]
    AdapterRequest(#[from] wgpu::RequestAdapterError),

    #[error("Failed to create GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("Failed to acquire surface texture: {0}")]
    SurfaceAcquire(#[from] wgpu::SurfaceError),

    #[error("Surface has no supported formats")]
    UnsupportedSurface,

    #[error("Failed to create {resource}: {message}")]
    ResourceCreation {
        resource: &'static str,
        message: String,
    },
}

/// Run `create` inside a validation + out-of-memory error scope.
///
/// wgpu reports creation failures asynchronously through the device; scoping
/// turns them into a `GraphicsError` the caller can degrade on.
pub fn scoped_create<T>(
    device: &wgpu::Device,
    resource: &'static str,
    create: impl FnOnce() -> T,
) -> Result<T, GraphicsError> {
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    let validation = pollster::block_on(device.pop_error_scope());
    let out_of_memory = pollster::block_on(device.pop_error_scope());

    match validation.or(out_of_memory) {
        Some(error) => Err(GraphicsError::ResourceCreation {
            resource,
            message: error.to_string(),
        }),
        None => Ok(value),
    }
}
