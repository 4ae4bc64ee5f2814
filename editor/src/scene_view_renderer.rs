//! Off-screen scene view renderer
//!
//! Draws the ground grid into its own color + depth target, independent of
//! the window surface. The viewport panel shows the color texture through an
//! imgui texture id.

use forge_engine::core::camera::EditorCamera;
use forge_engine::graphics::{
    grid_lines, scoped_create, CameraUniform, GraphicsError, LinePipeline, RenderTarget,
    UniformBuffer, GRID_COLOR, GRID_EXTENT,
};
use imgui_wgpu::{RawTextureConfig, Renderer as ImguiRenderer, Texture as ImguiTexture};
use std::sync::Arc;
use tracing::{debug, error, info};
use wgpu::util::DeviceExt;

/// Color format of the scene view target
pub const SCENE_VIEW_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Background behind the grid
pub const SCENE_VIEW_CLEAR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

/// Pipeline plus the static grid mesh and its camera binding
struct GridResources {
    pipeline: LinePipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
}

impl GridResources {
    fn new(device: &wgpu::Device) -> Result<Self, GraphicsError> {
        let pipeline = LinePipeline::new(device, SCENE_VIEW_FORMAT)?;

        let vertices = grid_lines(GRID_EXTENT, GRID_COLOR);
        let (vertex_buffer, camera_buffer, camera_bind_group) =
            scoped_create(device, "scene view grid buffers", || {
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Grid Vertex Buffer"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let camera_buffer =
                    CameraUniform::default().create_buffer(device, Some("Grid Camera Buffer"));
                let camera_bind_group = pipeline.create_camera_bind_group(device, &camera_buffer);
                (vertex_buffer, camera_buffer, camera_bind_group)
            })?;

        Ok(Self {
            pipeline,
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            camera_buffer,
            camera_bind_group,
        })
    }
}

/// Target size to create for a requested viewport size, if any.
///
/// Non-positive sizes, the current size and the last size that failed to
/// create are all skipped.
pub fn plan_resize(
    current: Option<(u32, u32)>,
    failed: Option<(u32, u32)>,
    width: i32,
    height: i32,
) -> Option<(u32, u32)> {
    if width <= 0 || height <= 0 {
        return None;
    }
    let size = (width as u32, height as u32);
    if current == Some(size) || failed == Some(size) {
        return None;
    }
    Some(size)
}

/// Renders the editor scene view into an off-screen target
pub struct SceneViewRenderer {
    grid: Option<GridResources>,
    target: Option<RenderTarget>,
    failed_size: Option<(u32, u32)>,
}

impl SceneViewRenderer {
    /// Build the grid pipeline and mesh. A failure is logged and the view
    /// renders background only.
    pub fn new(device: &wgpu::Device) -> Self {
        let grid = match GridResources::new(device) {
            Ok(grid) => {
                info!(vertices = grid.vertex_count, "Scene view grid created");
                Some(grid)
            }
            Err(e) => {
                error!(error = %e, "Failed to create scene view grid, continuing without it");
                None
            }
        };

        Self {
            grid,
            target: None,
            failed_size: None,
        }
    }

    /// Match the target to the requested viewport size.
    ///
    /// Sizes rejected by [`plan_resize`] are ignored. Replacing an existing
    /// target first waits for the GPU to finish with it. If the new target
    /// cannot be created the old one stays in use and that size is not retried
    /// until a different size is requested. Returns `true` when a new target
    /// was created and the UI texture must be re-registered.
    pub fn resize(&mut self, device: &wgpu::Device, width: i32, height: i32) -> bool {
        let Some(size) = plan_resize(self.size(), self.failed_size, width, height) else {
            return false;
        };

        if let Some(old) = &self.target {
            debug!(from = ?old.size, to = ?size, "Resizing scene view");
            if let Err(e) = device.poll(wgpu::PollType::Wait) {
                error!(error = %e, "GPU wait before scene view resize failed");
            }
        }

        match RenderTarget::new(device, size.0, size.1, SCENE_VIEW_FORMAT) {
            Ok(target) => {
                info!(width = size.0, height = size.1, "Scene view target created");
                self.target = Some(target);
                self.failed_size = None;
                true
            }
            Err(e) => {
                error!(
                    error = %e,
                    width = size.0,
                    height = size.1,
                    kept = ?self.size(),
                    "Failed to create scene view target"
                );
                self.failed_size = Some(size);
                false
            }
        }
    }

    /// Record the scene view pass. Does nothing until a target exists.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        queue: &wgpu::Queue,
        camera: &EditorCamera,
    ) {
        let Some(target) = &self.target else {
            return;
        };

        if let Some(grid) = &self.grid {
            CameraUniform::from_camera(camera, target.aspect_ratio())
                .update_buffer(queue, &grid.camera_buffer);
        }

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene View Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &target.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(SCENE_VIEW_CLEAR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Some(grid) = &self.grid {
            pass.set_pipeline(&grid.pipeline.pipeline);
            pass.set_bind_group(0, &grid.camera_bind_group, &[]);
            pass.set_vertex_buffer(0, grid.vertex_buffer.slice(..));
            pass.draw(0..grid.vertex_count, 0..1);
        }
    }

    /// Register (or replace) the color texture with the imgui renderer
    pub fn register_texture(
        &self,
        device: &wgpu::Device,
        renderer: &mut ImguiRenderer,
        existing: Option<imgui::TextureId>,
    ) -> Option<imgui::TextureId> {
        let target = self.target.as_ref()?;

        let config = RawTextureConfig {
            label: Some("Scene View Texture"),
            sampler_desc: wgpu::SamplerDescriptor {
                label: Some("Scene View Sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::FilterMode::Nearest,
                ..Default::default()
            },
        };

        let texture = ImguiTexture::from_raw_parts(
            device,
            renderer,
            Arc::new(target.texture.clone()),
            Arc::new(target.view.clone()),
            None,
            Some(&config),
            target.extent(),
        );

        match existing {
            Some(id) if renderer.textures.get(id).is_some() => {
                renderer.textures.replace(id, texture);
                Some(id)
            }
            _ => Some(renderer.textures.insert(texture)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.target.is_some()
    }

    pub fn has_grid(&self) -> bool {
        self.grid.is_some()
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.target.as_ref().map(|t| t.size)
    }

    pub fn color_view(&self) -> Option<&wgpu::TextureView> {
        self.target.as_ref().map(|t| &t.view)
    }

    pub fn color_texture(&self) -> Option<&wgpu::Texture> {
        self.target.as_ref().map(|t| &t.texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_resize_ignores_non_positive_sizes() {
        assert_eq!(plan_resize(None, None, 0, 480), None);
        assert_eq!(plan_resize(None, None, 640, -1), None);
        assert_eq!(plan_resize(Some((640, 480)), None, -5, -5), None);
    }

    #[test]
    fn test_plan_resize_ignores_unchanged_size() {
        assert_eq!(plan_resize(Some((640, 480)), None, 640, 480), None);
        assert_eq!(plan_resize(Some((640, 480)), None, 800, 480), Some((800, 480)));
    }

    #[test]
    fn test_plan_resize_creates_first_target() {
        assert_eq!(plan_resize(None, None, 1, 1), Some((1, 1)));
    }

    #[test]
    fn test_plan_resize_skips_size_that_failed() {
        let failed = Some((70_000, 480));
        assert_eq!(plan_resize(Some((640, 480)), failed, 70_000, 480), None);
        assert_eq!(plan_resize(None, failed, 70_000, 480), None);
        // A different request clears the way again
        assert_eq!(plan_resize(Some((640, 480)), failed, 1024, 768), Some((1024, 768)));
    }
}
