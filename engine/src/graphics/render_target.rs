//! Off-screen render target
//!
//! A color texture the UI can sample plus a matching depth buffer. Targets are
//! immutable once created; resizing means building a new one.

use super::{scoped_create, GraphicsError};

/// Format of the depth attachment paired with every render target
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// A color + depth pair for off-screen rendering
#[derive(Debug)]
pub struct RenderTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub depth_texture: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
    pub format: wgpu::TextureFormat,
    /// (width, height) in pixels
    pub size: (u32, u32),
}

impl RenderTarget {
    /// Create both textures inside an error scope.
    ///
    /// Sizes must be non-zero; the caller filters those out.
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Result<Self, GraphicsError> {
        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = scoped_create(device, "render target color texture", || {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Scene View Color"),
                size: extent,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            })
        })?;

        let depth_texture = scoped_create(device, "render target depth texture", || {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Scene View Depth"),
                size: extent,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
        })?;

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            texture,
            view,
            depth_texture,
            depth_view,
            format,
            size: (width, height),
        })
    }

    pub fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.size.0,
            height: self.size.1,
            depth_or_array_layers: 1,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio(self.size.0, self.size.1)
    }
}

/// Width over height, 1.0 for degenerate sizes
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(aspect_ratio(1600, 900), 1600.0 / 900.0);
        assert_eq!(aspect_ratio(512, 512), 1.0);
    }

    #[test]
    fn test_aspect_ratio_degenerate() {
        assert_eq!(aspect_ratio(0, 900), 1.0);
        assert_eq!(aspect_ratio(1600, 0), 1.0);
    }
}
