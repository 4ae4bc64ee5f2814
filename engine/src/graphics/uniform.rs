//! GPU uniform buffer types
//!
//! Structures here match the uniform blocks declared in the WGSL shaders.

use crate::core::camera::EditorCamera;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Camera uniform: the combined view-projection matrix
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }

    /// View-projection of the editor camera at the given aspect ratio
    pub fn from_camera(camera: &EditorCamera, aspect_ratio: f32) -> Self {
        Self::new(camera.view_projection(aspect_ratio))
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

/// Helper trait for creating GPU buffers from uniform types
pub trait UniformBuffer: Pod {
    fn create_buffer(&self, device: &wgpu::Device, label: Option<&str>) -> wgpu::Buffer {
        use wgpu::util::DeviceExt;

        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label,
            contents: bytemuck::cast_slice(&[*self]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    fn update_buffer(&self, queue: &wgpu::Queue, buffer: &wgpu::Buffer) {
        queue.write_buffer(buffer, 0, bytemuck::cast_slice(&[*self]));
    }
}

impl UniformBuffer for CameraUniform {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_uniform_size() {
        // One 4x4 f32 matrix
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
    }

    #[test]
    fn test_from_camera_matches_view_projection() {
        let camera = EditorCamera::default();
        let uniform = CameraUniform::from_camera(&camera, 2.0);
        assert_eq!(
            uniform.view_proj,
            camera.view_projection(2.0).to_cols_array_2d()
        );
    }
}
