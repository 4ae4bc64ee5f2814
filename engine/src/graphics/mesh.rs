//! Line vertex data and the editor ground grid

use bytemuck::{Pod, Zeroable};

/// Half-extent of the ground grid in world units
pub const GRID_EXTENT: i32 = 10;

/// Flat grid line color
pub const GRID_COLOR: [f32; 4] = [0.3, 0.3, 0.3, 1.0];

/// Position + color vertex for line-list drawing
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }

    /// Get the vertex attribute layout for wgpu
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Build a line list for a square grid on the y = 0 plane.
///
/// One line per integer step from `-extent` to `extent` along each axis, so
/// `2 * extent + 1` lines per axis and two vertices per line.
pub fn grid_lines(extent: i32, color: [f32; 4]) -> Vec<LineVertex> {
    let extent = extent.abs();
    let edge = extent as f32;
    let lines = (2 * extent + 1) as usize;
    let mut vertices = Vec::with_capacity(lines * 4);

    for i in -extent..=extent {
        let offset = i as f32;
        // Parallel to Z
        vertices.push(LineVertex::new([offset, 0.0, -edge], color));
        vertices.push(LineVertex::new([offset, 0.0, edge], color));
        // Parallel to X
        vertices.push(LineVertex::new([-edge, 0.0, offset], color));
        vertices.push(LineVertex::new([edge, 0.0, offset], color));
    }

    vertices
}
