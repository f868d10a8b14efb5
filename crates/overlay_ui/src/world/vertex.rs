//! World-space vertex data

use bytemuck::{Pod, Zeroable};

/// Vertex format shared by marker and trail batches
///
/// Plain-old-data so backends can upload batches to GPU buffers directly.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct WorldVertex {
    /// World-space position
    pub position: [f32; 3],
    /// Texture coordinate
    pub uv: [f32; 2],
    /// RGBA color; alpha carries the entity's faded opacity
    pub color: [f32; 4],
}

impl WorldVertex {
    /// Assemble a vertex
    pub fn new(position: [f32; 3], uv: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            position,
            uv,
            color,
        }
    }
}
