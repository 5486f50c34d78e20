//! Vertex stage contract: input layout and clip-space projection.
//!
//! Positions and normals are taken to already be world-space; no model
//! matrix is applied before projection. The stage only attaches a clip
//! position and forwards the attributes for interpolation.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Vertex input record matching the vertex buffer layout:
/// position (3f), texture coordinate (2f), normal (3f). 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

/// Per-vertex outputs interpolated across the triangle.
#[derive(Clone, Copy, Debug)]
pub struct VertexOutput {
    pub clip_position: Vec4,
    pub world_position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Runs the vertex stage for one vertex.
pub fn transform_vertex(view_proj: Mat4, vertex: &Vertex) -> VertexOutput {
    let world_position = Vec3::from(vertex.position);
    VertexOutput {
        clip_position: view_proj * world_position.extend(1.0),
        world_position,
        normal: Vec3::from(vertex.normal),
        uv: Vec2::from(vertex.uv),
    }
}
