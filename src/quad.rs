//! Full-screen quad for the ray-march pass.
//!
//! The quad is drawn in orthographic screen space. Each vertex carries its
//! texture coordinate and, in `z`, the index of the frustum matrix row for
//! its screen corner, so the vertex shader can pick up the corner ray and
//! the rasterizer interpolates it across the screen.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Matrix row of the top-left corner ray.
pub const TOP_LEFT: u32 = 0;
/// Matrix row of the top-right corner ray.
pub const TOP_RIGHT: u32 = 1;
/// Matrix row of the bottom-right corner ray.
pub const BOTTOM_RIGHT: u32 = 2;
/// Matrix row of the bottom-left corner ray.
pub const BOTTOM_LEFT: u32 = 3;

/// One corner of the screen quad.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    /// Orthographic position (xy in [0,1]) with the frustum row index in z
    pub position: [f32; 3],
    /// Texture coordinate of the source image
    pub uv: [f32; 2],
}

impl QuadVertex {
    const fn new(x: f32, y: f32, corner: u32) -> Self {
        Self {
            position: [x, y, corner as f32],
            uv: [x, y],
        }
    }

    /// Frustum matrix row this vertex selects.
    pub fn corner_index(&self) -> usize {
        self.position[2] as usize
    }

    /// Screen coordinate, (0,0) bottom-left.
    pub fn uv(&self) -> Vec2 {
        Vec2::from_array(self.uv)
    }
}

/// Quad vertices in draw order: bottom-left, bottom-right, top-right, top-left.
pub const FULLSCREEN_QUAD: [QuadVertex; 4] = [
    QuadVertex::new(0.0, 0.0, BOTTOM_LEFT),
    QuadVertex::new(1.0, 0.0, BOTTOM_RIGHT),
    QuadVertex::new(1.0, 1.0, TOP_RIGHT),
    QuadVertex::new(0.0, 1.0, TOP_LEFT),
];

/// Index list splitting the quad into two triangles, for APIs without quads.
pub const FULLSCREEN_QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];
