//! Sphere primitive consumed by the ray-march shader.

use glam::{Vec3A, Vec4};
use serde::Serialize;

/// RGBA color.
pub type Color = Vec4;

/// Opaque white, the color every primitive starts with.
pub const WHITE: Color = Vec4::ONE;

/// Sphere defined by center, radius and color.
///
/// The shader evaluates a sphere SDF per primitive; this is just its input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Primitive {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,
    /// Radius of the sphere.
    pub radius: f32,
    /// Surface color (RGBA).
    pub color: Color,
}

impl Primitive {
    /// Create a new sphere.
    pub fn new(center: Vec3A, radius: f32, color: Color) -> Self {
        Self { center, radius, color }
    }

    /// Center and radius packed as `(x, y, z, radius)`.
    pub fn center_radius(&self) -> Vec4 {
        self.center.extend(self.radius)
    }
}

impl Default for Primitive {
    fn default() -> Self {
        Self::new(Vec3A::ZERO, 0.0, WHITE)
    }
}
