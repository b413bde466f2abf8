//! GPU-facing data for the ray-march shader.
//!
//! Everything the shader reads per frame, flattened into `#[repr(C)]` plain
//! data that can be copied straight into uniform and storage buffers:
//!
//! ```text
//! FrustumCorners ─┐
//! CameraRig ──────┼─> RayMarchUniforms  (one uniform block)
//! RayMarchSettings┘
//! PrimitiveField ───> GpuPrimitive[MAX] + colors[MAX]  (storage arrays)
//! ```
//!
//! All members are vec4-sized so the block has the same layout under std140
//! and std430.

use bytemuck::{Pod, Zeroable};

use crate::camera::{CameraRig, FrustumCorners};
use crate::config::RayMarchSettings;
use crate::simulation::PrimitiveField;

/// Uniform block consumed by the ray-march pass.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RayMarchUniforms {
    /// Frustum corner rays, `cam_frustum[i]` is row `i` (w = 0)
    pub cam_frustum: [[f32; 4]; 4],
    /// Camera-to-world transform, column-major
    pub cam_to_world: [[f32; 4]; 4],
    /// Normalized light travel direction (xyz), w unused
    pub light_dir: [f32; 4],
    /// Light color (rgb) and intensity (w)
    pub light_color: [f32; 4],
    /// Base surface color (rgba)
    pub main_color: [f32; 4],
    /// Ground plane color (rgba)
    pub ground_color: [f32; 4],
    /// Max distance, accuracy, reflection intensity, environment reflection intensity
    pub march: [f32; 4],
    /// Shadow intensity, penumbra, near, far
    pub shadow: [f32; 4],
    /// AO step size, AO intensity, color intensity, transparency intensity
    pub shading: [f32; 4],
    /// Max iterations, AO iterations, reflection count, active primitive count
    pub counts: [u32; 4],
}

impl RayMarchUniforms {
    /// Assemble the block for one frame.
    pub fn new(
        settings: &RayMarchSettings,
        corners: &FrustumCorners,
        rig: &CameraRig,
        active_count: usize,
    ) -> Self {
        let light_dir = settings.light_direction();

        Self {
            cam_frustum: corners.rows().map(|c| c.extend(0.0).to_array()),
            cam_to_world: rig.cam_to_world().to_cols_array_2d(),
            light_dir: light_dir.extend(0.0).to_array(),
            light_color: settings.light_color.extend(settings.light_intensity).to_array(),
            main_color: settings.main_color.to_array(),
            ground_color: settings.ground_color.to_array(),
            march: [
                settings.max_distance,
                settings.accuracy,
                settings.reflection_intensity,
                settings.env_reflection_intensity,
            ],
            shadow: [
                settings.shadow_intensity,
                settings.shadow_penumbra,
                settings.shadow_near,
                settings.shadow_far,
            ],
            shading: [
                settings.ao_step_size,
                settings.ao_intensity,
                settings.color_intensity,
                settings.transparency_intensity,
            ],
            counts: [
                settings.max_iterations,
                settings.ao_iterations,
                settings.reflection_count,
                active_count as u32,
            ],
        }
    }

    /// Raw bytes for a buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Sphere center (xyz) and radius (w), packed in a vec4 for alignment.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuPrimitive {
    /// `[x, y, z, radius]`
    pub center_radius: [f32; 4],
}

/// Per-slot arrays uploaded alongside [`RayMarchUniforms`].
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveBuffers {
    /// Every slot, active or not
    pub spheres: Vec<GpuPrimitive>,
    /// RGBA per slot
    pub colors: Vec<[f32; 4]>,
}

impl PrimitiveBuffers {
    /// Flatten the field's current state.
    pub fn from_field(field: &PrimitiveField) -> Self {
        let primitives = field.primitives();
        Self {
            spheres: primitives
                .iter()
                .map(|p| GpuPrimitive { center_radius: p.center_radius().to_array() })
                .collect(),
            colors: primitives.iter().map(|p| p.color.to_array()).collect(),
        }
    }

    /// Raw bytes of the sphere array.
    pub fn sphere_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.spheres)
    }

    /// Raw bytes of the color array.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::solve;
    use crate::random::PrimitiveRng;
    use crate::simulation::{FieldSettings, MAX_PRIMITIVES};

    #[test]
    fn uniform_block_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<RayMarchUniforms>(), 2 * 64 + 8 * 16);
        assert_eq!(std::mem::size_of::<RayMarchUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<GpuPrimitive>(), 16);
    }

    #[test]
    fn uniforms_carry_frustum_rows_and_settings() {
        let settings = RayMarchSettings {
            main_color: glam::Vec4::new(0.2, 0.4, 0.6, 1.0),
            ..Default::default()
        };
        let corners = solve(90.0, 1.0);
        let u = RayMarchUniforms::new(&settings, &corners, &CameraRig::default(), 7);

        for (row, expected) in u.cam_frustum[0].iter().zip([-1.0, 1.0, -1.0, 0.0]) {
            assert!((row - expected).abs() < 1e-5);
        }
        assert_eq!(u.cam_frustum[3], corners.bottom_left.extend(0.0).to_array());
        assert_eq!(u.cam_to_world[3], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(u.light_dir, [0.0, -1.0, 0.0, 0.0]);
        assert_eq!(u.main_color, [0.2, 0.4, 0.6, 1.0]);
        assert_eq!(u.ground_color, [1.0; 4]);
        assert_eq!(u.march[0], settings.max_distance);
        assert_eq!(u.counts, [164, 3, 2, 7]);
        assert_eq!(u.as_bytes().len(), std::mem::size_of::<RayMarchUniforms>());
    }

    #[test]
    fn buffers_cover_every_slot() {
        let mut field =
            PrimitiveField::initialize(&FieldSettings::default(), &mut PrimitiveRng::from_seed(4)).unwrap();
        field.tick();
        let buffers = PrimitiveBuffers::from_field(&field);

        assert_eq!(buffers.spheres.len(), MAX_PRIMITIVES);
        assert_eq!(buffers.sphere_bytes().len(), MAX_PRIMITIVES * 16);
        assert_eq!(buffers.color_bytes().len(), MAX_PRIMITIVES * 16);

        let p = field.primitives()[12];
        assert_eq!(buffers.spheres[12].center_radius, [p.center.x, p.center.y, p.center.z, p.radius]);
        assert_eq!(buffers.colors[12], [1.0; 4]);
    }
}
