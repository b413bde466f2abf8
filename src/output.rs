//! # Output Module
//!
//! Writes what one frame hands to the renderer as a JSON document, so a run
//! of the rig can be inspected or replayed without a GPU:
//!
//! - the frustum corners (named and as matrix rows)
//! - the camera-to-world matrix and light direction
//! - the active primitives (center, radius, color)
//!
//! Inactive slots are left out; `slot_count` records how many were
//! simulated.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::camera::FrustumCorners;
use crate::gpu::RayMarchUniforms;
use crate::primitive::Primitive;
use crate::simulation::FieldSnapshot;

/// One frame of renderer input.
#[derive(Debug, Clone, Serialize)]
pub struct FrameExport {
    /// Rendered frame number, starting at 0
    pub frame: u64,
    /// Simulation ticks advanced before this frame
    pub tick: u64,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Width over height
    pub aspect: f32,
    /// Corner rays in view space
    pub corners: FrustumCorners,
    /// Same corners as uploaded (matrix rows)
    pub cam_frustum: [[f32; 4]; 4],
    /// Column-major camera-to-world matrix
    pub cam_to_world: [[f32; 4]; 4],
    /// Normalized light travel direction
    pub light_dir: [f32; 3],
    /// Slots simulated
    pub slot_count: usize,
    /// Slots to draw
    pub active: Vec<Primitive>,
}

impl FrameExport {
    /// Collect the export for one frame.
    pub fn new(
        frame: u64,
        fov_degrees: f32,
        aspect: f32,
        corners: FrustumCorners,
        uniforms: &RayMarchUniforms,
        snapshot: &FieldSnapshot,
    ) -> Self {
        let [x, y, z, _] = uniforms.light_dir;
        Self {
            frame,
            tick: snapshot.tick,
            fov_degrees,
            aspect,
            corners,
            cam_frustum: uniforms.cam_frustum,
            cam_to_world: uniforms.cam_to_world,
            light_dir: [x, y, z],
            slot_count: snapshot.primitives.len(),
            active: snapshot.active().to_vec(),
        }
    }
}

/// Write a frame export as pretty-printed JSON.
pub fn write_frame_json<W: Write>(export: &FrameExport, writer: W) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, export)?;
    Ok(())
}

/// Save a frame export to `path`.
pub fn save_frame_as_json(export: &FrameExport, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_frame_json(export, &mut writer)?;
    writer.flush()?;
    info!(
        "Frame {} ({} active primitives) written to {}",
        export.frame,
        export.active.len(),
        path.display()
    );
    Ok(())
}
