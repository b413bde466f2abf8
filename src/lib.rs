//! marchfield
//!
//! Host-side parameters for a full-screen ray-marching pass: frustum corner
//! rays for per-pixel view-ray reconstruction, a bouncing field of SDF sphere
//! primitives, and the plain-data uniform layout both are uploaded in.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod clock;
pub mod config;
pub mod error;
pub mod gpu;
pub mod interval;
pub mod output;
pub mod primitive;
pub mod quad;
pub mod random;
pub mod simulation;
