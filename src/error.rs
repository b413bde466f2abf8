//! Error types.
//!
//! The numeric cores (`solve`, `tick`) never fail. These errors come from the
//! checked entry points that sit in front of them.

use std::path::PathBuf;

/// Rejected camera parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    /// Field of view outside the open range (0, 180)
    #[error("field of view must be in (0, 180) degrees, got {0}")]
    FieldOfView(f32),
    /// Aspect ratio that is zero, negative or not finite
    #[error("aspect ratio must be positive and finite, got {0}")]
    Aspect(f32),
}

/// Rejected primitive field operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    /// More active primitives requested than there are slots
    #[error("active count {requested} exceeds capacity {capacity}")]
    CapacityExceeded {
        /// Requested active count
        requested: usize,
        /// Fixed slot count
        capacity: usize,
    },
    /// Slot index past the end of the field
    #[error("slot {index} out of range (capacity {capacity})")]
    SlotOutOfRange {
        /// Offending index
        index: usize,
        /// Fixed slot count
        capacity: usize,
    },
}

/// Failure to load or validate ray-march settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// Settings file is not valid JSON for [`crate::config::RayMarchSettings`]
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// File that was being parsed
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
    /// A value parsed but is out of range
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Name of the offending setting
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}
