//! Ray-march settings.
//!
//! Everything here is forwarded to the shader as-is except the primitive
//! size and count, which drive the field, and the camera and timing blocks,
//! which drive the host loop. Files are JSON; any field may be omitted.

use std::fs;
use std::path::Path;

use glam::{Vec3, Vec3A, Vec4};
use serde::{Deserialize, Serialize};

use crate::camera::CameraRig;
use crate::error::ConfigError;
use crate::primitive::WHITE;
use crate::simulation::{FieldSettings, MAX_PRIMITIVES, TickPolicy};

/// Camera placement and lens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Camera position
    pub lookfrom: Vec3,
    /// Look target
    pub lookat: Vec3,
    /// Up vector
    pub vup: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            lookfrom: Vec3::new(0.0, 10.0, 25.0),
            lookat: Vec3::new(0.0, 10.0, 0.0),
            vup: Vec3::Y,
        }
    }
}

impl CameraSettings {
    /// World placement of the camera.
    pub fn rig(&self) -> CameraRig {
        CameraRig {
            lookfrom: Vec3A::from(self.lookfrom),
            lookat: Vec3A::from(self.lookat),
            vup: Vec3A::from(self.vup),
        }
    }
}

/// Fixed-step scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Seconds per simulation tick
    pub fixed_dt: f32,
    /// Upper limit on ticks run before a single frame
    pub max_ticks_per_frame: u32,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            fixed_dt: 0.02,
            max_ticks_per_frame: 8,
        }
    }
}

/// Tunables of the ray-march pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayMarchSettings {
    /// Ray length after which marching gives up
    pub max_distance: f32,
    /// March steps per ray
    pub max_iterations: u32,
    /// Surface hit epsilon
    pub accuracy: f32,

    /// Direction light travels in; straight down when unset
    pub light_direction: Option<Vec3>,
    /// Light color (RGB)
    pub light_color: Vec3,
    /// Light intensity
    pub light_intensity: f32,

    /// Shadow darkness
    pub shadow_intensity: f32,
    /// Soft-shadow penumbra factor
    pub shadow_penumbra: f32,
    /// Shadow ray start distance
    pub shadow_near: f32,
    /// Shadow ray end distance
    pub shadow_far: f32,

    /// Ambient occlusion sample spacing
    pub ao_step_size: f32,
    /// Ambient occlusion samples
    pub ao_iterations: u32,
    /// Ambient occlusion strength
    pub ao_intensity: f32,

    /// Reflection bounces
    pub reflection_count: u32,
    /// Reflection strength
    pub reflection_intensity: f32,
    /// Environment map reflection strength
    pub env_reflection_intensity: f32,

    /// Base surface color (RGBA)
    pub main_color: Vec4,
    /// Ground plane color (RGBA)
    pub ground_color: Vec4,
    /// Primitive color multiplier
    pub color_intensity: f32,
    /// Primitive transparency multiplier
    pub transparency_intensity: f32,

    /// Shared primitive radius
    pub primitive_size: f32,
    /// Primitives to draw
    pub primitive_count: usize,
    /// Which slots a tick advances
    pub tick_policy: TickPolicy,

    /// Camera block
    pub camera: CameraSettings,
    /// Timing block
    pub timing: TimingSettings,
}

impl Default for RayMarchSettings {
    fn default() -> Self {
        Self {
            max_distance: 200.0,
            max_iterations: 164,
            accuracy: 0.01,
            light_direction: None,
            light_color: Vec3::ONE,
            light_intensity: 1.0,
            shadow_intensity: 0.5,
            shadow_penumbra: 8.0,
            shadow_near: 0.1,
            shadow_far: 50.0,
            ao_step_size: 0.1,
            ao_iterations: 3,
            ao_intensity: 0.25,
            reflection_count: 2,
            reflection_intensity: 0.5,
            env_reflection_intensity: 0.5,
            main_color: WHITE,
            ground_color: WHITE,
            color_intensity: 1.0,
            transparency_intensity: 1.0,
            primitive_size: 1.0,
            primitive_count: 10,
            tick_policy: TickPolicy::AllSlots,
            camera: CameraSettings::default(),
            timing: TimingSettings::default(),
        }
    }
}

impl RayMarchSettings {
    /// Read and validate a JSON settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the shader or the field cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: String) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if !(self.max_distance > 0.0) {
            return invalid("max_distance", format!("must be positive, got {}", self.max_distance));
        }
        if self.max_iterations == 0 {
            return invalid("max_iterations", "must be at least 1".to_string());
        }
        if !(self.accuracy > 0.0) {
            return invalid("accuracy", format!("must be positive, got {}", self.accuracy));
        }
        if !(self.primitive_size >= 0.0) {
            return invalid("primitive_size", format!("must not be negative, got {}", self.primitive_size));
        }
        if self.primitive_count > MAX_PRIMITIVES {
            return invalid(
                "primitive_count",
                format!("{} exceeds capacity {}", self.primitive_count, MAX_PRIMITIVES),
            );
        }
        if self.light_direction.is_some_and(|dir| dir.try_normalize().is_none()) {
            return invalid("light_direction", "must be a non-zero vector".to_string());
        }
        if self.timing.max_ticks_per_frame == 0 {
            return invalid("timing.max_ticks_per_frame", "must be at least 1".to_string());
        }
        if !(self.timing.fixed_dt > 0.0) {
            return invalid("timing.fixed_dt", format!("must be positive, got {}", self.timing.fixed_dt));
        }
        Ok(())
    }

    /// Normalized light travel direction, straight down when none is set.
    pub fn light_direction(&self) -> Vec3 {
        self.light_direction
            .and_then(Vec3::try_normalize)
            .unwrap_or(Vec3::NEG_Y)
    }

    /// Initialization parameters for the primitive field.
    pub fn field_settings(&self) -> FieldSettings {
        FieldSettings {
            active_count: self.primitive_count,
            size: self.primitive_size,
            color: WHITE,
            policy: self.tick_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = RayMarchSettings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.light_direction(), Vec3::NEG_Y);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let s: RayMarchSettings = serde_json::from_str(
            r#"{ "max_distance": 50.0, "light_direction": [0.0, 0.0, -2.0], "camera": { "fov_degrees": 45.0 } }"#,
        )
        .unwrap();
        assert_eq!(s.max_distance, 50.0);
        assert_eq!(s.light_direction(), Vec3::NEG_Z);
        assert_eq!(s.camera.fov_degrees, 45.0);
        assert_eq!(s.camera.lookat, CameraSettings::default().lookat);
        assert_eq!(s.primitive_count, 10);
        assert_eq!(s.tick_policy, TickPolicy::AllSlots);
    }

    #[test]
    fn tick_policy_parses_snake_case() {
        let s: RayMarchSettings = serde_json::from_str(r#"{ "tick_policy": "active_only" }"#).unwrap();
        assert_eq!(s.field_settings().policy, TickPolicy::ActiveOnly);
    }

    #[test]
    fn validation_names_the_bad_field() {
        let stalled = TimingSettings { max_ticks_per_frame: 0, ..Default::default() };
        let cases: [(&str, RayMarchSettings); 5] = [
            ("max_distance", RayMarchSettings { max_distance: 0.0, ..Default::default() }),
            ("primitive_count", RayMarchSettings { primitive_count: MAX_PRIMITIVES + 1, ..Default::default() }),
            ("light_direction", RayMarchSettings { light_direction: Some(Vec3::ZERO), ..Default::default() }),
            ("accuracy", RayMarchSettings { accuracy: f32::NAN, ..Default::default() }),
            ("timing.max_ticks_per_frame", RayMarchSettings { timing: stalled, ..Default::default() }),
        ];
        for (name, s) in cases {
            match s.validate() {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, name),
                other => panic!("expected {} to be rejected, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = RayMarchSettings::load(Path::new("/nonexistent/marchfield.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_round_trips_through_a_file() {
        let path = std::env::temp_dir().join(format!("marchfield-config-{}.json", std::process::id()));
        let mut s = RayMarchSettings::default();
        s.primitive_count = 42;
        fs::write(&path, serde_json::to_string_pretty(&s).unwrap()).unwrap();

        let loaded = RayMarchSettings::load(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded, s);

        let field = loaded.field_settings();
        assert_eq!(field.active_count, 42);
        assert_eq!(field.size, 1.0);
    }
}
