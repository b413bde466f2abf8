use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "marchfield")]
#[command(about = "Drive the ray-march frustum solver and primitive field without a GPU")]
pub struct Args {
    /// JSON settings file (defaults are used when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Number of frames to run
    #[arg(long, short = 'n', default_value = "600")]
    pub frames: u64,

    /// Simulated seconds per rendered frame
    #[arg(long, default_value = "0.016666668")]
    pub frame_dt: f32,

    /// Seed for primitive placement (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the configured vertical field of view in degrees
    #[arg(long)]
    pub fov: Option<f32>,

    /// Viewport width in pixels
    #[arg(long, default_value = "1920")]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "1080")]
    pub height: u32,

    /// Only advance the active primitives each tick
    #[arg(long)]
    pub active_only: bool,

    /// Write the last frame's renderer input to this JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
