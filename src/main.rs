use std::error::Error;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{debug, error, info, warn};

use marchfield::camera::CameraParams;
use marchfield::clock::FixedStepClock;
use marchfield::config::RayMarchSettings;
use marchfield::gpu::{PrimitiveBuffers, RayMarchUniforms};
use marchfield::output::{FrameExport, save_frame_as_json};
use marchfield::quad::FULLSCREEN_QUAD;
use marchfield::random::PrimitiveRng;
use marchfield::simulation::{PrimitiveField, TickPolicy};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn main() -> ExitCode {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("marchfield - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run the host loop: fixed ticks, then one frustum solve and upload per frame.
fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut settings = match &args.config {
        Some(path) => {
            info!("Loading settings from {}", path.display());
            RayMarchSettings::load(path)?
        }
        None => RayMarchSettings::default(),
    };
    if args.active_only {
        settings.tick_policy = TickPolicy::ActiveOnly;
    }

    let fov = args.fov.unwrap_or(settings.camera.fov_degrees);
    let params = CameraParams::from_resolution(fov, args.width, args.height)?;
    let rig = settings.camera.rig();
    info!(
        "Viewport {}x{}, fov {:.1}, aspect {:.3}",
        args.width,
        args.height,
        params.fov_degrees(),
        params.aspect()
    );

    let mut rng = match args.seed {
        Some(seed) => {
            info!("Seeding primitive field with {}", seed);
            PrimitiveRng::from_seed(seed)
        }
        None => PrimitiveRng::from_entropy(),
    };
    let mut field = PrimitiveField::initialize(&settings.field_settings(), &mut rng)?;
    let mut clock = FixedStepClock::new(settings.timing.fixed_dt, settings.timing.max_ticks_per_frame);

    debug!("Screen quad: {:?}", FULLSCREEN_QUAD);

    let start = Instant::now();
    let mut reflections = 0usize;
    let mut uploaded_bytes = 0usize;
    let mut last = None;

    for frame in 0..args.frames {
        for _ in 0..clock.advance(args.frame_dt) {
            reflections += field.tick();
        }

        let corners = params.solve();
        let uniforms = RayMarchUniforms::new(&settings, &corners, &rig, field.active_count());
        let buffers = PrimitiveBuffers::from_field(&field);
        uploaded_bytes += uniforms.as_bytes().len() + buffers.sphere_bytes().len() + buffers.color_bytes().len();

        last = Some((frame, corners, uniforms));
    }

    info!(
        "Ran {} frames / {} ticks in {:.2?} ({} reflections, {} bytes uploaded)",
        args.frames,
        field.tick_count(),
        start.elapsed(),
        reflections,
        uploaded_bytes
    );

    if let Some(path) = &args.output {
        match last {
            Some((frame, corners, uniforms)) => {
                let export = FrameExport::new(
                    frame,
                    params.fov_degrees(),
                    params.aspect(),
                    corners,
                    &uniforms,
                    &field.snapshot(),
                );
                save_frame_as_json(&export, path)?;
            }
            None => warn!("No frames were run, nothing written to {}", path.display()),
        }
    }

    Ok(())
}
