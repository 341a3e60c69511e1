use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config;
use crate::diagnostics::SystemDiagnostics;
use crate::error::Result;
use crate::init_config::{DemoConfig, DemoKind, RunConfig};
use crate::io;
use crate::renderer::patterns::{self, PatternEntry};
use crate::renderer::{PixelBuffer, PngCapture};
use crate::simulation::ParticleSystem;
use crate::units;

pub mod scheduler;

use scheduler::{FrameScheduler, Schedule};

pub fn run(config: &DemoConfig) -> Result<()> {
    // Global rayon pool: max(MIN_THREADS, cores - THREADS_LEAVE_FREE) threads
    let cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    let threads = cores
        .saturating_sub(config::THREADS_LEAVE_FREE)
        .max(config::MIN_THREADS);
    if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
        warn!("rayon pool already initialised: {e}");
    }

    match config.run.demo_kind()? {
        DemoKind::ElectricField => run_electric_field(config),
        DemoKind::Pattern(name) => run_pattern(patterns::find(&name)?, &config.run),
        DemoKind::AllPatterns => {
            for entry in patterns::catalogue() {
                run_pattern(entry, &config.run)?;
            }
            Ok(())
        }
    }
}

fn make_surface(run: &RunConfig, prefix: &str) -> Result<PixelBuffer> {
    let surface = PixelBuffer::new(run.width, run.height);
    match &run.capture_folder {
        Some(folder) => {
            let capture = PngCapture::new(folder, prefix, config::CAPTURE_QUEUE_DEPTH)?;
            info!(folder = %capture.folder().display(), prefix, "capturing frames");
            Ok(surface.with_sink(Box::new(capture)))
        }
        None => Ok(surface),
    }
}

pub fn run_electric_field(config: &DemoConfig) -> Result<()> {
    let run = &config.run;
    let resumed = run.resume_from.as_ref().and_then(|path| {
        match io::load_state(path).and_then(ParticleSystem::from_state) {
            Ok(system) => {
                info!(path = %path.display(), frame = system.frame(), "resumed particle system");
                Some(system)
            }
            Err(e) => {
                warn!(path = %path.display(), "could not resume, starting from config: {e}");
                None
            }
        }
    });
    let mut system = match resumed {
        Some(system) => system,
        None => ParticleSystem::from_config(config)?,
    };
    info!(
        particles = system.len(),
        dt = system.config().dt,
        k_over_codata = system.config().coulomb_constant / units::COULOMB_CONSTANT_CODATA,
        "electric field demo"
    );

    let mut surface = make_surface(run, "electric_field")?;
    let mut scheduler = FrameScheduler::new(Schedule::AnimationFrame { fps: run.fps });
    let interval = run.diagnostics_interval;

    // Frame 0 is the starting configuration; every tick after it steps first.
    let mut result = system.render(&mut surface);
    if result.is_ok() {
        result = scheduler.run(&mut system, &mut surface, run.frames, |sys, tick| {
            if interval > 0 && tick % interval == 0 {
                let diag = SystemDiagnostics::compute(sys);
                if !diag.is_finite() {
                    warn!(frame = sys.frame(), "particle state is no longer finite");
                }
                debug!(
                    frame = sys.frame(),
                    sim_time = sys.sim_time(),
                    kinetic = diag.kinetic_energy,
                    potential = diag.potential_energy,
                    total = diag.total_energy(),
                    total_charge_e = units::coulombs_to_e(diag.total_charge),
                    max_speed = diag.max_speed,
                    "diagnostics"
                );
                #[cfg(feature = "profiling")]
                crate::PROFILER.lock().log_and_clear(sys.frame());
            }
        });
    }
    // Drain the capture queue even if a tick failed. A writer error takes precedence.
    surface.finish().and(result)?;

    if let Some(path) = &run.snapshot_path {
        io::save_state(path, &system)?;
        info!(path = %path.display(), frame = system.frame(), "saved snapshot");
    }
    Ok(())
}

/// Static patterns are drawn once; animated ones run on the fixed interval.
pub fn run_pattern(entry: &PatternEntry, run: &RunConfig) -> Result<()> {
    let mut renderer = entry.renderer()?;
    let mut surface = make_surface(run, entry.name)?;

    let result = if renderer.parameter().is_none() {
        info!(pattern = entry.name, "drawing static pattern");
        renderer.draw(&mut surface)
    } else {
        let period = Duration::from_millis(run.pattern_interval_ms);
        let mut scheduler = FrameScheduler::new(Schedule::Interval(period));
        scheduler.run(&mut renderer, &mut surface, run.frames, |_, _| {})
    };
    surface.finish().and(result)
}
