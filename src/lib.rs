pub mod animation;
pub mod colour;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod init_config;
pub mod io;
pub mod particle;
pub mod profiler;
pub mod renderer;
pub mod scenario;
pub mod simulation;
pub mod units;
pub mod vector;

pub mod app;

pub use error::{Result, SimError};
pub use particle::{Particle, ParticleId, ParticleSpec};
pub use simulation::ParticleSystem;
pub use vector::{vec2d, Vector2D, VectorExt};

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));
