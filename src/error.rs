//! Error types for configuration, simulation setup and frame output.

use thiserror::Error;

/// Everything that can go wrong while building or running a demo.
#[derive(Error, Debug)]
pub enum SimError {
    /// Mass must be strictly positive: it divides the force every tick.
    #[error("particle {index} has invalid mass {mass} (must be finite and > 0)")]
    InvalidMass {
        /// Position of the particle in the configuration list
        index: usize,
        /// Offending mass
        mass: f64,
    },

    /// A position, velocity or charge component was NaN or infinite
    #[error("particle {index} has a non-finite {what}")]
    NonFinite {
        /// Position of the particle in the configuration list
        index: usize,
        /// Which field was rejected
        what: &'static str,
    },

    /// A particle system needs at least one particle
    #[error("particle system has no particles")]
    EmptySystem,

    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("invalid animation parameter: {0}")]
    InvalidAnimation(String),

    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    /// The PNG writer thread failed or went away
    #[error("frame capture failed: {0}")]
    Capture(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, SimError>;
