// init_config.rs
// Handles loading and parsing the demo configuration from demo_config.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{self, SimConfig};
use crate::error::{Result, SimError};
use crate::particle::ParticleSpec;

pub const DEFAULT_CONFIG_PATH: &str = "demo_config.toml";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub simulation: SimConfig,
    #[serde(default)]
    pub run: RunConfig,
    /// Explicit particles. When this and `random` are both empty the built-in
    /// three-charge scene is used.
    #[serde(default)]
    pub particles: Vec<ParticleSpec>,
    #[serde(default)]
    pub random: Vec<RandomClusterConfig>,
}

/// Which demo to run and for how long.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// `electric-field`, `patterns` (every catalogue entry in turn), or `pattern:<name>`
    pub demo: String,
    pub frames: u64,
    pub width: u32,
    pub height: u32,
    /// Pacing of the particle loop; 0 runs unpaced
    pub fps: u32,
    /// Re-draw period of animated patterns in milliseconds; 0 runs unpaced
    pub pattern_interval_ms: u64,
    /// Write every flushed frame as PNG into this folder
    pub capture_folder: Option<PathBuf>,
    /// Save the particle system here when the run ends
    pub snapshot_path: Option<PathBuf>,
    /// Resume the particle system from this snapshot instead of the particle list
    pub resume_from: Option<PathBuf>,
    pub diagnostics_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            demo: "electric-field".to_string(),
            frames: config::DEFAULT_FRAMES,
            width: config::WINDOW_WIDTH,
            height: config::WINDOW_HEIGHT,
            fps: config::ANIMATION_FPS,
            pattern_interval_ms: config::PATTERN_INTERVAL_MS,
            capture_folder: None,
            snapshot_path: None,
            resume_from: None,
            diagnostics_interval: config::DIAGNOSTICS_INTERVAL,
        }
    }
}

/// A disc of randomly placed particles.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RandomClusterConfig {
    pub count: usize,
    pub center: [f64; 2],
    pub radius: f64,
    /// Charges are drawn uniformly from this range
    pub charge_range: [f64; 2],
    pub mass: f64,
    /// Standard deviation of each initial velocity component; 0 starts at rest
    #[serde(default)]
    pub speed_sigma: f64,
    /// Fixed seed for reproducible scenes
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Demo selected by `RunConfig::demo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoKind {
    ElectricField,
    AllPatterns,
    Pattern(String),
}

impl RunConfig {
    pub fn demo_kind(&self) -> Result<DemoKind> {
        match self.demo.as_str() {
            "electric-field" => Ok(DemoKind::ElectricField),
            "patterns" => Ok(DemoKind::AllPatterns),
            other => match other.strip_prefix("pattern:") {
                Some(name) if !name.is_empty() => Ok(DemoKind::Pattern(name.to_string())),
                _ => Err(SimError::InvalidConfig(format!("unknown demo '{other}'"))),
            },
        }
    }
}

impl DemoConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DemoConfig = toml::from_str(content)?;
        config.simulation.validate()?;
        if config.run.width == 0 || config.run.height == 0 {
            return Err(SimError::InvalidConfig("canvas width and height must be > 0".into()));
        }
        config.run.demo_kind()?;
        Ok(config)
    }

    /// `demo_config.toml` in the working directory if it exists, otherwise built-in defaults.
    pub fn load_default() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load_from_file(DEFAULT_CONFIG_PATH)
        } else {
            Ok(Self::default())
        }
    }
}
