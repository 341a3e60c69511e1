// Centralized configuration for simulation and rendering parameters

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

// ====================
// Electrostatics
// ====================
/// Coulomb's constant as used by the visualizer (N·m²/C², tuned for the picture, not CODATA).
pub const COULOMB_CONSTANT: f64 = 8.996e9;
/// Distance below which a pair contributes nothing, and the softening added to
/// the potential denominator.
pub const DEFAULT_EPSILON: f64 = 1e-30;

// ====================
// Integration
// ====================
/// Default Euler timestep in seconds. Controls both stability and apparent speed.
pub const DEFAULT_DT: f64 = 6e-14;

// ====================
// View / Field Colouring
// ====================
/// Simulation-space width and height covered by the whole canvas (metres).
pub const VIEW_EXTENT: f64 = 10e-9;
/// Voltage to colour-channel gain.
pub const VOLTAGE_COLOUR_SCALE: f64 = 10.0;

// ====================
// Window/Rendering
// ====================
pub const WINDOW_WIDTH: u32 = 400; // Canvas width in pixels
pub const WINDOW_HEIGHT: u32 = 400; // Canvas height in pixels
pub const PATTERN_INTERVAL_MS: u64 = 50; // Re-draw period of animated patterns
pub const ANIMATION_FPS: u32 = 60; // Pacing of the particle system loop
pub const DEFAULT_FRAMES: u64 = 120;
/// Frames between diagnostic log lines
pub const DIAGNOSTICS_INTERVAL: u64 = 30;

// ====================
// Threading/Parallelism
// ====================
pub const MIN_THREADS: usize = 2; // Minimum number of rayon threads
pub const THREADS_LEAVE_FREE: usize = 1; // Logical cores left for the capture thread and the OS

/// Bounded queue length between the render loop and the PNG writer
pub const CAPTURE_QUEUE_DEPTH: usize = 8;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub coulomb_constant: f64,
    pub epsilon: f64,
    pub dt: f64,
    /// Simulation units covered by the full canvas, x and y
    pub view_extent: [f64; 2],
    /// Pixel offset applied before scaling into simulation space
    pub screen_offset: [f64; 2],
    pub colour_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            coulomb_constant: COULOMB_CONSTANT,
            epsilon: DEFAULT_EPSILON,
            dt: DEFAULT_DT,
            view_extent: [VIEW_EXTENT, VIEW_EXTENT],
            screen_offset: [0.0, 0.0],
            colour_scale: VOLTAGE_COLOUR_SCALE,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("coulomb_constant", self.coulomb_constant),
            ("epsilon", self.epsilon),
            ("dt", self.dt),
            ("view_extent.x", self.view_extent[0]),
            ("view_extent.y", self.view_extent[1]),
            ("screen_offset.x", self.screen_offset[0]),
            ("screen_offset.y", self.screen_offset[1]),
            ("colour_scale", self.colour_scale),
        ];
        if let Some((name, v)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SimError::InvalidConfig(format!("{name} is not finite ({v})")));
        }
        if self.dt <= 0.0 {
            return Err(SimError::InvalidConfig(format!("dt must be > 0 (got {})", self.dt)));
        }
        if self.epsilon < 0.0 {
            return Err(SimError::InvalidConfig(format!("epsilon must be >= 0 (got {})", self.epsilon)));
        }
        if self.view_extent[0] <= 0.0 || self.view_extent[1] <= 0.0 {
            return Err(SimError::InvalidConfig("view_extent must be positive".into()));
        }
        Ok(())
    }
}
