//! Built-in pixel functions for the pattern renderer.
//!
//! None of these validate their domain: whatever they compute goes straight to
//! [`Colour::of`], which clamps. `%` keeps the sign of the dividend, so negative
//! intermediates clamp to 0.

use std::f64::consts::TAU;

use crate::animation::AnimationParameter;
use crate::colour::Colour;
use crate::error::{Result, SimError};

use super::pattern::PatternRenderer;

/// Centre used by the radial patterns, in pixels.
const CENTRE: f64 = 200.0;

/// How a pattern's `t` parameter moves between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Static,
    Bounce { start: f64, min: f64, max: f64, delta: f64 },
    Drift { start: f64, delta: f64 },
}

impl Motion {
    pub fn parameter(self) -> Result<Option<AnimationParameter>> {
        match self {
            Motion::Static => Ok(None),
            Motion::Bounce { start, min, max, delta } => {
                AnimationParameter::bounded(start, min, max, delta).map(Some)
            }
            Motion::Drift { start, delta } => AnimationParameter::unbounded(start, delta).map(Some),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PatternEntry {
    pub name: &'static str,
    pub pixel: fn(f64, f64, f64) -> Colour,
    pub motion: Motion,
}

impl PatternEntry {
    pub fn renderer(&self) -> Result<PatternRenderer> {
        Ok(PatternRenderer::new(self.name, self.pixel, self.motion.parameter()?))
    }
}

pub fn catalogue() -> &'static [PatternEntry] {
    &CATALOGUE
}

pub fn find(name: &str) -> Result<&'static PatternEntry> {
    CATALOGUE
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| SimError::UnknownPattern(name.to_string()))
}

static CATALOGUE: [PatternEntry; 16] = [
    PatternEntry { name: "sine-product", pixel: sine_product, motion: Motion::Static },
    PatternEntry { name: "tangent-weave", pixel: tangent_weave, motion: Motion::Static },
    PatternEntry { name: "cosine-checker", pixel: cosine_checker, motion: Motion::Static },
    PatternEntry { name: "radial-rings", pixel: radial_rings, motion: Motion::Static },
    PatternEntry { name: "trig-lattice", pixel: trig_lattice, motion: Motion::Static },
    PatternEntry { name: "sqrt-lattice", pixel: sqrt_lattice, motion: Motion::Static },
    PatternEntry { name: "noise", pixel: noise, motion: Motion::Static },
    PatternEntry { name: "ripple", pixel: ripple, motion: Motion::Drift { start: 0.0, delta: 0.3 } },
    PatternEntry { name: "plasma", pixel: plasma, motion: Motion::Drift { start: 0.0, delta: 0.1 } },
    PatternEntry {
        name: "interference",
        pixel: interference,
        motion: Motion::Bounce { start: 0.0, min: -120.0, max: 120.0, delta: 4.0 },
    },
    PatternEntry {
        name: "power-bloom",
        pixel: power_bloom,
        motion: Motion::Bounce { start: 1.0, min: 0.5, max: 1.5, delta: 0.01 },
    },
    PatternEntry { name: "spiral", pixel: spiral, motion: Motion::Drift { start: 0.0, delta: 0.2 } },
    PatternEntry {
        name: "zone-plate",
        pixel: zone_plate,
        motion: Motion::Bounce { start: 0.01, min: 0.01, max: 0.2, delta: 0.002 },
    },
    PatternEntry {
        name: "tangent-waves",
        pixel: tangent_waves,
        motion: Motion::Bounce { start: 0.0, min: 0.0, max: TAU, delta: 0.05 },
    },
    PatternEntry {
        name: "pulse-grid",
        pixel: pulse_grid,
        motion: Motion::Bounce { start: 1.0, min: 0.2, max: 4.0, delta: 0.05 },
    },
    PatternEntry { name: "hue-sweep", pixel: hue_sweep, motion: Motion::Drift { start: 0.0, delta: 4.0 } },
];

// Static patterns

pub fn sine_product(x: f64, y: f64, _t: f64) -> Colour {
    let c = 50.0 + (x * y).sin() * y;
    Colour::of(c, c, c, c)
}

pub fn tangent_weave(x: f64, y: f64, _t: f64) -> Colour {
    let c = x * y * (100.0 * x * y).tan();
    Colour::of(0.0, 0.0, 100.0 + c % 150.0, 100.0 + c % 150.0)
}

pub fn cosine_checker(x: f64, y: f64, _t: f64) -> Colour {
    let c = x * y * (x + y).cos();
    Colour::of(0.0, 100.0 + c % 150.0, 0.0, c % 255.0)
}

pub fn radial_rings(x: f64, y: f64, _t: f64) -> Colour {
    let c = 10.0 * (x * x + y * y).sqrt();
    Colour::of(100.0 + c % 155.0, 100.0 + c % 155.0, 0.0, 150.0)
}

pub fn trig_lattice(x: f64, y: f64, _t: f64) -> Colour {
    let c = x * y.sin() * y * x.cos();
    Colour::of(c % 255.0, c % 255.0, c % 255.0, 150.0)
}

/// Same as [`trig_lattice`] under a square root; negative products give NaN, which clamps to 0.
pub fn sqrt_lattice(x: f64, y: f64, _t: f64) -> Colour {
    let c = (x * y.sin() * y * x.cos()).sqrt();
    Colour::of(c % 255.0, c % 255.0, c % 255.0, 150.0)
}

pub fn noise(x: f64, y: f64, _t: f64) -> Colour {
    let r = fastrand::f64() * x + y;
    let g = fastrand::f64() * y + x;
    let b = fastrand::f64() * x * y;
    Colour::of(r % 250.0, g % 250.0, b % 250.0, 150.0)
}

// Animated patterns

pub fn ripple(x: f64, y: f64, t: f64) -> Colour {
    let d = ((x - CENTRE).powi(2) + (y - CENTRE).powi(2)).sqrt();
    let c = 127.5 + 127.5 * (d / 8.0 - t).sin();
    Colour::of(c, c * 0.5, 255.0 - c, 255.0)
}

pub fn plasma(x: f64, y: f64, t: f64) -> Colour {
    let v = (x / 16.0 + t).sin()
        + (y / 8.0 + t).sin()
        + ((x + y) / 16.0).sin()
        + ((x * x + y * y).sqrt() / 8.0 - t).sin();
    let hue = (v * 45.0 + t * 20.0).rem_euclid(360.0);
    Colour::from_hsl(hue as f32, 0.9, 0.5)
}

/// Two point sources sliding apart and together along the horizontal axis.
pub fn interference(x: f64, y: f64, t: f64) -> Colour {
    let d1 = ((x - CENTRE - t).powi(2) + (y - CENTRE).powi(2)).sqrt();
    let d2 = ((x - CENTRE + t).powi(2) + (y - CENTRE).powi(2)).sqrt();
    let c = 127.5 + 63.75 * ((d1 / 6.0).sin() + (d2 / 6.0).sin());
    Colour::of(c, c, c, 255.0)
}

pub fn power_bloom(x: f64, y: f64, t: f64) -> Colour {
    let c = (x * y).powf(t) % 255.0;
    Colour::of(c, 255.0 - c, (x + y).powf(t) % 255.0, 255.0)
}

pub fn spiral(x: f64, y: f64, t: f64) -> Colour {
    let dx = x - CENTRE;
    let dy = y - CENTRE;
    let angle = dy.atan2(dx);
    let r = (dx * dx + dy * dy).sqrt();
    let c = 127.5 + 127.5 * (angle * 5.0 + r / 10.0 - t).sin();
    Colour::of(c, 80.0, 255.0 - c, 255.0)
}

pub fn zone_plate(x: f64, y: f64, t: f64) -> Colour {
    let dx = x - CENTRE;
    let dy = y - CENTRE;
    let c = 127.5 + 127.5 * ((dx * dx + dy * dy) * t).cos();
    Colour::of(c, c, c, 255.0)
}

pub fn tangent_waves(x: f64, y: f64, t: f64) -> Colour {
    let c = (x / 20.0 + t).tan() * (y / 20.0).sin() * 60.0 + 128.0;
    Colour::of(c, 0.0, 255.0 - c, 255.0)
}

pub fn pulse_grid(x: f64, y: f64, t: f64) -> Colour {
    let c = ((x / 10.0).sin() * (y / 10.0).cos()).abs().powf(t) * 255.0;
    Colour::of(0.0, c, c * 0.6, 255.0)
}

pub fn hue_sweep(x: f64, y: f64, t: f64) -> Colour {
    let hue = (x + y + t).rem_euclid(360.0);
    Colour::from_hsl(hue as f32, 0.8, 0.5)
}
