//! Scalar animation parameter that bounces between two bounds.

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationParameter {
    value: f64,
    min: f64,
    max: f64,
    delta: f64,
    bounded: bool,
}

impl AnimationParameter {
    /// Oscillates in `[min, max]`, moving `delta` per tick and reversing at each bound.
    pub fn bounded(start: f64, min: f64, max: f64, delta: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(SimError::InvalidAnimation(format!(
                "bounds must be finite with min < max (got {min}..{max})"
            )));
        }
        if !start.is_finite() || start < min || start > max {
            return Err(SimError::InvalidAnimation(format!(
                "start {start} outside {min}..{max}"
            )));
        }
        Self::check_delta(delta)?;
        Ok(Self { value: start, min, max, delta, bounded: true })
    }

    /// Grows (or shrinks) by `delta` forever.
    pub fn unbounded(start: f64, delta: f64) -> Result<Self> {
        if !start.is_finite() {
            return Err(SimError::InvalidAnimation(format!("start {start} is not finite")));
        }
        Self::check_delta(delta)?;
        Ok(Self {
            value: start,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            delta,
            bounded: false,
        })
    }

    fn check_delta(delta: f64) -> Result<()> {
        if delta == 0.0 || !delta.is_finite() {
            return Err(SimError::InvalidAnimation(format!("delta must be finite and non-zero (got {delta})")));
        }
        Ok(())
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    /// Step once. Overshoot is reflected back off the bound and the direction flips.
    pub fn advance(&mut self) -> f64 {
        self.value += self.delta;
        if self.bounded {
            // A delta wider than the whole range would keep bouncing; pin it instead.
            if self.value > self.max {
                self.value = (2.0 * self.max - self.value).max(self.min);
                self.delta = -self.delta;
            } else if self.value < self.min {
                self.value = (2.0 * self.min - self.value).min(self.max);
                self.delta = -self.delta;
            }
        }
        self.value
    }
}
