// particle.rs
// Particle record, its arena id, and the configuration tuple it is built from

use crate::error::{Result, SimError};
use crate::vector::{Vector2D, VectorExt};
use serde::{Deserialize, Serialize};

/// Arena index of a particle inside its `ParticleSystem`.
///
/// Two particles at the same place are still two particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub usize);

#[derive(Clone, Debug)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub charge: f64,
    pub mass: f64,
    /// Net force from the last accumulation pass. Overwritten every tick.
    pub force: Vector2D,
}

impl Particle {
    pub fn new(id: ParticleId, position: Vector2D, velocity: Vector2D, charge: f64, mass: f64) -> Self {
        Self {
            id,
            position,
            velocity,
            charge,
            mass,
            force: Vector2D::zero(),
        }
    }

    #[inline]
    pub fn distance(&self, point: Vector2D) -> f64 {
        self.position.distance(point)
    }

    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.mag_sq()
    }

    #[inline]
    pub fn momentum(&self) -> Vector2D {
        self.velocity * self.mass
    }
}

/// Startup description of one particle: (position, velocity, charge, mass).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleSpec {
    pub position: [f64; 2],
    #[serde(default)]
    pub velocity: [f64; 2],
    pub charge: f64,
    pub mass: f64,
}

impl ParticleSpec {
    pub fn at_rest(position: [f64; 2], charge: f64, mass: f64) -> Self {
        Self {
            position,
            velocity: [0.0, 0.0],
            charge,
            mass,
        }
    }

    /// Reject anything that would poison the integration. `index` is only used for the error.
    pub fn validate(&self, index: usize) -> Result<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SimError::InvalidMass { index, mass: self.mass });
        }
        if !Vector2D::from_array(self.position).is_finite() {
            return Err(SimError::NonFinite { index, what: "position" });
        }
        if !Vector2D::from_array(self.velocity).is_finite() {
            return Err(SimError::NonFinite { index, what: "velocity" });
        }
        if !self.charge.is_finite() {
            return Err(SimError::NonFinite { index, what: "charge" });
        }
        Ok(())
    }

    pub fn into_particle(self, id: ParticleId) -> Particle {
        Particle::new(
            id,
            Vector2D::from_array(self.position),
            Vector2D::from_array(self.velocity),
            self.charge,
            self.mass,
        )
    }
}

impl From<&Particle> for ParticleSpec {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.position.to_array(),
            velocity: p.velocity.to_array(),
            charge: p.charge,
            mass: p.mass,
        }
    }
}
