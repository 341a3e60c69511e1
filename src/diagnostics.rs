//! Whole-system observables for logging and sanity checks.

use crate::simulation::ParticleSystem;
use crate::vector::{Vector2D, VectorExt};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SystemDiagnostics {
    pub kinetic_energy: f64,
    /// Σ over unordered pairs of k·q_i·q_j / (eps + d), same softening as the voltage field
    pub potential_energy: f64,
    pub net_momentum: Vector2D,
    pub total_charge: f64,
    pub max_speed: f64,
}

impl SystemDiagnostics {
    pub fn compute(system: &ParticleSystem) -> Self {
        let particles = system.particles();
        let k = system.config().coulomb_constant;
        let eps = system.config().epsilon;

        let mut diag = SystemDiagnostics::default();
        for (i, p) in particles.iter().enumerate() {
            diag.kinetic_energy += p.kinetic_energy();
            diag.net_momentum += p.momentum();
            diag.total_charge += p.charge;
            diag.max_speed = diag.max_speed.max(p.velocity.mag());
            for other in &particles[i + 1..] {
                let d = p.position.distance(other.position);
                diag.potential_energy += k * p.charge * other.charge / (eps + d);
            }
        }
        diag
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }

    /// False once NaN or infinity has crept into the state.
    pub fn is_finite(&self) -> bool {
        self.kinetic_energy.is_finite()
            && self.potential_energy.is_finite()
            && self.net_momentum.is_finite()
            && self.max_speed.is_finite()
    }
}
