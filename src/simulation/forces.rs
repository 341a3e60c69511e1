//! Force calculation functions for the particle simulation.
//!
//! Direct O(N²) Coulomb summation. Every force in a tick is computed from the
//! positions as they were at the start of that tick.

use crate::particle::Particle;
use crate::profile_scope;
use crate::vector::Vector2D;
use rayon::prelude::*;

/// Force on `a` exerted by `b` (inverse-square Coulomb law).
///
/// Returns `None` when the pair contributes nothing: same particle, or closer
/// than `eps`. The product `q_a * q_b` is formed before scaling by `k`, which
/// keeps `pairwise_force(a, b) == -pairwise_force(b, a)` bit for bit.
#[inline]
pub fn pairwise_force(a: &Particle, b: &Particle, k: f64, eps: f64) -> Option<Vector2D> {
    if a.id == b.id {
        return None;
    }
    let delta = a.position - b.position;
    let d = delta.mag();
    if !d.is_finite() || d < eps || d == 0.0 {
        return None;
    }
    let magnitude = k * (a.charge * b.charge) / (d * d);
    Some(delta / d * magnitude)
}

/// Net force on `target` from every particle in `sources`.
pub fn net_force(target: &Particle, sources: &[Particle], k: f64, eps: f64) -> Vector2D {
    let mut total = Vector2D::zero();
    for other in sources {
        if let Some(f) = pairwise_force(target, other, k, eps) {
            total += f;
        }
    }
    total
}

/// Overwrite every particle's `force` with the net Coulomb force on it.
pub fn accumulate_forces(particles: &mut [Particle], k: f64, eps: f64) {
    profile_scope!("forces_accumulate");
    let forces: Vec<Vector2D> = {
        let snapshot: &[Particle] = particles;
        snapshot
            .par_iter()
            .map(|p| net_force(p, snapshot, k, eps))
            .collect()
    };
    for (p, f) in particles.iter_mut().zip(forces) {
        p.force = f;
    }
}
