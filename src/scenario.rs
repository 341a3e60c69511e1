// scenario.rs
// Built-in particle sets and random cluster generation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::f64::consts::TAU;

use crate::error::{Result, SimError};
use crate::init_config::{DemoConfig, RandomClusterConfig};
use crate::particle::ParticleSpec;
use crate::simulation::ParticleSystem;

/// Particle mass used by the built-in scene (kg).
pub const DEMO_MASS: f64 = 10e-29;

/// The three-charge scene: two positive charges either side of a stronger negative one.
pub fn three_charge() -> Vec<ParticleSpec> {
    vec![
        ParticleSpec::at_rest([47e-10, 50e-10], 20e-19, DEMO_MASS),
        ParticleSpec::at_rest([50e-10, 50e-10], -28e-19, DEMO_MASS),
        ParticleSpec::at_rest([53e-10, 53e-10], 21e-19, DEMO_MASS),
    ]
}

/// Equal and opposite charges at ±`half_gap` on the x axis around `center`.
pub fn dipole(center: [f64; 2], half_gap: f64, charge: f64, mass: f64) -> Vec<ParticleSpec> {
    vec![
        ParticleSpec::at_rest([center[0] - half_gap, center[1]], charge, mass),
        ParticleSpec::at_rest([center[0] + half_gap, center[1]], -charge, mass),
    ]
}

/// Scatter `cfg.count` particles uniformly over a disc.
pub fn random_cluster(cfg: &RandomClusterConfig) -> Result<Vec<ParticleSpec>> {
    if !(cfg.radius.is_finite() && cfg.radius >= 0.0) {
        return Err(SimError::InvalidConfig(format!("cluster radius {} is invalid", cfg.radius)));
    }
    let [q_lo, q_hi] = cfg.charge_range;
    if !(q_lo.is_finite() && q_hi.is_finite() && q_lo <= q_hi) {
        return Err(SimError::InvalidConfig(format!("charge range {q_lo}..{q_hi} is invalid")));
    }
    let speed = Normal::new(0.0, cfg.speed_sigma)
        .map_err(|e| SimError::InvalidConfig(format!("speed_sigma: {e}")))?;

    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut specs = Vec::with_capacity(cfg.count);
    for _ in 0..cfg.count {
        let angle = rng.random::<f64>() * TAU;
        // sqrt keeps the density uniform over the disc area
        let r = cfg.radius * rng.random::<f64>().sqrt();
        let position = [cfg.center[0] + r * angle.cos(), cfg.center[1] + r * angle.sin()];
        let charge = if q_lo == q_hi { q_lo } else { rng.random_range(q_lo..=q_hi) };
        let velocity = [speed.sample(&mut rng), speed.sample(&mut rng)];
        specs.push(ParticleSpec {
            position,
            velocity,
            charge,
            mass: cfg.mass,
        });
    }
    Ok(specs)
}

/// Every particle described by a demo config, falling back to [`three_charge`].
pub fn particles_from_config(config: &DemoConfig) -> Result<Vec<ParticleSpec>> {
    let mut specs = config.particles.clone();
    for cluster in &config.random {
        specs.extend(random_cluster(cluster)?);
    }
    if specs.is_empty() {
        specs = three_charge();
    }
    Ok(specs)
}

impl ParticleSystem {
    pub fn from_config(config: &DemoConfig) -> Result<Self> {
        let specs = particles_from_config(config)?;
        ParticleSystem::new(&specs, config.simulation.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(seed: Option<u64>) -> RandomClusterConfig {
        RandomClusterConfig {
            count: 50,
            center: [5e-9, 5e-9],
            radius: 2e-9,
            charge_range: [-3e-19, 3e-19],
            mass: 1e-28,
            speed_sigma: 0.0,
            seed,
        }
    }

    #[test]
    fn random_cluster_stays_inside_disc() {
        let specs = random_cluster(&cluster(Some(7))).unwrap();
        assert_eq!(specs.len(), 50);
        for s in &specs {
            let dx = s.position[0] - 5e-9;
            let dy = s.position[1] - 5e-9;
            assert!((dx * dx + dy * dy).sqrt() <= 2e-9 * (1.0 + 1e-12));
            assert!((-3e-19..=3e-19).contains(&s.charge));
            assert_eq!(s.velocity, [0.0, 0.0]);
        }
    }

    #[test]
    fn seeded_clusters_are_reproducible() {
        assert_eq!(random_cluster(&cluster(Some(42))).unwrap(), random_cluster(&cluster(Some(42))).unwrap());
    }

    #[test]
    fn bad_cluster_rejected() {
        let mut c = cluster(None);
        c.charge_range = [1.0, -1.0];
        assert!(random_cluster(&c).is_err());
        let mut c = cluster(None);
        c.speed_sigma = -1.0;
        assert!(random_cluster(&c).is_err());
    }

    #[test]
    fn empty_config_falls_back_to_three_charges() {
        let specs = particles_from_config(&DemoConfig::default()).unwrap();
        assert_eq!(specs, three_charge());
    }
}
