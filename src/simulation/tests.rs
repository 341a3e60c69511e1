// Physics tests for the ParticleSystem: force law, integration order, field sampling

use super::field::{self, ViewTransform};
use super::forces::{accumulate_forces, net_force, pairwise_force};
use super::simulation::ParticleSystem;
use crate::colour::rgb;
use crate::config::{SimConfig, COULOMB_CONSTANT};
use crate::error::SimError;
use crate::particle::{Particle, ParticleId, ParticleSpec};
use crate::renderer::{PixelBuffer, RenderSurface};
use crate::scenario;
use crate::vector::{vec2d, Vector2D, VectorExt};

const Q: f64 = 1.6e-19;
const M: f64 = 1e-28;

fn particle(id: usize, pos: Vector2D, charge: f64) -> Particle {
    Particle::new(ParticleId(id), pos, Vector2D::zero(), charge, M)
}

fn close(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * a.abs().max(b.abs())
}

#[cfg(test)]
mod coulomb {
    use super::*;

    #[test]
    fn opposite_charges_attract_with_inverse_square_magnitude() {
        let a = 1e-10;
        let left = particle(0, vec2d(-a, 0.0), Q);
        let right = particle(1, vec2d(a, 0.0), -Q);
        let f = pairwise_force(&left, &right, COULOMB_CONSTANT, 1e-30).unwrap();

        let expected = COULOMB_CONSTANT * Q * Q / (2.0 * a * 2.0 * a);
        assert!(f.x > 0.0, "left particle should be pulled right, got {f:?}");
        assert_eq!(f.y, 0.0);
        assert!(close(f.mag(), expected, 1e-12), "{} vs {}", f.mag(), expected);
    }

    #[test]
    fn dipole_forces_are_equal_and_opposite() {
        let mut sys =
            ParticleSystem::new(&scenario::dipole([5e-9, 5e-9], 1e-10, Q, M), SimConfig::default()).unwrap();
        sys.step();
        let (pos, neg) = (&sys.particles()[0], &sys.particles()[1]);
        assert_eq!(pos.force, -neg.force);
        assert!(pos.force.x > 0.0, "positive charge should be pulled toward +x");
        let expected = COULOMB_CONSTANT * Q * Q / (2e-10 * 2e-10);
        assert!(close(pos.force.mag(), expected, 1e-9));
    }

    #[test]
    fn like_charges_repel() {
        let a = 1e-10;
        let left = particle(0, vec2d(-a, 0.0), Q);
        let right = particle(1, vec2d(a, 0.0), Q);
        let mut ps = vec![left, right];
        accumulate_forces(&mut ps, COULOMB_CONSTANT, 1e-30);

        let expected = COULOMB_CONSTANT * Q * Q / (4.0 * a * a);
        assert!(ps[0].force.x < 0.0 && ps[1].force.x > 0.0);
        assert!(close(ps[0].force.mag(), expected, 1e-12));
        assert!(close(ps[1].force.mag(), expected, 1e-12));
    }

    #[test]
    fn doubling_distance_quarters_the_force() {
        let origin = particle(0, vec2d(0.0, 0.0), Q);
        let near = particle(1, vec2d(1e-10, 0.0), Q);
        let far = particle(2, vec2d(2e-10, 0.0), Q);
        let f_near = pairwise_force(&origin, &near, COULOMB_CONSTANT, 1e-30).unwrap().mag();
        let f_far = pairwise_force(&origin, &far, COULOMB_CONSTANT, 1e-30).unwrap().mag();
        assert!(close(f_near / f_far, 4.0, 1e-12));
    }

    #[test]
    fn pairwise_force_is_antisymmetric() {
        let pairs = [
            (vec2d(47e-10, 50e-10), 20e-19, vec2d(53e-10, 53e-10), 21e-19),
            (vec2d(1.3e-9, -2.7e-9), -3.1e-19, vec2d(-0.4e-9, 0.9e-9), 7.7e-19),
            (vec2d(0.0, 0.0), 1e-19, vec2d(3e-10, 4e-10), -1e-19),
        ];
        for (pa, qa, pb, qb) in pairs {
            let a = particle(0, pa, qa);
            let b = particle(1, pb, qb);
            let fab = pairwise_force(&a, &b, COULOMB_CONSTANT, 1e-30).unwrap();
            let fba = pairwise_force(&b, &a, COULOMB_CONSTANT, 1e-30).unwrap();
            assert_eq!(fab, -fba);
        }
    }

    #[test]
    fn self_and_coincident_pairs_are_skipped() {
        let a = particle(0, vec2d(1e-9, 1e-9), Q);
        assert!(pairwise_force(&a, &a, COULOMB_CONSTANT, 1e-30).is_none());

        // A different particle at the same spot contributes nothing instead of NaN.
        let b = particle(1, vec2d(1e-9, 1e-9), -Q);
        assert!(pairwise_force(&a, &b, COULOMB_CONSTANT, 1e-30).is_none());
        let f = net_force(&a, &[a.clone(), b], COULOMB_CONSTANT, 1e-30);
        assert_eq!(f, Vector2D::zero());
    }

    #[test]
    fn pairs_closer_than_epsilon_are_omitted() {
        let a = particle(0, vec2d(0.0, 0.0), Q);
        let b = particle(1, vec2d(1e-12, 0.0), Q);
        assert!(pairwise_force(&a, &b, COULOMB_CONSTANT, 1e-11).is_none());
        assert!(pairwise_force(&a, &b, COULOMB_CONSTANT, 1e-13).is_some());
    }
}

#[cfg(test)]
mod integration {
    use super::*;

    #[test]
    fn lone_particle_never_moves() {
        for charge in [0.0, 5e-19] {
            let specs = [ParticleSpec::at_rest([2e-9, 3e-9], charge, M)];
            let mut sys = ParticleSystem::new(&specs, SimConfig::default()).unwrap();
            for _ in 0..100 {
                sys.step();
                let p = &sys.particles()[0];
                assert_eq!(p.force, Vector2D::zero());
                assert_eq!(p.velocity, Vector2D::zero());
                assert_eq!(p.position, vec2d(2e-9, 3e-9));
            }
            assert_eq!(sys.frame(), 100);
        }
    }

    #[test]
    fn euler_step_uses_pre_tick_forces() {
        let specs = [
            ParticleSpec {
                position: [1e-9, 2e-9],
                velocity: [30.0, -12.0],
                charge: 3e-19,
                mass: 2e-28,
            },
            ParticleSpec {
                position: [1.6e-9, 2.2e-9],
                velocity: [-5.0, 8.0],
                charge: -2e-19,
                mass: 5e-28,
            },
        ];
        let config = SimConfig {
            dt: 1e-15,
            ..SimConfig::default()
        };
        let mut sys = ParticleSystem::new(&specs, config.clone()).unwrap();
        let before: Vec<Particle> = sys.particles().to_vec();
        sys.step();

        for (old, new) in before.iter().zip(sys.particles()) {
            let f = net_force(old, &before, config.coulomb_constant, config.epsilon);
            assert_eq!(new.force, f);
            let v = old.velocity + (f / old.mass) * config.dt;
            assert_eq!(new.velocity, v);
            assert_eq!(new.position, old.position + v * config.dt);
        }
    }

    #[test]
    fn three_charge_scenario_one_tick() {
        let specs = scenario::three_charge();
        let config = SimConfig {
            dt: 6e-14,
            ..SimConfig::default()
        };
        let mut sys = ParticleSystem::new(&specs, config.clone()).unwrap();
        let before: Vec<Particle> = sys.particles().to_vec();
        sys.step();

        for (old, new) in before.iter().zip(sys.particles()) {
            let f = net_force(old, &before, config.coulomb_constant, config.epsilon);
            let v_after = (f / old.mass) * config.dt;
            assert_eq!(new.velocity, v_after);
            assert_eq!(new.position, old.position + v_after * config.dt);
            assert!(new.position != old.position);
        }

        // The negative middle charge is pulled toward the closer positive charge on its left.
        let middle = sys.particle(ParticleId(1)).unwrap();
        assert!(middle.force.x < 0.0);
    }

    #[test]
    fn momentum_is_conserved() {
        let specs = scenario::three_charge();
        let mut sys = ParticleSystem::new(&specs, SimConfig::default()).unwrap();
        let mut scale = 0.0f64;
        for _ in 0..50 {
            sys.step();
            let total: Vector2D = sys.particles().iter().map(|p| p.momentum()).fold(Vector2D::zero(), |a, b| a + b);
            scale = sys.particles().iter().map(|p| p.momentum().mag()).fold(scale, f64::max);
            assert!(total.mag() <= 1e-9 * scale.max(f64::MIN_POSITIVE), "{total:?} vs {scale}");
        }
        assert!(scale > 0.0);
    }

    #[test]
    fn identity_is_index_not_position() {
        let specs = [
            ParticleSpec::at_rest([1e-9, 1e-9], Q, M),
            ParticleSpec::at_rest([1e-9, 1e-9], -Q, M),
        ];
        let mut sys = ParticleSystem::new(&specs, SimConfig::default()).unwrap();
        sys.step();
        let a = sys.particle(ParticleId(0)).unwrap();
        let b = sys.particle(ParticleId(1)).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.charge, Q);
        assert_eq!(b.charge, -Q);
        assert!(a.position.is_finite() && b.position.is_finite());
    }
}

#[cfg(test)]
mod validation {
    use super::*;

    #[test]
    fn rejects_non_positive_mass() {
        let specs = [
            ParticleSpec::at_rest([0.0, 0.0], Q, M),
            ParticleSpec::at_rest([1e-9, 0.0], Q, 0.0),
        ];
        let err = ParticleSystem::new(&specs, SimConfig::default()).unwrap_err();
        assert!(matches!(err, SimError::InvalidMass { index: 1, .. }));
    }

    #[test]
    fn rejects_empty_system() {
        assert!(matches!(
            ParticleSystem::new(&[], SimConfig::default()),
            Err(SimError::EmptySystem)
        ));
    }

    #[test]
    fn rejects_bad_constants() {
        let specs = scenario::three_charge();
        for config in [
            SimConfig { dt: 0.0, ..SimConfig::default() },
            SimConfig { dt: -1e-15, ..SimConfig::default() },
            SimConfig { epsilon: -1.0, ..SimConfig::default() },
            SimConfig { coulomb_constant: f64::NAN, ..SimConfig::default() },
            SimConfig { view_extent: [0.0, 1e-9], ..SimConfig::default() },
        ] {
            assert!(matches!(
                ParticleSystem::new(&specs, config),
                Err(SimError::InvalidConfig(_))
            ));
        }
    }
}

#[cfg(test)]
mod sampling {
    use super::*;

    #[test]
    fn voltage_vanishes_between_opposite_charges() {
        let sys = ParticleSystem::new(&scenario::dipole([0.0, 0.0], 2e-10, Q, M), SimConfig::default()).unwrap();
        for y in [0.0, 1e-10, -3e-9, 7e-9] {
            let v = sys.voltage_at(vec2d(0.0, y));
            assert!(v.abs() < 1e-12, "v = {v} at y = {y}");
        }
    }

    #[test]
    fn voltage_follows_inverse_distance() {
        let ps = vec![particle(0, vec2d(0.0, 0.0), Q)];
        let v1 = field::voltage_at(&ps, vec2d(1e-10, 0.0), COULOMB_CONSTANT, 1e-30);
        let v2 = field::voltage_at(&ps, vec2d(0.0, 2e-10), COULOMB_CONSTANT, 1e-30);
        assert!(close(v1, COULOMB_CONSTANT * Q / 1e-10, 1e-12));
        assert!(close(v1 / v2, 2.0, 1e-12));
    }

    #[test]
    fn field_points_away_from_positive_charge() {
        let ps = vec![particle(0, vec2d(0.0, 0.0), Q)];
        let s = field::field_at(&ps, vec2d(0.0, 1e-10), COULOMB_CONSTANT, 1e-30);
        assert!(s.field.y > 0.0);
        assert!(s.field.x.abs() < 1e-30);
        let v = field::voltage_at(&ps, vec2d(0.0, 1e-10), COULOMB_CONSTANT, 1e-30);
        assert_eq!(s.potential, v);
    }

    #[test]
    fn view_transform_scales_pixels() {
        let view = ViewTransform::fit([10e-9, 10e-9], [0.0, 0.0], 100, 100);
        let p = view.to_simulation(47, 50);
        assert!(close(p.x, 47e-10, 1e-12));
        assert!(close(p.y, 50e-10, 1e-12));

        let shifted = ViewTransform::fit([10e-9, 5e-9], [10.0, 0.0], 100, 50);
        let p = shifted.to_simulation(0, 10);
        assert!(close(p.x, 10e-10, 1e-12));
        assert!(close(p.y, 10e-10, 1e-12));
    }

    #[test]
    fn sampled_frame_matches_point_queries() {
        let sys = ParticleSystem::new(&scenario::three_charge(), SimConfig::default()).unwrap();
        let frame = sys.sample_voltage(20, 10);
        assert_eq!(frame.values.len(), 200);
        let view = sys.view(20, 10);
        for (x, y) in [(0, 0), (19, 9), (9, 4), (13, 7)] {
            assert_eq!(frame.get(x, y), Some(sys.voltage_at(view.to_simulation(x, y))));
        }
        let (lo, hi) = frame.range().unwrap();
        assert!(lo <= hi);
    }

    #[test]
    fn frame_lookup_outside_bounds_is_none() {
        let sys = ParticleSystem::new(&scenario::three_charge(), SimConfig::default()).unwrap();
        let frame = sys.sample_voltage(20, 10);
        assert!(frame.get(19, 9).is_some());
        // x == width must not wrap onto the next row
        assert_eq!(frame.get(20, 0), None);
        assert_eq!(frame.get(0, 10), None);
        assert_eq!(frame.get(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn render_colours_positive_red_and_negative_blue() {
        let sys = ParticleSystem::new(&scenario::three_charge(), SimConfig::default()).unwrap();
        let mut buf = PixelBuffer::new(100, 100);
        sys.render(&mut buf).unwrap();
        // pixels sitting on the positive (47,50) and negative (50,50) charges
        assert_eq!(buf.pixel(47, 50), Some(rgb(255, 0, 0)));
        assert_eq!(buf.pixel(50, 50), Some(rgb(0, 0, 255)));
        assert_eq!(buf.frames_flushed(), 1);
        assert!(buf.pixels().chunks(4).all(|px| px[1] == 0 && px[3] == 255));
    }
}
