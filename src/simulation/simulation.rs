// simulation/simulation.rs
// Contains the ParticleSystem struct and its main methods (new, step, iterate, render)

use super::field::{self, FieldSample, ViewTransform, VoltageFrame};
use super::forces;
use crate::app::scheduler::Animate;
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::particle::{Particle, ParticleId, ParticleSpec};
use crate::profile_scope;
use crate::renderer::surface::RenderSurface;
use crate::renderer::voltage::voltage_colour;
use crate::vector::Vector2D;

/// A fixed set of charged particles plus the constants that drive them.
///
/// Owned by the caller and advanced one tick at a time; nothing here is global.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    config: SimConfig,
    frame: u64,
}

impl ParticleSystem {
    /// Validate the configuration and build the particle arena.
    ///
    /// Fails on the first invalid particle (non-positive mass, non-finite field) or
    /// invalid constant, so a bad setup never reaches the integrator.
    pub fn new(specs: &[ParticleSpec], config: SimConfig) -> Result<Self> {
        config.validate()?;
        if specs.is_empty() {
            return Err(SimError::EmptySystem);
        }
        let particles = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                spec.validate(i)?;
                Ok(spec.into_particle(ParticleId(i)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            particles,
            config,
            frame: 0,
        })
    }

    /// Rebuild at a given frame count, used when restoring a snapshot.
    pub fn with_frame(specs: &[ParticleSpec], config: SimConfig, frame: u64) -> Result<Self> {
        let mut system = Self::new(specs, config)?;
        system.frame = frame;
        Ok(system)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Elapsed simulated time in seconds.
    pub fn sim_time(&self) -> f64 {
        self.frame as f64 * self.config.dt
    }

    pub fn specs(&self) -> Vec<ParticleSpec> {
        self.particles.iter().map(ParticleSpec::from).collect()
    }

    /// One simulation tick: forces for everyone from the current positions, then move everyone.
    pub fn step(&mut self) {
        profile_scope!("simulation_step");
        forces::accumulate_forces(
            &mut self.particles,
            self.config.coulomb_constant,
            self.config.epsilon,
        );
        self.iterate();
        self.frame += 1;
    }

    /// Explicit Euler: v += (F/m)·dt, then x += v·dt.
    pub fn iterate(&mut self) {
        profile_scope!("iterate");
        let dt = self.config.dt;
        for p in &mut self.particles {
            let acc = p.force / p.mass;
            p.velocity += acc * dt;
            p.position += p.velocity * dt;
        }
    }

    pub fn voltage_at(&self, point: Vector2D) -> f64 {
        field::voltage_at(
            &self.particles,
            point,
            self.config.coulomb_constant,
            self.config.epsilon,
        )
    }

    pub fn field_at(&self, point: Vector2D) -> FieldSample {
        field::field_at(
            &self.particles,
            point,
            self.config.coulomb_constant,
            self.config.epsilon,
        )
    }

    pub fn view(&self, width: u32, height: u32) -> ViewTransform {
        ViewTransform::fit(self.config.view_extent, self.config.screen_offset, width, height)
    }

    pub fn sample_voltage(&self, width: u32, height: u32) -> VoltageFrame {
        field::sample_voltage(
            &self.particles,
            &self.view(width, height),
            width,
            height,
            self.config.coulomb_constant,
            self.config.epsilon,
        )
    }

    /// Rewrite every pixel of `surface` from the current voltage field and flush it.
    pub fn render(&self, surface: &mut dyn RenderSurface) -> Result<()> {
        profile_scope!("render_field");
        let (width, height) = (surface.width(), surface.height());
        let frame = self.sample_voltage(width, height);
        let scale = self.config.colour_scale;
        for y in 0..height {
            for x in 0..width {
                if let Some(v) = frame.get(x, y) {
                    surface.put_pixel(x, y, voltage_colour(v, scale));
                }
            }
        }
        surface.flush()
    }
}

impl Animate for ParticleSystem {
    fn name(&self) -> &str {
        "electric-field"
    }

    fn tick(&mut self, surface: &mut dyn RenderSurface) -> Result<()> {
        self.step();
        self.render(surface)
    }
}
