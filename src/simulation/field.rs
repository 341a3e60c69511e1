use crate::particle::Particle;
use crate::profile_scope;
use crate::vector::{vec2d, Vector2D, VectorExt};
use rayon::prelude::*;

/// Result of sampling the electrostatic field at a single point.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldSample {
    pub potential: f64,
    pub field: Vector2D,
}

/// Voltage at `point`: Σ k·q / (eps + d).
pub fn voltage_at(particles: &[Particle], point: Vector2D, k: f64, eps: f64) -> f64 {
    particles
        .iter()
        .map(|p| k * p.charge / (eps + p.distance(point)))
        .sum()
}

/// Potential and electric field at `point` with the same softening as [`voltage_at`].
///
/// The field term points away from positive charges: E = Σ k·q·r̂ / (eps + d)².
/// A particle sitting exactly on `point` adds to the potential but has no direction, so it
/// contributes nothing to the field.
pub fn field_at(particles: &[Particle], point: Vector2D, k: f64, eps: f64) -> FieldSample {
    let mut sample = FieldSample::default();
    for p in particles {
        let delta = point - p.position;
        let d = delta.mag();
        let soft = eps + d;
        sample.potential += k * p.charge / soft;
        if let Some(dir) = delta.unit_normal() {
            sample.field += dir * (k * p.charge / (soft * soft));
        }
    }
    sample
}

/// Affine map from pixel coordinates to simulation coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Simulation units per pixel, x and y
    pub scale: Vector2D,
    /// Pixel offset added before scaling
    pub offset: Vector2D,
}

impl ViewTransform {
    /// Fit `extent` simulation units across a `width` × `height` raster.
    pub fn fit(extent: [f64; 2], offset: [f64; 2], width: u32, height: u32) -> Self {
        Self {
            scale: vec2d(extent[0] / width.max(1) as f64, extent[1] / height.max(1) as f64),
            offset: Vector2D::from_array(offset),
        }
    }

    #[inline]
    pub fn to_simulation(&self, x: u32, y: u32) -> Vector2D {
        (vec2d(x as f64, y as f64) + self.offset) * self.scale
    }
}

/// Row-major voltage raster, `values[y * width + x]`.
#[derive(Clone, Debug)]
pub struct VoltageFrame {
    pub width: u32,
    pub height: u32,
    pub values: Vec<f64>,
}

impl VoltageFrame {
    /// Sample at pixel `(x, y)`, `None` outside the frame.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Smallest and largest finite sample, or `None` for an empty or all-NaN frame.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Sample the voltage at every pixel. Recomputed from scratch each call.
pub fn sample_voltage(
    particles: &[Particle],
    view: &ViewTransform,
    width: u32,
    height: u32,
    k: f64,
    eps: f64,
) -> VoltageFrame {
    profile_scope!("field_sample");
    let mut values = vec![0.0f64; width as usize * height as usize];
    if width > 0 {
        values
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, v) in row.iter_mut().enumerate() {
                    let pos = view.to_simulation(x as u32, y as u32);
                    *v = voltage_at(particles, pos, k, eps);
                }
            });
    }
    VoltageFrame { width, height, values }
}
