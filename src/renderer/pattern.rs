use crate::animation::AnimationParameter;
use crate::app::scheduler::Animate;
use crate::colour::Colour;
use crate::error::Result;
use crate::profile_scope;

use super::surface::RenderSurface;

/// Per-pixel colour function: `(x, y, t) -> colour`.
pub type PixelFn = dyn Fn(f64, f64, f64) -> Colour + Send + Sync;

/// Colours a whole surface through one closed-form pixel function.
pub struct PatternRenderer {
    name: String,
    compute_pixel: Box<PixelFn>,
    parameter: Option<AnimationParameter>,
}

impl PatternRenderer {
    pub fn new<F>(name: impl Into<String>, compute_pixel: F, parameter: Option<AnimationParameter>) -> Self
    where
        F: Fn(f64, f64, f64) -> Colour + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            compute_pixel: Box::new(compute_pixel),
            parameter,
        }
    }

    pub fn parameter(&self) -> Option<&AnimationParameter> {
        self.parameter.as_ref()
    }

    /// Current value passed as `t`; 0 for static patterns.
    pub fn t(&self) -> f64 {
        self.parameter.map_or(0.0, |p| p.value())
    }

    /// Clear, rewrite every pixel, flush.
    pub fn draw(&self, surface: &mut dyn RenderSurface) -> Result<()> {
        profile_scope!("pattern_draw");
        surface.clear();
        let t = self.t();
        for x in 0..surface.width() {
            for y in 0..surface.height() {
                let colour = (self.compute_pixel)(x as f64, y as f64, t);
                surface.put_pixel(x, y, colour);
            }
        }
        surface.flush()
    }
}

impl Animate for PatternRenderer {
    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&mut self, surface: &mut dyn RenderSurface) -> Result<()> {
        if let Some(p) = self.parameter.as_mut() {
            p.advance();
        }
        self.draw(surface)
    }
}
