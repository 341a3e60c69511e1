//! Raster output: the pixel surface, frame capture, and the two ways of filling it
//! (voltage colouring and closed-form patterns).

pub mod capture;
pub mod pattern;
pub mod patterns;
pub mod surface;
pub mod voltage;

pub use capture::{FrameSink, PngCapture};
pub use pattern::PatternRenderer;
pub use surface::{PixelBuffer, RenderSurface};
