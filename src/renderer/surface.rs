use image::RgbaImage;

use super::capture::FrameSink;
use crate::colour::{Colour, TRANSPARENT};
use crate::error::Result;

/// A fixed-size RGBA raster that the demos draw into.
///
/// Demos only ever rewrite the full buffer and then `flush` it.
pub trait RenderSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Current contents, row-major RGBA bytes.
    fn pixels(&self) -> &[u8];

    fn put_pixel(&mut self, x: u32, y: u32, colour: Colour);

    /// Reset every pixel to transparent black.
    fn clear(&mut self);

    /// Present the finished frame.
    fn flush(&mut self) -> Result<()>;
}

/// In-memory surface backed by an `image::RgbaImage`.
pub struct PixelBuffer {
    image: RgbaImage,
    sink: Option<Box<dyn FrameSink>>,
    flushed: u64,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            sink: None,
            flushed: 0,
        }
    }

    /// Forward every flushed frame to `sink`.
    pub fn with_sink(mut self, sink: Box<dyn FrameSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Colour> {
        self.image.get_pixel_checked(x, y).map(|p| Colour::from(*p))
    }

    /// Number of frames flushed so far.
    pub fn frames_flushed(&self) -> u64 {
        self.flushed
    }

    /// Detach the sink and let it finish any queued work.
    pub fn finish(&mut self) -> Result<()> {
        match self.sink.take() {
            Some(sink) => sink.finish(),
            None => Ok(()),
        }
    }
}

impl RenderSurface for PixelBuffer {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    fn put_pixel(&mut self, x: u32, y: u32, colour: Colour) {
        if let Some(p) = self.image.get_pixel_mut_checked(x, y) {
            *p = colour.into();
        }
    }

    fn clear(&mut self) {
        let clear: image::Rgba<u8> = TRANSPARENT.into();
        for p in self.image.pixels_mut() {
            *p = clear;
        }
    }

    fn flush(&mut self) -> Result<()> {
        let index = self.flushed;
        self.flushed += 1;
        match self.sink.as_mut() {
            Some(sink) => sink.submit(index, &self.image),
            None => Ok(()),
        }
    }
}
