//! RGBA colour value and HSL conversions.

use palette::{FromColor, Hsla, Srgba};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub const BLACK: Colour = rgb(0, 0, 0);
pub const TRANSPARENT: Colour = rgba(0, 0, 0, 0);

#[inline]
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Colour {
    Colour { r, g, b, a }
}

#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Colour {
    rgba(r, g, b, 255)
}

/// Clamp an unbounded channel value into a byte, rounding to nearest.
///
/// NaN becomes 0, same as writing it into a canvas `Uint8ClampedArray`.
#[inline]
pub fn clamp_channel(v: f64) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.round().clamp(0.0, 255.0) as u8
    }
}

impl Colour {
    /// Build a colour from arbitrary real channel values. Out-of-range values are clamped.
    #[inline]
    pub fn of(r: f64, g: f64, b: f64, a: f64) -> Self {
        rgba(clamp_channel(r), clamp_channel(g), clamp_channel(b), clamp_channel(a))
    }

    /// Opaque variant of [`Colour::of`].
    #[inline]
    pub fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self::of(r, g, b, 255.0)
    }

    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn from_array(c: [u8; 4]) -> Self {
        rgba(c[0], c[1], c[2], c[3])
    }

    /// Hue in degrees [0, 360), saturation / lightness / alpha in [0, 1].
    pub fn to_hsla(self) -> (f32, f32, f32, f32) {
        let srgba: Srgba<f32> = Srgba::new(self.r, self.g, self.b, self.a).into_format();
        let hsla: Hsla = Hsla::from_color(srgba);
        (
            hsla.hue.into_positive_degrees(),
            hsla.saturation,
            hsla.lightness,
            hsla.alpha,
        )
    }

    pub fn from_hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let hsla: Hsla = Hsla::new(
            hue,
            saturation.clamp(0.0, 1.0),
            lightness.clamp(0.0, 1.0),
            alpha.clamp(0.0, 1.0),
        );
        let srgba: Srgba<u8> = Srgba::<f32>::from_color(hsla).into_format();
        rgba(srgba.red, srgba.green, srgba.blue, srgba.alpha)
    }

    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self::from_hsla(hue, saturation, lightness, 1.0)
    }
}

impl From<Colour> for image::Rgba<u8> {
    fn from(c: Colour) -> Self {
        image::Rgba(c.to_array())
    }
}

impl From<image::Rgba<u8>> for Colour {
    fn from(p: image::Rgba<u8>) -> Self {
        Colour::from_array(p.0)
    }
}
