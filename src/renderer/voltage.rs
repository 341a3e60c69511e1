use crate::colour::Colour;

/// Map a voltage to a colour: positive shades red, negative shades blue.
///
/// Channel value is `|v| * scale`, clamped to a byte by [`Colour::opaque`].
#[inline]
pub fn voltage_colour(voltage: f64, scale: f64) -> Colour {
    if voltage > 0.0 {
        Colour::opaque(voltage * scale, 0.0, 0.0)
    } else {
        Colour::opaque(0.0, 0.0, -voltage * scale)
    }
}
