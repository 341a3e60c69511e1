//! Two-component vector used for positions, velocities and forces.
//!
//! `ultraviolet::DVec2` already covers the arithmetic (add, sub, component-wise
//! mul, scale, negate, `mag`). The extension trait fills in the few operations
//! the simulation needs that ultraviolet spells differently or not at all.

use ultraviolet::DVec2;

pub type Vector2D = DVec2;

#[inline]
pub fn vec2d(x: f64, y: f64) -> Vector2D {
    DVec2::new(x, y)
}

pub trait VectorExt {
    /// Euclidean distance to `other`.
    fn distance(&self, other: Vector2D) -> f64;

    /// Unit vector in the same direction, or `None` for a zero / non-finite vector.
    fn unit_normal(&self) -> Option<Vector2D>;

    fn is_finite(&self) -> bool;

    fn to_array(&self) -> [f64; 2];

    fn from_array(a: [f64; 2]) -> Self;
}

impl VectorExt for DVec2 {
    #[inline]
    fn distance(&self, other: Vector2D) -> f64 {
        (*self - other).mag()
    }

    fn unit_normal(&self) -> Option<Vector2D> {
        let len = self.mag();
        if len > 0.0 && len.is_finite() {
            Some(*self / len)
        } else {
            None
        }
    }

    #[inline]
    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    #[inline]
    fn from_array(a: [f64; 2]) -> Self {
        DVec2::new(a[0], a[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = vec2d(1.0, 2.0);
        let b = vec2d(4.0, 6.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn unit_normal_has_unit_length() {
        let n = vec2d(3.0, -4.0).unit_normal().unwrap();
        assert!((n.mag() - 1.0).abs() < 1e-12);
        assert!((n.x - 0.6).abs() < 1e-12);
        assert!((n.y + 0.8).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_has_no_normal() {
        assert!(vec2d(0.0, 0.0).unit_normal().is_none());
        assert!(vec2d(f64::NAN, 1.0).unit_normal().is_none());
    }

    #[test]
    fn operators_return_new_values() {
        let a = vec2d(2.0, 3.0);
        let b = vec2d(-1.0, 4.0);
        assert_eq!(a + b, vec2d(1.0, 7.0));
        assert_eq!(a - b, vec2d(3.0, -1.0));
        assert_eq!(a * b, vec2d(-2.0, 12.0));
        assert_eq!(a * 2.0, vec2d(4.0, 6.0));
        assert_eq!(-a, vec2d(-2.0, -3.0));
        // operands untouched
        assert_eq!(a, vec2d(2.0, 3.0));
    }
}
