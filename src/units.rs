//! Physical unit definitions.
//!
//! Everything runs in plain SI:
//! - Length: metre (scenes are a few nanometres wide)
//! - Time: second
//! - Charge: coulomb
//! - Mass: kilogram

/// Elementary charge in coulombs.
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;
/// CODATA Coulomb constant, N·m²/C². The simulation default in `config` is rounded differently.
pub const COULOMB_CONSTANT_CODATA: f64 = 8.987_551_792_3e9;

/// Express a charge in coulombs as a multiple of e.
#[inline]
pub fn coulombs_to_e(q: f64) -> f64 {
    q / ELEMENTARY_CHARGE
}
