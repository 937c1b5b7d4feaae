//! # Flexural Resistance Formulas
//!
//! Closed-form moment formulas for doubly-symmetric W-shapes per CSA S16.
//! These are bare formulas: no validation, no branching on section class.
//! The code-clause selection lives in
//! [`crate::calculations::moment_capacity`].
//!
//! ## Notation
//!
//! - `S` = Elastic section modulus (mm³)
//! - `Z` = Plastic section modulus (mm³)
//! - `fy` = Yield strength (MPa)
//! - `L` = Unbraced length (mm)
//! - `ω₂` = Equivalent moment factor
//! - `E`, `G` = Elastic and shear modulus (GPa)
//! - `Iy` = Weak-axis moment of inertia (mm⁴)
//! - `J` = Torsional constant (mm⁴), `Cw` = Warping constant (mm⁶)
//!
//! ## Units
//!
//! `S × fy` is in N·mm; dividing by 1000 gives the working moment unit.
//! Entering `E` and `G` in GPa makes `Mu` come out in that same unit.
//!
//! ## References
//!
//! - CSA S16:24 Clause 13.5 (yield and plastic moment)
//! - CSA S16:24 Clause 13.6.1 (laterally unsupported members)

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Divisor bringing `mm³ × MPa` into the working moment unit
pub const MOMENT_UNIT_DIVISOR: f64 = 1000.0;

/// Buckling moment ratio above which the inelastic interaction governs
pub const INELASTIC_THRESHOLD: f64 = 0.67;

/// A moment about each principal axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisMoments {
    /// About the X-X (major) axis
    pub x: f64,
    /// About the Y-Y (minor) axis
    pub y: f64,
}

/// Yield moment about both axes
///
/// # Formula (CSA S16 cl. 13.5 b))
/// - My,x = Sx·fy / 1000
/// - My,y = Sy·fy / 1000
///
/// # Example
/// ```rust
/// use flexcap_core::equations::flexure::yield_moment;
///
/// // W150X22.5, fy = 345 MPa
/// let my = yield_moment(159_000.0, 51_000.0, 345.0);
/// assert_eq!(my.x, 54855.0);
/// assert_eq!(my.y, 17595.0);
/// ```
#[inline]
pub fn yield_moment(sx: f64, sy: f64, fy: f64) -> AxisMoments {
    AxisMoments {
        x: sx * fy / MOMENT_UNIT_DIVISOR,
        y: sy * fy / MOMENT_UNIT_DIVISOR,
    }
}

/// Plastic moment about both axes
///
/// # Formula (CSA S16 cl. 13.5 a))
/// - Mp,x = Zx·fy / 1000
/// - Mp,y = Zy·fy / 1000
#[inline]
pub fn plastic_moment(zx: f64, zy: f64, fy: f64) -> AxisMoments {
    AxisMoments {
        x: zx * fy / MOMENT_UNIT_DIVISOR,
        y: zy * fy / MOMENT_UNIT_DIVISOR,
    }
}

/// Elastic lateral-torsional buckling moment of a doubly-symmetric section
///
/// # Formula (CSA S16 cl. 13.6.1)
/// Mu = (ω₂·π / L) · √(E·Iy·G·J + (π·E / L)²·Iy·Cw)
///
/// `L` must be positive: `Mu → ∞` as `L → 0` and `Mu → 0` as `L → ∞`.
///
/// # Example
/// ```rust
/// use flexcap_core::equations::flexure::elastic_buckling_moment;
///
/// // W150X22.5 over 12 m
/// let mu = elastic_buckling_moment(12000.0, 1.0, 3.88e6, 42.0e3, 20.5e9, 200.0, 77.0);
/// assert!((mu - 13672.966).abs() < 1e-3);
/// ```
#[inline]
pub fn elastic_buckling_moment(l: f64, omega_2: f64, iy: f64, j: f64, cw: f64, e: f64, g: f64) -> f64 {
    let st_venant = e * iy * g * j;
    let warping = (PI * e / l).powi(2) * iy * cw;
    (omega_2 * PI / l) * (st_venant + warping).sqrt()
}

/// Factored resistance when inelastic lateral-torsional buckling governs
///
/// # Formula (CSA S16 cl. 13.6.1 a)i) / b)i))
/// Mr = min(1.15·φ·M·(1 - 0.28·M / Mu), φ·M)
///
/// `M` is the plastic moment for class 1 and 2 sections and the yield
/// moment for class 3 and 4 sections.
#[inline]
pub fn inelastic_buckling_resistance(phi: f64, m_ref: f64, mu: f64) -> f64 {
    (1.15 * phi * m_ref * (1.0 - 0.28 * m_ref / mu)).min(phi * m_ref)
}

/// Factored resistance when elastic lateral-torsional buckling governs
///
/// # Formula (CSA S16 cl. 13.6.1 a)ii) / b)ii))
/// Mr = φ·Mu
#[inline]
pub fn elastic_buckling_resistance(phi: f64, mu: f64) -> f64 {
    phi * mu
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_yield_and_plastic_moment() {
        let my = yield_moment(159_000.0, 51_000.0, 345.0);
        assert_eq!(my, AxisMoments { x: 54855.0, y: 17595.0 });

        let mp = plastic_moment(177_000.0, 77_800.0, 345.0);
        assert_eq!(mp.x, 61065.0);
        assert_relative_eq!(mp.y, 26841.0, max_relative = 1e-12);
    }

    #[test]
    fn test_moments_linear_in_fy() {
        let base = plastic_moment(177_000.0, 77_800.0, 300.0);
        let doubled = plastic_moment(177_000.0, 77_800.0, 600.0);
        assert_relative_eq!(doubled.x, 2.0 * base.x, max_relative = 1e-12);
        assert_relative_eq!(doubled.y, 2.0 * base.y, max_relative = 1e-12);
    }

    #[test]
    fn test_buckling_moment_w150x22_5() {
        let mu = elastic_buckling_moment(12000.0, 1.0, 3.88e6, 42.0e3, 20.5e9, 200.0, 77.0);
        assert_relative_eq!(mu, 13672.966292392553, max_relative = 1e-12);

        let mu_2m = elastic_buckling_moment(2000.0, 1.0, 3.88e6, 42.0e3, 20.5e9, 200.0, 77.0);
        assert_relative_eq!(mu_2m, 159881.043513411, max_relative = 1e-9);
    }

    #[test]
    fn test_buckling_moment_decreasing_in_length() {
        let mut previous = f64::INFINITY;
        for step in 1..100 {
            let l = step as f64 * 250.0;
            let mu = elastic_buckling_moment(l, 1.0, 3.88e6, 42.0e3, 20.5e9, 200.0, 77.0);
            assert!(mu < previous);
            previous = mu;
        }
    }

    #[test]
    fn test_buckling_moment_proportional_to_omega() {
        let single = elastic_buckling_moment(6000.0, 1.0, 3.13e6, 79.9e3, 10.9e9, 200.0, 77.0);
        let double = elastic_buckling_moment(6000.0, 2.0, 3.13e6, 79.9e3, 10.9e9, 200.0, 77.0);
        assert_relative_eq!(double, 2.0 * single, max_relative = 1e-12);
    }

    #[test]
    fn test_inelastic_resistance_capped() {
        // Very large Mu: interaction exceeds φM, cap applies
        assert_relative_eq!(inelastic_buckling_resistance(0.9, 1000.0, 1e12), 900.0);
        // Mu = 2M: 1.15·0.9·1000·0.86 = 890.1
        assert_relative_eq!(inelastic_buckling_resistance(0.9, 1000.0, 2000.0), 890.1, max_relative = 1e-12);
        assert_relative_eq!(elastic_buckling_resistance(0.9, 500.0), 450.0);
    }
}
