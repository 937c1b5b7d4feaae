//! # Moment Capacity of Laterally Unsupported Beams
//!
//! Combines section classification, yield/plastic moments and the elastic
//! lateral-torsional buckling moment into the factored moment resistance
//! `Mr` of CSA S16:24 Clause 13.6.1.
//!
//! ## Branches
//!
//! | Major class | Condition       | Mr                                        |
//! |-------------|-----------------|-------------------------------------------|
//! | 1 or 2      | Mu > 0.67 Mp    | min(1.15 φ Mp (1 - 0.28 Mp/Mu), φ Mp)     |
//! | 1 or 2      | Mu ≤ 0.67 Mp    | φ Mu                                      |
//! | 3 or 4      | Mu > 0.67 My    | min(1.15 φ My (1 - 0.28 My/Mu), φ My)     |
//! | 3 or 4      | Mu ≤ 0.67 My    | φ Mu                                      |
//!
//! ## Example
//!
//! ```rust
//! use flexcap_core::calculations::moment_capacity::{capacity, CapacityInput};
//!
//! // W130X23.8 over 1.2 m, fy = 345 MPa
//! let input = CapacityInput {
//!     length: 1200.0,
//!     d: 127.0,
//!     bf: 127.0,
//!     tf: 9.14,
//!     tw: 6.1,
//!     iy: 3.13e6,
//!     sx: 140e3,
//!     sy: 49.2e3,
//!     zx: 158e3,
//!     zy: 75.1e3,
//!     cw: 10.9e9,
//!     j: 79.9e3,
//!     fy: 345.0,
//!     omega_2: 1.0,
//!     e: 200.0,
//!     g: 77.0,
//!     phi: 0.9,
//! };
//!
//! let mr = capacity(&input).unwrap();
//! assert!((mr - 49059.0).abs() < 1e-6);
//! ```

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculations::section_class::{classify, SectionClass};
use crate::equations::flexure::{
    elastic_buckling_moment, elastic_buckling_resistance, inelastic_buckling_resistance, plastic_moment,
    yield_moment, INELASTIC_THRESHOLD,
};
use crate::equations::registry::Equation;
use crate::errors::{CalcError, CalcResult};

/// Lowest accepted equivalent moment factor ω₂
pub const OMEGA_2_MIN: f64 = 1.0;

/// Highest accepted equivalent moment factor ω₂
pub const OMEGA_2_MAX: f64 = 2.5;

/// Everything the capacity calculation reads, in working units
/// (mm, mm³, mm⁴, mm⁶, MPa for fy, GPa for E and G).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityInput {
    /// Unbraced length L
    pub length: f64,
    /// Overall depth
    pub d: f64,
    /// Flange width
    pub bf: f64,
    /// Flange thickness
    pub tf: f64,
    /// Web thickness
    pub tw: f64,
    /// Weak-axis moment of inertia
    pub iy: f64,
    /// Elastic section modulus, strong axis
    pub sx: f64,
    /// Elastic section modulus, weak axis
    pub sy: f64,
    /// Plastic section modulus, strong axis
    pub zx: f64,
    /// Plastic section modulus, weak axis
    pub zy: f64,
    /// Warping constant
    pub cw: f64,
    /// Torsional constant
    pub j: f64,
    /// Yield strength
    pub fy: f64,
    /// Equivalent moment factor ω₂
    pub omega_2: f64,
    /// Elastic modulus
    pub e: f64,
    /// Shear modulus
    pub g: f64,
    /// Resistance factor φ
    pub phi: f64,
}

impl CapacityInput {
    /// Validate the caller contract: positive length and properties, ω₂ in
    /// [1.0, 2.5], φ in (0, 1]. Flange/web geometry is checked by the
    /// classifier.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("length", self.length),
            ("Iy", self.iy),
            ("Sx", self.sx),
            ("Sy", self.sy),
            ("Zx", self.zx),
            ("Zy", self.zy),
            ("Cw", self.cw),
            ("J", self.j),
            ("E", self.e),
            ("G", self.g),
        ];
        for (field, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }
        validate_factors(self.omega_2, self.phi)
    }
}

/// Check ω₂ ∈ [1.0, 2.5] and φ ∈ (0, 1]
pub(crate) fn validate_factors(omega_2: f64, phi: f64) -> CalcResult<()> {
    if !(OMEGA_2_MIN..=OMEGA_2_MAX).contains(&omega_2) {
        return Err(CalcError::invalid_input(
            "omega_2",
            omega_2.to_string(),
            "Equivalent moment factor must be between 1.0 and 2.5",
        ));
    }
    if !(phi > 0.0 && phi <= 1.0) {
        return Err(CalcError::invalid_input(
            "phi",
            phi.to_string(),
            "Resistance factor must be in (0, 1]",
        ));
    }
    Ok(())
}

/// Which Clause 13.6.1 formula produced Mr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapacityBranch {
    /// Class 1-2, Mu > 0.67 Mp: inelastic interaction on Mp (13.6.1 a)i))
    PlasticInelastic,
    /// Class 1-2, Mu ≤ 0.67 Mp: φ Mu (13.6.1 a)ii))
    PlasticElastic,
    /// Class 3-4, Mu > 0.67 My: inelastic interaction on My (13.6.1 b)i))
    YieldInelastic,
    /// Class 3-4, Mu ≤ 0.67 My: φ Mu (13.6.1 b)ii))
    YieldElastic,
}

impl CapacityBranch {
    /// Clause designation
    pub fn clause(&self) -> &'static str {
        match self {
            CapacityBranch::PlasticInelastic => "13.6.1 a)i)",
            CapacityBranch::PlasticElastic => "13.6.1 a)ii)",
            CapacityBranch::YieldInelastic => "13.6.1 b)i)",
            CapacityBranch::YieldElastic => "13.6.1 b)ii)",
        }
    }

    /// True when elastic buckling governs (Mr = φ Mu)
    pub fn is_elastic(&self) -> bool {
        matches!(self, CapacityBranch::PlasticElastic | CapacityBranch::YieldElastic)
    }

    /// Equation used for Mr
    pub fn equation(&self) -> Equation {
        if self.is_elastic() {
            Equation::ElasticBucklingResistance
        } else {
            Equation::InelasticBucklingResistance
        }
    }
}

impl fmt::Display for CapacityBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cl. {}", self.clause())
    }
}

/// Capacity with the values that selected the governing formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityCheck {
    /// Governing major-axis class
    pub major_class: SectionClass,
    /// Yield moment about X-X
    pub yield_moment_x: f64,
    /// Plastic moment about X-X
    pub plastic_moment_x: f64,
    /// Elastic lateral-torsional buckling moment Mu
    pub elastic_buckling_moment: f64,
    /// Moment the 0.67 threshold is taken on (Mp or My)
    pub reference_moment: f64,
    /// Formula that produced Mr
    pub branch: CapacityBranch,
    /// Factored moment resistance Mr
    pub factored_resistance: f64,
}

/// Factored moment resistance Mr of a laterally unsupported W-shape.
///
/// # Errors
///
/// * `CalcError::InvalidInput` - contract violation (see [`CapacityInput::validate`])
/// * `CalcError::SectionTooSlender` - classification failed; no partial result
/// * `CalcError::Internal` - no branch matched (non-finite intermediate value)
pub fn capacity(input: &CapacityInput) -> CalcResult<f64> {
    capacity_detailed(input).map(|check| check.factored_resistance)
}

/// Same as [`capacity`], keeping the intermediate moments and the branch.
pub fn capacity_detailed(input: &CapacityInput) -> CalcResult<CapacityCheck> {
    input.validate()?;

    let major_class = classify(input.bf, input.tf, input.d, input.tw, input.fy)?.major;
    let mu = elastic_buckling_moment(input.length, input.omega_2, input.iy, input.j, input.cw, input.e, input.g);
    let mpx = plastic_moment(input.zx, input.zy, input.fy).x;
    let myx = yield_moment(input.sx, input.sy, input.fy).x;
    let phi = input.phi;

    let compact = major_class.reaches_plastic_moment();

    let (branch, reference_moment, mr) = if compact && mu > INELASTIC_THRESHOLD * mpx {
        (CapacityBranch::PlasticInelastic, mpx, inelastic_buckling_resistance(phi, mpx, mu))
    } else if compact && mu <= INELASTIC_THRESHOLD * mpx {
        (CapacityBranch::PlasticElastic, mpx, elastic_buckling_resistance(phi, mu))
    } else if !compact && mu > INELASTIC_THRESHOLD * myx {
        (CapacityBranch::YieldInelastic, myx, inelastic_buckling_resistance(phi, myx, mu))
    } else if !compact && mu <= INELASTIC_THRESHOLD * myx {
        (CapacityBranch::YieldElastic, myx, elastic_buckling_resistance(phi, mu))
    } else {
        return Err(CalcError::internal(format!(
            "no Clause 13.6.1 branch matched (class {}, Mu = {}, Mp = {}, My = {})",
            major_class.number(),
            mu,
            mpx,
            myx
        )));
    };

    debug!(
        "L = {} mm: class {}, Mu = {:.2}, Mp = {:.2}, My = {:.2}, {} -> Mr = {:.2}",
        input.length,
        major_class.number(),
        mu,
        mpx,
        myx,
        branch,
        mr
    );

    Ok(CapacityCheck {
        major_class,
        yield_moment_x: myx,
        plastic_moment_x: mpx,
        elastic_buckling_moment: mu,
        reference_moment,
        branch,
        factored_resistance: mr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn w150x22_5(length: f64) -> CapacityInput {
        CapacityInput {
            length,
            d: 152.0,
            bf: 152.0,
            tf: 6.6,
            tw: 5.84,
            iy: 3.88e6,
            sx: 159e3,
            sy: 51e3,
            zx: 177e3,
            zy: 77.8e3,
            cw: 20.5e9,
            j: 42e3,
            fy: 345.0,
            omega_2: 1.0,
            e: 200.0,
            g: 77.0,
            phi: 0.9,
        }
    }

    fn w130x23_8(length: f64) -> CapacityInput {
        CapacityInput {
            length,
            d: 127.0,
            bf: 127.0,
            tf: 9.14,
            tw: 6.1,
            iy: 3.13e6,
            sx: 140e3,
            sy: 49.2e3,
            zx: 158e3,
            zy: 75.1e3,
            cw: 10.9e9,
            j: 79.9e3,
            fy: 345.0,
            omega_2: 1.0,
            e: 200.0,
            g: 77.0,
            phi: 0.9,
        }
    }

    #[test]
    fn test_class_4_elastic_branch() {
        let check = capacity_detailed(&w150x22_5(12000.0)).unwrap();
        assert_eq!(check.major_class, SectionClass::Class4);
        assert_eq!(check.branch, CapacityBranch::YieldElastic);
        assert_relative_eq!(check.elastic_buckling_moment, 13672.966292392553, max_relative = 1e-12);
        assert_relative_eq!(check.factored_resistance, 12305.669663153298, max_relative = 1e-12);
    }

    #[test]
    fn test_class_4_inelastic_branch() {
        let check = capacity_detailed(&w150x22_5(4000.0)).unwrap();
        assert_eq!(check.branch, CapacityBranch::YieldInelastic);
        assert_relative_eq!(check.factored_resistance, 40172.079638835596, max_relative = 1e-12);
    }

    #[test]
    fn test_class_4_capped_at_yield() {
        let check = capacity_detailed(&w150x22_5(1200.0)).unwrap();
        assert_eq!(check.branch, CapacityBranch::YieldInelastic);
        assert_eq!(check.reference_moment, 54855.0);
        assert_relative_eq!(check.factored_resistance, 49369.5, max_relative = 1e-12);
    }

    #[test]
    fn test_class_1_branches() {
        let long = capacity_detailed(&w130x23_8(12000.0)).unwrap();
        assert_eq!(long.major_class, SectionClass::Class1);
        assert_eq!(long.branch, CapacityBranch::PlasticElastic);
        assert_relative_eq!(long.factored_resistance, 14798.840052909407, max_relative = 1e-9);

        let mid = capacity_detailed(&w130x23_8(4000.0)).unwrap();
        assert_eq!(mid.branch, CapacityBranch::PlasticInelastic);
        assert_relative_eq!(mid.factored_resistance, 40413.83430560689, max_relative = 1e-9);

        let short = capacity(&w130x23_8(1200.0)).unwrap();
        assert_relative_eq!(short, 49059.0, max_relative = 1e-12);
    }

    #[test]
    fn test_never_exceeds_reference_capacity() {
        for step in 1..150 {
            let length = step as f64 * 200.0;

            let compact = capacity_detailed(&w130x23_8(length)).unwrap();
            assert!(compact.factored_resistance <= 0.9 * compact.plastic_moment_x + 1e-9);

            let slender = capacity_detailed(&w150x22_5(length)).unwrap();
            assert!(slender.factored_resistance <= 0.9 * slender.yield_moment_x + 1e-9);
        }
    }

    #[test]
    fn test_rejects_non_positive_length() {
        let err = capacity(&w150x22_5(0.0)).unwrap_err();
        assert!(err.is_contract_violation());
        assert!(capacity(&w150x22_5(-100.0)).is_err());
    }

    #[test]
    fn test_rejects_factors_out_of_range() {
        let mut input = w150x22_5(3000.0);
        input.omega_2 = 0.5;
        assert!(capacity(&input).is_err());

        input.omega_2 = 2.5;
        assert!(capacity(&input).is_ok());

        input.phi = 1.2;
        assert!(capacity(&input).is_err());

        input.phi = 0.0;
        assert!(capacity(&input).is_err());
    }

    #[test]
    fn test_too_slender_propagates() {
        let mut input = w150x22_5(3000.0);
        input.tw = 0.03;
        let err = capacity(&input).unwrap_err();
        assert_eq!(err.error_code(), "SECTION_TOO_SLENDER");
    }

    #[test]
    fn test_branch_metadata() {
        assert_eq!(CapacityBranch::PlasticInelastic.clause(), "13.6.1 a)i)");
        assert_eq!(CapacityBranch::YieldElastic.to_string(), "Cl. 13.6.1 b)ii)");
        assert_eq!(CapacityBranch::YieldElastic.equation(), Equation::ElasticBucklingResistance);
        assert_eq!(CapacityBranch::PlasticInelastic.equation(), Equation::InelasticBucklingResistance);
    }
}
