//! # Unit Systems
//!
//! Flexcap works in one internally consistent SI-derived unit set:
//!
//! - Length: millimetres (mm)
//! - Stress: MPa for `fy`, GPa for `E` and `G`
//! - Section properties: mm⁴ (I, J), mm³ (S, Z), mm⁶ (Cw)
//! - Moment: `mm³ × MPa / 1000`, i.e. N·m
//!
//! Section tables are stored in larger engineering submultiples (Ix in
//! 10⁶ mm⁴, Sx in 10³ mm³, ...). The factors below bring an SI table row
//! into working units; US tables are returned as stored.
//!
//! ## Example
//!
//! ```rust
//! use flexcap_core::units::{KiloNewtonMeters, NewtonMeters, UnitSystem};
//!
//! let units: UnitSystem = "si".parse().unwrap();
//! assert_eq!(units, UnitSystem::Si);
//!
//! let mr: KiloNewtonMeters = NewtonMeters(49369.5).into();
//! assert!((mr.0 - 49.3695).abs() < 1e-9);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Rescale factor for Ix, Iy in an SI section table (10⁶ mm⁴ → mm⁴)
pub const SI_MOMENT_OF_INERTIA_SCALE: f64 = 1e6;

/// Rescale factor for Sx, Sy, Zx, Zy in an SI section table (10³ mm³ → mm³)
pub const SI_SECTION_MODULUS_SCALE: f64 = 1e3;

/// Rescale factor for J in an SI section table (10³ mm⁴ → mm⁴)
pub const SI_TORSION_CONSTANT_SCALE: f64 = 1e3;

/// Rescale factor for Cw in an SI section table (10⁹ mm⁶ → mm⁶)
pub const SI_WARPING_CONSTANT_SCALE: f64 = 1e9;

/// Unit system of a section table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Metric designations (W150X22.5), rescaled to mm-based working units
    #[default]
    Si,
    /// US customary designations (W6X15), returned as stored
    Us,
}

impl UnitSystem {
    /// Lowercase code used on the command line and in JSON
    pub fn code(&self) -> &'static str {
        match self {
            UnitSystem::Si => "si",
            UnitSystem::Us => "us",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for UnitSystem {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "si" => Ok(UnitSystem::Si),
            "us" => Ok(UnitSystem::Us),
            other => Err(CalcError::invalid_input(
                "units",
                other,
                "Unit system must be 'si' or 'us'",
            )),
        }
    }
}

/// Moment in the working unit (N·m)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMeters(pub f64);

/// Moment in kN·m, used for reporting
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

impl From<NewtonMeters> for KiloNewtonMeters {
    fn from(nm: NewtonMeters) -> Self {
        KiloNewtonMeters(nm.0 / 1000.0)
    }
}

impl From<KiloNewtonMeters> for NewtonMeters {
    fn from(knm: KiloNewtonMeters) -> Self {
        NewtonMeters(knm.0 * 1000.0)
    }
}

impl fmt::Display for KiloNewtonMeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} kN·m", self.0)
    }
}
