//! # Design Settings
//!
//! Material and code parameters shared by every beam of a run, and the
//! length range of a capacity sweep. Both serialize to JSON so a parameter
//! set can be kept next to a calculation.
//!
//! ## Example
//!
//! ```rust
//! use flexcap_core::settings::{DesignParameters, SweepSettings};
//!
//! let params = DesignParameters::with_fy(350.0);
//! assert_eq!(params.phi, 0.9);
//! assert!(params.validate().is_ok());
//!
//! let sweep = SweepSettings::default();
//! assert_eq!(sweep.lengths().unwrap().len(), 149);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::moment_capacity::validate_factors;
use crate::errors::{CalcError, CalcResult};
use crate::file_io::{load_json, save_json};

/// Material and code parameters for a capacity calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignParameters {
    /// Yield strength (MPa)
    pub fy: f64,
    /// Equivalent moment factor ω₂, 1.0 for uniform moment
    pub omega_2: f64,
    /// Elastic modulus (GPa)
    pub e: f64,
    /// Shear modulus (GPa)
    pub g: f64,
    /// Resistance factor φ
    pub phi: f64,
}

impl Default for DesignParameters {
    fn default() -> Self {
        DesignParameters {
            fy: 345.0,
            omega_2: 1.0,
            e: 200.0,
            g: 77.0,
            phi: 0.9,
        }
    }
}

impl DesignParameters {
    /// Defaults with the given yield strength
    pub fn with_fy(fy: f64) -> Self {
        DesignParameters {
            fy,
            ..Default::default()
        }
    }

    /// Check fy, E and G are positive, ω₂ is in [1.0, 2.5] and φ in (0, 1].
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("fy", self.fy), ("E", self.e), ("G", self.g)] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }
        validate_factors(self.omega_2, self.phi)
    }

    /// Load and validate a parameter set from a JSON file.
    ///
    /// Missing fields take their default value.
    pub fn from_json_file(path: &Path) -> CalcResult<Self> {
        let params: DesignParameters = load_json(path)?;
        params.validate()?;
        Ok(params)
    }

    /// Save the parameter set as pretty JSON (atomic write).
    pub fn to_json_file(&self, path: &Path) -> CalcResult<()> {
        save_json(self, path)
    }
}

/// Largest number of lengths a single sweep may evaluate
pub const MAX_SWEEP_POINTS: usize = 100_000;

/// Unbraced lengths to evaluate in a capacity sweep (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// First length, inclusive
    pub min_length: f64,
    /// Upper bound, exclusive
    pub max_length: f64,
    /// Increment
    pub step: f64,
}

impl Default for SweepSettings {
    fn default() -> Self {
        SweepSettings {
            min_length: 200.0,
            max_length: 30000.0,
            step: 200.0,
        }
    }
}

impl SweepSettings {
    /// Check `min_length > 0`, `step > 0`, `max_length > min_length` and
    /// that the range holds at most [`MAX_SWEEP_POINTS`] lengths.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.min_length > 0.0) || !self.min_length.is_finite() {
            return Err(CalcError::invalid_input(
                "min_length",
                self.min_length.to_string(),
                "Must be positive",
            ));
        }
        if !(self.step > 0.0) || !self.step.is_finite() {
            return Err(CalcError::invalid_input("step", self.step.to_string(), "Must be positive"));
        }
        if !(self.max_length > self.min_length) || !self.max_length.is_finite() {
            return Err(CalcError::invalid_input(
                "max_length",
                self.max_length.to_string(),
                format!("Must be greater than min_length ({})", self.min_length),
            ));
        }
        let points = self.point_estimate();
        if points > MAX_SWEEP_POINTS as f64 {
            return Err(CalcError::invalid_input(
                "step",
                self.step.to_string(),
                format!("Sweep would evaluate {} lengths; the limit is {}", points, MAX_SWEEP_POINTS),
            ));
        }
        Ok(())
    }

    /// `ceil((max_length - min_length) / step)`
    fn point_estimate(&self) -> f64 {
        ((self.max_length - self.min_length) / self.step).ceil()
    }

    /// Lengths in `[min_length, max_length)`, after validation.
    ///
    /// Computed as `min + i·step` so long sweeps don't accumulate rounding.
    pub fn lengths(&self) -> CalcResult<Vec<f64>> {
        self.validate()?;
        let points = self.point_estimate() as u32;
        Ok((0..=points)
            .map(|i| self.min_length + f64::from(i) * self.step)
            .take_while(|&length| length < self.max_length)
            .collect())
    }
}
