//! # Laterally Unsupported Steel Beam
//!
//! A [`SteelBeam`] binds one W-section, one unbraced length and a set of
//! [`DesignParameters`]. Every derived value (class, moments, capacity) is
//! recomputed from the current fields on each call, so rewriting
//! [`SteelBeam::length`] and asking again gives the capacity at the new span.
//!
//! ## Example
//!
//! ```rust
//! use flexcap_core::calculations::steel_beam::SteelBeam;
//! use flexcap_core::materials::steel::SectionDb;
//! use flexcap_core::settings::DesignParameters;
//!
//! let db = SectionDb::builtin().unwrap();
//! let mut beam = SteelBeam::from_section(&db, "W130X23.8", 12000.0, DesignParameters::with_fy(345.0)).unwrap();
//!
//! assert_eq!(beam.section_class().unwrap().numbers(), (1, 1));
//! assert!((beam.moment_capacity().unwrap() - 14798.84).abs() < 0.01);
//!
//! beam.length = 1200.0;
//! assert!((beam.moment_capacity().unwrap() - 49059.0).abs() < 1e-6);
//! ```

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::calculations::moment_capacity::{capacity_detailed, CapacityBranch, CapacityCheck, CapacityInput};
use crate::calculations::report::CalcReport;
use crate::calculations::section_class::{classify, classify_detailed, ClassificationCheck, SectionClassification};
use crate::equations::flexure::{elastic_buckling_moment, plastic_moment, yield_moment, AxisMoments};
use crate::errors::{CalcError, CalcResult};
use crate::materials::steel::{SectionProvider, SteelSection};
use crate::settings::{DesignParameters, SweepSettings};
use crate::units::UnitSystem;

/// A W-shape beam over one unbraced length.
///
/// `length` is the only field meant to change after construction. One
/// instance should not be shared between threads while it is being swept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelBeam {
    /// Unbraced length L (mm)
    pub length: f64,
    section: SteelSection,
    params: DesignParameters,
}

impl SteelBeam {
    /// Create a beam from known geometry.
    ///
    /// # Errors
    ///
    /// `CalcError::InvalidInput` when the geometry, length or parameters are
    /// out of range.
    pub fn new(section: SteelSection, length: f64, params: DesignParameters) -> CalcResult<Self> {
        section.validate()?;
        params.validate()?;
        validate_length(length)?;
        Ok(SteelBeam {
            length,
            section,
            params,
        })
    }

    /// Look up an SI section by name and build a beam from it.
    ///
    /// # Errors
    ///
    /// * `CalcError::SectionNotFound` - the provider has no such section
    /// * `CalcError::InvalidInput` - the record or parameters are out of range
    pub fn from_section<P>(provider: &P, name: &str, length: f64, params: DesignParameters) -> CalcResult<Self>
    where
        P: SectionProvider + ?Sized,
    {
        let record = provider.lookup(name, UnitSystem::Si)?;
        let beam = SteelBeam::new(record.to_section()?, length, params)?;
        debug!("beam {} at L = {} mm, fy = {} MPa", beam.section.name, length, params.fy);
        Ok(beam)
    }

    /// Section geometry
    pub fn section(&self) -> &SteelSection {
        &self.section
    }

    /// Material and code parameters
    pub fn params(&self) -> &DesignParameters {
        &self.params
    }

    /// Section designation
    pub fn name(&self) -> &str {
        &self.section.name
    }

    /// Governing class for major- and minor-axis bending
    pub fn section_class(&self) -> CalcResult<SectionClassification> {
        let s = &self.section;
        classify(s.bf, s.tf, s.d, s.tw, self.params.fy)
    }

    /// Classification with ratios and limits
    pub fn classification_check(&self) -> CalcResult<ClassificationCheck> {
        let s = &self.section;
        classify_detailed(s.bf, s.tf, s.d, s.tw, self.params.fy)
    }

    /// Yield moment about X-X and Y-Y
    pub fn yield_moment(&self) -> AxisMoments {
        yield_moment(self.section.sx, self.section.sy, self.params.fy)
    }

    /// Plastic moment about X-X and Y-Y
    pub fn plastic_moment(&self) -> AxisMoments {
        plastic_moment(self.section.zx, self.section.zy, self.params.fy)
    }

    /// Elastic lateral-torsional buckling moment Mu at the current length
    pub fn unbraced_moment(&self) -> CalcResult<f64> {
        validate_length(self.length)?;
        let s = &self.section;
        let p = &self.params;
        Ok(elastic_buckling_moment(self.length, p.omega_2, s.iy, s.j, s.cw, p.e, p.g))
    }

    /// Inputs to the capacity calculation at the current length
    pub fn capacity_input(&self) -> CapacityInput {
        let s = &self.section;
        let p = &self.params;
        CapacityInput {
            length: self.length,
            d: s.d,
            bf: s.bf,
            tf: s.tf,
            tw: s.tw,
            iy: s.iy,
            sx: s.sx,
            sy: s.sy,
            zx: s.zx,
            zy: s.zy,
            cw: s.cw,
            j: s.j,
            fy: p.fy,
            omega_2: p.omega_2,
            e: p.e,
            g: p.g,
            phi: p.phi,
        }
    }

    /// Capacity with intermediate moments and the governing branch
    pub fn capacity_check(&self) -> CalcResult<CapacityCheck> {
        capacity_detailed(&self.capacity_input())
    }

    /// Factored moment resistance Mr at the current length
    pub fn moment_capacity(&self) -> CalcResult<f64> {
        self.capacity_check().map(|check| check.factored_resistance)
    }

    /// Every derived value at the current length.
    pub fn moment_result(&self) -> CalcResult<MomentResult> {
        let section_class = self.section_class()?;
        let check = self.capacity_check()?;
        let my = self.yield_moment();
        let mp = self.plastic_moment();

        Ok(MomentResult {
            section: self.section.name.clone(),
            length: self.length,
            section_class,
            yield_moment_x: my.x,
            yield_moment_y: my.y,
            plastic_moment_x: mp.x,
            plastic_moment_y: mp.y,
            elastic_buckling_moment: check.elastic_buckling_moment,
            factored_capacity: check.factored_resistance,
            branch: check.branch,
        })
    }

    /// Mr at every length of the sweep.
    ///
    /// Rewrites `length` for each point and puts the original back before
    /// returning, including on error. Stops at the first failing length.
    pub fn capacity_curve(&mut self, sweep: &SweepSettings) -> CalcResult<Vec<CapacityPoint>> {
        let lengths = sweep.lengths()?;

        let original = self.length;
        let mut points = Vec::with_capacity(lengths.len());

        for length in lengths {
            self.length = length;
            match self.moment_capacity() {
                Ok(capacity) => {
                    trace!("{} L = {} mm: Mr = {:.2}", self.section.name, length, capacity);
                    points.push(CapacityPoint { length, capacity });
                }
                Err(e) => {
                    self.length = original;
                    return Err(e);
                }
            }
        }

        self.length = original;
        debug!("{}: {} capacity points", self.section.name, points.len());
        Ok(points)
    }

    /// Structured calculation summary at the current length
    pub fn calc_report(&self) -> CalcResult<CalcReport> {
        Ok(CalcReport {
            section: self.section.clone(),
            length: self.length,
            params: self.params,
            classification: self.classification_check()?,
            yield_moment: self.yield_moment(),
            plastic_moment: self.plastic_moment(),
            capacity: self.capacity_check()?,
        })
    }

    /// Markdown calculation summary at the current length
    pub fn report(&self) -> CalcResult<String> {
        Ok(self.calc_report()?.to_markdown())
    }
}

fn validate_length(length: f64) -> CalcResult<()> {
    if !(length > 0.0) || !length.is_finite() {
        return Err(CalcError::invalid_input(
            "length",
            length.to_string(),
            "Unbraced length must be positive",
        ));
    }
    Ok(())
}

/// Derived moments of a beam at one length. Never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentResult {
    /// Section designation
    pub section: String,
    /// Unbraced length the values were computed at (mm)
    pub length: f64,
    /// Governing class per axis
    pub section_class: SectionClassification,
    /// Yield moment about X-X
    pub yield_moment_x: f64,
    /// Yield moment about Y-Y
    pub yield_moment_y: f64,
    /// Plastic moment about X-X
    pub plastic_moment_x: f64,
    /// Plastic moment about Y-Y
    pub plastic_moment_y: f64,
    /// Elastic lateral-torsional buckling moment Mu
    pub elastic_buckling_moment: f64,
    /// Factored moment resistance Mr
    pub factored_capacity: f64,
    /// Clause 13.6.1 branch that produced Mr
    pub branch: CapacityBranch,
}

/// One point of a capacity-versus-length curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityPoint {
    /// Unbraced length (mm)
    pub length: f64,
    /// Factored moment resistance Mr
    pub capacity: f64,
}
