//! # Section Classification
//!
//! Assigns a CSA S16 section class (1 to 4) to a doubly-symmetric W-shape
//! for bending about each axis, from flange and web width-to-thickness
//! ratios (CSA S16:24 Table 2).
//!
//! Each element ratio is multiplied by √fy and compared to fixed limits:
//!
//! | Element              | Class 1 | Class 2 | Class 3 |
//! |----------------------|---------|---------|---------|
//! | Flange `(bf/2)/tf`   | 145     | 170     | 200     |
//! | Web, major axis      | 1100    | 1700    | 1900    |
//! | Web, minor axis      | 525     | 525     | 1900    |
//!
//! The governing class for an axis is the worse of the flange class and
//! the web class for that axis.
//!
//! ## Limitations
//!
//! - No axial-load adjustment of the web limits.
//! - Class 4 sections are classified but no effective-section reduction
//!   is applied.
//! - The minor-axis web limits repeat 525, so a minor-axis web can never
//!   be class 2. This follows the source table literally.
//!
//! ## Example
//!
//! ```rust
//! use flexcap_core::calculations::section_class::{classify, SectionClass};
//!
//! // W130X23.8, fy = 345 MPa
//! let class = classify(127.0, 9.14, 127.0, 6.1, 345.0).unwrap();
//! assert_eq!(class.major, SectionClass::Class1);
//! assert_eq!(class.minor, SectionClass::Class1);
//! ```

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Flange limits on `(bf/2)/tf × √fy` for classes 1, 2 and 3
pub const FLANGE_LIMITS: [f64; 3] = [145.0, 170.0, 200.0];

/// Web limits on `(d - 2tf)/tw × √fy` for major-axis bending
pub const MAJOR_WEB_LIMITS: [f64; 3] = [1100.0, 1700.0, 1900.0];

/// Web limits on `(d - 2tf)/tw × √fy` for minor-axis bending
pub const MINOR_WEB_LIMITS: [f64; 3] = [525.0, 525.0, 1900.0];

/// Above this value of `(d - 2tf)/tw × √fy` the web is too slender to classify
pub const WEB_SLENDERNESS_LIMIT: f64 = 83000.0;

/// CSA S16 section class. Ordered: `Class1 < Class4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SectionClass {
    /// Plastic design section
    Class1,
    /// Compact section
    Class2,
    /// Non-compact section
    Class3,
    /// Slender section
    Class4,
}

impl SectionClass {
    /// Class number 1-4
    pub fn number(&self) -> u8 {
        match self {
            SectionClass::Class1 => 1,
            SectionClass::Class2 => 2,
            SectionClass::Class3 => 3,
            SectionClass::Class4 => 4,
        }
    }

    /// Classes 1 and 2 can reach the plastic moment
    pub fn reaches_plastic_moment(&self) -> bool {
        *self <= SectionClass::Class2
    }

    /// Class for a slenderness check against three ascending limits.
    ///
    /// The limits are tested in order, so a repeated limit makes the
    /// class it guards unreachable.
    pub fn from_limits(check: f64, limits: &[f64; 3]) -> Self {
        if check <= limits[0] {
            SectionClass::Class1
        } else if check <= limits[1] {
            SectionClass::Class2
        } else if check <= limits[2] {
            SectionClass::Class3
        } else {
            SectionClass::Class4
        }
    }
}

impl fmt::Display for SectionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class {}", self.number())
    }
}

impl From<SectionClass> for u8 {
    fn from(class: SectionClass) -> Self {
        class.number()
    }
}

impl TryFrom<u8> for SectionClass {
    type Error = CalcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SectionClass::Class1),
            2 => Ok(SectionClass::Class2),
            3 => Ok(SectionClass::Class3),
            4 => Ok(SectionClass::Class4),
            other => Err(CalcError::invalid_input(
                "section_class",
                other.to_string(),
                "Section class must be 1, 2, 3 or 4",
            )),
        }
    }
}

/// Governing section class for each bending axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionClassification {
    /// Bending about the X-X (major) axis
    pub major: SectionClass,
    /// Bending about the Y-Y (minor) axis
    pub minor: SectionClass,
}

impl SectionClassification {
    /// Class numbers as a (major, minor) pair
    pub fn numbers(&self) -> (u8, u8) {
        (self.major.number(), self.minor.number())
    }
}

impl fmt::Display for SectionClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (major), {} (minor)", self.major, self.minor)
    }
}

/// Classification with every intermediate value, for calculation reports.
///
/// Limits are expressed on the bare ratio, i.e. divided by √fy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationCheck {
    /// Flange ratio (bf/2)/tf
    pub flange_ratio: f64,
    /// Web ratio (d - 2tf)/tw
    pub web_ratio: f64,
    /// Flange limits 145/√fy, 170/√fy, 200/√fy
    pub flange_limits: [f64; 3],
    /// Major-axis web limits 1100/√fy, 1700/√fy, 1900/√fy
    pub web_limits_major: [f64; 3],
    /// Minor-axis web limits 525/√fy, 525/√fy, 1900/√fy
    pub web_limits_minor: [f64; 3],
    /// Flange class
    pub flange_class: SectionClass,
    /// Web class for major-axis bending
    pub web_class_major: SectionClass,
    /// Web class for minor-axis bending
    pub web_class_minor: SectionClass,
    /// Governing classes
    pub classification: SectionClassification,
}

/// Classify a W-shape for major- and minor-axis bending.
///
/// # Arguments
///
/// * `bf` - Flange width (mm)
/// * `tf` - Flange thickness (mm)
/// * `d` - Overall depth (mm)
/// * `tw` - Web thickness (mm)
/// * `fy` - Yield strength (MPa)
///
/// # Errors
///
/// * `CalcError::InvalidInput` - a non-positive input, or `d <= 2tf`
/// * `CalcError::SectionTooSlender` - `(d - 2tf)/tw × √fy > 83000`
pub fn classify(bf: f64, tf: f64, d: f64, tw: f64, fy: f64) -> CalcResult<SectionClassification> {
    classify_detailed(bf, tf, d, tw, fy).map(|check| check.classification)
}

/// Classify a W-shape and keep the intermediate ratios and limits.
///
/// Same contract as [`classify`].
pub fn classify_detailed(bf: f64, tf: f64, d: f64, tw: f64, fy: f64) -> CalcResult<ClassificationCheck> {
    validate_geometry(bf, tf, d, tw, fy)?;

    let root_fy = fy.sqrt();

    let flange_ratio = (bf / 2.0) / tf;
    let flange_check = flange_ratio * root_fy;
    let flange_class = SectionClass::from_limits(flange_check, &FLANGE_LIMITS);

    // TODO: reduce the major-axis web limits for axial compression once
    // beam-columns are supported
    let web_ratio = (d - 2.0 * tf) / tw;
    let web_check = web_ratio * root_fy;

    if web_check > WEB_SLENDERNESS_LIMIT {
        return Err(CalcError::section_too_slender(web_check, WEB_SLENDERNESS_LIMIT));
    }

    let web_class_major = SectionClass::from_limits(web_check, &MAJOR_WEB_LIMITS);
    let web_class_minor = SectionClass::from_limits(web_check, &MINOR_WEB_LIMITS);

    let classification = SectionClassification {
        major: flange_class.max(web_class_major),
        minor: flange_class.max(web_class_minor),
    };

    debug!(
        "classification: flange {:.1} -> {}, web {:.1} -> {} / {}, governing {}",
        flange_check, flange_class, web_check, web_class_major, web_class_minor, classification
    );
    if classification.major == SectionClass::Class4 {
        warn!("class 4 section: no effective-section reduction is applied");
    }

    Ok(ClassificationCheck {
        flange_ratio,
        web_ratio,
        flange_limits: FLANGE_LIMITS.map(|l| l / root_fy),
        web_limits_major: MAJOR_WEB_LIMITS.map(|l| l / root_fy),
        web_limits_minor: MINOR_WEB_LIMITS.map(|l| l / root_fy),
        flange_class,
        web_class_major,
        web_class_minor,
        classification,
    })
}

fn validate_geometry(bf: f64, tf: f64, d: f64, tw: f64, fy: f64) -> CalcResult<()> {
    for (field, value) in [("bf", bf), ("tf", tf), ("d", d), ("tw", tw), ("fy", fy)] {
        if !(value > 0.0) || !value.is_finite() {
            return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
        }
    }
    if d <= 2.0 * tf {
        return Err(CalcError::invalid_input(
            "d",
            d.to_string(),
            "Depth must exceed twice the flange thickness",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // fy = 100 MPa makes √fy exactly 10, so limits fall on exact ratios
    const FY_100: f64 = 100.0;

    #[test]
    fn test_w150x22_5_is_class_4() {
        let class = classify(152.0, 6.6, 152.0, 5.84, 345.0).unwrap();
        assert_eq!(class.numbers(), (4, 4));
    }

    #[test]
    fn test_w130x23_8_is_class_1() {
        let class = classify(127.0, 9.14, 127.0, 6.1, 345.0).unwrap();
        assert_eq!(class.numbers(), (1, 1));
    }

    #[test]
    fn test_flange_limits_inclusive() {
        // (bf/2)/tf = 14.5 -> 145 exactly
        let at_limit = classify(29.0, 1.0, 50.0, 10.0, FY_100).unwrap();
        assert_eq!(at_limit.major, SectionClass::Class1);

        let over = classify(29.2, 1.0, 50.0, 10.0, FY_100).unwrap();
        assert_eq!(over.major, SectionClass::Class2);

        let class3 = classify(40.0, 1.0, 50.0, 10.0, FY_100).unwrap();
        assert_eq!(class3.major, SectionClass::Class3);

        let class4 = classify(40.2, 1.0, 50.0, 10.0, FY_100).unwrap();
        assert_eq!(class4.numbers(), (4, 4));
    }

    #[test]
    fn test_major_web_limits() {
        // (d - 2)/1 × 10
        let class1 = classify(20.0, 1.0, 112.0, 1.0, FY_100).unwrap();
        assert_eq!(class1.major, SectionClass::Class1);

        let class2 = classify(20.0, 1.0, 113.0, 1.0, FY_100).unwrap();
        assert_eq!(class2.major, SectionClass::Class2);

        let class3 = classify(20.0, 1.0, 190.0, 1.0, FY_100).unwrap();
        assert_eq!(class3.major, SectionClass::Class3);

        let class4 = classify(20.0, 1.0, 193.0, 1.0, FY_100).unwrap();
        assert_eq!(class4.major, SectionClass::Class4);
    }

    #[test]
    fn test_minor_web_never_class_2() {
        // Web check 600: major class 1, minor skips straight to class 3
        let class = classify(20.0, 1.0, 62.0, 1.0, FY_100).unwrap();
        assert_eq!(class.numbers(), (1, 3));

        for d in (10..400).map(|d| d as f64) {
            let class = classify(20.0, 1.0, d, 1.0, FY_100).unwrap();
            assert_ne!(class.minor, SectionClass::Class2);
        }
    }

    #[test]
    fn test_too_slender_boundary() {
        // 8300 × 10 = 83000 is still classifiable
        let at_limit = classify(20.0, 1.0, 8302.0, 1.0, FY_100).unwrap();
        assert_eq!(at_limit.major, SectionClass::Class4);

        let err = classify(20.0, 1.0, 8303.0, 1.0, FY_100).unwrap_err();
        match err {
            CalcError::SectionTooSlender { web_check, limit } => {
                assert!((web_check - 83010.0).abs() < 1e-6);
                assert_eq!(limit, WEB_SLENDERNESS_LIMIT);
            }
            other => panic!("expected SectionTooSlender, got {:?}", other),
        }
    }

    #[test]
    fn test_monotonic_in_slenderness() {
        let mut previous = SectionClass::Class1;
        for step in 0..200 {
            let bf = 10.0 + step as f64 * 0.25;
            let class = classify(bf, 1.0, 50.0, 10.0, FY_100).unwrap().major;
            assert!(class >= previous);
            previous = class;
        }
        assert_eq!(previous, SectionClass::Class4);
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(classify(0.0, 1.0, 50.0, 1.0, FY_100).unwrap_err().is_contract_violation());
        assert!(classify(20.0, 1.0, 50.0, -1.0, FY_100).unwrap_err().is_contract_violation());
        assert!(classify(20.0, 1.0, 50.0, 1.0, 0.0).unwrap_err().is_contract_violation());
        assert!(classify(20.0, 25.0, 50.0, 1.0, FY_100).unwrap_err().is_contract_violation());
        assert!(classify(f64::NAN, 1.0, 50.0, 1.0, FY_100).is_err());
    }

    #[test]
    fn test_detailed_check_limits() {
        let check = classify_detailed(152.0, 6.6, 152.0, 5.84, 345.0).unwrap();
        assert!((check.flange_ratio - 11.515).abs() < 1e-3);
        assert!((check.web_ratio - 23.767).abs() < 1e-3);
        assert!((check.flange_limits[0] - 145.0 / 345f64.sqrt()).abs() < 1e-12);
        assert_eq!(check.web_limits_minor[0], check.web_limits_minor[1]);
        assert_eq!(check.flange_class, SectionClass::Class4);
        assert_eq!(check.web_class_major, SectionClass::Class1);
        assert_eq!(check.classification.numbers(), (4, 4));
    }

    #[test]
    fn test_class_serialization() {
        let class = SectionClassification {
            major: SectionClass::Class2,
            minor: SectionClass::Class3,
        };
        let json = serde_json::to_string(&class).unwrap();
        assert_eq!(json, r#"{"major":2,"minor":3}"#);
        let roundtrip: SectionClassification = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, class);
        assert!(serde_json::from_str::<SectionClass>("5").is_err());
    }
}
