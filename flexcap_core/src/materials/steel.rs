//! Steel Shapes Database (AISC W-shapes)
//!
//! Section properties for doubly-symmetric wide-flange shapes, looked up by
//! name. The database is an explicitly constructed value handed to whoever
//! needs it; nothing here is process-wide state, so tests can build their
//! own fixture tables.
//!
//! ## Data Source
//!
//! Tables follow the AISC Shapes Database column layout
//! (`Section,W,A,d,bf,tw,tf,kdes,Ix,Zx,Sx,rx,Iy,Zy,Sy,ry,J,Cw`). SI tables
//! store Ix/Iy in 10⁶ mm⁴, S/Z in 10³ mm³, J in 10³ mm⁴ and Cw in 10⁹ mm⁶;
//! they are rescaled to mm-based units on load (see [`crate::units`]).
//!
//! ## Example
//!
//! ```rust
//! use flexcap_core::materials::steel::{SectionDb, SectionProvider};
//! use flexcap_core::units::UnitSystem;
//!
//! let db = SectionDb::builtin().unwrap();
//! let w150 = db.lookup("W150X13", UnitSystem::Si).unwrap();
//!
//! assert_eq!(w150.ix, 6.2e6);
//! assert_eq!(w150.cw, 4.24e9);
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{
    UnitSystem, SI_MOMENT_OF_INERTIA_SCALE, SI_SECTION_MODULUS_SCALE, SI_TORSION_CONSTANT_SCALE,
    SI_WARPING_CONSTANT_SCALE,
};

const BUILTIN_SI_CSV: &str = include_str!("../../assets/sections/aisc_w_sections_si.csv");
const BUILTIN_US_CSV: &str = include_str!("../../assets/sections/aisc_w_sections_us.csv");

/// One row of a section table, after unit rescaling.
///
/// `W`, `A`, `kdes`, `rx` and `ry` are descriptive and not used by the
/// capacity calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Section designation (e.g., "W150X22.5")
    pub section: String,

    /// Nominal weight (kg/m or lb/ft)
    pub w: Option<f64>,

    /// Cross-sectional area
    pub a: Option<f64>,

    /// Overall depth
    pub d: f64,

    /// Flange width
    pub bf: f64,

    /// Web thickness
    pub tw: f64,

    /// Flange thickness
    pub tf: f64,

    /// Distance from outer flange face to web toe of fillet
    pub kdes: Option<f64>,

    /// Moment of inertia about X-axis
    pub ix: f64,

    /// Plastic section modulus about X-axis
    pub zx: f64,

    /// Elastic section modulus about X-axis
    pub sx: f64,

    /// Radius of gyration about X-axis
    pub rx: Option<f64>,

    /// Moment of inertia about Y-axis
    pub iy: f64,

    /// Plastic section modulus about Y-axis
    pub zy: f64,

    /// Elastic section modulus about Y-axis
    pub sy: f64,

    /// Radius of gyration about Y-axis
    pub ry: Option<f64>,

    /// Torsional constant
    pub j: f64,

    /// Warping constant
    pub cw: f64,
}

impl SectionRecord {
    /// Apply the fixed SI table rescaling (10⁶, 10³, 10³, 10⁹)
    fn rescale_si(mut self) -> Self {
        self.ix *= SI_MOMENT_OF_INERTIA_SCALE;
        self.iy *= SI_MOMENT_OF_INERTIA_SCALE;
        self.zx *= SI_SECTION_MODULUS_SCALE;
        self.sx *= SI_SECTION_MODULUS_SCALE;
        self.zy *= SI_SECTION_MODULUS_SCALE;
        self.sy *= SI_SECTION_MODULUS_SCALE;
        self.j *= SI_TORSION_CONSTANT_SCALE;
        self.cw *= SI_WARPING_CONSTANT_SCALE;
        self
    }

    /// Extract the geometry used by the capacity calculation.
    pub fn to_section(&self) -> CalcResult<SteelSection> {
        let section = SteelSection {
            name: self.section.clone(),
            d: self.d,
            bf: self.bf,
            tf: self.tf,
            tw: self.tw,
            ix: self.ix,
            iy: self.iy,
            sx: self.sx,
            sy: self.sy,
            zx: self.zx,
            zy: self.zy,
            cw: self.cw,
            j: self.j,
        };
        section.validate()?;
        Ok(section)
    }
}

/// Geometry of a doubly-symmetric wide-flange section.
///
/// Units must be internally consistent; the calculation formulas assume
/// mm, mm³, mm⁴ and mm⁶.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelSection {
    /// Section designation, unique within a table
    pub name: String,
    /// Overall depth
    pub d: f64,
    /// Flange width
    pub bf: f64,
    /// Flange thickness
    pub tf: f64,
    /// Web thickness
    pub tw: f64,
    /// Moment of inertia, strong axis
    pub ix: f64,
    /// Moment of inertia, weak axis
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
}

impl SteelSection {
    /// Validate that every dimension is strictly positive and the clear web
    /// depth `d - 2tf` is positive.
    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("d", self.d),
            ("bf", self.bf),
            ("tf", self.tf),
            ("tw", self.tw),
            ("Ix", self.ix),
            ("Iy", self.iy),
            ("Sx", self.sx),
            ("Sy", self.sy),
            ("Zx", self.zx),
            ("Zy", self.zy),
            ("Cw", self.cw),
            ("J", self.j),
        ];
        for (field, value) in fields {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    format!("Section property must be positive ({})", self.name),
                ));
            }
        }
        if self.clear_web_depth() <= 0.0 {
            return Err(CalcError::invalid_input(
                "d",
                self.d.to_string(),
                format!("Depth must exceed twice the flange thickness ({} mm)", 2.0 * self.tf),
            ));
        }
        Ok(())
    }

    /// Clear web depth d - 2tf
    pub fn clear_web_depth(&self) -> f64 {
        self.d - 2.0 * self.tf
    }
}

/// Keyed lookup of section properties.
///
/// The capacity core only needs this seam; storage format is up to the
/// implementor.
pub trait SectionProvider {
    /// Look up a section by name in the given unit system.
    ///
    /// Returns `CalcError::SectionNotFound` when the name is absent.
    fn lookup(&self, name: &str, units: UnitSystem) -> CalcResult<SectionRecord>;
}

/// In-memory steel section database, one table per unit system.
#[derive(Debug, Clone, Default)]
pub struct SectionDb {
    /// Records indexed by unit system and uppercase designation
    shapes: HashMap<(UnitSystem, String), SectionRecord>,

    /// Designations per unit system, in table order
    labels: HashMap<UnitSystem, Vec<String>>,
}

impl SectionDb {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Database with the bundled SI and US W-shape tables
    pub fn builtin() -> CalcResult<Self> {
        let mut db = SectionDb::new();
        db.extend_from_csv_str("builtin SI table", BUILTIN_SI_CSV, UnitSystem::Si)?;
        db.extend_from_csv_str("builtin US table", BUILTIN_US_CSV, UnitSystem::Us)?;
        Ok(db)
    }

    /// Load one table from a CSV file
    pub fn load_from_csv(path: &Path, units: UnitSystem) -> CalcResult<Self> {
        let mut db = SectionDb::new();
        db.extend_from_csv(path, units)?;
        Ok(db)
    }

    /// Add the rows of a CSV file to this database, replacing names that
    /// already exist in the same unit system
    pub fn extend_from_csv(&mut self, path: &Path, units: UnitSystem) -> CalcResult<()> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("read", path.display().to_string(), format!("Failed to read CSV: {}", e))
        })?;
        self.extend_from_csv_str(&path.display().to_string(), &text, units)
    }

    /// Parse CSV text into a new single-table database
    pub fn from_csv_str(source_name: &str, text: &str, units: UnitSystem) -> CalcResult<Self> {
        let mut db = SectionDb::new();
        db.extend_from_csv_str(source_name, text, units)?;
        Ok(db)
    }

    /// Parse CSV text and add its rows to this database
    pub fn extend_from_csv_str(&mut self, source_name: &str, text: &str, units: UnitSystem) -> CalcResult<()> {
        let mut lines = text.lines();

        let header_line = lines
            .next()
            .ok_or_else(|| CalcError::data_error(source_name, "CSV is empty"))?;
        // Spreadsheet exports often lead with a byte-order mark
        let header_line = header_line.strip_prefix('\u{feff}').unwrap_or(header_line);

        let headers: Vec<&str> = header_line.split(',').map(|h| h.trim()).collect();
        // Case-sensitive: "d" and "D" would otherwise be ambiguous in wider AISC exports
        let col_index = |name: &str| -> Option<usize> { headers.iter().position(|h| *h == name) };
        let required = |name: &str| -> CalcResult<usize> {
            col_index(name)
                .ok_or_else(|| CalcError::data_error(source_name, format!("Missing '{}' column", name)))
        };

        let section_idx = required("Section")?;
        let d_idx = required("d")?;
        let bf_idx = required("bf")?;
        let tw_idx = required("tw")?;
        let tf_idx = required("tf")?;
        let ix_idx = required("Ix")?;
        let zx_idx = required("Zx")?;
        let sx_idx = required("Sx")?;
        let iy_idx = required("Iy")?;
        let zy_idx = required("Zy")?;
        let sy_idx = required("Sy")?;
        let j_idx = required("J")?;
        let cw_idx = required("Cw")?;

        let w_idx = col_index("W");
        let a_idx = col_index("A");
        let kdes_idx = col_index("kdes");
        let rx_idx = col_index("rx");
        let ry_idx = col_index("ry");

        let mut count = 0;
        for (offset, line) in lines.enumerate() {
            let line_num = offset + 2;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').collect();

            let name = fields.get(section_idx).map(|s| s.trim()).unwrap_or("");
            if name.is_empty() {
                continue; // Skip rows without a designation
            }

            let get_f64 = |idx: usize, column: &str| -> CalcResult<f64> {
                fields
                    .get(idx)
                    .and_then(|v| parse_optional_f64(v))
                    .ok_or_else(|| {
                        CalcError::data_error(
                            source_name,
                            format!("Line {}: '{}' has no numeric '{}'", line_num, name, column),
                        )
                    })
            };

            let get_opt_f64 = |idx: Option<usize>| -> Option<f64> {
                idx.and_then(|i| fields.get(i)).and_then(|v| parse_optional_f64(v))
            };

            let record = SectionRecord {
                section: name.to_string(),
                w: get_opt_f64(w_idx),
                a: get_opt_f64(a_idx),
                d: get_f64(d_idx, "d")?,
                bf: get_f64(bf_idx, "bf")?,
                tw: get_f64(tw_idx, "tw")?,
                tf: get_f64(tf_idx, "tf")?,
                kdes: get_opt_f64(kdes_idx),
                ix: get_f64(ix_idx, "Ix")?,
                zx: get_f64(zx_idx, "Zx")?,
                sx: get_f64(sx_idx, "Sx")?,
                rx: get_opt_f64(rx_idx),
                iy: get_f64(iy_idx, "Iy")?,
                zy: get_f64(zy_idx, "Zy")?,
                sy: get_f64(sy_idx, "Sy")?,
                ry: get_opt_f64(ry_idx),
                j: get_f64(j_idx, "J")?,
                cw: get_f64(cw_idx, "Cw")?,
            };

            let record = match units {
                UnitSystem::Si => record.rescale_si(),
                UnitSystem::Us => record,
            };

            self.insert(record, units);
            count += 1;
        }

        debug!("loaded {} sections from {} ({})", count, source_name, units);
        Ok(())
    }

    /// Insert a record, replacing any record with the same name and units
    pub fn insert(&mut self, record: SectionRecord, units: UnitSystem) {
        let key = record.section.to_uppercase();
        let previous = self.shapes.insert((units, key.clone()), record);
        if previous.is_none() {
            self.labels.entry(units).or_default().push(key);
        }
    }

    /// Section names in one unit system, in table order
    pub fn names(&self, units: UnitSystem) -> Vec<&str> {
        self.labels
            .get(&units)
            .map(|labels| labels.iter().map(|l| l.as_str()).collect())
            .unwrap_or_default()
    }

    /// Records whose name starts with `prefix` (case-insensitive)
    pub fn search(&self, prefix: &str, units: UnitSystem) -> Vec<&SectionRecord> {
        let prefix_upper = prefix.to_uppercase();
        self.labels
            .get(&units)
            .map(|labels| {
                labels
                    .iter()
                    .filter(|l| l.starts_with(&prefix_upper))
                    .filter_map(|l| self.shapes.get(&(units, l.clone())))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of records across all unit systems
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the database is empty
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl SectionProvider for SectionDb {
    fn lookup(&self, name: &str, units: UnitSystem) -> CalcResult<SectionRecord> {
        let key = name.trim().to_uppercase();
        self.shapes
            .get(&(units, key))
            .cloned()
            .ok_or_else(|| CalcError::section_not_found(name))
    }
}

/// Parse an optional f64 from a CSV field
///
/// Returns None for empty strings, dashes, or invalid numbers.
fn parse_optional_f64(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "—" {
        return None;
    }
    f64::from_str(trimmed).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FIXTURE: &str = "\
Section,W,A,d,bf,tw,tf,kdes,Ix,Zx,Sx,rx,Iy,Zy,Sy,ry,J,Cw
W100X19.3,19.3,2470,106,103,7.11,8.76,-,4.7,103,89.1,43.6,1.61,47.7,31.2,25.5,60.2,3.83
";

    #[test]
    fn test_builtin_lookup_si() {
        let db = SectionDb::builtin().unwrap();
        let rec = db.lookup("W150X13", UnitSystem::Si).unwrap();
        assert_eq!(rec.section, "W150X13");
        assert_eq!(rec.w, Some(13.0));
        assert_eq!(rec.a, Some(1630.0));
        assert_eq!(rec.d, 148.0);
        assert_eq!(rec.bf, 100.0);
        assert_eq!(rec.tw, 4.32);
        assert_eq!(rec.tf, 4.95);
        assert_eq!(rec.kdes, Some(11.3));
        assert_eq!(rec.ix, 6.2e6);
        assert_eq!(rec.zx, 93900.0);
        assert_eq!(rec.sx, 83600.0);
        assert_eq!(rec.rx, Some(61.7));
        assert_eq!(rec.iy, 828000.0);
        assert_eq!(rec.zy, 25600.0);
        assert_eq!(rec.sy, 16600.0);
        assert_eq!(rec.ry, Some(22.6));
        assert_eq!(rec.j, 13900.0);
        assert_eq!(rec.cw, 4.24e9);
    }

    #[test]
    fn test_builtin_lookup_us_is_not_rescaled() {
        let db = SectionDb::builtin().unwrap();
        let rec = db.lookup("W6X15", UnitSystem::Us).unwrap();
        assert_eq!(rec.ix, 29.1);
        assert_eq!(rec.cw, 76.5);
        assert!(db.lookup("W6X15", UnitSystem::Si).is_err());
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let db = SectionDb::builtin().unwrap();
        let upper = db.lookup("W150X22.5", UnitSystem::Si).unwrap();
        let lower = db.lookup("w150x22.5", UnitSystem::Si).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_section_not_found() {
        let db = SectionDb::builtin().unwrap();
        let err = db.lookup("W999X1", UnitSystem::Si).unwrap_err();
        assert_eq!(err, CalcError::section_not_found("W999X1"));
    }

    #[test]
    fn test_fixture_table() {
        let db = SectionDb::from_csv_str("fixture", FIXTURE, UnitSystem::Si).unwrap();
        assert_eq!(db.len(), 1);
        let rec = db.lookup("W100X19.3", UnitSystem::Si).unwrap();
        assert_eq!(rec.kdes, None);
        assert_eq!(rec.ix, 4.7e6);
        assert_eq!(rec.j, 60200.0);
    }

    #[test]
    fn test_header_with_byte_order_mark() {
        let text = format!("\u{feff}{}", FIXTURE);
        let db = SectionDb::from_csv_str("spreadsheet export", &text, UnitSystem::Si).unwrap();
        let rec = db.lookup("W100X19.3", UnitSystem::Si).unwrap();
        assert_eq!(rec.section, "W100X19.3");
        assert_eq!(rec.ix, 4.7e6);
    }

    #[test]
    fn test_missing_column() {
        let err = SectionDb::from_csv_str("bad", "Section,d,bf\nW1,1,1\n", UnitSystem::Si).unwrap_err();
        assert_eq!(err.error_code(), "DATA_ERROR");
        assert!(err.to_string().contains("'tw'"));
    }

    #[test]
    fn test_non_numeric_required_field() {
        let text = FIXTURE.replace(",4.7,", ",n/a,");
        let err = SectionDb::from_csv_str("bad", &text, UnitSystem::Si).unwrap_err();
        assert!(err.to_string().contains("Line 2"));
        assert!(err.to_string().contains("'Ix'"));
    }

    #[test]
    fn test_names_and_search() {
        let db = SectionDb::builtin().unwrap();
        let names = db.names(UnitSystem::Si);
        assert!(names.contains(&"W150X22.5"));
        assert_eq!(names.len(), db.names(UnitSystem::Us).len());

        let w150 = db.search("w150", UnitSystem::Si);
        assert_eq!(w150.len(), 2);
        assert!(w150.iter().all(|r| r.section.starts_with("W150")));
    }

    #[test]
    fn test_insert_replaces() {
        let mut db = SectionDb::from_csv_str("fixture", FIXTURE, UnitSystem::Si).unwrap();
        let mut rec = db.lookup("W100X19.3", UnitSystem::Si).unwrap();
        rec.d = 110.0;
        db.insert(rec, UnitSystem::Si);
        assert_eq!(db.len(), 1);
        assert_eq!(db.names(UnitSystem::Si).len(), 1);
        assert_eq!(db.lookup("W100X19.3", UnitSystem::Si).unwrap().d, 110.0);
    }

    #[test]
    fn test_to_section_validates() {
        let db = SectionDb::builtin().unwrap();
        let rec = db.lookup("W150X22.5", UnitSystem::Si).unwrap();
        let section = rec.to_section().unwrap();
        assert_eq!(section.ix, 12_100_000.0);
        assert_eq!(section.cw, 20_500_000_000.0);

        let mut bad = rec.clone();
        bad.tw = 0.0;
        assert!(bad.to_section().unwrap_err().is_contract_violation());

        assert_relative_eq!(section.clear_web_depth(), 152.0 - 2.0 * 6.6, max_relative = 1e-12);

        let mut thick = rec;
        thick.tf = 80.0;
        let err = thick.to_section().unwrap_err();
        assert!(err.to_string().contains("'d'"));
    }

    #[test]
    fn test_parse_optional_f64() {
        assert_eq!(parse_optional_f64("123.45"), Some(123.45));
        assert_eq!(parse_optional_f64("  456  "), Some(456.0));
        assert_eq!(parse_optional_f64(""), None);
        assert_eq!(parse_optional_f64("-"), None);
        assert_eq!(parse_optional_f64("not a number"), None);
    }
}
