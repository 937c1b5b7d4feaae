//! # Materials Database
//!
//! Section property lookups for structural steel.
//!
//! - **W-shapes**: doubly-symmetric wide-flange sections, SI and US tables
//!
//! ## Example
//!
//! ```rust
//! use flexcap_core::materials::{SectionDb, SectionProvider};
//! use flexcap_core::units::UnitSystem;
//!
//! let db = SectionDb::builtin().unwrap();
//! let section = db.lookup("w130x23.8", UnitSystem::Si).unwrap().to_section().unwrap();
//! assert_eq!(section.name, "W130X23.8");
//! ```

pub mod steel;

pub use steel::{SectionDb, SectionProvider, SectionRecord, SteelSection};
