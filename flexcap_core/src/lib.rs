//! # flexcap_core - Steel Beam Flexural Capacity
//!
//! `flexcap_core` computes the factored moment resistance of laterally
//! unsupported, doubly-symmetric W-shape beams per CSA S16 Clause 13.6.1.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions; a beam recomputes everything from its current fields
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Injected data**: Section tables are passed in, never global
//!
//! ## Quick Start
//!
//! ```rust
//! use flexcap_core::{DesignParameters, SectionDb, SteelBeam};
//!
//! let db = SectionDb::builtin().unwrap();
//! let beam = SteelBeam::from_section(&db, "W150X22.5", 12000.0, DesignParameters::with_fy(345.0)).unwrap();
//!
//! let result = beam.moment_result().unwrap();
//! assert_eq!(result.section_class.numbers(), (4, 4));
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Classification, capacity, beam entity and reports
//! - [`equations`] - Bare formulas and their code references
//! - [`materials`] - Section property provider and databases
//! - [`settings`] - Design parameters and sweep ranges
//! - [`units`] - Unit systems and moment wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON files with atomic saves

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CapacityPoint, MomentResult, SteelBeam};
pub use errors::{CalcError, CalcResult};
pub use materials::{SectionDb, SectionProvider, SteelSection};
pub use settings::{DesignParameters, SweepSettings};
pub use units::UnitSystem;
