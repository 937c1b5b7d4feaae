//! # Flexural Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Check` / `*Result` - Results with the intermediate values (JSON-serializable)
//! - a pure function `fn(&input) -> CalcResult<_>`
//!
//! ## Available Calculations
//!
//! - [`section_class`] - CSA S16 section class per bending axis
//! - [`moment_capacity`] - Factored moment resistance of laterally unsupported W-shapes
//! - [`steel_beam`] - Beam entity binding a section, a length and design parameters
//! - [`report`] - Markdown calculation summary

pub mod moment_capacity;
pub mod report;
pub mod section_class;
pub mod steel_beam;

// Re-export commonly used types
pub use moment_capacity::{capacity, capacity_detailed, CapacityBranch, CapacityCheck, CapacityInput};
pub use report::CalcReport;
pub use section_class::{classify, classify_detailed, ClassificationCheck, SectionClass, SectionClassification};
pub use steel_beam::{CapacityPoint, MomentResult, SteelBeam};
