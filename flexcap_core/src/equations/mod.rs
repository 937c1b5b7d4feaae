//! # Structural Steel Equations
//!
//! All closed-form formulas used by the capacity calculation, kept apart
//! from the code-clause branching so each one can be checked against the
//! standard on its own.
//!
//! ## Modules
//!
//! - [`flexure`] - Yield, plastic and lateral-torsional buckling moments
//! - [`registry`] - Equation metadata and clause citations for reports
//!
//! ## References
//!
//! - CSA S16:24: Design of steel structures

pub mod flexure;
pub mod registry;

pub use flexure::{
    elastic_buckling_moment,
    elastic_buckling_resistance,
    inelastic_buckling_resistance,
    plastic_moment,
    yield_moment,
    AxisMoments,
};

pub use registry::{generate_equations_markdown, CodeReference, Equation, EquationMetadata};
