//! # Equation Registry
//!
//! Metadata for every formula the capacity calculation uses: a readable
//! name, the plain-text formula, the governing code clause and the function
//! implementing it. Calculation reports cite these instead of repeating
//! formula strings.
//!
//! ## Usage
//!
//! ```rust
//! use flexcap_core::equations::registry::Equation;
//!
//! let meta = Equation::ElasticBucklingMoment.metadata();
//! assert_eq!(meta.reference.citation(), "CSA S16:24 Cl. 13.6.1");
//! ```

use serde::{Deserialize, Serialize};

/// Reference to the clause of a design standard an equation comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// CSA S16 - Design of steel structures
    CsaS16 {
        year: u16,
        clause: &'static str,
    },
}

impl CodeReference {
    const fn s16(clause: &'static str) -> Self {
        CodeReference::CsaS16 { year: 2024, clause }
    }

    /// Format the reference for reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::CsaS16 { year, clause } => {
                format!("CSA S16:{} {}", year % 100, clause)
            }
        }
    }
}

/// Metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// What the equation computes
    pub description: &'static str,
    /// Formula in plain text
    pub formula_plain: &'static str,
    /// Code clause
    pub reference: CodeReference,
    /// Function implementing the equation
    pub source_function: &'static str,
}

/// Every equation used by the flexural capacity calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equation {
    /// (bf/2)/tf against 145, 170, 200 / √fy
    FlangeSlenderness,
    /// (d - 2tf)/tw against the web limits / √fy
    WebSlenderness,
    /// My = S·fy
    YieldMoment,
    /// Mp = Z·fy
    PlasticMoment,
    /// Mu, elastic lateral-torsional buckling
    ElasticBucklingMoment,
    /// Mr = min(1.15φM(1 - 0.28M/Mu), φM)
    InelasticBucklingResistance,
    /// Mr = φMu
    ElasticBucklingResistance,
}

impl Equation {
    /// All equations in calculation order
    pub const ALL: [Equation; 7] = [
        Equation::FlangeSlenderness,
        Equation::WebSlenderness,
        Equation::YieldMoment,
        Equation::PlasticMoment,
        Equation::ElasticBucklingMoment,
        Equation::InelasticBucklingResistance,
        Equation::ElasticBucklingResistance,
    ];

    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::FlangeSlenderness => EquationMetadata {
                name: "Flange Slenderness",
                description: "Width-to-thickness ratio of the flange outstand",
                formula_plain: "(bf/2)/tf <= 145/sqrt(fy), 170/sqrt(fy), 200/sqrt(fy) for class 1, 2, 3",
                reference: CodeReference::s16("Table 2"),
                source_function: "classify",
            },
            Equation::WebSlenderness => EquationMetadata {
                name: "Web Slenderness",
                description: "Clear depth-to-thickness ratio of the web",
                formula_plain: "(d - 2tf)/tw <= 1100/sqrt(fy), 1700/sqrt(fy), 1900/sqrt(fy) (major); 525, 525, 1900 (minor)",
                reference: CodeReference::s16("Table 2"),
                source_function: "classify",
            },
            Equation::YieldMoment => EquationMetadata {
                name: "Yield Moment",
                description: "Moment at first yield of the extreme fibre",
                formula_plain: "My = S * fy",
                reference: CodeReference::s16("Cl. 13.5 b)"),
                source_function: "yield_moment",
            },
            Equation::PlasticMoment => EquationMetadata {
                name: "Plastic Moment",
                description: "Moment at full plastification of the section",
                formula_plain: "Mp = Z * fy",
                reference: CodeReference::s16("Cl. 13.5 a)"),
                source_function: "plastic_moment",
            },
            Equation::ElasticBucklingMoment => EquationMetadata {
                name: "Elastic Lateral-Torsional Buckling Moment",
                description: "Critical moment of an unbraced doubly-symmetric section",
                formula_plain: "Mu = (w2 * pi / L) * sqrt(E*Iy*G*J + (pi*E/L)^2 * Iy * Cw)",
                reference: CodeReference::s16("Cl. 13.6.1"),
                source_function: "elastic_buckling_moment",
            },
            Equation::InelasticBucklingResistance => EquationMetadata {
                name: "Inelastic Lateral-Torsional Buckling Resistance",
                description: "Factored resistance when Mu > 0.67 M (M = Mp for class 1-2, My for class 3-4)",
                formula_plain: "Mr = min(1.15 * phi * M * (1 - 0.28 * M / Mu), phi * M)",
                reference: CodeReference::s16("Cl. 13.6.1 a)i), b)i)"),
                source_function: "inelastic_buckling_resistance",
            },
            Equation::ElasticBucklingResistance => EquationMetadata {
                name: "Elastic Lateral-Torsional Buckling Resistance",
                description: "Factored resistance when Mu <= 0.67 M",
                formula_plain: "Mr = phi * Mu",
                reference: CodeReference::s16("Cl. 13.6.1 a)ii), b)ii)"),
                source_function: "elastic_buckling_resistance",
            },
        }
    }
}

/// Markdown reference of every equation, one section each.
pub fn generate_equations_markdown() -> String {
    let mut output = String::from("# Flexcap Equations Reference\n\n");
    output.push_str("Units: mm, MPa (fy), GPa (E, G); moments in N·m.\n\n");

    for equation in Equation::ALL {
        let meta = equation.metadata();
        output.push_str(&format!("## {}\n\n", meta.name));
        output.push_str(&format!("{}\n\n", meta.description));
        output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));
        output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
        output.push_str(&format!("**Implemented in:** `{}`\n\n", meta.source_function));
    }

    output
}
