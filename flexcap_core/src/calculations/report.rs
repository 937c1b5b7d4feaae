//! # Calculation Report
//!
//! Hand-calculation style summary of one beam at one length: inputs,
//! classification ratios against their limits, the moments and the
//! Clause 13.6.1 branch that governs. Rendered as Markdown.

use serde::{Deserialize, Serialize};

use crate::calculations::moment_capacity::CapacityCheck;
use crate::calculations::section_class::{ClassificationCheck, SectionClass};
use crate::equations::flexure::{AxisMoments, INELASTIC_THRESHOLD};
use crate::equations::registry::Equation;
use crate::materials::steel::SteelSection;
use crate::settings::DesignParameters;
use crate::units::{KiloNewtonMeters, NewtonMeters};

/// Everything shown in a calculation summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcReport {
    pub section: SteelSection,
    pub length: f64,
    pub params: DesignParameters,
    pub classification: ClassificationCheck,
    pub yield_moment: AxisMoments,
    pub plastic_moment: AxisMoments,
    pub capacity: CapacityCheck,
}

impl CalcReport {
    /// Render as Markdown
    pub fn to_markdown(&self) -> String {
        let s = &self.section;
        let p = &self.params;
        let c = &self.classification;
        let cap = &self.capacity;

        let mut out = format!("# Flexural Capacity: {}\n\n", s.name);

        out.push_str("## Inputs\n\n");
        out.push_str("| Parameter | Value |\n|---|---|\n");
        out.push_str(&format!("| Unbraced length L | {} mm |\n", self.length));
        out.push_str(&format!("| Yield strength fy | {} MPa |\n", p.fy));
        out.push_str(&format!("| E / G | {} / {} GPa |\n", p.e, p.g));
        out.push_str(&format!("| ω₂ | {} |\n", p.omega_2));
        out.push_str(&format!("| φ | {} |\n", p.phi));
        out.push_str(&format!(
            "| d, bf, tf, tw | {}, {}, {}, {} mm |\n\n",
            s.d, s.bf, s.tf, s.tw
        ));

        out.push_str(&format!(
            "## Section Classification ({})\n\n",
            Equation::FlangeSlenderness.metadata().reference.citation()
        ));
        out.push_str("| Element | Ratio | Class 1 | Class 2 | Class 3 | Class |\n");
        out.push_str("|---|---|---|---|---|---|\n");
        out.push_str(&element_row("Flange (bf/2)/tf", c.flange_ratio, &c.flange_limits, c.flange_class));
        out.push_str(&element_row("Web (d-2tf)/tw, major", c.web_ratio, &c.web_limits_major, c.web_class_major));
        out.push_str(&element_row("Web (d-2tf)/tw, minor", c.web_ratio, &c.web_limits_minor, c.web_class_minor));
        out.push_str(&format!("\nGoverning: {}\n\n", c.classification));

        out.push_str("## Moments\n\n");
        out.push_str("| | X-X | Y-Y |\n|---|---|---|\n");
        out.push_str(&format!(
            "| My = S·fy | {} | {} |\n",
            kn_m(self.yield_moment.x),
            kn_m(self.yield_moment.y)
        ));
        out.push_str(&format!(
            "| Mp = Z·fy | {} | {} |\n\n",
            kn_m(self.plastic_moment.x),
            kn_m(self.plastic_moment.y)
        ));

        let mu_meta = Equation::ElasticBucklingMoment.metadata();
        out.push_str(&format!("`{}`\n\n", mu_meta.formula_plain));
        out.push_str(&format!("Mu = {}\n\n", kn_m(cap.elastic_buckling_moment)));

        let reference_label = if cap.major_class.reaches_plastic_moment() { "Mp" } else { "My" };
        out.push_str(&format!("## Factored Resistance ({})\n\n", cap.branch));
        out.push_str(&format!(
            "{} = {}, {:.2}·{} = {}, Mu {} {:.2}·{}\n\n",
            reference_label,
            kn_m(cap.reference_moment),
            INELASTIC_THRESHOLD,
            reference_label,
            kn_m(INELASTIC_THRESHOLD * cap.reference_moment),
            if cap.branch.is_elastic() { "≤" } else { ">" },
            INELASTIC_THRESHOLD,
            reference_label
        ));
        out.push_str(&format!("`{}`\n\n", cap.branch.equation().metadata().formula_plain));
        out.push_str(&format!("**Mr = {}**\n", kn_m(cap.factored_resistance)));

        if cap.major_class == SectionClass::Class4 {
            out.push_str("\n> Class 4 section: no effective-section reduction applied.\n");
        }

        out
    }
}

fn element_row(label: &str, ratio: f64, limits: &[f64; 3], class: SectionClass) -> String {
    format!(
        "| {} | {:.2} | {:.2} | {:.2} | {:.2} | {} |\n",
        label,
        ratio,
        limits[0],
        limits[1],
        limits[2],
        class.number()
    )
}

fn kn_m(moment: f64) -> String {
    KiloNewtonMeters::from(NewtonMeters(moment)).to_string()
}
