//! # Flexcap CLI Application
//!
//! Command-line driver for the steel beam moment capacity engine: list and
//! inspect sections, compute the capacity of one beam, or sweep capacity
//! over a range of unbraced lengths as CSV.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use flexcap_core::calculations::{MomentResult, SteelBeam};
use flexcap_core::equations::generate_equations_markdown;
use flexcap_core::materials::{SectionDb, SectionProvider};
use flexcap_core::units::{KiloNewtonMeters, NewtonMeters, UnitSystem};
use flexcap_core::{CalcError, DesignParameters, SweepSettings};

/// Flexcap - factored moment resistance of laterally unsupported W-shapes (CSA S16)
#[derive(Parser, Debug)]
#[command(name = "flexcap", version)]
#[command(after_help = "\
Examples:
  flexcap list --prefix W150                      Sections starting with W150
  flexcap show W150X22.5                          Section properties as JSON
  flexcap capacity W150X22.5 --length 12000       Capacity at L = 12 m
  flexcap capacity W130X23.8 -l 4000 -f markdown  Calculation summary
  flexcap sweep W150X22.5 W130X23.8 > curve.csv   Capacity vs. length
  flexcap equations -o EQUATIONS.md               Formula reference")]
struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    log_level: String,

    /// SI section table (CSV) to use instead of the builtin tables
    #[arg(long, global = true)]
    sections: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Design parameter overrides shared by `capacity` and `sweep`
#[derive(clap::Args, Debug)]
struct ParamArgs {
    /// JSON parameter file; flags below override its values
    #[arg(long)]
    params: Option<PathBuf>,

    /// Yield strength fy (MPa)
    #[arg(long)]
    fy: Option<f64>,

    /// Equivalent moment factor ω₂ (1.0 to 2.5)
    #[arg(long)]
    omega2: Option<f64>,

    /// Elastic modulus E (GPa)
    #[arg(long)]
    e: Option<f64>,

    /// Shear modulus G (GPa)
    #[arg(long)]
    g: Option<f64>,

    /// Resistance factor φ
    #[arg(long)]
    phi: Option<f64>,
}

impl ParamArgs {
    fn resolve(&self) -> Result<DesignParameters> {
        let mut params = match &self.params {
            Some(path) => DesignParameters::from_json_file(path)
                .with_context(|| format!("loading parameters from {}", path.display()))?,
            None => DesignParameters::default(),
        };
        if let Some(fy) = self.fy {
            params.fy = fy;
        }
        if let Some(omega_2) = self.omega2 {
            params.omega_2 = omega_2;
        }
        if let Some(e) = self.e {
            params.e = e;
        }
        if let Some(g) = self.g {
            params.g = g;
        }
        if let Some(phi) = self.phi {
            params.phi = phi;
        }
        params.validate()?;
        Ok(params)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List section designations
    List {
        /// Unit system of the table (si, us)
        #[arg(long, short = 'u', default_value = "si")]
        units: UnitSystem,

        /// Only names starting with this prefix (case-insensitive)
        #[arg(long, short = 'p')]
        prefix: Option<String>,
    },

    /// Print one section's properties as JSON
    Show {
        /// Section designation, e.g. W150X22.5
        section: String,

        /// Unit system of the table (si, us)
        #[arg(long, short = 'u', default_value = "si")]
        units: UnitSystem,
    },

    /// Factored moment resistance of one beam
    Capacity {
        /// Section designation (SI table)
        section: String,

        /// Unbraced length L (mm)
        #[arg(long, short = 'l')]
        length: f64,

        #[command(flatten)]
        params: ParamArgs,

        /// Output format: text, json, markdown
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "markdown"])]
        format: String,
    },

    /// Capacity versus unbraced length as CSV
    Sweep {
        /// One or more section designations (SI table)
        #[arg(required = true, value_name = "SECTION")]
        names: Vec<String>,

        /// First length (mm)
        #[arg(long)]
        min: Option<f64>,

        /// Upper bound, exclusive (mm)
        #[arg(long)]
        max: Option<f64>,

        /// Length increment (mm)
        #[arg(long)]
        step: Option<f64>,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Markdown reference of every equation with its clause
    Equations {
        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(json) = error_json(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let db = load_sections(cli.sections.as_deref())?;

    match cli.command {
        Commands::List { units, prefix } => {
            let names: Vec<&str> = match &prefix {
                Some(prefix) => db.search(prefix, units).into_iter().map(|r| r.section.as_str()).collect(),
                None => db.names(units),
            };
            if names.is_empty() {
                bail!("no {} sections found", units);
            }
            for name in names {
                println!("{}", name);
            }
        }

        Commands::Show { section, units } => {
            let record = db.lookup(&section, units)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Commands::Capacity {
            section,
            length,
            params,
            format,
        } => {
            let params = params.resolve()?;
            let beam = SteelBeam::from_section(&db, &section, length, params)?;
            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&beam.moment_result()?)?),
                "markdown" => print!("{}", beam.report()?),
                _ => print_capacity(&beam.moment_result()?)?,
            }
        }

        Commands::Sweep {
            names,
            min,
            max,
            step,
            params,
        } => {
            let params = params.resolve()?;
            let defaults = SweepSettings::default();
            let sweep = SweepSettings {
                min_length: min.unwrap_or(defaults.min_length),
                max_length: max.unwrap_or(defaults.max_length),
                step: step.unwrap_or(defaults.step),
            };
            print!("{}", sweep_csv(&db, &names, params, &sweep)?);
        }

        Commands::Equations { output } => {
            let markdown = generate_equations_markdown();
            match output {
                Some(path) => {
                    fs::write(&path, &markdown).with_context(|| format!("writing {}", path.display()))?;
                    info!("wrote {} bytes to {}", markdown.len(), path.display());
                }
                None => print!("{}", markdown),
            }
        }
    }

    Ok(())
}

fn load_sections(path: Option<&Path>) -> Result<SectionDb> {
    let db = match path {
        Some(path) => SectionDb::load_from_csv(path, UnitSystem::Si)
            .with_context(|| format!("loading sections from {}", path.display()))?,
        None => SectionDb::builtin()?,
    };
    info!("{} sections loaded", db.len());
    Ok(db)
}

fn print_capacity(result: &MomentResult) -> Result<()> {
    println!("═══════════════════════════════════════");
    println!("  {} at L = {} mm", result.section, result.length);
    println!("═══════════════════════════════════════");
    println!();
    println!("Section class:  {}", result.section_class);
    println!("My (x, y):      {}, {}", kn_m(result.yield_moment_x), kn_m(result.yield_moment_y));
    println!("Mp (x, y):      {}, {}", kn_m(result.plastic_moment_x), kn_m(result.plastic_moment_y));
    println!("Mu:             {}", kn_m(result.elastic_buckling_moment));
    println!();
    println!("═══════════════════════════════════════");
    println!("  Mr = {} ({})", kn_m(result.factored_capacity), result.branch);
    println!("═══════════════════════════════════════");
    println!();
    println!("JSON Output:");
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

/// Structured form of a calculation error, if the failure came from the core
fn error_json(error: &anyhow::Error) -> Option<String> {
    let calc_error = error.downcast_ref::<CalcError>()?;
    serde_json::to_string_pretty(calc_error).ok()
}

/// One `length,<section>...` header, then one row per length with a column per section
fn sweep_csv(db: &SectionDb, sections: &[String], params: DesignParameters, sweep: &SweepSettings) -> Result<String> {
    let lengths = sweep.lengths()?;
    let mut curves = Vec::with_capacity(sections.len());
    for name in sections {
        let mut beam = SteelBeam::from_section(db, name, sweep.min_length, params)?;
        let curve = beam
            .capacity_curve(sweep)
            .with_context(|| format!("sweeping {}", name))?;
        curves.push(curve);
    }

    let mut csv = String::new();
    writeln!(csv, "length,{}", sections.join(","))?;
    for (i, length) in lengths.into_iter().enumerate() {
        let row: Vec<String> = curves.iter().map(|curve| curve[i].capacity.to_string()).collect();
        writeln!(csv, "{},{}", length, row.join(","))?;
    }
    Ok(csv)
}

fn kn_m(moment: f64) -> String {
    KiloNewtonMeters::from(NewtonMeters(moment)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use clap::CommandFactory;
    use std::env::temp_dir;

    fn no_overrides() -> ParamArgs {
        ParamArgs {
            params: None,
            fy: None,
            omega2: None,
            e: None,
            g: None,
            phi: None,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_defaults() {
        assert_eq!(no_overrides().resolve().unwrap(), DesignParameters::default());
    }

    #[test]
    fn test_resolve_flags_override_file() {
        let path = temp_dir().join("flexcap_cli_test_params.json");
        DesignParameters {
            fy: 350.0,
            omega_2: 1.3,
            ..Default::default()
        }
        .to_json_file(&path)
        .unwrap();

        let args = ParamArgs {
            params: Some(path.clone()),
            omega2: Some(1.75),
            ..no_overrides()
        };
        let params = args.resolve().unwrap();
        assert_eq!(params.fy, 350.0);
        assert_eq!(params.omega_2, 1.75);
        assert_eq!(params.phi, 0.9);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_resolve_validates_overrides() {
        let args = ParamArgs {
            phi: Some(1.5),
            ..no_overrides()
        };
        let err = args.resolve().unwrap_err();
        let calc_error = err.downcast_ref::<CalcError>().unwrap();
        assert_eq!(calc_error.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_resolve_missing_file() {
        let args = ParamArgs {
            params: Some(temp_dir().join("flexcap_cli_no_such_params.json")),
            ..no_overrides()
        };
        let err = args.resolve().unwrap_err();
        assert!(format!("{:#}", err).contains("loading parameters from"));
    }

    #[test]
    fn test_sweep_csv_layout() {
        let db = SectionDb::builtin().unwrap();
        let names = vec!["W150X22.5".to_string(), "W130X23.8".to_string()];
        let sweep = SweepSettings {
            min_length: 4000.0,
            max_length: 12001.0,
            step: 8000.0,
        };
        let csv = sweep_csv(&db, &names, DesignParameters::default(), &sweep).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "length,W150X22.5,W130X23.8");

        let rows: Vec<Vec<f64>> = lines[1..]
            .iter()
            .map(|line| line.split(',').map(|v| v.parse().unwrap()).collect())
            .collect();
        assert_eq!(rows[0][0], 4000.0);
        assert_relative_eq!(rows[0][1], 40172.079638835596, max_relative = 1e-9);
        assert_relative_eq!(rows[0][2], 40413.83430560689, max_relative = 1e-9);
        assert_eq!(rows[1][0], 12000.0);
        assert_relative_eq!(rows[1][1], 12305.669663153298, max_relative = 1e-9);
        assert_relative_eq!(rows[1][2], 14798.840052909407, max_relative = 1e-9);
    }

    #[test]
    fn test_sweep_csv_rejects_dense_sweep() {
        let db = SectionDb::builtin().unwrap();
        let sweep = SweepSettings {
            min_length: 1.0,
            max_length: 2.0,
            step: 1e-9,
        };
        let err = sweep_csv(&db, &["W150X22.5".to_string()], DesignParameters::default(), &sweep).unwrap_err();
        assert_eq!(err.downcast_ref::<CalcError>().unwrap().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unknown_section_reports_error_json() {
        let cli = Cli::try_parse_from(["flexcap", "capacity", "W999X1", "--length", "1000"]).unwrap();
        let err = run(cli).unwrap_err();

        let json = error_json(&err).unwrap();
        assert!(json.contains("\"type\": \"SectionNotFound\""));
        assert!(json.contains("W999X1"));
    }

    #[test]
    fn test_error_json_through_context() {
        let missing = temp_dir().join("flexcap_cli_no_such_sections.csv");
        let cli = Cli::try_parse_from(["flexcap", "--sections", missing.to_str().unwrap(), "list"]).unwrap();
        let err = run(cli).unwrap_err();
        assert!(format!("{:#}", err).contains("loading sections from"));
        assert!(error_json(&err).unwrap().contains("FileError"));

        let cli = Cli::try_parse_from(["flexcap", "capacity", "W150X22.5", "--length", "1000", "--fy=-345"]).unwrap();
        let err = run(cli).unwrap_err();
        assert!(error_json(&err).unwrap().contains("InvalidInput"));

        let plain = anyhow::anyhow!("no si sections found");
        assert!(error_json(&plain).is_none());
    }
}
