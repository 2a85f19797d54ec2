// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wirecode CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use wirecode::cli::{Reporter, Runner};
use wirecode::io::{self, PathMode};
use wirecode::{Point, WireConfig};

#[derive(Parser)]
#[command(name = "wirecode")]
#[command(about = "Wirecode - rebuild CAD wires from loose edges as CadQuery code", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./wirecode.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert edge documents (files or directories) to wire code
    Convert {
        /// Input edge document(s)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (single input) or directory (several inputs)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Chordal deviation for curve sampling
        #[arg(long)]
        deflection: Option<f64>,

        /// Join tolerance for same-type edges
        #[arg(long)]
        join_tolerance: Option<f64>,

        /// Write quality reports as JSON
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Generate pipe sweep code along a list of points
    Sweep {
        /// JSON file holding an array of [x, y, z] points
        points: PathBuf,

        /// Path interpolation (polyline, spline)
        #[arg(short, long, default_value = "spline")]
        mode: PathMode,

        /// Pipe radius
        #[arg(short, long, default_value = "1.0")]
        radius: f64,
    },

    /// Print the effective configuration as TOML
    Config,

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Convert {
            inputs,
            output,
            deflection,
            join_tolerance,
            report,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(d) = deflection {
                config.deflection = *d;
            }
            if let Some(t) = join_tolerance {
                config.join_tolerance = *t;
            }
            config.validate()?;
            convert_command(inputs, output.as_deref(), report.as_deref(), config, cli.verbose)?;
        }
        Commands::Sweep {
            points,
            mode,
            radius,
        } => {
            sweep_command(points, *mode, *radius)?;
        }
        Commands::Config => {
            let config = load_config(cli.config.as_deref())?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        Commands::Version => {
            println!("Wirecode v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<WireConfig> {
    match path {
        Some(path) => WireConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => WireConfig::load().context("Failed to load configuration"),
    }
}

fn convert_command(
    inputs: &[PathBuf],
    output: Option<&Path>,
    report_path: Option<&Path>,
    config: WireConfig,
    verbose: bool,
) -> Result<()> {
    let files = Runner::collect_inputs(inputs);
    if files.is_empty() {
        Reporter::report_error("No edge documents found");
        std::process::exit(1);
    }

    let results = Runner::new(config).convert_all(&files);
    let mut failed = 0;
    let mut reports = serde_json::Map::new();

    for result in &results {
        let name = result.input.display().to_string();
        let conversion = match &result.conversion {
            Ok(conversion) => conversion,
            Err(e) => {
                Reporter::report_error(&format!("{}: {:#}", name, e));
                failed += 1;
                continue;
            }
        };

        if verbose {
            Reporter::report_conversion(&name, &conversion.reports, result.duration);
        } else if !conversion.is_complete() {
            for report in &conversion.reports {
                for warning in report.warnings() {
                    Reporter::report_warning(&format!("{}: {}", name, warning));
                }
            }
        }

        match output {
            Some(out) => {
                let batch = results.len() > 1;
                if batch {
                    std::fs::create_dir_all(out)?;
                }
                let target = Runner::output_target(&result.input, out, batch);
                std::fs::write(&target, &conversion.code)
                    .with_context(|| format!("Failed to write {}", target.display()))?;
                if verbose {
                    Reporter::success(&format!("{} -> {}", name, target.display()));
                }
            }
            None => println!("{}", conversion.code),
        }

        reports.insert(name, serde_json::to_value(&conversion.reports)?);
    }

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&reports)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
    }

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn sweep_command(points_path: &Path, mode: PathMode, radius: f64) -> Result<()> {
    let source = std::fs::read_to_string(points_path)
        .with_context(|| format!("Failed to read points file: {}", points_path.display()))?;
    let raw: Vec<[f64; 3]> = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse points file: {}", points_path.display()))?;
    let points: Vec<Point> = raw.into_iter().map(Point::from).collect();

    let code = io::format_sweep(&points, mode, radius)?;
    print!("{}", code);
    Ok(())
}
