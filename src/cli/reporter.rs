// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::wire::QualityReport;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report the outcome of converting one file
    pub fn report_conversion(file: &str, reports: &[QualityReport], duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "File:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        let complete = reports.iter().all(QualityReport::is_complete);
        if complete {
            println!("{} {}", "✅".green(), "All edges reconstructed".green().bold());
        } else {
            println!("{} {}", "⚠️ ".yellow(), "Output may be incomplete".yellow().bold());
        }

        for (i, report) in reports.iter().enumerate() {
            println!("\n{}", format!("Wire {}:", i).bold());
            Self::print_count("Edges", report.edges_consumed, report.edges_attempted);
            println!(
                "  {} {}",
                "Runs:".bright_black(),
                report.run_count.to_string().cyan()
            );
            println!(
                "  {} {}",
                "Commands:".bright_black(),
                report.command_count.to_string().cyan()
            );
            if report.degenerate_segments > 0 {
                println!(
                    "  {} {}",
                    "Degenerate segments:".bright_black(),
                    report.degenerate_segments.to_string().yellow()
                );
            }
            for warning in report.warnings() {
                println!("  {} {}", "⚠".yellow(), warning.yellow());
            }
        }

        println!(
            "\n  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        eprintln!("{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn print_count(name: &str, consumed: usize, attempted: usize) {
        let value = format!("{}/{}", consumed, attempted);
        let value = if consumed == attempted {
            value.green()
        } else {
            value.red()
        };
        println!("  {} {}", format!("{}:", name).bright_black(), value);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
