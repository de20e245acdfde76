// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! CLI output reporter with colored formatting

use super::batch::BatchReport;
use crate::metrics::{PerTriangleMetrics, RelativeEdgeLengths};
use crate::QualityReport;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Print the full quality report of one mesh
    pub fn report_quality(
        file: &str,
        report: &QualityReport,
        legacy: bool,
        rows: usize,
        duration: Duration,
    ) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Mesh:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        if report.aggregate.has_zero_edge {
            Self::report_warning("mesh contains zero-length edges");
        }
        if report.aggregate.has_zero_area {
            Self::report_warning("mesh contains zero-area triangles");
        }

        println!("\n{}", "Statistics:".bold());
        let stats = if legacy {
            Self::format_aggregate(report.legacy.named())
        } else {
            Self::format_aggregate(report.aggregate.named())
        };
        print!("{}", stats);

        println!("\n{}", "Per triangle:".bold());
        print!("{}", Self::format_triangle_table(&report.per_triangle, rows));

        println!("\n{}", "Relative edge lengths:".bold());
        print!("{}", Self::format_edges(&report.edge_lengths, rows));

        println!(
            "\n  {} {}",
            "Took".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Print how a batch went
    pub fn report_batch(report: &BatchReport, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Evaluated:".bright_black(),
            report.rows.len().to_string().cyan()
        );
        println!(
            "  {} {}",
            "Skipped (no triangles):".bright_black(),
            report.skipped.len().to_string().yellow()
        );
        println!(
            "  {} {}",
            "Failed:".bright_black(),
            report.failures.len().to_string().red()
        );
        for failure in &report.failures {
            println!("    {} {}", failure.mesh_file.red(), failure.error.bright_black());
        }
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// One `name: value` line per statistic
    pub fn format_aggregate<'a>(named: impl Iterator<Item = (&'a str, f64)>) -> String {
        named
            .map(|(name, value)| format!("{}: {}\n", name, value))
            .collect()
    }

    /// Column header, then at most `rows` rows; a row of `...` marks truncation
    pub fn format_triangle_table(table: &PerTriangleMetrics, rows: usize) -> String {
        let mut out = PerTriangleMetrics::NAMES.join(", ");
        out.push('\n');
        for row in table.iter().take(rows) {
            let cells: Vec<String> = row.to_array().iter().map(|v| v.to_string()).collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
        if table.len() > rows {
            out.push_str(&"...\t".repeat(PerTriangleMetrics::NAMES.len()));
            out.push('\n');
        }
        out
    }

    /// Edge count, then at most `rows` values on one line
    pub fn format_edges(edges: &RelativeEdgeLengths, rows: usize) -> String {
        let shown: Vec<String> = edges.values.iter().take(rows).map(|v| v.to_string()).collect();
        let mut out = format!("{} edges:\n\t{}", edges.len(), shown.join(" "));
        if edges.len() > rows {
            out.push_str(" ...");
        }
        out.push('\n');
        out
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Format duration for display
    pub fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }
}
