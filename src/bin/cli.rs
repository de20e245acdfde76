// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Trimetric CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use trimetric::cli::{discover_meshes, evaluate_batch, Reporter};
use trimetric::config::normalize_extension;
use trimetric::{evaluate, load_mesh, MetricsConfig};

#[derive(Parser)]
#[command(name = "trimetric")]
#[command(about = "Triangle mesh quality metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Mesh file to report on
    #[arg(short = 'i', value_name = "MESH")]
    input: Option<PathBuf>,

    /// Config file (default: ./trimetric.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print statistics, per-triangle table and edge lengths of one mesh
    Report {
        mesh: PathBuf,

        /// Pool all angles into one min/max/avg (16 statistics)
        #[arg(long)]
        legacy: bool,

        /// Table rows to print before truncating
        #[arg(long)]
        rows: Option<usize>,

        /// Also write the full report as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,
    },

    /// Evaluate every mesh below a directory into one CSV
    Batch {
        /// Mesh file or directory
        path: PathBuf,

        /// Output CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worker threads
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Mesh file extension to search for
        #[arg(long)]
        extension: Option<String>,

        #[arg(long)]
        legacy: bool,
    },

    /// Write sorted per-sample distributions of one mesh as JSON
    Detail {
        mesh: PathBuf,

        /// Output JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List metric names in output order
    Names {
        #[arg(long)]
        legacy: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        Reporter::report_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(if cli.verbose { "debug" } else { config.log_level.as_str() });

    match cli.command {
        Some(Commands::Report {
            mesh,
            legacy,
            rows,
            json,
        }) => report_command(
            &mesh,
            legacy || config.legacy,
            rows.unwrap_or(config.table_rows),
            json.as_deref(),
        ),
        Some(Commands::Batch {
            path,
            output,
            jobs,
            extension,
            legacy,
        }) => {
            let extension = extension
                .map(|e| normalize_extension(&e))
                .unwrap_or_else(|| config.extension.clone());
            batch_command(
                &path,
                &output.unwrap_or_else(|| config.output.clone()),
                jobs.or(config.jobs),
                &extension,
                legacy || config.legacy,
            )
        }
        Some(Commands::Detail { mesh, output }) => detail_command(
            &mesh,
            &output.unwrap_or_else(|| config.output.with_extension("json")),
        ),
        Some(Commands::Names { legacy }) => {
            for name in trimetric::metrics::metric_names(legacy || config.legacy) {
                println!("{}", name);
            }
            Ok(())
        }
        Some(Commands::Version) => {
            println!("Trimetric v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => match cli.input {
            Some(input) => report_command(&input, config.legacy, config.table_rows, None),
            None => {
                eprintln!("Error: Input mesh required");
                eprintln!("Usage: trimetric -i <MESH>");
                std::process::exit(2);
            }
        },
    }
}

fn load_config(path: Option<&Path>) -> Result<MetricsConfig> {
    match path {
        Some(path) => {
            let mut config = MetricsConfig::from_file(path)?;
            config.apply_env(|key| std::env::var(key).ok());
            Ok(config)
        }
        None => MetricsConfig::load(),
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn report_command(mesh_path: &Path, legacy: bool, rows: usize, json: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    let mesh = load_mesh(mesh_path)
        .with_context(|| format!("Failed to load mesh: {}", mesh_path.display()))?;
    let report = evaluate(&mesh)?;
    let duration = start.elapsed();

    Reporter::report_quality(
        &mesh_path.display().to_string(),
        &report,
        legacy,
        rows,
        duration,
    );

    if let Some(json_path) = json {
        let content = serde_json::to_string_pretty(&report)?;
        std::fs::write(json_path, content)
            .with_context(|| format!("Failed to write JSON: {}", json_path.display()))?;
        Reporter::success(&format!("Saved report to {}", json_path.display()));
    }

    Ok(())
}

fn batch_command(
    root: &Path,
    output: &Path,
    jobs: Option<usize>,
    extension: &str,
    legacy: bool,
) -> Result<()> {
    let start = Instant::now();
    let files = discover_meshes(root, extension)?;
    Reporter::report_info(&format!("Found {} mesh files", files.len()));

    let report = evaluate_batch(&files, jobs, legacy)?;
    report.write_csv(output)?;

    Reporter::report_batch(&report, start.elapsed());
    Reporter::success(&format!("Saved results to {}", output.display()));
    Ok(())
}

fn detail_command(mesh_path: &Path, output: &Path) -> Result<()> {
    let mesh = load_mesh(mesh_path)
        .with_context(|| format!("Failed to load mesh: {}", mesh_path.display()))?;

    for (name, value) in mesh.aggregate_metrics()?.named() {
        println!("{}: {}", name, value);
    }

    let distributions = mesh.distributions()?;
    let content = serde_json::to_string_pretty(&distributions)?;
    std::fs::write(output, content)
        .with_context(|| format!("Failed to write JSON: {}", output.display()))?;
    Reporter::success(&format!("Saved distributions to {}", output.display()));
    Ok(())
}
