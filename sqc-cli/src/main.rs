//! sqc-cli — analyze a CSV measurement series against the control-chart
//! run-rule catalog.
//!
//! Commands:
//! - `analyze` — run the engine over a single series, print labels
//! - `batch` — run the engine independently over every column of a
//!   wide-format CSV, optionally fanning the calls out across `rayon`
//!
//! All I/O, statistics computation, and config loading live here; the
//! engine itself (`sqc-core`) never touches a file handle.

mod config;
mod ingest;
mod report;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use rayon::prelude::*;

use config::AnalysisConfig;
use sqc_core::{analyze, default_catalog, Rule};

#[derive(Parser, Debug)]
#[command(name = "sqc", version, about = "Control-chart run-rule engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a single measurement series.
    Analyze(AnalyzeArgs),
    /// Analyze every column of a wide-format CSV as an independent series.
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Path to the input CSV.
    input: PathBuf,

    /// Column name to read (headered CSV). Omit to use the first column.
    #[arg(long)]
    column: Option<String>,

    /// Override the series mean instead of computing it.
    #[arg(long)]
    mean: Option<f64>,

    /// Override the series stdev instead of computing it.
    #[arg(long)]
    stdev: Option<f64>,

    /// Comma-separated subset of rule ids to run (default: all).
    #[arg(long, value_delimiter = ',')]
    rules: Option<Vec<i32>>,

    /// Optional TOML config file; CLI flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit JSON instead of CSV.
    #[arg(long)]
    json: bool,

    /// Write output to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Path to the input CSV; each column is an independent series.
    input: PathBuf,

    /// Comma-separated subset of rule ids to run (default: all).
    #[arg(long, value_delimiter = ',')]
    rules: Option<Vec<i32>>,

    /// Optional TOML config file; CLI flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit JSON instead of CSV.
    #[arg(long)]
    json: bool,

    /// Write output to this directory instead of stdout (one file per
    /// column, named `<column>.csv`/`<column>.json`).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Fan per-column `analyze` calls out across rayon's global pool.
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Batch(args) => run_batch(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::load(path),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Build the rule subset (ids override file config override default: all
/// four), preserving catalog order.
fn build_catalog(config_rules: &Option<Vec<i32>>, flag_rules: &Option<Vec<i32>>) -> Result<Vec<Rule>> {
    let selected = flag_rules.as_ref().or(config_rules.as_ref());
    let full = default_catalog();
    match selected {
        None => Ok(full),
        Some(ids) => {
            let subset: Vec<Rule> = full.into_iter().filter(|r| ids.contains(&r.id)).collect();
            for id in ids {
                if !subset.iter().any(|r| r.id == *id) {
                    anyhow::bail!("unknown rule id {id} in --rules");
                }
            }
            Ok(subset)
        }
    }
}

fn resolve_stats(
    series: &[f64],
    config: &AnalysisConfig,
    flag_mean: Option<f64>,
    flag_stdev: Option<f64>,
) -> Result<(f64, f64)> {
    let mean = flag_mean.or(config.mean);
    let stdev = flag_stdev.or(config.stdev);
    match (mean, stdev) {
        (Some(mean), Some(stdev)) => Ok((mean, stdev)),
        _ => {
            let (computed_mean, computed_stdev) = ingest::sample_stats(series)?;
            Ok((mean.unwrap_or(computed_mean), stdev.unwrap_or(computed_stdev)))
        }
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let series = ingest::read_series(&args.input, args.column.as_deref())
        .with_context(|| format!("loading series from {}", args.input.display()))?;
    info!("loaded {} samples from {}", series.len(), args.input.display());

    let (mean, stdev) = resolve_stats(&series, &config, args.mean, args.stdev)?;
    debug!("using mean={mean}, stdev={stdev}");

    let catalog = build_catalog(&config.rules, &args.rules)?;
    info!("running {} rule(s)", catalog.len());

    let labels = analyze(&series, mean, stdev, &catalog)
        .map_err(|e| anyhow::anyhow!("analysis failed: {e}"))?;

    write_output(&series, &labels, args.json, args.output.as_ref())
}

fn analyze_one_column(
    name: &str,
    series: &[f64],
    catalog: &[Rule],
    config: &AnalysisConfig,
) -> Result<Vec<i32>> {
    let (mean, stdev) = resolve_stats(series, config, None, None)?;
    analyze(series, mean, stdev, catalog).map_err(|e| anyhow::anyhow!("{name}: analysis failed: {e}"))
}

fn run_batch(args: BatchArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let columns = ingest::read_batch(&args.input)
        .with_context(|| format!("loading batch series from {}", args.input.display()))?;
    info!("loaded {} series from {}", columns.len(), args.input.display());

    let catalog = build_catalog(&config.rules, &args.rules)?;

    let results: Vec<(String, Vec<f64>, Result<Vec<i32>>)> = if args.parallel {
        info!("fanning {} series across the rayon pool", columns.len());
        columns
            .into_par_iter()
            .map(|(name, series)| {
                let labels = analyze_one_column(&name, &series, &catalog, &config);
                (name, series, labels)
            })
            .collect()
    } else {
        columns
            .into_iter()
            .map(|(name, series)| {
                let labels = analyze_one_column(&name, &series, &catalog, &config);
                (name, series, labels)
            })
            .collect()
    };

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }

    for (name, series, labels) in results {
        let labels = labels?;
        match &args.output_dir {
            Some(dir) => {
                let ext = if args.json { "json" } else { "csv" };
                let path = dir.join(format!("{name}.{ext}"));
                let file = File::create(&path)
                    .with_context(|| format!("creating output file {}", path.display()))?;
                write_to(file, &series, &labels, args.json)?;
            }
            None => {
                println!("# {name}");
                write_to(io::stdout(), &series, &labels, args.json)?;
            }
        }
    }

    Ok(())
}

fn write_output(series: &[f64], labels: &[i32], json: bool, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            write_to(file, series, labels, json)
        }
        None => write_to(io::stdout(), series, labels, json),
    }
}

fn write_to<W: Write>(writer: W, series: &[f64], labels: &[i32], json: bool) -> Result<()> {
    if json {
        report::write_json(writer, series, labels)
    } else {
        report::write_csv(writer, series, labels)
    }
}
