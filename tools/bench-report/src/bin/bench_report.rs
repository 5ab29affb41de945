#![allow(clippy::disallowed_macros)]

use anyhow::{bail, Result};
use bench_report::context::{chart_js_url, resolve_against_root, COMPILED_RESULTS_DIR_DEFAULT, SUBMITTED_RESULTS_DIR_DEFAULT};
use bench_report::{aggregate, validate_result_file, AggregateOptions};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use env_logger::{Builder, Env};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bench-report", about = "Compile submitted benchmark results into HTML comparison reports")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    aggregate: AggregateArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one comparison report per spec / model / API style (default).
    Aggregate(AggregateArgs),

    /// Check a single result file before submission.
    Validate {
        /// Result JSON file to check.
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
struct AggregateArgs {
    /// Directory of submitted result files, relative to the repository root unless absolute.
    #[arg(long, default_value = SUBMITTED_RESULTS_DIR_DEFAULT)]
    input_dir: PathBuf,

    /// Directory reports are written to; created if missing.
    #[arg(long, default_value = COMPILED_RESULTS_DIR_DEFAULT)]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Aggregate(args)) => cmd_aggregate(args),
        Some(Commands::Validate { file }) => cmd_validate(file),
        None => cmd_aggregate(cli.aggregate),
    }
}

fn cmd_aggregate(args: AggregateArgs) -> Result<()> {
    let opts = AggregateOptions {
        input_dir: resolve_against_root(&args.input_dir),
        output_dir: resolve_against_root(&args.output_dir),
        chart_js_url: chart_js_url(),
        generated_at: Local::now().naive_local(),
    };

    let outcome = aggregate(&opts)?;
    for path in &outcome.reports {
        println!("{}", path.display());
    }
    if !outcome.reports.is_empty() {
        log::info!(
            "{} reports from {} of {} files in {}",
            outcome.reports.len(),
            outcome.files_loaded,
            outcome.files_found,
            opts.output_dir.display()
        );
    }
    Ok(())
}

fn cmd_validate(file: PathBuf) -> Result<()> {
    let report = validate_result_file(&file)?;
    print!("{}: {report}", file.display());
    if !report.is_valid() {
        bail!("{} failed validation", file.display());
    }
    Ok(())
}
