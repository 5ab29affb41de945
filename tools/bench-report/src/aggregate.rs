use crate::error::AggregateError;
use crate::group::group_results;
use crate::report::{render_report, unique_report_file_name, ReportInput};
use crate::results::{list_result_files, load_results, write_report};
use crate::summary::summarize;
use anyhow::Context;
use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub chart_js_url: String,
    pub generated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateOutcome {
    pub files_found: usize,
    pub files_loaded: usize,
    /// Written reports, in group-key order.
    pub reports: Vec<PathBuf>,
}

/// Loads every result file in the input directory and writes one report per group.
pub fn aggregate(opts: &AggregateOptions) -> Result<AggregateOutcome, AggregateError> {
    if !opts.input_dir.is_dir() {
        return Err(AggregateError::InputDirMissing(opts.input_dir.clone()));
    }
    ensure_dir(&opts.output_dir)?;

    let files = list_result_files(&opts.input_dir)?;
    let mut outcome = AggregateOutcome {
        files_found: files.len(),
        ..Default::default()
    };
    if files.is_empty() {
        log::info!("no result files in {}", opts.input_dir.display());
        return Ok(outcome);
    }
    log::info!("found {} result files in {}", files.len(), opts.input_dir.display());

    let results = load_results(&files);
    outcome.files_loaded = results.len();
    if results.is_empty() {
        log::warn!("no valid results to process");
        return Ok(outcome);
    }

    let groups = group_results(results);
    log::info!("grouped into {} comparison groups", groups.len());

    let mut taken = HashSet::new();
    for group in groups.values() {
        let tools = group.instances();
        let summary = summarize(&tools);
        let html = render_report(&ReportInput {
            key: &group.key,
            tools: &tools,
            summary: &summary,
            generated_at: opts.generated_at,
            chart_js_url: &opts.chart_js_url,
        });
        let file_name = unique_report_file_name(&group.key, &mut taken);
        let path = write_report(&opts.output_dir, &file_name, &html)?;
        log::info!("generated {} ({} tools)", path.display(), tools.len());
        outcome.reports.push(path);
    }

    Ok(outcome)
}

fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))
}
