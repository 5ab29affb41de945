use std::env;
use std::path::PathBuf;

/// Repository root relative to this crate's manifest.
pub const REPO_ROOT_DEFAULT: &str = "../..";

pub const SUBMITTED_RESULTS_DIR_DEFAULT: &str = "results/submitted";
pub const COMPILED_RESULTS_DIR_DEFAULT: &str = "results/compiled";

pub const CHART_JS_URL_DEFAULT: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.0/dist/chart.umd.min.js";

pub const REPORT_EXTENSION: &str = "html";

/// Root that relative `--input-dir`/`--output-dir` values are resolved against.
///
/// `BENCH_REPORT_ROOT` overrides the location derived from the manifest.
pub fn repo_root() -> PathBuf {
    match env::var_os("BENCH_REPORT_ROOT") {
        Some(root) => PathBuf::from(root),
        None => PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(REPO_ROOT_DEFAULT),
    }
}

pub fn chart_js_url() -> String {
    env::var("BENCH_REPORT_CHART_JS").unwrap_or_else(|_| CHART_JS_URL_DEFAULT.into())
}
