//! Pre-submission checks for a single result file.

use crate::error::LoadError;
use crate::results::{RunSlot, SchemaVersion};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

pub const FILENAME_CONVENTION: &str = "{tool-slug}_{model}_{api-type}_{run-number}_{timestamp}.json";
pub const FILENAME_EXAMPLE: &str = "cursor-v0-43_modelA_REST_run1_20241218T1430.json";

pub const REQUIRED_FIELDS: [&str; 4] = [
    "schema_version",
    "result_data.run_identity.tool_name",
    "result_data.run_identity.target_model",
    "result_data.run_identity.api_style",
];

static FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9-]+_model[AB]_(REST|GraphQL)_run[12]_[0-9]{8}T[0-9]{4}\.json$").unwrap()
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// `None` when the file is not valid JSON.
    pub schema: Option<SchemaVersion>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            writeln!(f, "valid")?;
        } else {
            writeln!(f, "invalid")?;
        }
        if let Some(schema) = self.schema {
            writeln!(f, "schema: {}", schema.as_str())?;
        }
        for e in &self.errors {
            writeln!(f, "error: {e}")?;
        }
        for w in &self.warnings {
            writeln!(f, "warning: {w}")?;
        }
        Ok(())
    }
}

/// Reads and checks one result file. Only an unreadable file is an `Err`; every other
/// problem is recorded in the report.
pub fn validate_result_file(path: &Path) -> Result<ValidationReport, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(validate_document(&filename, &raw))
}

pub fn validate_document(filename: &str, raw: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    let doc: Value = match serde_json::from_str(raw) {
        Ok(doc) => doc,
        Err(e) => {
            report.errors.push(format!("Invalid JSON format: {e}"));
            return report;
        }
    };
    report.schema = Some(SchemaVersion::detect(&doc));

    if !FILENAME_RE.is_match(filename) {
        report.warnings.push(format!(
            "File name does not follow convention: {FILENAME_CONVENTION} (e.g. {FILENAME_EXAMPLE})"
        ));
    }

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| lookup(&doc, field).is_none_or(Value::is_null))
        .collect();
    if !missing.is_empty() {
        report
            .errors
            .push(format!("Missing required fields: {}", missing.join(", ")));
    }

    if let Some(run_number) = lookup(&doc, "result_data.run_identity.run_number")
        && RunSlot::from_run_number(run_number).is_none()
    {
        report.warnings.push(format!(
            "run_number {run_number} is neither 1 nor 2; the result will not be paired"
        ));
    }

    report
}

fn lookup<'a>(doc: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted.split('.').try_fold(doc, |v, key| v.get(key))
}
