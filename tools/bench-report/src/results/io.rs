use super::schema::RawResult;
use crate::error::LoadError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// `*.json` files directly inside `dir`, ordered by file name.
///
/// The order decides which file wins when two results claim the same run slot.
pub fn list_result_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("read_dir {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    out.sort();
    Ok(out)
}

pub fn parse_result_file(path: &Path) -> Result<RawResult, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&raw).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(RawResult::new(filename, path, document))
}

/// Parses every file, logging and skipping the ones that fail.
pub fn load_results(files: &[PathBuf]) -> Vec<RawResult> {
    files
        .iter()
        .filter_map(|p| match parse_result_file(p) {
            Ok(r) => {
                log::debug!("loaded {} (schema {})", r.filename, r.schema.as_str());
                Some(r)
            }
            Err(e) => {
                log::error!("{e}");
                None
            }
        })
        .collect()
}

pub fn write_report(output_dir: &Path, file_name: &str, html: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).with_context(|| format!("create dir {}", output_dir.display()))?;
    let path = output_dir.join(file_name);
    let tmp = path.with_extension("html.tmp");
    fs::write(&tmp, html).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, &path).with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(path)
}
