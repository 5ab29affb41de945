pub mod constants;

pub use constants::*;

use std::path::{Path, PathBuf};

/// Resolves a CLI path against the repository root. Absolute paths are kept as given.
pub fn resolve_against_root(p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        repo_root().join(p)
    }
}
