//! Self-contained HTML comparison report for one group.

pub mod band;
pub mod charts;
pub mod html;

pub use band::{score_class, ScoreBand};
pub use html::{render_report, ReportInput};

use crate::context::REPORT_EXTENSION;
use crate::group::GroupKey;
use std::collections::HashSet;

/// Output file name for a group: the percent-encoded report id.
///
/// The encoding is reversible, so distinct report ids never share a file name. Ids made of
/// unreserved characters (`SPEC-v1.0-ModelA-REST-Comparison`) are kept as they are.
pub fn report_file_name(key: &GroupKey) -> String {
    format!("{}.{REPORT_EXTENSION}", urlencoding::encode(&key.report_id()))
}

/// [`report_file_name`], suffixed with `-2`, `-3`, ... when an earlier group of the same run
/// already took that name.
///
/// Distinct keys can still concatenate to the same report id
/// (`"A-ModelB" / "C"` and `"A" / "B-ModelC"`). Report ids always end in `-Comparison`, so a
/// suffixed name never equals an unsuffixed one.
pub fn unique_report_file_name(key: &GroupKey, taken: &mut HashSet<String>) -> String {
    let name = report_file_name(key);
    if taken.insert(name.clone()) {
        return name;
    }

    let stem = urlencoding::encode(&key.report_id()).into_owned();
    let mut n = 2;
    loop {
        let candidate = format!("{stem}-{n}.{REPORT_EXTENSION}");
        if taken.insert(candidate.clone()) {
            log::warn!("report id {} is shared by another group; writing {candidate}", key.report_id());
            return candidate;
        }
        n += 1;
    }
}
