use crate::normalize::{normalize, NormalizedMetrics};
use crate::results::{RawResult, RunSlot, SchemaVersion};
use std::collections::BTreeMap;
use std::fmt;

/// One report is produced per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub spec_reference: String,
    pub target_model: String,
    pub api_style: String,
}

impl GroupKey {
    pub fn report_id(&self) -> String {
        format!(
            "{}-Model{}-{}-Comparison",
            self.spec_reference, self.target_model, self.api_style
        )
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / model {} / {}", self.spec_reference, self.target_model, self.api_style)
    }
}

/// `"{tool_name} {tool_version}"`, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToolKey(String);

impl ToolKey {
    pub fn new(name: &str, version: &str) -> Self {
        ToolKey(format!("{name} {version}").trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two run slots of one tool. A later result for an occupied slot replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct ToolRuns {
    pub run1: Option<RawResult>,
    pub run2: Option<RawResult>,
}

impl ToolRuns {
    pub fn insert(&mut self, slot: RunSlot, result: RawResult) -> Option<RawResult> {
        match slot {
            RunSlot::First => self.run1.replace(result),
            RunSlot::Second => self.run2.replace(result),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Group {
    pub key: GroupKey,
    /// Ordered by tool key.
    pub tools: BTreeMap<ToolKey, ToolRuns>,
}

impl Group {
    fn new(key: GroupKey) -> Self {
        Self {
            key,
            tools: BTreeMap::new(),
        }
    }

    /// Tools with a first run, in tool-key order. Metrics come from run 1 only.
    pub fn instances(&self) -> Vec<ToolInstance<'_>> {
        self.tools
            .iter()
            .filter_map(|(name, runs)| {
                let run1 = runs.run1.as_ref()?;
                Some(ToolInstance {
                    name,
                    metrics: normalize(run1),
                    run1,
                    run2: runs.run2.as_ref(),
                })
            })
            .collect()
    }
}

/// Report view of one tool in a group.
#[derive(Debug, Clone)]
pub struct ToolInstance<'a> {
    pub name: &'a ToolKey,
    pub metrics: NormalizedMetrics,
    pub run1: &'a RawResult,
    // carried for reports that compare runs; not merged into `metrics`
    pub run2: Option<&'a RawResult>,
}

impl ToolInstance<'_> {
    pub fn schema(&self) -> SchemaVersion {
        self.metrics.schema()
    }
}

/// Partitions results by group key, then pairs them by tool and run slot.
///
/// Results without a usable run identity are logged and dropped, as are results whose run
/// number is neither 1 nor 2.
pub fn group_results(results: impl IntoIterator<Item = RawResult>) -> BTreeMap<GroupKey, Group> {
    let mut groups: BTreeMap<GroupKey, Group> = BTreeMap::new();

    for result in results {
        let ri = match result.run_identity() {
            Ok(ri) => ri,
            Err(e) => {
                log::error!("skipping {}: {e}", result.filename);
                continue;
            }
        };

        let key = ri.group_key();
        let tool = ri.tool_key();
        let group = groups.entry(key.clone()).or_insert_with(|| Group::new(key));

        let Some(slot) = ri.run_slot() else {
            log::warn!(
                "{}: run_number {} is neither 1 nor 2; not paired for {tool}",
                result.filename,
                ri.run_number
            );
            continue;
        };

        let filename = result.filename.clone();
        let runs = group.tools.entry(tool.clone()).or_default();
        if let Some(prev) = runs.insert(slot, result) {
            log::debug!("{filename} replaces {} for {tool} ({slot:?})", prev.filename);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn result(file: &str, tool: &str, version: Option<&str>, run: Value, extra: Value) -> RawResult {
        let mut ri = json!({
            "spec_reference": "SPEC-v1.0",
            "target_model": "A",
            "api_style": "REST",
            "tool_name": tool,
            "run_number": run,
        });
        if let Some(v) = version {
            ri["tool_version"] = json!(v);
        }
        RawResult::new(
            file,
            file,
            json!({ "result_data": { "run_identity": ri, "scores": extra } }),
        )
    }

    #[test]
    fn groups_by_spec_model_and_style() {
        let mut other = result("c.json", "Cursor", None, json!(1), json!({}));
        other.document["result_data"]["run_identity"]["api_style"] = json!("GraphQL");

        let groups = group_results(vec![
            result("a.json", "Cursor", None, json!(1), json!({})),
            result("b.json", "Aider", None, json!(1), json!({})),
            other,
        ]);
        assert_eq!(groups.len(), 2);

        let rest = groups.values().find(|g| g.key.api_style == "REST").unwrap();
        let names: Vec<_> = rest.tools.keys().map(ToolKey::as_str).collect();
        assert_eq!(names, ["Aider", "Cursor"]);
        assert_eq!(rest.key.report_id(), "SPEC-v1.0-ModelA-REST-Comparison");
    }

    #[test]
    fn pairs_runs_by_tool_and_version() {
        let groups = group_results(vec![
            result("a.json", "Cursor", Some("0.43"), json!(1), json!({})),
            result("b.json", "Cursor", Some("0.43"), json!(2), json!({})),
            result("c.json", "Cursor", Some("0.44"), json!(1), json!({})),
        ]);
        let group = groups.values().next().unwrap();
        assert_eq!(group.tools.len(), 2);

        let runs = &group.tools[&ToolKey::new("Cursor", "0.43")];
        assert_eq!(runs.run1.as_ref().unwrap().filename, "a.json");
        assert_eq!(runs.run2.as_ref().unwrap().filename, "b.json");
    }

    #[test]
    fn duplicate_slot_is_last_write_wins() {
        let groups = group_results(vec![
            result("a.json", "X", None, json!(1), json!({ "correctness_C": 10 })),
            result("b.json", "X", None, json!(1), json!({ "correctness_C": 90 })),
        ]);
        let group = groups.values().next().unwrap();
        let instances = group.instances();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].run1.filename, "b.json");
        let NormalizedMetrics::Legacy(m) = &instances[0].metrics else {
            panic!("expected legacy metrics");
        };
        assert_eq!(m.correctness.as_number(), Some(90.0));
    }

    #[test]
    fn tool_without_first_run_is_not_an_instance() {
        let groups = group_results(vec![
            result("a.json", "Solo", None, json!(2), json!({})),
            result("b.json", "Pair", None, json!(1), json!({})),
            result("c.json", "Odd", None, json!(3), json!({})),
        ]);
        let group = groups.values().next().unwrap();
        let names: Vec<_> = group.instances().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Pair"]);
        assert!(group.tools.contains_key(&ToolKey::new("Solo", "")));
        assert!(!group.tools.contains_key(&ToolKey::new("Odd", "")));
    }

    #[test]
    fn result_without_identity_is_skipped() {
        let broken = RawResult::new("broken.json", "broken.json", json!({ "result_data": {} }));
        let groups = group_results(vec![broken, result("a.json", "Cursor", None, json!(1), json!({}))]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.values().next().unwrap().tools.len(), 1);
    }
}
