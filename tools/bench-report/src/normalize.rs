//! Schema-independent view of a result document's metrics.
//!
//! Absent fields stay absent ([`Metric`] wraps an `Option`); the "N/A" / "Unknown"
//! placeholders only appear when a metric is rendered.

use crate::results::{scalar_text, RawResult, SchemaVersion};
use serde_json::Value;

/// Placeholder for missing timings.
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder for missing scores and model names.
pub const UNKNOWN: &str = "Unknown";

/// A single extracted value. `None` when the document did not carry it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metric(Option<Value>);

impl Metric {
    pub fn absent() -> Self {
        Metric(None)
    }

    pub fn new(v: Value) -> Self {
        match v {
            Value::Null => Metric(None),
            v => Metric(Some(v)),
        }
    }

    fn field(obj: Option<&Value>, key: &str) -> Self {
        Metric::new(obj.and_then(|o| o.get(key)).cloned().unwrap_or(Value::Null))
    }

    /// Only JSON numbers count; numeric-looking strings do not.
    pub fn as_number(&self) -> Option<f64> {
        match &self.0 {
            Some(Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    /// Value plotted for this metric: the number itself, or zero.
    pub fn chart_value(&self) -> Value {
        match &self.0 {
            Some(v @ Value::Number(_)) => v.clone(),
            _ => Value::from(0),
        }
    }

    pub fn display_or(&self, placeholder: &str) -> String {
        match &self.0 {
            Some(v) => scalar_text(v).into_owned(),
            None => placeholder.to_string(),
        }
    }
}

/// Schema v1 (`result_data.metrics` + `result_data.scores`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyMetrics {
    pub api_time: Metric,
    pub total_time: Metric,
    /// v1 documents never record UI timing.
    pub ui_time: Metric,
    /// v1 documents never record the model.
    pub llm_model: Metric,
    pub correctness: Metric,
    pub reproducibility: Metric,
    pub determinism: Metric,
    pub effort: Metric,
    pub speed: Metric,
    pub contract_quality: Metric,
    pub overreach_penalty: Metric,
    pub overall: Metric,
}

/// `implementations.api` of a v2 document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiMetrics {
    pub time: Metric,
    pub llm_model: Metric,
    pub correctness: Metric,
    pub reproducibility: Metric,
    pub determinism: Metric,
    pub effort: Metric,
    pub speed: Metric,
    pub contract_quality: Metric,
    pub overreach_penalty: Metric,
    pub overall: Metric,
}

/// `implementations.ui` of a v2 document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiMetrics {
    pub time: Metric,
    pub llm_model: Metric,
    pub correctness: Metric,
    pub integration: Metric,
    pub ux_quality: Metric,
    pub speed: Metric,
    pub overall: Metric,
    pub backend_changes: bool,
}

/// Schema v2. Each bag is `None` iff its key is missing from `implementations`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModernMetrics {
    pub api: Option<ApiMetrics>,
    pub ui: Option<UiMetrics>,
}

impl ModernMetrics {
    /// Key presence, not field presence: `"ui": {}` counts.
    pub fn has_ui(&self) -> bool {
        self.ui.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedMetrics {
    Legacy(LegacyMetrics),
    Modern(ModernMetrics),
}

impl NormalizedMetrics {
    pub fn schema(&self) -> SchemaVersion {
        match self {
            NormalizedMetrics::Legacy(_) => SchemaVersion::V1,
            NormalizedMetrics::Modern(_) => SchemaVersion::V2,
        }
    }

    pub fn has_ui(&self) -> bool {
        match self {
            NormalizedMetrics::Legacy(_) => false,
            NormalizedMetrics::Modern(m) => m.has_ui(),
        }
    }

    /// v2 `api.time` or v1 `api_time`; absent when a v2 document has no `api` key.
    pub fn api_time(&self) -> Metric {
        match self {
            NormalizedMetrics::Legacy(m) => m.api_time.clone(),
            NormalizedMetrics::Modern(m) => m.api.as_ref().map(|a| a.time.clone()).unwrap_or_default(),
        }
    }
}

pub fn normalize(result: &RawResult) -> NormalizedMetrics {
    let rd = result.result_data();
    match result.schema {
        SchemaVersion::V1 => NormalizedMetrics::Legacy(extract_metrics_v1(rd)),
        SchemaVersion::V2 => NormalizedMetrics::Modern(extract_metrics_v2(rd)),
    }
}

fn extract_metrics_v1(result_data: Option<&Value>) -> LegacyMetrics {
    let metrics = result_data.and_then(|rd| rd.get("metrics"));
    let scores = result_data.and_then(|rd| rd.get("scores"));
    let minutes = |key: &str| Metric::field(metrics.and_then(|m| m.get(key)), "minutes");
    let score = |key: &str| Metric::field(scores, key);

    LegacyMetrics {
        api_time: minutes("ttfr"),
        total_time: minutes("ttfc"),
        ui_time: Metric::absent(),
        llm_model: Metric::absent(),
        correctness: score("correctness_C"),
        reproducibility: score("reproducibility_R"),
        determinism: score("determinism_D"),
        effort: score("effort_E"),
        speed: score("speed_S"),
        contract_quality: score("contract_docs_K"),
        overreach_penalty: score("penalty_overreach_PO"),
        overall: score("overall_score"),
    }
}

fn extract_metrics_v2(result_data: Option<&Value>) -> ModernMetrics {
    let impls = result_data
        .and_then(|rd| rd.get("implementations"))
        .and_then(Value::as_object);
    let Some(impls) = impls else {
        return ModernMetrics::default();
    };

    let api = impls.get("api").map(|api| {
        let generation = api.get("generation_metrics");
        let scores = api.get("scores");
        let score = |key: &str| Metric::field(scores, key);
        ApiMetrics {
            time: Metric::field(generation, "duration_minutes"),
            llm_model: Metric::field(generation, "llm_model"),
            correctness: score("correctness_C"),
            reproducibility: score("reproducibility_R"),
            determinism: score("determinism_D"),
            effort: score("effort_E"),
            speed: score("speed_S"),
            contract_quality: score("contract_docs_K"),
            overreach_penalty: score("penalty_overreach_PO"),
            overall: score("overall_score"),
        }
    });

    let ui = impls.get("ui").map(|ui| {
        let generation = ui.get("generation_metrics");
        let scores = ui.get("scores");
        let score = |key: &str| Metric::field(scores, key);
        UiMetrics {
            time: Metric::field(generation, "duration_minutes"),
            llm_model: Metric::field(generation, "llm_model"),
            correctness: score("ui_correctness"),
            integration: score("api_integration_quality"),
            ux_quality: score("ux_quality"),
            speed: score("speed_S"),
            overall: score("overall_ui_score"),
            backend_changes: generation
                .and_then(|g| g.get("backend_changes_required"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    });

    ModernMetrics { api, ui }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(doc: Value) -> RawResult {
        RawResult::new("t.json", "t.json", doc)
    }

    #[test]
    fn v1_missing_sections_yield_absent_metrics() {
        let n = normalize(&raw(json!({ "schema_version": "1.0", "result_data": {} })));
        let NormalizedMetrics::Legacy(m) = n else {
            panic!("expected legacy metrics");
        };
        assert_eq!(m, LegacyMetrics::default());
        assert_eq!(m.api_time.display_or(NOT_AVAILABLE), "N/A");
        assert_eq!(m.correctness.display_or(UNKNOWN), "Unknown");
    }

    #[test]
    fn v1_reads_flat_metrics_and_scores() {
        let n = normalize(&raw(json!({
            "result_data": {
                "metrics": { "ttfr": { "minutes": 12 }, "ttfc": {} },
                "scores": { "correctness_C": 85, "overall_score": 72, "effort_E": null }
            }
        })));
        let NormalizedMetrics::Legacy(m) = n else {
            panic!("expected legacy metrics");
        };
        assert_eq!(m.api_time.as_number(), Some(12.0));
        assert_eq!(m.total_time, Metric::absent());
        assert_eq!(m.correctness.display_or(UNKNOWN), "85");
        assert_eq!(m.overall.as_number(), Some(72.0));
        assert_eq!(m.effort, Metric::absent());
        assert_eq!(m.ui_time, Metric::absent());
    }

    #[test]
    fn v2_has_ui_follows_key_presence() {
        let with_empty_ui = normalize(&raw(json!({
            "result_data": { "implementations": { "api": {}, "ui": {} } }
        })));
        assert!(with_empty_ui.has_ui());
        let NormalizedMetrics::Modern(m) = &with_empty_ui else {
            panic!("expected modern metrics");
        };
        assert_eq!(m.ui, Some(UiMetrics::default()));

        let without_ui = normalize(&raw(json!({
            "result_data": { "implementations": { "api": {} } }
        })));
        assert!(!without_ui.has_ui());
    }

    #[test]
    fn v2_missing_api_key_leaves_bag_empty() {
        let n = normalize(&raw(json!({
            "result_data": { "implementations": { "ui": { "scores": { "overall_ui_score": 88 } } } }
        })));
        let NormalizedMetrics::Modern(m) = &n else {
            panic!("expected modern metrics");
        };
        assert!(m.api.is_none());
        assert_eq!(m.ui.as_ref().unwrap().overall.as_number(), Some(88.0));
        assert_eq!(n.api_time(), Metric::absent());
    }

    #[test]
    fn v2_reads_generation_metrics() {
        let n = normalize(&raw(json!({
            "result_data": { "implementations": {
                "api": {
                    "generation_metrics": { "duration_minutes": 15.3, "llm_model": "gpt-5" },
                    "scores": { "correctness_C": 92 }
                },
                "ui": { "generation_metrics": { "backend_changes_required": true } }
            }}
        })));
        let NormalizedMetrics::Modern(m) = &n else {
            panic!("expected modern metrics");
        };
        let api = m.api.as_ref().unwrap();
        assert_eq!(api.time.as_number(), Some(15.3));
        assert_eq!(api.llm_model.display_or(UNKNOWN), "gpt-5");
        assert_eq!(api.correctness.as_number(), Some(92.0));
        assert_eq!(api.determinism, Metric::absent());
        assert!(m.ui.as_ref().unwrap().backend_changes);
        assert_eq!(n.api_time().as_number(), Some(15.3));
    }

    #[test]
    fn non_numeric_values_chart_as_zero() {
        assert_eq!(Metric::new(json!("fast")).chart_value(), json!(0));
        assert_eq!(Metric::absent().chart_value(), json!(0));
        assert_eq!(Metric::new(json!(7)).chart_value(), json!(7));
        assert_eq!(Metric::new(json!("85")).as_number(), None);
    }
}
