use crate::group::ToolInstance;
use crate::normalize::Metric;
use crate::results::SchemaVersion;

#[derive(Debug, Clone, PartialEq)]
pub struct FastestApi {
    pub tool: String,
    /// As written in the document, for display.
    pub time: Metric,
    pub minutes: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutiveSummary {
    pub total_tools: usize,
    pub tools_with_ui: usize,
    pub fastest_api: Option<FastestApi>,
}

/// Cross-tool facts for one group. Tools without a numeric API time never take part in
/// the fastest-time comparison.
pub fn summarize(tools: &[ToolInstance<'_>]) -> ExecutiveSummary {
    let tools_with_ui = tools
        .iter()
        .filter(|t| t.schema() == SchemaVersion::V2 && t.metrics.has_ui())
        .count();

    let mut fastest_api: Option<FastestApi> = None;
    for tool in tools {
        let time = tool.metrics.api_time();
        let Some(minutes) = time.as_number() else {
            continue;
        };
        // strict `<` keeps the first tool on ties
        if fastest_api.as_ref().is_none_or(|f| minutes < f.minutes) {
            fastest_api = Some(FastestApi {
                tool: tool.name.to_string(),
                time,
                minutes,
            });
        }
    }

    ExecutiveSummary {
        total_tools: tools.len(),
        tools_with_ui,
        fastest_api,
    }
}
