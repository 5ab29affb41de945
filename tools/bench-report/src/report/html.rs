use super::band::score_class;
use super::charts::{chart_data, quality_chart_config, timing_chart_config};
use crate::group::{GroupKey, ToolInstance};
use crate::normalize::{Metric, NormalizedMetrics, NOT_AVAILABLE, UNKNOWN};
use crate::summary::ExecutiveSummary;
use chrono::NaiveDateTime;
use serde_json::Value;

/// Everything a group report is rendered from.
pub struct ReportInput<'a> {
    pub key: &'a GroupKey,
    pub tools: &'a [ToolInstance<'a>],
    pub summary: &'a ExecutiveSummary,
    pub generated_at: NaiveDateTime,
    pub chart_js_url: &'a str,
}

pub fn render_report(input: &ReportInput<'_>) -> String {
    let report_id = input.key.report_id();
    let mut h = String::with_capacity(32 * 1024);

    h.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    h.push_str("<meta charset=\"UTF-8\">\n");
    h.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    h.push_str(&format!("<title>{} - Benchmark Comparison</title>\n", esc(&report_id)));
    h.push_str(&format!("<script src=\"{}\"></script>\n", esc(input.chart_js_url)));
    h.push_str("<style>\n");
    h.push_str(STYLE);
    h.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");

    push_header(&mut h, &report_id, input.key, input.generated_at);
    push_summary(&mut h, input.tools, input.summary);

    h.push_str("<h2>📈 Visual Comparison</h2>\n");
    push_charts(&mut h, input.tools);

    h.push_str("<h2>📋 Detailed Metrics</h2>\n");
    push_tables(&mut h, input.tools);

    h.push_str(&format!(
        "<div class=\"footer\"><p>Benchmark Report • Generated {}</p></div>\n",
        input.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    h.push_str("</div>\n</body>\n</html>\n");
    h
}

fn push_header(h: &mut String, report_id: &str, key: &GroupKey, generated_at: NaiveDateTime) {
    h.push_str("<div class=\"report-header\">\n");
    h.push_str(&format!("<h1>📊 {}</h1>\n<div class=\"meta-info\">\n", esc(report_id)));
    let items = [
        ("Specification", esc(&key.spec_reference)),
        ("Target Model", format!("Model {}", esc(&key.target_model))),
        ("API Style", esc(&key.api_style)),
        ("Generated", generated_at.format("%Y-%m-%d %H:%M").to_string()),
    ];
    for (label, value) in items {
        h.push_str(&format!(
            "<div class=\"meta-item\"><div class=\"meta-label\">{label}</div><div class=\"meta-value\">{value}</div></div>\n"
        ));
    }
    h.push_str("</div>\n</div>\n");
}

fn push_summary(h: &mut String, tools: &[ToolInstance<'_>], summary: &ExecutiveSummary) {
    if tools.is_empty() {
        h.push_str("<p>No data available for summary.</p>\n");
        return;
    }

    h.push_str("<div class=\"executive-summary\" id=\"executive-summary\">\n");
    h.push_str("<h2>📝 Executive Summary</h2>\n<div class=\"summary-highlights\">\n");
    push_highlight(h, "Tools Compared", "total-tools", &summary.total_tools.to_string(), None);
    push_highlight(h, "With UI Implementation", "tools-with-ui", &summary.tools_with_ui.to_string(), None);
    if let Some(fastest) = &summary.fastest_api {
        let detail = format!("{} minutes", esc(&fastest.time.display_or(NOT_AVAILABLE)));
        push_highlight(h, "Fastest API Generation", "fastest-api", &esc(&fastest.tool), Some(&detail));
    }
    h.push_str("</div>\n</div>\n");
}

fn push_highlight(h: &mut String, label: &str, id: &str, value: &str, detail: Option<&str>) {
    h.push_str(&format!(
        "<div class=\"highlight-card\"><div class=\"highlight-label\">{label}</div><div class=\"highlight-value\" id=\"{id}\">{value}</div>"
    ));
    if let Some(detail) = detail {
        h.push_str(&format!("<div class=\"highlight-detail\">{detail}</div>"));
    }
    h.push_str("</div>\n");
}

fn push_charts(h: &mut String, tools: &[ToolInstance<'_>]) {
    let Some(data) = chart_data(tools) else {
        h.push_str("<p>No data available for charts.</p>\n");
        return;
    };

    h.push_str("<div class=\"chart-container\"><canvas id=\"timingChart\"></canvas></div>\n");
    h.push_str("<div class=\"chart-container\"><canvas id=\"qualityChart\"></canvas></div>\n");
    h.push_str("<script>\n");
    h.push_str(&format!(
        "new Chart(document.getElementById('timingChart'), {});\n",
        script_json(&timing_chart_config(&data))
    ));
    h.push_str(&format!(
        "new Chart(document.getElementById('qualityChart'), {});\n",
        script_json(&quality_chart_config(&data))
    ));
    h.push_str("</script>\n");
}

fn push_tables(h: &mut String, tools: &[ToolInstance<'_>]) {
    let modern: Vec<_> = tools
        .iter()
        .filter_map(|t| match &t.metrics {
            NormalizedMetrics::Modern(m) => Some((t, m)),
            NormalizedMetrics::Legacy(_) => None,
        })
        .collect();
    let legacy: Vec<_> = tools
        .iter()
        .filter_map(|t| match &t.metrics {
            NormalizedMetrics::Legacy(m) => Some((t, m)),
            NormalizedMetrics::Modern(_) => None,
        })
        .collect();

    if !modern.is_empty() {
        h.push_str("<h3>API Implementation Metrics <span class=\"badge badge-v2\">Schema v2.0</span></h3>\n");
        h.push_str(API_EXPLAINER);
        open_table(
            h,
            "api-table",
            &[
                "Tool",
                "LLM Model",
                "Time (min)",
                "Correctness",
                "Determinism",
                "Effort",
                "Contract Quality",
                "Overall Score",
            ],
        );
        for (tool, m) in &modern {
            open_row(h, tool);
            match &m.api {
                Some(api) => {
                    h.push_str(&text_cell(&api.llm_model, UNKNOWN));
                    h.push_str(&text_cell(&api.time, NOT_AVAILABLE));
                    for score in [&api.correctness, &api.determinism, &api.effort, &api.contract_quality] {
                        h.push_str(&score_cell(score, UNKNOWN, false));
                    }
                    h.push_str(&score_cell(&api.overall, UNKNOWN, true));
                }
                // no `api` key: every cell falls back to "N/A" except the model
                None => {
                    let absent = Metric::absent();
                    h.push_str(&text_cell(&absent, UNKNOWN));
                    h.push_str(&text_cell(&absent, NOT_AVAILABLE));
                    for _ in 0..4 {
                        h.push_str(&score_cell(&absent, NOT_AVAILABLE, false));
                    }
                    h.push_str(&score_cell(&absent, NOT_AVAILABLE, true));
                }
            }
            h.push_str("</tr>\n");
        }
        close_table(h);

        let with_ui: Vec<_> = modern
            .iter()
            .filter_map(|(t, m)| m.ui.as_ref().map(|ui| (t, ui)))
            .collect();
        if !with_ui.is_empty() {
            h.push_str("<h3>UI Implementation Metrics <span class=\"badge badge-v2\">Schema v2.0</span></h3>\n");
            h.push_str(UI_EXPLAINER);
            open_table(
                h,
                "ui-table",
                &[
                    "Tool",
                    "LLM Model",
                    "Time (min)",
                    "Correctness",
                    "Integration",
                    "UX Quality",
                    "Backend Changes",
                    "Overall Score",
                ],
            );
            for (tool, ui) in with_ui {
                open_row(h, tool);
                h.push_str(&text_cell(&ui.llm_model, UNKNOWN));
                h.push_str(&text_cell(&ui.time, NOT_AVAILABLE));
                for score in [&ui.correctness, &ui.integration, &ui.ux_quality] {
                    h.push_str(&score_cell(score, UNKNOWN, false));
                }
                let backend = if ui.backend_changes { "✓ Yes" } else { "✗ No" };
                h.push_str(&format!("<td>{backend}</td>"));
                h.push_str(&score_cell(&ui.overall, UNKNOWN, true));
                h.push_str("</tr>\n");
            }
            close_table(h);
        }
    }

    if !legacy.is_empty() {
        h.push_str("<h3>Legacy Metrics <span class=\"badge badge-v1\">Schema v1.0</span></h3>\n");
        open_table(
            h,
            "legacy-table",
            &[
                "Tool",
                "API Time (min)",
                "Total Time (min)",
                "Correctness",
                "Determinism",
                "Effort",
                "Overall Score",
            ],
        );
        for (tool, m) in legacy {
            open_row(h, tool);
            h.push_str(&text_cell(&m.api_time, NOT_AVAILABLE));
            h.push_str(&text_cell(&m.total_time, NOT_AVAILABLE));
            for score in [&m.correctness, &m.determinism, &m.effort] {
                h.push_str(&score_cell(score, UNKNOWN, false));
            }
            h.push_str(&score_cell(&m.overall, UNKNOWN, true));
            h.push_str("</tr>\n");
        }
        close_table(h);
    }
}

fn open_table(h: &mut String, id: &str, headers: &[&str]) {
    h.push_str(&format!("<table id=\"{id}\">\n<thead>\n<tr>"));
    for header in headers {
        h.push_str(&format!("<th>{header}</th>"));
    }
    h.push_str("</tr>\n</thead>\n<tbody>\n");
}

fn close_table(h: &mut String) {
    h.push_str("</tbody>\n</table>\n");
}

fn open_row(h: &mut String, tool: &ToolInstance<'_>) {
    let name = esc(tool.name.as_str());
    h.push_str(&format!("<tr data-tool=\"{name}\"><td><strong>{name}</strong></td>"));
}

fn text_cell(m: &Metric, placeholder: &str) -> String {
    format!("<td>{}</td>", esc(&m.display_or(placeholder)))
}

fn score_cell(m: &Metric, placeholder: &str, bold: bool) -> String {
    let class = match score_class(m) {
        "" => "score-cell".to_string(),
        band => format!("score-cell {band}"),
    };
    let text = esc(&m.display_or(placeholder));
    if bold {
        format!("<td class=\"{class}\"><strong>{text}</strong></td>")
    } else {
        format!("<td class=\"{class}\">{text}</td>")
    }
}

fn esc(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// JSON that is safe to place inside a `<script>` element.
fn script_json(v: &Value) -> String {
    v.to_string().replace("</", "<\\/")
}

const API_EXPLAINER: &str = r#"<div class="metric-explainer">
<strong>Understanding the metrics:</strong>
<ul>
<li><strong>Time:</strong> Minutes from start to completion</li>
<li><strong>Correctness:</strong> % of acceptance tests passed (100 = all passed)</li>
<li><strong>Determinism:</strong> Consistent ordering and behavior (100 = fully deterministic)</li>
<li><strong>Effort:</strong> Low human intervention (100 = fully autonomous)</li>
<li><strong>Contract Quality:</strong> API documentation and completeness</li>
</ul>
</div>
"#;

const UI_EXPLAINER: &str = r#"<div class="metric-explainer">
<strong>UI-specific metrics:</strong>
<ul>
<li><strong>Correctness:</strong> UI requirements compliance and functionality</li>
<li><strong>Integration:</strong> How well UI integrates with existing API</li>
<li><strong>UX Quality:</strong> Consumer experience and usability</li>
<li><strong>Backend Changes:</strong> Whether UI required backend modifications</li>
</ul>
</div>
"#;

const STYLE: &str = r#"* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
  line-height: 1.6; color: #333; background: #f5f5f5; padding: 20px;
}
.container {
  max-width: 1400px; margin: 0 auto; background: white; padding: 40px;
  border-radius: 12px; box-shadow: 0 2px 10px rgba(0,0,0,0.1);
}
h1 { color: #667eea; border-bottom: 3px solid #667eea; padding-bottom: 10px; margin-bottom: 30px; }
h2 { color: #555; margin: 40px 0 20px; padding-bottom: 10px; border-bottom: 2px solid #e0e0e0; }
h3 { color: #666; margin: 30px 0 15px; }
.report-header {
  background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
  color: white; padding: 30px; border-radius: 8px; margin-bottom: 30px;
}
.report-header h1 { color: white; border: none; margin: 0; }
.meta-info { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; margin-top: 20px; }
.meta-item { background: rgba(255,255,255,0.2); padding: 10px 15px; border-radius: 6px; }
.meta-label { font-size: 0.85rem; opacity: 0.9; }
.meta-value { font-size: 1.1rem; font-weight: 600; margin-top: 5px; }
.executive-summary { background: #e8f5e9; border-left: 4px solid #4caf50; padding: 20px; border-radius: 6px; margin: 30px 0; }
.summary-highlights { display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); gap: 20px; margin-top: 20px; }
.highlight-card { background: white; padding: 15px; border-radius: 6px; border: 1px solid #c8e6c9; }
.highlight-label { font-size: 0.875rem; color: #666; text-transform: uppercase; letter-spacing: 0.5px; }
.highlight-value { font-size: 1.5rem; font-weight: bold; color: #2e7d32; margin-top: 5px; }
.highlight-detail { font-size: 0.9rem; color: #666; margin-top: 5px; }
table { width: 100%; border-collapse: collapse; margin: 20px 0; background: white; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
th { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 15px; text-align: left; font-weight: 600; }
td { padding: 12px 15px; border-bottom: 1px solid #e0e0e0; }
tr:hover { background: #f5f5f5; }
.score-cell { font-weight: 600; }
.score-high { color: #4caf50; }
.score-medium { color: #ff9800; }
.score-low { color: #f44336; }
.chart-container {
  position: relative; height: 400px; margin: 30px 0; padding: 20px;
  background: white; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.1);
}
.metric-explainer { background: #fff3e0; border-left: 4px solid #ff9800; padding: 15px; margin: 20px 0; border-radius: 6px; }
.metric-explainer strong { color: #e65100; }
.metric-explainer ul { margin: 10px 0 0 20px; }
.badge { display: inline-block; padding: 4px 10px; border-radius: 12px; font-size: 0.85rem; font-weight: 600; margin-left: 8px; }
.badge-v2 { background: #4caf50; color: white; }
.badge-v1 { background: #9e9e9e; color: white; }
.footer { margin-top: 50px; padding-top: 20px; border-top: 2px solid #e0e0e0; text-align: center; color: #666; font-size: 0.9rem; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_results;
    use crate::results::RawResult;
    use crate::summary::summarize;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 30, 5).unwrap()
    }

    fn doc(tool: &str, result_data: Value) -> RawResult {
        let mut rd = result_data;
        rd["run_identity"] = json!({
            "spec_reference": "SPEC-v1.0", "target_model": "A", "api_style": "REST",
            "tool_name": tool, "run_number": 1
        });
        RawResult::new(tool, tool, json!({ "result_data": rd }))
    }

    fn render(results: Vec<RawResult>) -> String {
        let groups = group_results(results);
        let group = groups.values().next().unwrap();
        let tools = group.instances();
        let summary = summarize(&tools);
        render_report(&ReportInput {
            key: &group.key,
            tools: &tools,
            summary: &summary,
            generated_at: at(),
            chart_js_url: "chart.js",
        })
    }

    /// Rows of the table with the given id.
    fn rows(html: &str, table_id: &str) -> usize {
        let Some(start) = html.find(&format!("<table id=\"{table_id}\">")) else {
            return 0;
        };
        let rest = &html[start..];
        let end = rest.find("</table>").unwrap();
        rest[..end].matches("<tr data-tool=").count()
    }

    #[test]
    fn header_carries_identity_and_timestamp() {
        let html = render(vec![doc("Cursor", json!({}))]);
        assert!(html.contains("<title>SPEC-v1.0-ModelA-REST-Comparison - Benchmark Comparison</title>"));
        assert!(html.contains("Model A"));
        assert!(html.contains("2026-10-19 09:30"));
        assert!(html.contains("Generated 2026-10-19 09:30:05"));
    }

    #[test]
    fn legacy_only_group_has_no_charts_or_v2_tables() {
        let html = render(vec![doc("Legacy", json!({ "scores": { "correctness_C": 85 } }))]);
        assert_eq!(rows(&html, "legacy-table"), 1);
        assert_eq!(rows(&html, "api-table"), 0);
        assert_eq!(rows(&html, "ui-table"), 0);
        assert!(html.contains("No data available for charts."));
        assert!(!html.contains("new Chart("));
        assert!(html.contains("<td class=\"score-cell score-high\">85</td>"));
        assert!(html.contains("<td class=\"score-cell\"><strong>Unknown</strong></td>"));
    }

    #[test]
    fn v2_without_api_key_renders_na_cells() {
        let html = render(vec![doc("Modern", json!({ "implementations": { "ui": {} } }))]);
        assert_eq!(rows(&html, "api-table"), 1);
        assert_eq!(rows(&html, "ui-table"), 1);
        assert!(html.contains(
            "<tr data-tool=\"Modern\"><td><strong>Modern</strong></td><td>Unknown</td><td>N/A</td><td class=\"score-cell\">N/A</td>"
        ));
        assert!(html.contains("<td>✗ No</td>"));
    }

    #[test]
    fn ui_table_hidden_without_ui_key() {
        let html = render(vec![doc("Modern", json!({ "implementations": { "api": {} } }))]);
        assert_eq!(rows(&html, "api-table"), 1);
        assert_eq!(rows(&html, "ui-table"), 0);
        assert!(html.contains("new Chart(document.getElementById('timingChart')"));
    }

    #[test]
    fn tool_names_are_escaped() {
        let html = render(vec![doc("<b>Evil</b>", json!({}))]);
        assert!(html.contains("&lt;b&gt;Evil&lt;/b&gt;"));
        assert!(!html.contains("<b>Evil</b>"));
    }

    #[test]
    fn script_json_cannot_close_the_script_element() {
        assert_eq!(script_json(&json!(["</script>"])), r#"["<\/script>"]"#);
    }

    #[test]
    fn empty_group_reports_no_data() {
        let mut second_only = doc("Later", json!({}));
        second_only.document["result_data"]["run_identity"]["run_number"] = json!(2);
        let html = render(vec![second_only]);
        assert!(html.contains("No data available for summary."));
        assert!(!html.contains("<table"));
    }
}
