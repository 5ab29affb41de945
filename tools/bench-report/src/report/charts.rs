//! Chart.js configurations for the v2 tools of a group. v1 tools are never charted.

use crate::group::ToolInstance;
use crate::normalize::NormalizedMetrics;
use serde_json::{json, Value};

pub const RADAR_AXES: [&str; 3] = ["Correctness", "Determinism", "Effort"];

#[derive(Debug, Clone, PartialEq)]
pub struct RadarSeries {
    pub label: String,
    /// Correctness, determinism, effort.
    pub data: [Value; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub api_times: Vec<Value>,
    pub ui_times: Vec<Value>,
    pub radar: Vec<RadarSeries>,
}

/// `None` when the group has no v2 tool.
pub fn chart_data(tools: &[ToolInstance<'_>]) -> Option<ChartData> {
    let mut data = ChartData {
        labels: Vec::new(),
        api_times: Vec::new(),
        ui_times: Vec::new(),
        radar: Vec::new(),
    };

    for tool in tools {
        let NormalizedMetrics::Modern(m) = &tool.metrics else {
            continue;
        };
        let api = m.api.clone().unwrap_or_default();
        let ui_time = m.ui.as_ref().map_or_else(|| Value::from(0), |ui| ui.time.chart_value());

        data.labels.push(tool.name.to_string());
        data.api_times.push(api.time.chart_value());
        data.ui_times.push(ui_time);
        data.radar.push(RadarSeries {
            label: tool.name.to_string(),
            data: [
                api.correctness.chart_value(),
                api.determinism.chart_value(),
                api.effort.chart_value(),
            ],
        });
    }

    (!data.labels.is_empty()).then_some(data)
}

fn rgba(i: usize, alpha: &str) -> String {
    format!("rgba({}, {}, {}, {alpha})", (i * 50) % 255, (i * 80) % 255, (i * 120) % 255)
}

pub fn timing_chart_config(data: &ChartData) -> Value {
    json!({
        "type": "bar",
        "data": {
            "labels": data.labels,
            "datasets": [
                {
                    "label": "API Generation Time (minutes)",
                    "data": data.api_times,
                    "backgroundColor": "rgba(102, 126, 234, 0.8)",
                    "borderColor": "rgba(102, 126, 234, 1)",
                    "borderWidth": 1
                },
                {
                    "label": "UI Generation Time (minutes)",
                    "data": data.ui_times,
                    "backgroundColor": "rgba(118, 75, 162, 0.8)",
                    "borderColor": "rgba(118, 75, 162, 1)",
                    "borderWidth": 1
                }
            ]
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "title": { "display": true, "text": "Generation Time Comparison", "font": { "size": 16 } },
                "legend": { "position": "top" }
            },
            "scales": {
                "y": { "beginAtZero": true, "title": { "display": true, "text": "Minutes" } }
            }
        }
    })
}

pub fn quality_chart_config(data: &ChartData) -> Value {
    let datasets: Vec<Value> = data
        .radar
        .iter()
        .enumerate()
        .map(|(i, series)| {
            json!({
                "label": series.label,
                "data": series.data,
                "backgroundColor": rgba(i, "0.2"),
                "borderColor": rgba(i, "1"),
                "borderWidth": 2
            })
        })
        .collect();

    json!({
        "type": "radar",
        "data": { "labels": RADAR_AXES, "datasets": datasets },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "title": { "display": true, "text": "Quality Metrics Comparison", "font": { "size": 16 } }
            },
            "scales": { "r": { "beginAtZero": true, "max": 100 } }
        }
    })
}
