use crate::normalize::Metric;

/// Qualitative band of a 0–100 score, used only for cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn classify(score: &Metric) -> Option<Self> {
        let v = score.as_number()?;
        Some(if v >= 80.0 {
            ScoreBand::High
        } else if v >= 60.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        })
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreBand::High => "score-high",
            ScoreBand::Medium => "score-medium",
            ScoreBand::Low => "score-low",
        }
    }
}

/// CSS class for a score cell; empty when the score is not a number.
pub fn score_class(score: &Metric) -> &'static str {
    ScoreBand::classify(score).map_or("", ScoreBand::css_class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn band(v: serde_json::Value) -> Option<ScoreBand> {
        ScoreBand::classify(&Metric::new(v))
    }

    #[test]
    fn thresholds() {
        assert_eq!(band(json!(100)), Some(ScoreBand::High));
        assert_eq!(band(json!(80)), Some(ScoreBand::High));
        assert_eq!(band(json!(79.99)), Some(ScoreBand::Medium));
        assert_eq!(band(json!(60)), Some(ScoreBand::Medium));
        assert_eq!(band(json!(59.9)), Some(ScoreBand::Low));
        assert_eq!(band(json!(0)), Some(ScoreBand::Low));
    }

    #[test]
    fn placeholders_are_unclassified() {
        assert_eq!(band(json!("Unknown")), None);
        assert_eq!(band(json!("N/A")), None);
        assert_eq!(score_class(&Metric::absent()), "");
    }

    #[test]
    fn classification_leaves_metric_untouched() {
        let m = Metric::new(json!(72));
        assert_eq!(score_class(&m), "score-medium");
        assert_eq!(score_class(&m), "score-medium");
        assert_eq!(m.display_or("N/A"), "72");
    }
}
