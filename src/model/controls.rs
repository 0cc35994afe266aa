use serde::{Deserialize, Serialize};

use crate::model::profile::DashboardProfile;
use crate::model::submission::Submission;
use crate::report::{mean, round_to};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlId {
    Day,
    Score,
}

impl ControlId {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "day" | "days" | "days_from_start" => Some(ControlId::Day),
            "score" | "auc" | "auc_threshold" => Some(ControlId::Score),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ControlId::Day => "day",
            ControlId::Score => "score",
        }
    }
}

/// Numeric range and step of one slider control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSpec {
    pub id: ControlId,
    pub title: String,
    pub start: f64,
    pub end: f64,
    pub step: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl ControlSpec {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.start, self.end)
    }

    /// Clamps into range and moves onto the nearest step counted from `start`.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = self.clamp(value);
        let steps = ((clamped - self.start) / self.step).round();
        let snapped = self.start + steps * self.step;
        let decimals = step_decimals(self.step);
        self.clamp(round_to(snapped, decimals))
    }
}

fn step_decimals(step: f64) -> i32 {
    let mut decimals = 0;
    let mut scaled = step;
    while decimals < 9 && (scaled - scaled.round()).abs() > 1e-9 {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

/// Day cutoff (inclusive, elapsed days) and score cutoff (exclusive, best-ever score).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterState {
    pub day_cutoff: f64,
    pub score_cutoff: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    pub day: ControlSpec,
    pub score: ControlSpec,
}

impl Controls {
    pub fn build(submissions: &[Submission], profile: &DashboardProfile) -> Self {
        // rounded up so the last partial day stays reachable
        let max_day = submissions
            .iter()
            .map(|s| s.days_from_start)
            .fold(0.0, f64::max)
            .ceil();
        let scores: Vec<f64> = submissions.iter().map(|s| s.score).collect();
        let max_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let max_score = if max_score.is_finite() { max_score } else { 0.0 };
        let score_end = round_to(max_score, 2);
        let score_start = round_to(mean(&scores), 2).min(score_end);

        Self {
            day: ControlSpec {
                id: ControlId::Day,
                title: "Days from challenge start".to_string(),
                start: 0.0,
                end: max_day,
                step: profile.day_step,
                format: None,
            },
            score: ControlSpec {
                id: ControlId::Score,
                title: "Filter participants (above score)".to_string(),
                start: score_start,
                end: score_end,
                step: profile.score_step,
                format: Some("0.00".to_string()),
            },
        }
    }

    pub fn get(&self, id: ControlId) -> &ControlSpec {
        match id {
            ControlId::Day => &self.day,
            ControlId::Score => &self.score,
        }
    }
}

/// Starting filter: the profile's initial day and the baseline, taken as given.
pub fn initial_filter(profile: &DashboardProfile) -> FilterState {
    FilterState {
        day_cutoff: profile.initial_day,
        score_cutoff: profile.baseline,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/controls.rs"]
mod tests;
