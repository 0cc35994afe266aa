use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading profile {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid profile {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid profile: {0}")]
    Invalid(String),
}

/// Tunables for the dashboard; every field can be overridden from a JSON profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardProfile {
    pub baseline: f64,
    pub baseline_label: String,
    pub baseline_label_x: f64,
    pub baseline_color: String,
    pub highlight_colors: [String; 3],
    pub neutral_color: String,
    pub winner_text_color: String,
    pub initial_day: f64,
    pub day_step: f64,
    pub score_step: f64,
    pub score_axis_floor: f64,
    pub histogram_color: String,
    pub histogram_hover_color: String,
}

impl Default for DashboardProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl DashboardProfile {
    pub fn default_v1() -> Self {
        Self {
            baseline: 0.78694,
            baseline_label: "baseline".to_string(),
            baseline_label_x: 40.0,
            baseline_color: "red".to_string(),
            highlight_colors: [
                "#AD57C5".to_string(),
                "#E13C2B".to_string(),
                "#0075F6".to_string(),
            ],
            neutral_color: "#b8b2b2".to_string(),
            winner_text_color: "#FFFFFF".to_string(),
            initial_day: 1.0,
            day_step: 1.0,
            score_step: 0.001,
            score_axis_floor: 0.775,
            histogram_color: "#FC4237".to_string(),
            histogram_hover_color: "#900C3E".to_string(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let profile: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.baseline.is_finite() {
            return Err(ConfigError::Invalid("baseline must be finite".to_string()));
        }
        for (name, step) in [("day_step", self.day_step), ("score_step", self.score_step)] {
            if !(step.is_finite() && step > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        Ok(())
    }

    /// Color for a position in the full-data ranking.
    pub fn color_for_rank(&self, rank: usize) -> &str {
        self.highlight_colors
            .get(rank)
            .map(String::as_str)
            .unwrap_or(self.neutral_color.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/profile.rs"]
mod tests;
