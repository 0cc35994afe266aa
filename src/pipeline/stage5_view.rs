use serde::Serialize;

use crate::model::controls::{ControlSpec, Controls, FilterState};
use crate::model::profile::DashboardProfile;
use crate::pipeline::stage1_running_best::LeaderboardRow;
use crate::pipeline::stage2_day_counts::DayCount;
use crate::pipeline::stage3_standings::Standings;
use crate::pipeline::stage4_filter::{Stage4Output, WINNER_SLOTS, Winner};
use crate::report::{format_score, place_label, round_to};

pub const NO_WINNER: &str = "No winner";

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub filter: FilterState,
    pub controls: Vec<ControlView>,
    pub rows: Vec<RowView>,
    pub day_counts: Vec<DayCount>,
    pub winners_panel: Vec<WinnerSlot>,
    pub series: Vec<SeriesStyle>,
    pub baseline: BaselineMarker,
    pub layout: ChartLayout,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlView {
    #[serde(flatten)]
    pub spec: ControlSpec,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub index: usize,
    pub name: String,
    pub days_from_start: f64,
    pub day: i64,
    pub score: f64,
    pub best: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinnerSlot {
    pub place: &'static str,
    pub text: String,
    pub background: String,
    pub text_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
}

impl WinnerSlot {
    pub fn is_empty(&self) -> bool {
        self.winner.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStyle {
    pub name: String,
    pub color: String,
    pub line_width: f64,
    pub line_alpha: f64,
    pub step_mode: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineMarker {
    pub score: f64,
    pub label: String,
    pub label_x: f64,
    pub color: String,
    pub line_width: f64,
    pub line_alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub hover_fields: [&'static str; 3],
    pub histogram: HistogramLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramLayout {
    pub title: &'static str,
    pub x_label: &'static str,
    pub bar_width: f64,
    pub color: String,
    pub hover_color: String,
}

#[derive(Debug, Clone)]
pub struct Stage5Inputs<'a> {
    pub rows: &'a [LeaderboardRow],
    pub standings: &'a Standings,
    pub controls: &'a Controls,
    pub filter: FilterState,
    pub filtered: &'a Stage4Output,
    pub profile: &'a DashboardProfile,
}

pub fn run_stage5(inputs: &Stage5Inputs<'_>) -> DashboardView {
    let profile = inputs.profile;
    let standings = inputs.standings;

    let rows = inputs
        .filtered
        .visible
        .iter()
        .map(|&idx| {
            let row = &inputs.rows[idx];
            RowView {
                index: row.index,
                name: row.name.clone(),
                days_from_start: row.days_from_start,
                day: row.day,
                score: row.score,
                best: row.best,
                color: standings
                    .color_of(&row.name)
                    .unwrap_or(profile.neutral_color.as_str())
                    .to_string(),
            }
        })
        .collect();

    DashboardView {
        filter: inputs.filter,
        controls: vec![
            ControlView {
                spec: inputs.controls.day.clone(),
                value: inputs.filter.day_cutoff,
            },
            ControlView {
                spec: inputs.controls.score.clone(),
                value: inputs.filter.score_cutoff,
            },
        ],
        rows,
        day_counts: inputs.filtered.day_counts.clone(),
        winners_panel: winner_slots(&inputs.filtered.winners, profile),
        series: series_styles(standings),
        baseline: BaselineMarker {
            score: profile.baseline,
            label: profile.baseline_label.clone(),
            label_x: profile.baseline_label_x,
            color: profile.baseline_color.clone(),
            line_width: 2.0,
            line_alpha: 0.6,
        },
        layout: chart_layout(inputs.rows, inputs.controls, profile),
    }
}

/// Always three slots; missing places read "No winner" on the neutral color.
pub fn winner_slots(winners: &[Winner], profile: &DashboardProfile) -> Vec<WinnerSlot> {
    (0..WINNER_SLOTS)
        .map(|place| match winners.get(place) {
            Some(w) => WinnerSlot {
                place: place_label(place),
                text: format!(
                    "{}: {} with {}",
                    place_label(place),
                    w.name,
                    format_score(w.score)
                ),
                background: w.color.clone(),
                text_color: profile.winner_text_color.clone(),
                winner: Some(w.clone()),
            },
            None => WinnerSlot {
                place: place_label(place),
                text: NO_WINNER.to_string(),
                background: profile.neutral_color.clone(),
                text_color: profile.winner_text_color.clone(),
                winner: None,
            },
        })
        .collect()
}

pub fn series_styles(standings: &Standings) -> Vec<SeriesStyle> {
    standings
        .entries
        .iter()
        .map(|s| {
            let highlighted = s.rank < WINNER_SLOTS;
            SeriesStyle {
                name: s.name.clone(),
                color: s.color.clone(),
                line_width: if highlighted { 3.0 } else { 2.0 },
                line_alpha: if highlighted { 0.8 } else { 0.6 },
                step_mode: "after",
            }
        })
        .collect()
}

fn chart_layout(
    rows: &[LeaderboardRow],
    controls: &Controls,
    profile: &DashboardProfile,
) -> ChartLayout {
    let max_score = rows
        .iter()
        .map(|r| r.score)
        .fold(f64::NEG_INFINITY, f64::max);
    let y_top = if max_score.is_finite() {
        round_to(max_score, 2)
    } else {
        profile.score_axis_floor
    };

    ChartLayout {
        title: "Best scores on the public leaderboard in time",
        x_label: "Days from challenge start",
        y_label: "Score",
        x_range: [-1.0, controls.day.end + 1.0],
        y_range: [profile.score_axis_floor, y_top],
        hover_fields: ["name", "best", "days_from_start"],
        histogram: HistogramLayout {
            title: "Daily submissions",
            x_label: "Days from start",
            bar_width: 0.8,
            color: profile.histogram_color.clone(),
            hover_color: profile.histogram_hover_color.clone(),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_view.rs"]
mod tests;
