use std::collections::HashMap;

use serde::Serialize;

use crate::model::controls::FilterState;
use crate::pipeline::stage1_running_best::LeaderboardRow;
use crate::pipeline::stage2_day_counts::{DayCount, run_stage2};
use crate::pipeline::stage3_standings::Standings;

pub const WINNER_SLOTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Winner {
    pub name: String,
    pub score: f64,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct Stage4Inputs<'a> {
    pub rows: &'a [LeaderboardRow],
    pub standings: &'a Standings,
    pub filter: FilterState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage4Output {
    /// Indices into the stage 1 rows that pass the filter, in stage 1 order.
    pub visible: Vec<usize>,
    pub day_counts: Vec<DayCount>,
    /// At most three entries, best first.
    pub winners: Vec<Winner>,
}

impl Stage4Output {
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

pub fn run_stage4(inputs: &Stage4Inputs<'_>) -> Stage4Output {
    let filter = inputs.filter;

    let visible: Vec<usize> = inputs
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.days_from_start <= filter.day_cutoff)
        .filter(|(_, row)| {
            inputs
                .standings
                .best_of(&row.name)
                .is_some_and(|best| best > filter.score_cutoff)
        })
        .map(|(idx, _)| idx)
        .collect();

    let day_counts = run_stage2(visible.iter().map(|&idx| &inputs.rows[idx]));
    let winners = top_winners(inputs.rows, &visible, inputs.standings);

    tracing::debug!(
        day_cutoff = filter.day_cutoff,
        score_cutoff = filter.score_cutoff,
        rows = visible.len(),
        days = day_counts.len(),
        winners = winners.len(),
        "recomputed filtered view"
    );

    Stage4Output {
        visible,
        day_counts,
        winners,
    }
}

fn top_winners(rows: &[LeaderboardRow], visible: &[usize], standings: &Standings) -> Vec<Winner> {
    let mut best: HashMap<&str, f64> = HashMap::new();
    for &idx in visible {
        let row = &rows[idx];
        best.entry(row.name.as_str())
            .and_modify(|b| *b = b.max(row.best))
            .or_insert(row.best);
    }

    let mut ranked: Vec<(&str, f64)> = best.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(WINNER_SLOTS)
        .map(|(name, score)| Winner {
            name: name.to_string(),
            score,
            color: standings.color_of(name).unwrap_or_default().to_string(),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_filter.rs"]
mod tests;
