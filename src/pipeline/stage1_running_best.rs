use std::collections::HashMap;

use crate::model::submission::{Submission, day_bucket};

/// A submission annotated with its participant's best score so far.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub name: String,
    pub days_from_start: f64,
    pub day: i64,
    pub score: f64,
    pub best: f64,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct Stage1Output {
    /// Grouped by participant in first-appearance order, each group in elapsed-time order.
    pub rows: Vec<LeaderboardRow>,
    pub n_participants: usize,
}

pub fn run_stage1(submissions: &[Submission]) -> Stage1Output {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Submission>> = HashMap::new();
    for sub in submissions {
        let group = groups.entry(sub.name.as_str()).or_insert_with(|| {
            order.push(sub.name.as_str());
            Vec::new()
        });
        group.push(sub);
    }

    let mut rows = Vec::with_capacity(submissions.len());
    for name in &order {
        let Some(group) = groups.get_mut(name) else {
            continue;
        };
        group.sort_by(|a, b| {
            a.days_from_start
                .total_cmp(&b.days_from_start)
                .then(a.index.cmp(&b.index))
        });

        let mut best = f64::NEG_INFINITY;
        for sub in group.iter() {
            best = best.max(sub.score);
            rows.push(LeaderboardRow {
                name: sub.name.clone(),
                days_from_start: sub.days_from_start,
                day: day_bucket(sub.days_from_start),
                score: sub.score,
                best,
                index: sub.index,
            });
        }
    }

    Stage1Output {
        rows,
        n_participants: order.len(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_running_best.rs"]
mod tests;
