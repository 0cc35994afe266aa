use std::collections::BTreeMap;

use serde::Serialize;

use crate::pipeline::stage1_running_best::LeaderboardRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub day: i64,
    pub count: usize,
}

/// Submissions per day bucket, ascending by day. Empty days are left out.
pub fn run_stage2<'a, I>(rows: I) -> Vec<DayCount>
where
    I: IntoIterator<Item = &'a LeaderboardRow>,
{
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.day).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(day, count)| DayCount { day, count })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_day_counts.rs"]
mod tests;
