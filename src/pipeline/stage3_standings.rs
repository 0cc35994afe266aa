use std::collections::HashMap;

use serde::Serialize;

use crate::model::profile::DashboardProfile;
use crate::pipeline::stage1_running_best::LeaderboardRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub best: f64,
    pub color: String,
}

/// Ranking over the full submission set. Built once; filters never touch it.
#[derive(Debug, Clone)]
pub struct Standings {
    pub entries: Vec<Standing>,
    by_name: HashMap<String, usize>,
}

impl Standings {
    pub fn get(&self, name: &str) -> Option<&Standing> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn best_of(&self, name: &str) -> Option<f64> {
        self.get(name).map(|s| s.best)
    }

    pub fn color_of(&self, name: &str) -> Option<&str> {
        self.get(name).map(|s| s.color.as_str())
    }
}

pub fn run_stage3(rows: &[LeaderboardRow], profile: &DashboardProfile) -> Standings {
    let mut best: HashMap<&str, f64> = HashMap::new();
    for row in rows {
        best.entry(row.name.as_str())
            .and_modify(|b| *b = b.max(row.best))
            .or_insert(row.best);
    }

    let mut ranked: Vec<(&str, f64)> = best.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut entries = Vec::with_capacity(ranked.len());
    let mut by_name = HashMap::with_capacity(ranked.len());
    for (rank, (name, best)) in ranked.into_iter().enumerate() {
        by_name.insert(name.to_string(), rank);
        entries.push(Standing {
            rank,
            name: name.to_string(),
            best,
            color: profile.color_for_rank(rank).to_string(),
        });
    }

    Standings { entries, by_name }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_standings.rs"]
mod tests;
