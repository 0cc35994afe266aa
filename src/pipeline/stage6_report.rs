use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::pipeline::stage3_standings::Standings;
use crate::pipeline::stage5_view::DashboardView;
use crate::report::format_f64_6;
use crate::report::json::render_view_json;
use crate::report::text::{ReportContext, render_report_text};

#[derive(Debug, Clone)]
pub struct Stage6Input<'a> {
    pub view: &'a DashboardView,
    pub standings: &'a Standings,
    pub n_submissions: usize,
    pub baseline: f64,
}

pub fn write_reports(input: &Stage6Input<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    write_leaderboard_tsv(input.view, &out_dir.join("leaderboard.tsv"))?;
    write_day_counts_tsv(input.view, &out_dir.join("daily_submissions.tsv"))?;
    write_standings_tsv(input.standings, &out_dir.join("standings.tsv"))?;

    let json = render_view_json(input.view)?;
    write_text(&out_dir.join("summary.json"), &json)?;

    let ctx = ReportContext {
        view: input.view,
        n_submissions: input.n_submissions,
        n_participants: input.standings.entries.len(),
        n_above_baseline: input
            .standings
            .entries
            .iter()
            .filter(|s| s.best > input.baseline)
            .count(),
    };
    write_text(&out_dir.join("report.txt"), &render_report_text(&ctx))?;

    tracing::info!(out_dir = %out_dir.display(), "wrote reports");
    Ok(())
}

fn write_leaderboard_tsv(view: &DashboardView, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "name\tdays_from_start\tday\tscore\tbest\tcolor")?;
    for row in &view.rows {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.name,
            format_f64_6(row.days_from_start),
            row.day,
            format_f64_6(row.score),
            format_f64_6(row.best),
            row.color
        )?;
    }
    w.flush()
}

fn write_day_counts_tsv(view: &DashboardView, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "day\tcount")?;
    for c in &view.day_counts {
        writeln!(w, "{}\t{}", c.day, c.count)?;
    }
    w.flush()
}

fn write_standings_tsv(standings: &Standings, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "rank\tname\tbest\tcolor")?;
    for s in &standings.entries {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            s.rank + 1,
            s.name,
            format_f64_6(s.best),
            s.color
        )?;
    }
    w.flush()
}

fn write_text(path: &Path, content: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(content.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
