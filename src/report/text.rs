use crate::pipeline::stage5_view::DashboardView;
use crate::report::format_f64_6;

#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub view: &'a DashboardView,
    pub n_submissions: usize,
    pub n_participants: usize,
    pub n_above_baseline: usize,
}

pub fn render_report_text(ctx: &ReportContext<'_>) -> String {
    let view = ctx.view;
    let mut out = String::new();

    out.push_str("Leaderboard Report\n");
    out.push_str("==================\n\n");

    out.push_str("1. Input\n");
    out.push_str(&format!("Submissions: {}\n", ctx.n_submissions));
    out.push_str(&format!("Participants: {}\n", ctx.n_participants));
    out.push_str(&format!(
        "Participants above baseline ({}): {}\n\n",
        view.baseline.score, ctx.n_above_baseline
    ));

    out.push_str("2. Filter\n");
    out.push_str(&format!(
        "Day cutoff (inclusive): {}\n",
        format_f64_6(view.filter.day_cutoff)
    ));
    out.push_str(&format!(
        "Score cutoff (exclusive): {}\n",
        format_f64_6(view.filter.score_cutoff)
    ));
    out.push_str(&format!("Visible submissions: {}\n", view.rows.len()));
    let visible_participants = {
        let mut names: Vec<&str> = view.rows.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    };
    out.push_str(&format!("Visible participants: {}\n\n", visible_participants));

    out.push_str("3. Winners\n");
    for slot in &view.winners_panel {
        if slot.is_empty() {
            out.push_str(&format!("{}: {}\n", slot.place, slot.text));
        } else {
            out.push_str(&format!("{} [{}]\n", slot.text, slot.background));
        }
    }
    out.push('\n');

    out.push_str("4. Daily submissions\n");
    if view.day_counts.is_empty() {
        out.push_str("No submissions in range.\n");
    } else {
        let busiest = view
            .day_counts
            .iter()
            .max_by(|a, b| a.count.cmp(&b.count).then(b.day.cmp(&a.day)));
        out.push_str(&format!("Active days: {}\n", view.day_counts.len()));
        if let Some(day) = busiest {
            out.push_str(&format!(
                "Busiest day: {} ({} submissions)\n",
                day.day, day.count
            ));
        }
    }

    out
}
