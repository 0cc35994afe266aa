use crate::pipeline::stage5_view::DashboardView;

/// Pretty JSON for the summary file.
pub fn render_view_json(view: &DashboardView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view)
}

/// Single-line JSON, one view per line for streaming consumers.
pub fn render_view_line(view: &DashboardView) -> serde_json::Result<String> {
    serde_json::to_string(view)
}
