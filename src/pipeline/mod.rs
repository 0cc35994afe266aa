pub mod stage1_running_best;
pub mod stage2_day_counts;
pub mod stage3_standings;
pub mod stage4_filter;
pub mod stage5_view;
pub mod stage6_report;
