use super::*;
use crate::model::submission::Submission;

fn sample() -> Vec<Submission> {
    vec![
        Submission::new("A", 0.2, 0.80, 0),
        Submission::new("A", 2.7, 0.85, 1),
        Submission::new("B", 1.1, 0.90, 2),
        Submission::new("C", 6.9, 0.70, 3),
    ]
}

#[test]
fn test_control_ranges() {
    let controls = Controls::build(&sample(), &DashboardProfile::default_v1());
    assert_eq!(controls.day.start, 0.0);
    // last submission at 6.9 days rounds up
    assert_eq!(controls.day.end, 7.0);
    assert_eq!(controls.day.step, 1.0);
    // mean = 0.8125 -> 0.81, max = 0.90
    assert_eq!(controls.score.start, 0.81);
    assert_eq!(controls.score.end, 0.9);
    assert_eq!(controls.score.step, 0.001);
    assert_eq!(controls.score.format.as_deref(), Some("0.00"));
}

#[test]
fn test_initial_filter_uses_profile_values() {
    let profile = DashboardProfile::default_v1();
    let controls = Controls::build(&sample(), &profile);
    let filter = initial_filter(&profile);
    assert_eq!(filter.day_cutoff, 1.0);
    // baseline sits below the slider start and is kept as is
    assert!(filter.score_cutoff < controls.score.start);
    assert_eq!(filter.score_cutoff, 0.78694);
}

#[test]
fn test_day_range_covers_partial_last_day() {
    let subs = vec![
        Submission::new("A", 0.2, 0.5, 0),
        Submission::new("A", 1.1, 0.7, 1),
        Submission::new("A", 2.7, 0.9, 2),
    ];
    let controls = Controls::build(&subs, &DashboardProfile::default_v1());
    assert_eq!(controls.day.end, 3.0);
    assert_eq!(controls.day.snap(1000.0), 3.0);

    let same_day = vec![Submission::new("A", 0.0, 0.5, 0)];
    let controls = Controls::build(&same_day, &DashboardProfile::default_v1());
    assert_eq!(controls.day.end, 0.0);
}

#[test]
fn test_snap_to_range_and_step() {
    let controls = Controls::build(&sample(), &DashboardProfile::default_v1());
    assert_eq!(controls.day.snap(2.4), 2.0);
    assert_eq!(controls.day.snap(2.6), 3.0);
    assert_eq!(controls.day.snap(-5.0), 0.0);
    assert_eq!(controls.day.snap(100.0), 7.0);

    assert_eq!(controls.score.snap(0.8234), 0.823);
    assert_eq!(controls.score.snap(0.5), 0.81);
    assert_eq!(controls.score.snap(2.0), 0.9);
}

#[test]
fn test_control_id_parse() {
    assert_eq!(ControlId::parse("day"), Some(ControlId::Day));
    assert_eq!(ControlId::parse(" Days "), Some(ControlId::Day));
    assert_eq!(ControlId::parse("AUC"), Some(ControlId::Score));
    assert_eq!(ControlId::parse("score"), Some(ControlId::Score));
    assert_eq!(ControlId::parse("speed"), None);
}
