use super::*;

fn subs(data: &[(&str, f64, f64)]) -> Vec<Submission> {
    data.iter()
        .enumerate()
        .map(|(i, (name, days, score))| Submission::new(name, *days, *score, i))
        .collect()
}

fn best_for<'a>(rows: &'a [LeaderboardRow], name: &str) -> Vec<f64> {
    rows.iter().filter(|r| r.name == name).map(|r| r.best).collect()
}

#[test]
fn test_running_best_example() {
    let input = subs(&[("A", 0.0, 0.80), ("A", 2.0, 0.85), ("B", 1.0, 0.90)]);
    let out = run_stage1(&input);
    assert_eq!(out.n_participants, 2);
    assert_eq!(best_for(&out.rows, "A"), vec![0.80, 0.85]);
    assert_eq!(best_for(&out.rows, "B"), vec![0.90]);
    assert_eq!(out.rows.iter().map(|r| r.day).collect::<Vec<_>>(), vec![0, 2, 1]);
}

#[test]
fn test_sorts_by_time_within_participant() {
    let input = subs(&[
        ("A", 5.5, 0.70),
        ("B", 0.1, 0.60),
        ("A", 1.2, 0.75),
        ("A", 3.0, 0.72),
    ]);
    let out = run_stage1(&input);
    let a: Vec<(f64, f64)> = out
        .rows
        .iter()
        .filter(|r| r.name == "A")
        .map(|r| (r.days_from_start, r.best))
        .collect();
    assert_eq!(a, vec![(1.2, 0.75), (3.0, 0.75), (5.5, 0.75)]);
    // participants keep first-appearance order
    assert_eq!(out.rows[0].name, "A");
    assert_eq!(out.rows[3].name, "B");
}

#[test]
fn test_equal_times_keep_file_order() {
    let input = subs(&[("A", 1.0, 0.9), ("A", 1.0, 0.5), ("A", 0.5, 0.6)]);
    let out = run_stage1(&input);
    let order: Vec<usize> = out.rows.iter().map(|r| r.index).collect();
    assert_eq!(order, vec![2, 0, 1]);
    assert_eq!(best_for(&out.rows, "A"), vec![0.6, 0.9, 0.9]);
}

#[test]
fn test_running_best_is_prefix_max() {
    let scores = [0.3, 0.7, 0.2, 0.9, 0.1, 0.95, 0.4];
    let data: Vec<(&str, f64, f64)> = scores
        .iter()
        .enumerate()
        .map(|(i, &s)| (if i % 2 == 0 { "even" } else { "odd" }, i as f64 * 0.7, s))
        .collect();
    let out = run_stage1(&subs(&data));

    for name in ["even", "odd"] {
        let rows: Vec<&LeaderboardRow> = out.rows.iter().filter(|r| r.name == name).collect();
        let mut max = f64::NEG_INFINITY;
        for pair in rows.windows(2) {
            assert!(pair[0].best <= pair[1].best);
        }
        for row in rows {
            max = max.max(row.score);
            assert_eq!(row.best, max);
        }
    }
}
