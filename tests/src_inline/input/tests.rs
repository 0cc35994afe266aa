use std::fs::{self, File};
use std::io::{BufReader, Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::reader::{Delimiter, detect_delimiter};
use super::table::resolve_columns;
use super::{InputError, load_submissions, read_submissions};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("leaderboard_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

fn read_str(contents: &str, delimiter: Delimiter) -> Result<super::SubmissionTable, InputError> {
    let reader = Box::new(BufReader::new(Cursor::new(contents.as_bytes().to_vec())));
    read_submissions(reader, delimiter)
}

#[test]
fn test_load_csv_with_extra_columns() {
    let dir = make_temp_dir();
    let path = dir.join("submissions.csv");
    write_file(
        &path,
        ",name,days_from_start,auc,team_size\n0,A,0.0,0.80,2\n1,A,2.5,0.85,2\n2,B,1.25,0.90,1\n",
    );

    let table = load_submissions(&path).unwrap();
    assert_eq!(table.submissions.len(), 3);
    let b = &table.submissions[2];
    assert_eq!(b.name, "B");
    assert_eq!(b.days_from_start, 1.25);
    assert_eq!(b.score, 0.90);
    assert_eq!(b.index, 2);
}

#[test]
fn test_load_gzipped_tsv() {
    let dir = make_temp_dir();
    let path = dir.join("submissions.tsv.gz");
    write_gz(&path, "name\tdays_from_start\tscore\nTeam X\t3.0\t0.7\n");

    let table = load_submissions(&path).unwrap();
    assert_eq!(table.submissions.len(), 1);
    assert_eq!(table.submissions[0].name, "Team X");
    assert_eq!(table.submissions[0].score, 0.7);
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = make_temp_dir();
    let err = load_submissions(&dir.join("nope.csv")).unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));
}

#[test]
fn test_missing_column() {
    let err = read_str("name,days_from_start\nA,1\n", Delimiter::Comma).unwrap_err();
    match err {
        InputError::MissingColumn(msg) => assert!(msg.contains("score")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_rows_report_line() {
    let err = read_str("name,days_from_start,auc\nA,0,0.8\nB,abc,0.9\n", Delimiter::Comma)
        .unwrap_err();
    match err {
        InputError::Malformed { line, .. } => assert_eq!(line, 3),
        other => panic!("unexpected error: {other}"),
    }

    let err = read_str("name,days_from_start,auc\nA,-1,0.8\n", Delimiter::Comma).unwrap_err();
    assert!(matches!(err, InputError::Malformed { line: 2, .. }));

    let err = read_str("name,days_from_start,auc\nA,1,NaN\n", Delimiter::Comma).unwrap_err();
    assert!(matches!(err, InputError::Malformed { line: 2, .. }));

    let err = read_str("name,days_from_start,auc\nA,1\n", Delimiter::Comma).unwrap_err();
    assert!(matches!(err, InputError::Malformed { line: 2, .. }));
}

#[test]
fn test_empty_tables() {
    assert!(matches!(read_str("", Delimiter::Comma), Err(InputError::Empty)));
    assert!(matches!(
        read_str("name,days_from_start,auc\n\n", Delimiter::Comma),
        Err(InputError::Empty)
    ));
}

#[test]
fn test_bom_and_crlf() {
    let table = read_str(
        "\u{feff}Name,Days_From_Start,AUC\r\nA,0,0.5\r\n",
        Delimiter::Comma,
    )
    .unwrap();
    assert_eq!(table.submissions[0].name, "A");
    assert_eq!(table.submissions[0].score, 0.5);
}

#[test]
fn test_quoted_fields() {
    let table = read_str(
        "name,days_from_start,auc\n\"Team\nAlpha\",0.5,0.8\n\"Smith, J.\",1.0,0.9\n\"say \"\"hi\"\"\",2.0,0.7\n",
        Delimiter::Comma,
    )
    .unwrap();
    let names: Vec<&str> = table.submissions.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Team\nAlpha", "Smith, J.", "say \"hi\""]);
    assert_eq!(table.submissions[1].score, 0.9);
}

#[test]
fn test_line_numbers_follow_multiline_records() {
    let err = read_str(
        "name,days_from_start,auc\n\"Team\nAlpha\",0.5,0.8\nB,oops,0.9\n",
        Delimiter::Comma,
    )
    .unwrap_err();
    assert!(matches!(err, InputError::Malformed { line: 4, .. }));
}

#[test]
fn test_tab_delimited() {
    let table = read_str("name\tdays_from_start\tauc\nA, B\t1.5\t0.6\n", Delimiter::Tab).unwrap();
    assert_eq!(table.submissions[0].name, "A, B");
    assert_eq!(table.submissions[0].days_from_start, 1.5);
}

#[test]
fn test_resolve_column_aliases() {
    let header = csv::StringRecord::from(vec!["team", "elapsed_days", "public_score"]);
    let layout = resolve_columns(&header).unwrap();
    assert_eq!((layout.name, layout.days, layout.score), (0, 1, 2));
}

#[test]
fn test_detect_delimiter() {
    assert_eq!(detect_delimiter(Path::new("a.csv")), Delimiter::Comma);
    assert_eq!(detect_delimiter(Path::new("a.csv.gz")), Delimiter::Comma);
    assert_eq!(detect_delimiter(Path::new("a.TSV")), Delimiter::Tab);
    assert_eq!(detect_delimiter(Path::new("a.tsv.gz")), Delimiter::Tab);
}
