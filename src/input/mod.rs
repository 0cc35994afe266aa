use std::path::Path;

pub mod reader;
pub mod table;

use reader::{Delimiter, detect_delimiter, open_maybe_gz};
use table::resolve_columns;

use crate::model::submission::Submission;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("missing column: {0}")]
    MissingColumn(String),
    #[error("parse error at line {line}: {msg}")]
    Malformed { line: usize, msg: String },
    #[error("submissions table is empty")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct SubmissionTable {
    pub submissions: Vec<Submission>,
}

pub fn load_submissions(path: &Path) -> Result<SubmissionTable, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(format!(
            "submissions file not found: {}",
            path.display()
        )));
    }
    let delimiter = detect_delimiter(path);
    let reader = open_maybe_gz(path)?;
    let table = read_submissions(reader, delimiter)?;

    tracing::info!(
        path = %path.display(),
        rows = table.submissions.len(),
        "loaded submissions"
    );
    Ok(table)
}

pub fn read_submissions(
    reader: Box<dyn std::io::BufRead>,
    delimiter: Delimiter,
) -> Result<SubmissionTable, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = csv_reader.headers()?.clone();
    if header.iter().all(|h| h.trim().is_empty()) {
        return Err(InputError::Empty);
    }
    let columns = resolve_columns(&header)?;
    tracing::debug!(
        name_col = %&header[columns.name],
        days_col = %&header[columns.days],
        score_col = %&header[columns.score],
        "resolved submission columns"
    );

    let mut submissions = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let line = record.position().map_or(0, |p| p.line() as usize);
        submissions.push(columns.extract(&record, line, submissions.len())?);
    }

    if submissions.is_empty() {
        return Err(InputError::Empty);
    }

    Ok(SubmissionTable { submissions })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
