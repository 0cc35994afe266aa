use csv::StringRecord;

use crate::input::InputError;
use crate::model::submission::Submission;

const NAME_ALIASES: &[&str] = &["name", "participant", "team", "team_name"];
const DAYS_ALIASES: &[&str] = &["days_from_start", "elapsed_days", "days"];
const SCORE_ALIASES: &[&str] = &["auc", "score", "public_score"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: usize,
    pub days: usize,
    pub score: usize,
}

impl ColumnLayout {
    fn width(&self) -> usize {
        self.name.max(self.days).max(self.score) + 1
    }

    pub fn extract(
        &self,
        record: &StringRecord,
        line: usize,
        index: usize,
    ) -> Result<Submission, InputError> {
        if record.len() < self.width() {
            return Err(InputError::Malformed {
                line,
                msg: format!("expected at least {} fields, found {}", self.width(), record.len()),
            });
        }
        let field = |idx: usize| record.get(idx).unwrap_or_default();

        let name = field(self.name).trim();
        if name.is_empty() {
            return Err(InputError::Malformed {
                line,
                msg: "empty participant name".to_string(),
            });
        }

        let days_from_start = parse_number(field(self.days), line, "days from start")?;
        if days_from_start < 0.0 {
            return Err(InputError::Malformed {
                line,
                msg: format!("negative days from start: {days_from_start}"),
            });
        }
        let score = parse_number(field(self.score), line, "score")?;

        Ok(Submission::new(name, days_from_start, score, index))
    }
}

fn parse_number(raw: &str, line: usize, what: &str) -> Result<f64, InputError> {
    let value = raw.trim().parse::<f64>().map_err(|_| InputError::Malformed {
        line,
        msg: format!("invalid {what}: {:?}", raw.trim()),
    })?;
    if !value.is_finite() {
        return Err(InputError::Malformed {
            line,
            msg: format!("non-finite {what}: {}", raw.trim()),
        });
    }
    Ok(value)
}

pub fn resolve_columns(header: &StringRecord) -> Result<ColumnLayout, InputError> {
    let lower: Vec<String> = header
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_ascii_lowercase())
        .collect();
    let find = |aliases: &[&str], label: &str| -> Result<usize, InputError> {
        for alias in aliases {
            if let Some(idx) = lower.iter().position(|h| h == alias) {
                return Ok(idx);
            }
        }
        Err(InputError::MissingColumn(format!(
            "{label} (accepted: {})",
            aliases.join("|")
        )))
    };

    Ok(ColumnLayout {
        name: find(NAME_ALIASES, "participant name")?,
        days: find(DAYS_ALIASES, "days from start")?,
        score: find(SCORE_ALIASES, "score")?,
    })
}
