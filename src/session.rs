use std::io::{BufRead, Write};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;

use crate::model::controls::{ControlId, Controls, FilterState, initial_filter};
use crate::model::profile::DashboardProfile;
use crate::model::submission::Submission;
use crate::pipeline::stage1_running_best::{LeaderboardRow, run_stage1};
use crate::pipeline::stage3_standings::{Standings, run_stage3};
use crate::pipeline::stage4_filter::{Stage4Inputs, Stage4Output, run_stage4};
use crate::pipeline::stage5_view::{DashboardView, Stage5Inputs, run_stage5};
use crate::report::json::render_view_line;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlEvent {
    pub control: ControlId,
    pub value: f64,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EventError {
    #[error("unknown control: {0}")]
    UnknownControl(String),
    #[error("missing value for control {0}")]
    MissingValue(String),
    #[error("invalid value for control {control}: {value}")]
    InvalidValue { control: String, value: String },
}

/// Owns the loaded table and every derived view for one dashboard session.
#[derive(Debug)]
pub struct Session {
    profile: DashboardProfile,
    n_submissions: usize,
    rows: Vec<LeaderboardRow>,
    standings: Standings,
    controls: Controls,
    filter: FilterState,
    current: Stage4Output,
}

impl Session {
    pub fn new(submissions: &[Submission], profile: DashboardProfile) -> Self {
        let stage1 = run_stage1(submissions);
        let standings = run_stage3(&stage1.rows, &profile);
        let controls = Controls::build(submissions, &profile);
        let filter = initial_filter(&profile);
        let current = run_stage4(&Stage4Inputs {
            rows: &stage1.rows,
            standings: &standings,
            filter,
        });

        tracing::debug!(
            participants = stage1.n_participants,
            day_end = controls.day.end,
            score_start = controls.score.start,
            score_end = controls.score.end,
            "session ready"
        );

        Self {
            profile,
            n_submissions: submissions.len(),
            rows: stage1.rows,
            standings,
            controls,
            filter,
            current,
        }
    }

    pub fn profile(&self) -> &DashboardProfile {
        &self.profile
    }

    pub fn n_submissions(&self) -> usize {
        self.n_submissions
    }

    pub fn rows(&self) -> &[LeaderboardRow] {
        &self.rows
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn filter(&self) -> FilterState {
        self.filter
    }

    pub fn current(&self) -> &Stage4Output {
        &self.current
    }

    /// Moves one control onto its range and step, then recomputes the filtered view.
    pub fn apply(&mut self, event: ControlEvent) -> &Stage4Output {
        if !event.value.is_finite() {
            tracing::warn!(control = event.control.as_str(), "ignoring non-finite control value");
            return &self.current;
        }
        let value = self.controls.get(event.control).snap(event.value);
        tracing::debug!(
            control = event.control.as_str(),
            requested = event.value,
            applied = value,
            "control changed"
        );
        match event.control {
            ControlId::Day => self.filter.day_cutoff = value,
            ControlId::Score => self.filter.score_cutoff = value,
        }
        self.current = run_stage4(&Stage4Inputs {
            rows: &self.rows,
            standings: &self.standings,
            filter: self.filter,
        });
        &self.current
    }

    pub fn view(&self) -> DashboardView {
        run_stage5(&Stage5Inputs {
            rows: &self.rows,
            standings: &self.standings,
            controls: &self.controls,
            filter: self.filter,
            filtered: &self.current,
            profile: &self.profile,
        })
    }
}

/// Parses `<control> <value>`; blank lines and `#` comments yield `None`.
pub fn parse_event_line(line: &str) -> Result<Option<ControlEvent>, EventError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut parts = line.split(|c: char| c.is_whitespace() || c == '=').filter(|p| !p.is_empty());
    let Some(name) = parts.next() else {
        return Ok(None);
    };
    let control = ControlId::parse(name).ok_or_else(|| EventError::UnknownControl(name.to_string()))?;
    let raw = parts
        .next()
        .ok_or_else(|| EventError::MissingValue(name.to_string()))?;
    let value = raw
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| EventError::InvalidValue {
            control: name.to_string(),
            value: raw.to_string(),
        })?;
    Ok(Some(ControlEvent { control, value }))
}

/// Forwards parsed control events from `reader` until EOF or until the receiver hangs up.
pub fn spawn_event_reader<R>(reader: R, tx: Sender<ControlEvent>) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    std::thread::spawn(move || {
        for (idx, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    tracing::error!("failed to read control events: {err}");
                    break;
                }
            };
            match parse_event_line(&line) {
                Ok(Some(event)) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(err) => tracing::warn!(line = idx + 1, "skipping control event: {err}"),
            }
        }
    })
}

/// Single consumer: applies each event in arrival order and writes one JSON view per event.
pub fn run_event_loop<W: Write>(
    session: &mut Session,
    events: Receiver<ControlEvent>,
    out: &mut W,
) -> std::io::Result<usize> {
    let mut applied = 0usize;
    for event in events {
        session.apply(event);
        let line = render_view_line(&session.view())?;
        writeln!(out, "{line}")?;
        out.flush()?;
        applied += 1;
    }
    Ok(applied)
}

#[cfg(test)]
#[path = "../tests/src_inline/session.rs"]
mod tests;
