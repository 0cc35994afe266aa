mod cli;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod session;

use std::io::{BufReader, Write};
use std::path::Path;
use std::sync::mpsc;

use clap::Parser;

use crate::cli::{Args, Command, InputArgs, RunArgs, WatchArgs};
use crate::input::{InputError, load_submissions};
use crate::model::controls::ControlId;
use crate::model::profile::{ConfigError, DashboardProfile};
use crate::pipeline::stage6_report::{Stage6Input, write_reports};
use crate::report::json::render_view_line;
use crate::session::{ControlEvent, Session, run_event_loop, spawn_event_reader};

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose, args.quiet);
    tracing::debug!("leaderboard-dash v{}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run(args.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), RunError> {
    match command {
        Command::Run(args) => run_reports(&args),
        Command::Watch(args) => run_watch(&args),
    }
}

fn open_session(args: &InputArgs) -> Result<Session, RunError> {
    let profile = load_profile(args.config.as_deref())?;
    let table = load_submissions(&args.input)?;
    let session = Session::new(&table.submissions, profile);
    let controls = session.controls();
    tracing::info!(
        rows = session.rows().len(),
        participants = session.standings().entries.len(),
        day_range = ?[controls.day.start, controls.day.end],
        score_range = ?[controls.score.start, controls.score.end],
        "session ready"
    );
    Ok(session)
}

fn load_profile(path: Option<&Path>) -> Result<DashboardProfile, ConfigError> {
    match path {
        Some(path) => {
            let profile = DashboardProfile::load(path)?;
            tracing::info!(path = %path.display(), "loaded dashboard profile");
            Ok(profile)
        }
        None => Ok(DashboardProfile::default_v1()),
    }
}

fn run_reports(args: &RunArgs) -> Result<(), RunError> {
    let mut session = open_session(&args.input)?;

    for (control, value) in [(ControlId::Day, args.day), (ControlId::Score, args.score)] {
        if let Some(value) = value {
            session.apply(ControlEvent { control, value });
        }
    }

    let filter = session.filter();
    tracing::info!(
        day_cutoff = filter.day_cutoff,
        score_cutoff = filter.score_cutoff,
        visible = session.current().visible.len(),
        "applied filter"
    );
    if session.current().is_empty() {
        tracing::warn!("no submissions pass the filter; winners panel shows no winner");
    }

    let view = session.view();
    write_reports(
        &Stage6Input {
            view: &view,
            standings: session.standings(),
            n_submissions: session.n_submissions(),
            baseline: session.profile().baseline,
        },
        &args.out,
    )?;
    Ok(())
}

fn run_watch(args: &WatchArgs) -> Result<(), RunError> {
    let mut session = open_session(&args.input)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let initial = render_view_line(&session.view()).map_err(std::io::Error::from)?;
    writeln!(out, "{initial}")?;
    out.flush()?;

    let (tx, rx) = mpsc::channel();
    let reader = spawn_event_reader(BufReader::new(std::io::stdin()), tx);
    let applied = run_event_loop(&mut session, rx, &mut out)?;
    if reader.join().is_err() {
        tracing::warn!("control event reader panicked");
    }
    tracing::info!(events = applied, "control stream closed");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
