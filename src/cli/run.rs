//! Command execution for the CLI.
//!
//! This module handles running CLI commands and producing output.

use crate::action_log::ActionLog;
use crate::cli::shell::run_shell;
use crate::cli::Command;
use crate::config::{self, Backend, Config};
use crate::day::DayKey;
use crate::error::Result;
use crate::planner::{Outcome, Planner};
use crate::render;
use crate::templates;
use crate::tasks::TaskStore;
use crate::traits::Clock;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

/// Where and when the CLI runs.
pub struct Environment<'a> {
    /// Directory holding the config file and, by default, the task data.
    pub base_dir: PathBuf,
    /// Source of today's date.
    pub clock: &'a dyn Clock,
    /// Use an in-memory store regardless of config.
    pub ephemeral: bool,
}

/// An opened store plus the optional action log.
struct Session {
    store: Box<dyn TaskStore>,
    action_log: Option<ActionLog>,
}

impl Session {
    fn open(env: &Environment<'_>) -> Result<Self> {
        let mut config = Config::load_from(&env.base_dir)?.unwrap_or_default();
        if env.ephemeral {
            config.backend = Backend::Memory;
        }
        if let Some(dir) = &config.templates_dir {
            templates::init_templates(Some(dir.as_path()))?;
        }
        let store = config.open_store(&env.base_dir)?;
        let action_log = ActionLog::from_config(&config, &env.base_dir);
        Ok(Self { store, action_log })
    }

    fn planner<'a>(&'a self, clock: &'a dyn Clock, day: DayKey) -> Planner<'a> {
        Planner::starting_on(self.store.as_ref(), clock, day).with_action_log(self.action_log.clone())
    }
}

/// Run a CLI command.
///
/// `input` and `output` are only used by the interactive shell; every other
/// command reports through the returned [`CliOutput`].
pub fn run(
    command: Command,
    env: &Environment<'_>,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> CliOutput {
    match command {
        Command::Version => run_version(),
        Command::EnsureConfig => run_ensure_config(env),
        Command::Show { date } => {
            with_session_on(env, date.as_deref(), |session, day| run_show(env, session, day))
        }
        Command::Add { text, date } => with_session_on(env, date.as_deref(), |session, day| {
            run_add(env, session, day, &text.join(" "))
        }),
        Command::Toggle { number, date } => {
            with_session_on(env, date.as_deref(), |session, day| {
                run_indexed(env, session, day, number, |planner, index| planner.toggle(index))
            })
        }
        Command::Delete { number, date } => {
            with_session_on(env, date.as_deref(), |session, day| {
                run_indexed(env, session, day, number, |planner, index| {
                    planner.delete_task(index)
                })
            })
        }
        Command::Days => with_session(env, |session| run_days(env, session)),
        Command::Export { date } => {
            with_session_on(env, date.as_deref(), |session, day| run_export(session, day))
        }
        Command::Shell { date } => with_session_on(env, date.as_deref(), |session, day| {
            let mut planner = session.planner(env.clock, day);
            match run_shell(&mut planner, input, output) {
                Ok(()) => CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![], stderr: vec![] },
                Err(e) => error_output(format!("Shell I/O error: {e}")),
            }
        }),
    }
}

/// Load the config, open the configured store, and run `f` with it.
fn with_session(env: &Environment<'_>, f: impl FnOnce(&Session) -> CliOutput) -> CliOutput {
    match Session::open(env) {
        Ok(session) => f(&session),
        Err(e) => error_output(format!("Error opening daybook: {e}")),
    }
}

/// Resolve the `--date` option (today when absent), open the store, and run `f`.
fn with_session_on(
    env: &Environment<'_>,
    date: Option<&str>,
    f: impl FnOnce(&Session, DayKey) -> CliOutput,
) -> CliOutput {
    let day = match resolve_date(date, env.clock) {
        Ok(day) => day,
        Err(e) => return error_output(e.to_string()),
    };
    with_session(env, |session| f(session, day))
}

fn resolve_date(date: Option<&str>, clock: &dyn Clock) -> Result<DayKey> {
    match date {
        None => Ok(DayKey::today(clock)),
        Some(s) => Ok(DayKey::resolve(s, clock)?),
    }
}

// === Utility Commands ===

fn run_version() -> CliOutput {
    success_output(format!("daybook v{}", crate::VERSION))
}

fn run_ensure_config(env: &Environment<'_>) -> CliOutput {
    match config::ensure_config_in(&env.base_dir) {
        Ok(config) => {
            let messages = vec![
                format!("Config ensured at {}", crate::paths::config_path(&env.base_dir).display()),
                format!("  backend: {:?}", config.backend),
                format!("  storage: {}", config.storage_dir(&env.base_dir).display()),
                format!("  debug_logging: {}", config.debug_logging),
            ];
            CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![], stderr: messages }
        }
        Err(e) => error_output(format!("Error ensuring config: {e}")),
    }
}

// === Day Commands ===

fn run_show(env: &Environment<'_>, session: &Session, day: DayKey) -> CliOutput {
    let planner = session.planner(env.clock, day);
    view_output(&planner)
}

fn run_add(env: &Environment<'_>, session: &Session, day: DayKey, text: &str) -> CliOutput {
    let mut planner = session.planner(env.clock, day);
    planner.set_input(text);
    let result = planner.submit_input();
    outcome_output(&planner, result, "")
}

fn run_indexed(
    env: &Environment<'_>,
    session: &Session,
    day: DayKey,
    number: usize,
    action: impl FnOnce(&mut Planner<'_>, usize) -> Result<Outcome>,
) -> CliOutput {
    let mut planner = session.planner(env.clock, day);
    let result = match number.checked_sub(1) {
        Some(index) => action(&mut planner, index),
        None => Ok(Outcome::Ignored),
    };
    outcome_output(&planner, result, &number.to_string())
}

fn run_days(env: &Environment<'_>, session: &Session) -> CliOutput {
    let today = DayKey::today(env.clock);
    match render::summarize_days(session.store.as_ref(), today)
        .and_then(|summaries| render::days_to_text(&summaries))
    {
        Ok(text) => success_output(text),
        Err(e) => error_output(format!("Error listing days: {e}")),
    }
}

fn run_export(session: &Session, day: DayKey) -> CliOutput {
    let tasks = session.store.list(day);
    match serde_json::to_string_pretty(&tasks) {
        Ok(json) => success_output(json),
        Err(e) => error_output(e.to_string()),
    }
}

// === Output Helpers ===

fn view_output(planner: &Planner<'_>) -> CliOutput {
    match render::to_text(planner.view()) {
        Ok(text) => success_output(text),
        Err(e) => error_output(format!("Error rendering tasks: {e}")),
    }
}

fn outcome_output(planner: &Planner<'_>, result: Result<Outcome>, target: &str) -> CliOutput {
    match result {
        Ok(Outcome::Applied) => view_output(planner),
        Ok(Outcome::Rejected(notice)) => error_output(notice.to_string()),
        Ok(Outcome::Ignored) => {
            error_output(format!("No task {target} on {}.", planner.view().label))
        }
        Err(e) => error_output(format!("Error saving tasks: {e}")),
    }
}

fn success_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![message], stderr: vec![] }
}

fn error_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message] }
}
