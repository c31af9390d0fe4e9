//! Command-line interface for daybook.
//!
//! One-shot commands (`show`, `add`, `toggle`, `delete`, ...) act on a single
//! day and print it, and `shell` keeps a day selected across many actions.

mod run;
mod shell;


pub use run::{run, CliOutput, Environment};
pub use shell::{parse_line, run_shell, ShellCommand};

use clap::{Parser, Subcommand};

/// Daybook - a to-do list for each day.
///
/// Dates may be written as YYYY-MM-DD, YYYY/MM/DD, or as `today`,
/// `yesterday` or `tomorrow`. Without --date, commands act on today.
#[derive(Parser, Debug)]
#[command(name = "daybook")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Keep tasks in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the tasks for a day.
    Show {
        /// Day to show
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Add a task to a day.
    ///
    /// Words are joined with single spaces, so quoting is optional.
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Day to add to
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Mark a task done, or not done if it already is.
    Toggle {
        /// Task number as shown by `show`
        number: usize,

        /// Day the task is on
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a task.
    Delete {
        /// Task number as shown by `show`
        number: usize,

        /// Day the task is on
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List the days that have tasks.
    Days,

    /// Print a day's stored task list as JSON.
    Export {
        /// Day to export
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Interactive shell: pick a day, then add, toggle and delete tasks.
    Shell {
        /// Day to start on
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Ensure the config file exists (create with defaults if not).
    #[command(name = "ensure-config")]
    EnsureConfig,

    /// Show version information.
    Version,
}

impl Command {
    /// Returns true if this command reads from stdin.
    #[must_use]
    pub const fn needs_stdin(&self) -> bool {
        matches!(self, Self::Shell { .. })
    }
}
