//! Interactive shell.
//!
//! Reads one command per line and answers each with the re-rendered day or a
//! short message. Lines that are not a command are added as tasks.

use crate::day::DayKey;
use crate::planner::{Outcome, Planner};
use crate::render;
use crate::templates;
use std::io::{BufRead, Write};
use tera::Context;

/// Prompt printed before each line is read.
pub const PROMPT: &str = "> ";

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Switch to another day.
    Date(String),
    /// Add a task with this text.
    Add(String),
    /// Toggle the task with this on-screen number.
    Toggle(String),
    /// Delete the task with this on-screen number.
    Delete(String),
    /// Render the selected day again.
    Show,
    /// List days that have tasks.
    Days,
    /// Print the command list.
    Help,
    /// Leave the shell.
    Quit,
    /// Blank line.
    Empty,
}

/// Parse one line of input.
///
/// A command word only counts as a command when what follows it fits: a
/// single date-like word for `date`, a single number-like word for `toggle`
/// and `delete`, nothing at all for `show`, `days`, `help` and `quit`.
/// Anything else is task text, so "date night with Sam" and "done with
/// homework by 5" are added as tasks.
#[must_use]
pub fn parse_line(line: &str) -> ShellCommand {
    let line = line.trim();
    if line.is_empty() {
        return ShellCommand::Empty;
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match word.to_lowercase().as_str() {
        "add" => ShellCommand::Add(rest.to_string()),
        "date" | "day" if is_day_argument(rest) => ShellCommand::Date(rest.to_string()),
        "toggle" | "done" if is_number_argument(rest) => ShellCommand::Toggle(rest.to_string()),
        "delete" | "rm" if is_number_argument(rest) => ShellCommand::Delete(rest.to_string()),
        "show" | "ls" if rest.is_empty() => ShellCommand::Show,
        "days" if rest.is_empty() => ShellCommand::Days,
        "help" | "?" if rest.is_empty() => ShellCommand::Help,
        "quit" | "exit" | "q" if rest.is_empty() => ShellCommand::Quit,
        _ => ShellCommand::Add(line.to_string()),
    }
}

/// One word that is a relative day or starts like a date (`2026-10-19`).
/// Malformed dates still parse as a command so the error can be shown.
fn is_day_argument(arg: &str) -> bool {
    is_single_word(arg) && (DayKey::is_relative(arg) || starts_with_digit(arg))
}

/// One word that starts like a task number.
fn is_number_argument(arg: &str) -> bool {
    is_single_word(arg) && starts_with_digit(arg)
}

fn is_single_word(arg: &str) -> bool {
    !arg.is_empty() && !arg.contains(char::is_whitespace)
}

fn starts_with_digit(arg: &str) -> bool {
    arg.starts_with(|c: char| c.is_ascii_digit())
}

/// Run the shell until `quit` or end of input.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails; problems
/// with individual commands are reported in the output.
pub fn run_shell(
    planner: &mut Planner<'_>,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> std::io::Result<()> {
    writeln!(output, "{}", show(planner))?;

    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        match parse_line(&line) {
            ShellCommand::Quit => break,
            ShellCommand::Empty => continue,
            command => writeln!(output, "{}", execute(planner, command))?,
        }
    }

    Ok(())
}

/// Apply one command and describe the result.
fn execute(planner: &mut Planner<'_>, command: ShellCommand) -> String {
    match command {
        ShellCommand::Date(arg) => match planner.resolve_day(&arg) {
            Ok(day) => {
                planner.select(day);
                show(planner)
            }
            Err(e) => e.to_string(),
        },
        ShellCommand::Add(text) => {
            planner.set_input(&text);
            let result = planner.submit_input();
            describe(planner, result, &text)
        }
        ShellCommand::Toggle(arg) => match parse_number(&arg) {
            Ok(number) => {
                let result =
                    number.checked_sub(1).map_or(Ok(Outcome::Ignored), |i| planner.toggle(i));
                describe(planner, result, &arg)
            }
            Err(message) => message,
        },
        ShellCommand::Delete(arg) => match parse_number(&arg) {
            Ok(number) => {
                let result =
                    number.checked_sub(1).map_or(Ok(Outcome::Ignored), |i| planner.delete_task(i));
                describe(planner, result, &arg)
            }
            Err(message) => message,
        },
        ShellCommand::Show => {
            planner.refresh();
            show(planner)
        }
        ShellCommand::Days => planner
            .day_summaries()
            .and_then(|summaries| render::days_to_text(&summaries))
            .unwrap_or_else(|e| format!("Error: {e}")),
        ShellCommand::Help => {
            let mut ctx = Context::new();
            ctx.insert("label", &planner.view().label);
            templates::render(templates::SHELL_HELP, &ctx).unwrap_or_else(|e| format!("Error: {e}"))
        }
        ShellCommand::Quit | ShellCommand::Empty => String::new(),
    }
}

fn parse_number(arg: &str) -> Result<usize, String> {
    arg.trim().parse().map_err(|_| format!("Not a task number: '{}'", arg.trim()))
}

fn show(planner: &Planner<'_>) -> String {
    render::to_text(planner.view()).unwrap_or_else(|e| format!("Error: {e}"))
}

fn describe(planner: &Planner<'_>, result: crate::error::Result<Outcome>, target: &str) -> String {
    match result {
        Ok(Outcome::Applied) => show(planner),
        Ok(Outcome::Rejected(notice)) => notice.to_string(),
        Ok(Outcome::Ignored) => {
            format!("No task {} on {}.", target.trim(), planner.view().label)
        }
        Err(e) => format!("Error saving tasks: {e}"),
    }
}
