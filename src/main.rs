//! CLI binary for `daybook`.
//!
//! This binary is a thin wrapper that parses arguments and delegates to the
//! library.

use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::Parser;
use daybook::cli::{Cli, Environment};
use daybook::error::Error;
use daybook::paths;
use daybook::traits::SystemClock;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let Some(base_dir) = paths::data_dir() else {
        eprintln!("Error: {}", Error::NoHomeDir);
        return ExitCode::from(1);
    };

    let clock = SystemClock;
    let env = Environment { base_dir, clock: &clock, ephemeral: cli.ephemeral };

    // Only lock stdin for commands that read it
    let stdin = io::stdin();
    let mut empty = io::empty();
    let mut locked;
    let input: &mut dyn BufRead = if cli.command.needs_stdin() {
        locked = stdin.lock();
        &mut locked
    } else {
        &mut empty
    };

    let stdout = io::stdout();
    let output = daybook::cli::run(cli.command, &env, input, &mut stdout.lock());

    for msg in output.stdout {
        println!("{msg}");
    }
    for msg in output.stderr {
        eprintln!("{msg}");
    }

    output.exit_code
}
