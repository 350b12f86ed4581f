//! Flag-driven mode used when toodles is started with arguments.
//!
//! ```text
//! toodles -c add -t "Buy milk"
//! toodles -c erase
//! toodles -h
//! ```

use std::ffi::OsString;
use std::io::Write;

use clap::Parser;
use toodles_core::TodoStore;
use tracing::{debug, info, warn};

use crate::render;

/// Exit status for success and help output.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status for every failure.
pub const EXIT_FAILURE: u8 = 1;

/// Arguments accepted in non-interactive mode.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "toodles",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Command to execute (`add` or `erase`)
    #[arg(short = 'c', value_name = "COMMAND")]
    pub command: Option<String>,

    /// Title for a todo entry
    #[arg(short = 't', value_name = "TITLE")]
    pub title: Option<String>,

    /// Print help for non-interactive mode
    #[arg(short = 'h')]
    pub help: bool,
}

/// Commands available without a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchCommand {
    /// Create a todo from `-t`.
    Add,
    /// Delete all data without confirmation.
    Erase,
}

impl BatchCommand {
    /// Parse the `-c` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "add" => Some(Self::Add),
            "erase" => Some(Self::Erase),
            _ => None,
        }
    }
}

fn fail(out: &mut dyn Write, message: &dyn std::fmt::Display, with_help: bool) -> u8 {
    if let Err(err) = writeln!(out, "{}", render::error_line(message)) {
        warn!("failed to print error: {err}");
    }
    if with_help {
        render::non_interactive_help(out)
            .unwrap_or_else(|err| warn!("failed to print help: {err}"));
    }
    EXIT_FAILURE
}

/// Run one command described by `args` (program name first) and return the
/// exit status.
pub fn run<I, T>(args: I, store: &mut dyn TodoStore, out: &mut dyn Write) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let rendered = err.to_string();
            let message = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string();
            debug!(kind = ?err.kind(), "argument parsing failed");
            return fail(out, &message, true);
        },
    };

    if cli.help {
        return match render::non_interactive_help(out) {
            Ok(()) => EXIT_SUCCESS,
            Err(err) => {
                warn!("failed to print help: {err}");
                EXIT_FAILURE
            },
        };
    }

    let Some(command) = cli.command.as_deref().and_then(BatchCommand::parse) else {
        return fail(out, &"Please provide a valid command.", true);
    };

    info!(?command, "running non-interactive command");
    let result = match command {
        BatchCommand::Add => store
            .create_todo(cli.title.as_deref().unwrap_or_default(), None)
            .map(|_| ()),
        BatchCommand::Erase => store.erase_all(),
    };

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => fail(out, &err, false),
    }
}
