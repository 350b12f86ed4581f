//! toodles - a small, local todo manager for the terminal.
//!
//! Started without arguments toodles runs an interactive session: it prompts
//! for a line, resolves the leading token against the command registry, lets
//! the handler bind its arguments and talk to the store, and records the line
//! in the session history. Started with arguments it runs a single
//! `-c add|erase` command and exits.

use std::io;
use std::process::ExitCode;

use toodles_core::{AppEnv, Config, SqliteStore};
use tracing::error;

pub mod binder;
pub mod commands;
pub mod error;
pub mod history;
pub mod logging;
pub mod noninteractive;
pub mod registry;
pub mod render;
pub mod session;

#[cfg(test)]
mod test_support;

use crate::error::CommandError;
use crate::session::{Console, Session};

fn critical(err: impl Into<CommandError>) -> ExitCode {
    let err = err.into();
    error!(kind = %err.kind, "startup failed");
    println!("{}", render::error_line(&err));
    ExitCode::FAILURE
}

/// Run toodles with the process's arguments and standard streams.
pub fn run() -> ExitCode {
    let env = match AppEnv::init() {
        Ok(env) => env,
        Err(err) => return critical(err),
    };
    let config = match Config::load(&env.config_file()) {
        Ok(config) => config,
        Err(err) => return critical(err),
    };
    let mut store = match SqliteStore::open(&env.storage_file()) {
        Ok(store) => store,
        Err(err) => return critical(err),
    };

    if std::env::args_os().len() > 1 {
        let code = noninteractive::run(std::env::args_os(), &mut store, &mut io::stdout());
        return ExitCode::from(code);
    }

    let mut session = Session::new(Box::new(store), env, config, Console::stdio());
    match session.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => critical(err),
    }
}
