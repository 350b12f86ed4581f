//! Session and application commands.

use std::io::Write;

use colored::Colorize;
use tracing::debug;

use crate::binder::HISTORY_INDEX_CAPACITY;
use crate::error::{CommandError, CommandResult};
use crate::registry::Invocation;
use crate::render;
use crate::session::{Flow, Session};

/// `help`
pub fn help(session: &mut Session, _invocation: &Invocation<'_>) -> CommandResult<Flow> {
    render::help(&mut session.console)?;
    Ok(Flow::Continue)
}

/// `exit` / `quit`
pub fn exit(_session: &mut Session, _invocation: &Invocation<'_>) -> CommandResult<Flow> {
    Ok(Flow::Exit)
}

/// `clear`: clear screen and home the cursor.
pub fn clear(session: &mut Session, _invocation: &Invocation<'_>) -> CommandResult<Flow> {
    write!(session.console, "\x1b[2J\x1b[H")?;
    session.console.flush()?;
    Ok(Flow::Continue)
}

/// `history`
pub fn history(session: &mut Session, _invocation: &Invocation<'_>) -> CommandResult<Flow> {
    for (index, line) in session.history.entries() {
        writeln!(session.console, "{} {line}", format!("[{index}]").cyan())?;
    }
    Ok(Flow::Continue)
}

/// `! INDEX`: run the line stored at `INDEX` again.
pub fn replay(session: &mut Session, invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let slot = invocation.single_arg(HISTORY_INDEX_CAPACITY)?;
    let index: i64 = slot
        .as_str()
        .trim()
        .parse()
        .map_err(|_| CommandError::invalid_argument("Please provide a valid history index."))?;

    let Some(line) = session.history.get(index)?.map(str::to_owned) else {
        debug!(index, "history slot is empty");
        return Ok(Flow::Continue);
    };
    session.replay(&line)
}

/// `version`
pub fn version(session: &mut Session, _invocation: &Invocation<'_>) -> CommandResult<Flow> {
    writeln!(session.console, "{}", render::version_line())?;
    Ok(Flow::Continue)
}

/// `env`
pub fn env(session: &mut Session, _invocation: &Invocation<'_>) -> CommandResult<Flow> {
    render::environment(&mut session.console, &session.env)?;
    Ok(Flow::Continue)
}
