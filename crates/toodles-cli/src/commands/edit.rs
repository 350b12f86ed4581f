//! `edit`: change a todo's details in an external editor.

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, anyhow};
use tracing::{debug, warn};

use super::id_argument;
use crate::binder::{ArgSlot, DETAIL_CAPACITY};
use crate::error::{CommandError, CommandResult};
use crate::registry::Invocation;
use crate::session::{Flow, Session};

/// Run `command_line` with `file` appended as its last argument.
///
/// The command line is split on whitespace so editors can take flags
/// (`code --wait`).
fn run_editor(command_line: &str, file: &Path) -> CommandResult<()> {
    let mut parts = command_line.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| CommandError::io(anyhow!("No editor configured.")))?;

    debug!(program, file = %file.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(file)
        .status()
        .map_err(|e| CommandError::io(anyhow!(e).context(format!("Error with {program}."))))?;

    if !status.success() {
        return Err(CommandError::io(anyhow!("Error with {program}.")));
    }
    Ok(())
}

/// `edit ID`
pub fn edit(session: &mut Session, invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let id = id_argument(invocation)?;
    let current = session.store.details(id)?;

    let temp = session.env.app_dir().join(&session.config.editor.temp_file);
    fs::write(&temp, current)
        .context("Error writing temporary detail file.")
        .map_err(CommandError::io)?;

    let edited = run_editor(&session.config.editor.resolve_command(), &temp).and_then(|()| {
        fs::read_to_string(&temp)
            .context("Error reading temporary detail file.")
            .map_err(CommandError::io)
    });

    if let Err(err) = fs::remove_file(&temp) {
        warn!(file = %temp.display(), "failed to remove temporary detail file: {err}");
    }

    let mut details = ArgSlot::new(DETAIL_CAPACITY);
    details.fill(&edited?);
    session.store.save_details(id, details.as_str())?;
    Ok(Flow::Continue)
}
