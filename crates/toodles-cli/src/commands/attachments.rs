//! Commands working on file attachments.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::{id_argument, parse_id};
use crate::binder::{ArgSlot, ID_CAPACITY, PATH_CAPACITY};
use crate::error::{CommandError, CommandResult};
use crate::registry::Invocation;
use crate::render;
use crate::session::{Flow, Session};

/// `attach`: asks for a todo id and a file path.
pub fn attach(session: &mut Session, _invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let mut id = ArgSlot::new(ID_CAPACITY);
    let mut path = ArgSlot::new(PATH_CAPACITY);
    id.fill(&session.console.ask("Todo Id: ")?);
    path.fill(&session.console.ask("File path: ")?);

    let todo_id = parse_id(id.as_str())?;
    if path.as_str().trim().is_empty() {
        return Err(CommandError::invalid_argument("Please provide a file path."));
    }

    let attachment = session
        .store
        .attach_file(todo_id, Path::new(path.as_str().trim()))?;
    debug!(attachment, todo_id, "attached file");
    Ok(Flow::Continue)
}

/// `delatt ID`
pub fn delete(session: &mut Session, invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let id = id_argument(invocation)?;
    session.store.delete_attachment(id)?;
    Ok(Flow::Continue)
}

/// `showatt TODO_ID`
pub fn show(session: &mut Session, invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let todo_id = id_argument(invocation)?;
    let attachments = session.store.list_attachments(todo_id)?;
    render::attachment_table(&mut session.console, &attachments)?;
    Ok(Flow::Continue)
}

/// `patt ID`: writes the raw content to the terminal.
pub fn print(session: &mut Session, invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let id = id_argument(invocation)?;
    let content = session.store.attachment_content(id)?;
    session.console.write_all(&content)?;
    writeln!(session.console)?;
    Ok(Flow::Continue)
}

/// `satt ID`: asks where to write the attachment.
pub fn save(session: &mut Session, invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let id = id_argument(invocation)?;
    let mut dest = ArgSlot::new(PATH_CAPACITY);
    dest.fill(&session.console.ask("Save path: ")?);

    session
        .store
        .save_attachment(id, Path::new(dest.as_str().trim()))?;
    Ok(Flow::Continue)
}
