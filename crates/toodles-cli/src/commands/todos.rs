//! Commands working on todo entries.

use std::io::Write;
use std::slice;

use colored::Colorize;
use toodles_core::{ListFilter, TodoStore};
use tracing::{debug, info};

use super::id_argument;
use crate::binder::{
    ArgSlot, DETAIL_CAPACITY, LIST_OPTION_CAPACITY, SEARCH_CAPACITY, TITLE_CAPACITY,
    YES_NO_CAPACITY,
};
use crate::error::CommandResult;
use crate::registry::Invocation;
use crate::render;
use crate::session::{Flow, Session};

/// `add [TITLE]`: without a title, asks for title and details.
pub fn add(session: &mut Session, invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let mut title = ArgSlot::new(TITLE_CAPACITY);
    let mut details = ArgSlot::new(DETAIL_CAPACITY);

    if invocation.bind_optional(slice::from_mut(&mut title)) == 0 {
        let answer = session.console.ask("Title: ")?;
        title.fill(&answer);
        let answer = session.console.ask("Details (can be empty): ")?;
        details.fill(&answer);
    }

    let details = Some(details.as_str()).filter(|d| !d.is_empty());
    let id = session.store.create_todo(title.as_str(), details)?;
    debug!(id, "added todo");
    Ok(Flow::Continue)
}

/// `remove ID`
pub fn remove(session: &mut Session, invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let id = id_argument(invocation)?;
    session.store.delete_todo(id)?;
    Ok(Flow::Continue)
}

/// `detail ID`
pub fn detail(session: &mut Session, invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let id = id_argument(invocation)?;
    let details = session.store.details(id)?;
    writeln!(session.console, "{details}")?;
    Ok(Flow::Continue)
}

/// `list [all|done|open]`
pub fn list(session: &mut Session, invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let mut option = ArgSlot::new(LIST_OPTION_CAPACITY);
    invocation.bind_optional(slice::from_mut(&mut option));

    let filter = ListFilter::from_keyword(option.as_str());
    let todos = session.store.list_todos(filter)?;
    render::todo_table(&mut session.console, &todos)?;
    Ok(Flow::Continue)
}

/// `search EXPR`: todos whose title contains `EXPR`.
pub fn search(session: &mut Session, invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let needle = invocation.single_arg(SEARCH_CAPACITY)?;
    let todos = session.store.search_by_title(needle.as_str())?;
    render::todo_table(&mut session.console, &todos)?;
    Ok(Flow::Continue)
}

/// `done ID`
pub fn done(session: &mut Session, invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let id = id_argument(invocation)?;
    session.store.set_done(id, true)?;
    Ok(Flow::Continue)
}

/// `open ID`
pub fn open(session: &mut Session, invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let id = id_argument(invocation)?;
    session.store.set_done(id, false)?;
    Ok(Flow::Continue)
}

/// Result of [`execute_erase`].
#[derive(Debug, PartialEq, Eq)]
pub enum EraseOutcome {
    /// The user did not confirm.
    Cancelled,
    /// All todos and attachments were deleted.
    Erased,
}

/// Erase everything after `confirm` agrees.
///
/// `confirm` receives the writer so it can print its question there.
pub fn execute_erase<S, W, C>(
    store: &mut S,
    writer: &mut W,
    confirm: C,
) -> CommandResult<EraseOutcome>
where
    S: TodoStore + ?Sized,
    W: Write,
    C: FnOnce(&mut W) -> CommandResult<bool>,
{
    if !confirm(writer)? {
        writeln!(writer, "Cancel")?;
        return Ok(EraseOutcome::Cancelled);
    }

    store.erase_all()?;
    writeln!(writer, "Done")?;
    Ok(EraseOutcome::Erased)
}

/// `erase`: delete all data after a `y` confirmation.
pub fn erase(session: &mut Session, _invocation: &Invocation<'_>) -> CommandResult<Flow> {
    let outcome = execute_erase(session.store.as_mut(), &mut session.console, |console| {
        let prompt = "Do you really want to erase all data? [y,n]: ".yellow().to_string();
        let mut answer = ArgSlot::new(YES_NO_CAPACITY);
        answer.fill(&console.ask(&prompt)?);
        Ok(answer.as_str() == "y")
    })?;

    if outcome == EraseOutcome::Erased {
        info!("erased all todos and attachments");
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::ScriptedSession;
    use toodles_core::SqliteStore;

    #[test]
    fn add_without_title_prompts_for_title_and_details() {
        let mut s = ScriptedSession::new("Water plants\nbalcony and kitchen\n");
        s.run_line("add");

        let output = s.take_output();
        assert!(output.contains("Title: "));
        assert!(output.contains("Details (can be empty): "));

        let todos = s.session.store.list_todos(ListFilter::All).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "Water plants");
        assert_eq!(todos[0].details.as_deref(), Some("balcony and kitchen"));
    }

    #[test]
    fn add_with_empty_prompted_title_fails() {
        let mut s = ScriptedSession::new("\n\n");
        let err = s.invoke("add").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert_eq!(err.to_string(), "Please provide a title.");
    }

    #[test]
    fn add_truncates_long_titles() {
        let mut s = ScriptedSession::new("");
        s.run_line(&format!("add {}", "t".repeat(200)));

        let todos = s.session.store.list_todos(ListFilter::All).unwrap();
        assert_eq!(todos[0].title.len(), TITLE_CAPACITY - 1);
    }

    #[test]
    fn list_filters_by_option() {
        let mut s = ScriptedSession::new("");
        s.run_line("add first");
        s.run_line("add second");
        s.run_line("done 2");
        s.take_output();

        s.run_line("list open");
        let open = s.take_output();
        assert!(open.contains("first"));
        assert!(!open.contains("second"));

        s.run_line("list bogus");
        let all = s.take_output();
        assert!(all.contains("first") && all.contains("second"));
    }

    #[test]
    fn open_reverts_done() {
        let mut s = ScriptedSession::new("");
        s.run_line("add task");
        s.run_line("done 1");
        s.run_line("open 1");

        let todos = s.session.store.list_todos(ListFilter::Done).unwrap();
        assert!(todos.is_empty());
    }

    #[test]
    fn search_and_detail_print_results() {
        let mut s = ScriptedSession::new("");
        s.run_line("add Buy milk");
        s.run_line("add Call mom");
        s.session.store.save_details(1, "two liters").unwrap();
        s.take_output();

        s.run_line("search milk");
        let hits = s.take_output();
        assert!(hits.contains("Buy milk"));
        assert!(!hits.contains("Call mom"));

        s.run_line("d 1");
        assert_eq!(s.take_output(), "two liters\n");
    }

    #[test]
    fn remove_deletes_entry() {
        let mut s = ScriptedSession::new("");
        s.run_line("add temp");
        s.run_line("r 1");

        assert!(s.session.store.list_todos(ListFilter::All).unwrap().is_empty());
        assert!(s.invoke("remove 1").is_err());
    }

    #[test]
    fn remove_rejects_non_numeric_id() {
        let mut s = ScriptedSession::new("");
        let err = s.invoke("remove abc").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn erase_is_cancelled_without_y() {
        let mut s = ScriptedSession::new("yes\n");
        s.run_line("add keep me");
        s.run_line("erase");

        assert!(s.take_output().contains("Cancel"));
        assert_eq!(s.session.store.list_todos(ListFilter::All).unwrap().len(), 1);
    }

    #[test]
    fn execute_erase_honours_confirmation() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.create_todo("a", None).unwrap();
        let mut output = Vec::new();

        let outcome = execute_erase(&mut store, &mut output, |_| Ok(false)).unwrap();
        assert_eq!(outcome, EraseOutcome::Cancelled);
        assert_eq!(store.list_todos(ListFilter::All).unwrap().len(), 1);

        let outcome = execute_erase(&mut store, &mut output, |_| Ok(true)).unwrap();
        assert_eq!(outcome, EraseOutcome::Erased);
        assert!(store.list_todos(ListFilter::All).unwrap().is_empty());

        let rendered = String::from_utf8(output).unwrap();
        assert_eq!(rendered, "Cancel\nDone\n");
    }
}
