//! Command registry and resolution.
//!
//! [`COMMANDS`] is the single table every command is declared in. A line is
//! resolved by its leading token: long names are tried across the whole table
//! first, short names only when no long name matched. Matching is exact.

use std::slice;

use tracing::debug;

use crate::binder::{self, ArgSlot, is_blank};
use crate::commands::{attachments, edit, misc, todos};
use crate::error::{CommandError, CommandResult};
use crate::session::{Flow, Session};

/// Signature shared by all command handlers.
pub type Handler = fn(&mut Session, &Invocation<'_>) -> CommandResult<Flow>;

/// Help grouping of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Commands working on todo entries.
    TodoCommands,
    /// Commands working on attachments.
    AttachmentCommands,
    /// Everything else.
    Miscellaneous,
}

impl Category {
    /// All categories in help order.
    pub const ALL: [Self; 3] = [
        Self::TodoCommands,
        Self::AttachmentCommands,
        Self::Miscellaneous,
    ];

    /// Section heading used by `help`.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::TodoCommands => "Commands for ToDo entries",
            Self::AttachmentCommands => "Commands for attachments",
            Self::Miscellaneous => "Miscellaneous commands",
        }
    }
}

/// A registered command.
#[derive(Debug)]
pub struct CommandDefinition {
    /// Long name, unique across the registry.
    pub name: &'static str,
    /// Optional alias, distinct from every long and short name.
    pub short_name: Option<&'static str>,
    /// Help grouping.
    pub category: Category,
    /// Argument summary for help output.
    pub synopsis: &'static str,
    /// One-line description for help output.
    pub description: &'static str,
    /// Behavior.
    pub handler: Handler,
}

/// A line resolved to a command.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// The matched command.
    pub definition: &'static CommandDefinition,
    /// Whether the short name matched.
    pub via_short: bool,
    /// The raw line as entered.
    pub line: &'a str,
}

impl Invocation<'_> {
    /// Length in characters of the token that matched.
    #[must_use]
    pub fn token_len(&self) -> usize {
        let token = match (self.via_short, self.definition.short_name) {
            (true, Some(short)) => short,
            _ => self.definition.name,
        };
        token.chars().count()
    }

    /// Bind required arguments into `slots`.
    pub fn bind(&self, slots: &mut [ArgSlot]) -> CommandResult<usize> {
        binder::bind(self.line, self.token_len(), slots).map_err(|_| {
            CommandError::missing_arguments(self.definition.name, self.definition.synopsis)
        })
    }

    /// Bind optional arguments; an absent argument yields `0`.
    pub fn bind_optional(&self, slots: &mut [ArgSlot]) -> usize {
        binder::bind(self.line, self.token_len(), slots).unwrap_or(0)
    }

    /// Bind exactly one required argument of the given capacity.
    pub fn single_arg(&self, capacity: usize) -> CommandResult<ArgSlot> {
        let mut slot = ArgSlot::new(capacity);
        self.bind(slice::from_mut(&mut slot))?;
        Ok(slot)
    }
}

/// Every command toodles understands.
pub static COMMANDS: &[CommandDefinition] = &[
    CommandDefinition {
        name: "add",
        short_name: Some("a"),
        category: Category::TodoCommands,
        synopsis: "[TITLE](opt)",
        description: "Adds a new todo entry.",
        handler: todos::add,
    },
    CommandDefinition {
        name: "remove",
        short_name: Some("r"),
        category: Category::TodoCommands,
        synopsis: "[ID]",
        description: "Removes a todo entry.",
        handler: todos::remove,
    },
    CommandDefinition {
        name: "edit",
        short_name: Some("e"),
        category: Category::TodoCommands,
        synopsis: "[ID]",
        description: "Edit a todo entry.",
        handler: edit::edit,
    },
    CommandDefinition {
        name: "detail",
        short_name: Some("d"),
        category: Category::TodoCommands,
        synopsis: "[ID]",
        description: "Displays the details of an entry.",
        handler: todos::detail,
    },
    CommandDefinition {
        name: "list",
        short_name: Some("l"),
        category: Category::TodoCommands,
        synopsis: "[LIST OPTION](opt)",
        description: "Lists all current entries.",
        handler: todos::list,
    },
    CommandDefinition {
        name: "search",
        short_name: Some("s"),
        category: Category::TodoCommands,
        synopsis: "[SEARCH EXPR]",
        description: "Search entries by title.",
        handler: todos::search,
    },
    CommandDefinition {
        name: "done",
        short_name: None,
        category: Category::TodoCommands,
        synopsis: "[ID]",
        description: "Marks the given todo as done.",
        handler: todos::done,
    },
    CommandDefinition {
        name: "open",
        short_name: None,
        category: Category::TodoCommands,
        synopsis: "[ID]",
        description: "Marks the given todo as open.",
        handler: todos::open,
    },
    CommandDefinition {
        name: "erase",
        short_name: None,
        category: Category::Miscellaneous,
        synopsis: "",
        description: "Erases all entries from the database.",
        handler: todos::erase,
    },
    CommandDefinition {
        name: "help",
        short_name: Some("h"),
        category: Category::Miscellaneous,
        synopsis: "",
        description: "Displays helpful information for using toodles.",
        handler: misc::help,
    },
    CommandDefinition {
        name: "exit",
        short_name: None,
        category: Category::Miscellaneous,
        synopsis: "",
        description: "Exits toodles.",
        handler: misc::exit,
    },
    CommandDefinition {
        name: "quit",
        short_name: None,
        category: Category::Miscellaneous,
        synopsis: "",
        description: "Exits toodles.",
        handler: misc::exit,
    },
    CommandDefinition {
        name: "clear",
        short_name: None,
        category: Category::Miscellaneous,
        synopsis: "",
        description: "Clears the screen.",
        handler: misc::clear,
    },
    CommandDefinition {
        name: "history",
        short_name: None,
        category: Category::Miscellaneous,
        synopsis: "",
        description: "Displays the command history of the session.",
        handler: misc::history,
    },
    CommandDefinition {
        name: "version",
        short_name: None,
        category: Category::Miscellaneous,
        synopsis: "",
        description: "Displays toodles version number.",
        handler: misc::version,
    },
    CommandDefinition {
        name: "attach",
        short_name: None,
        category: Category::AttachmentCommands,
        synopsis: "",
        description: "Attaches a file to an existing todo.",
        handler: attachments::attach,
    },
    CommandDefinition {
        name: "delatt",
        short_name: None,
        category: Category::AttachmentCommands,
        synopsis: "[ID]",
        description: "Deletes the attachment with given id.",
        handler: attachments::delete,
    },
    CommandDefinition {
        name: "showatt",
        short_name: None,
        category: Category::AttachmentCommands,
        synopsis: "[ID]",
        description: "Shows all attachments for given todo id.",
        handler: attachments::show,
    },
    CommandDefinition {
        name: "patt",
        short_name: None,
        category: Category::AttachmentCommands,
        synopsis: "[ID]",
        description: "Prints out the content of the attachment.",
        handler: attachments::print,
    },
    CommandDefinition {
        name: "satt",
        short_name: None,
        category: Category::AttachmentCommands,
        synopsis: "[ID]",
        description: "Save an attachment to disk.",
        handler: attachments::save,
    },
    CommandDefinition {
        name: "!",
        short_name: None,
        category: Category::Miscellaneous,
        synopsis: "[HISTORY INDEX]",
        description: "Executes a command that is stored in the history.",
        handler: misc::replay,
    },
    CommandDefinition {
        name: "env",
        short_name: None,
        category: Category::Miscellaneous,
        synopsis: "",
        description: "Displays environment data for toodles.",
        handler: misc::env,
    },
];

/// Leading token of `line`: blanks skipped, ended by the next blank.
#[must_use]
pub fn leading_token(line: &str) -> &str {
    let rest = line.trim_start_matches(is_blank);
    rest.find(is_blank).map_or(rest, |end| &rest[..end])
}

/// Resolve `line` against [`COMMANDS`].
#[must_use]
pub fn resolve(line: &str) -> Option<Invocation<'_>> {
    let token = leading_token(line);
    if token.is_empty() {
        return None;
    }

    let long = COMMANDS
        .iter()
        .find(|command| command.name == token)
        .map(|definition| (definition, false));
    let found = long.or_else(|| {
        COMMANDS
            .iter()
            .find(|command| command.short_name == Some(token))
            .map(|definition| (definition, true))
    });

    found.map(|(definition, via_short)| {
        debug!(command = definition.name, via_short, "resolved command");
        Invocation {
            definition,
            via_short,
            line,
        }
    })
}
