//! Terminal rendering: tables, help screens and one-line messages.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;
use toodles_core::types::CREATED_FORMAT;
use toodles_core::{AppEnv, Attachment, Todo};

use crate::registry::{COMMANDS, Category, CommandDefinition};

const CHECK_MARK: &str = "✅";
const CROSS_MARK: &str = "✘";

/// `ERR: message`, with the marker in red.
pub fn error_line(message: &dyn Display) -> String {
    format!("{}{message}", "ERR: ".red())
}

/// Banner printed when an interactive session starts.
pub fn greeting() -> String {
    format!(
        "{} {}\n{}",
        "Welcome to toodles".cyan().bold(),
        env!("CARGO_PKG_VERSION").cyan(),
        "Type 'help' to see what you can do."
    )
}

/// Line printed when an interactive session ends.
pub fn farewell() -> String {
    "Byyyeee!".cyan().to_string()
}

/// Version and build flavor.
pub fn version_line() -> String {
    let build = if cfg!(debug_assertions) {
        "(Debug Build)"
    } else {
        "(Release Build)"
    };
    format!("{} {build}", env!("CARGO_PKG_VERSION"))
}

/// Table of todos with id, title, done marker and creation time.
pub fn todo_table(out: &mut dyn Write, todos: &[Todo]) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        format!("{:<16}{:<64}{:<16}{:<16}", "Id", "Title", "Done", "Created").magenta()
    )?;

    for todo in todos {
        let marker = if todo.done { CHECK_MARK } else { CROSS_MARK };
        writeln!(
            out,
            "{}{:<64}{:<16}{:<24}",
            format!("{:<16}", todo.id).cyan(),
            todo.title,
            marker,
            todo.created.format(CREATED_FORMAT).to_string(),
        )?;
    }
    Ok(())
}

/// Table of attachment metadata.
pub fn attachment_table(out: &mut dyn Write, attachments: &[Attachment]) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        format!("{:<16}{:<64}{:<16}", "Id", "Name", "Size in bytes").magenta()
    )?;

    for attachment in attachments {
        writeln!(
            out,
            "{}{:<64}{:<16}",
            format!("{:<16}", attachment.id).cyan(),
            attachment.name,
            attachment.size,
        )?;
    }
    Ok(())
}

fn command_row(out: &mut dyn Write, command: &CommandDefinition) -> io::Result<()> {
    let row = format!(
        "{:<15}{:<15}{:<30}",
        command.name,
        command.short_name.unwrap_or(""),
        command.synopsis
    );
    writeln!(out, "{}{:<20}", row.magenta(), command.description)
}

/// Command reference grouped by category.
pub fn help(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!(
            "{:<15}{:<15}{:<30}{:<20}",
            "Long command", "Short command", "Synopsis", "Description"
        )
        .cyan()
    )?;

    for category in Category::ALL {
        writeln!(out)?;
        writeln!(out, "{}", category.heading().yellow())?;
        writeln!(out)?;
        for command in COMMANDS.iter().filter(|c| c.category == category) {
            command_row(out, command)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", "Non-interactive mode".yellow())?;
    writeln!(out)?;
    writeln!(out, "Toodles can be run in non-interactive mode too.")?;
    writeln!(
        out,
        "Non-interactive mode will be used if at least one argument is given to toodles."
    )?;
    writeln!(
        out,
        "For more information on non-interactive mode use {}.",
        "'toodles -h'".cyan()
    )?;
    writeln!(out)
}

/// Help for the flag-driven mode.
pub fn non_interactive_help(out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "Following arguments can be given to toodles for non-interactive mode:"
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("{:<10}{:<30}{:<30}", "Argument", "Synopsis", "Function").magenta()
    )?;
    writeln!(out)?;
    for (flag, synopsis, function) in [
        ("-h", "", "Prints out help text for non-interactive mode."),
        ("-c", "[COMMAND]", "Specifies the command to execute."),
        ("-t", "[TITLE]", "Title for a todo entry."),
    ] {
        writeln!(out, "{flag:<10}{}{function:<30}", format!("{synopsis:<30}").cyan())?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "COMMANDS".magenta())?;
    writeln!(out)?;
    writeln!(out, "{:<10}{:<30}", "add", "Adds a new todo entry.")?;
    writeln!(
        out,
        "{:<10}{:<30}",
        "erase", "Erase all data that is stored in the toodles database."
    )?;
    writeln!(out)
}

/// Locations in use.
pub fn environment(out: &mut dyn Write, env: &AppEnv) -> io::Result<()> {
    let rows = [
        ("App directory", env.app_dir().display().to_string()),
        ("Storage", env.storage_file().display().to_string()),
    ];
    for (label, value) in rows {
        writeln!(out, "{}{}", format!("{label:<20}").cyan(), value.green())?;
    }
    Ok(())
}
