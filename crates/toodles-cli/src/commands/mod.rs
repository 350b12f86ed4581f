//! Command handlers, one module per command group.

pub mod attachments;
pub mod edit;
pub mod misc;
pub mod todos;

use crate::binder::ID_CAPACITY;
use crate::error::{CommandError, CommandResult};
use crate::registry::Invocation;

/// Parse a numeric id typed by the user.
pub(crate) fn parse_id(text: &str) -> CommandResult<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommandError::invalid_argument("Please provide an id."));
    }
    text.parse()
        .map_err(|_| CommandError::invalid_argument(format!("'{text}' is not a valid id.")))
}

/// Bind and parse the single id argument of `invocation`.
pub(crate) fn id_argument(invocation: &Invocation<'_>) -> CommandResult<i64> {
    let slot = invocation.single_arg(ID_CAPACITY)?;
    parse_id(slot.as_str())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_trimmed_ids() {
        assert_eq!(parse_id(" 42 ").unwrap(), 42);
    }

    #[test]
    fn rejects_empty_and_non_numeric_ids() {
        let empty = parse_id("  ").unwrap_err();
        assert_eq!(empty.to_string(), "Please provide an id.");

        let bad = parse_id("abc").unwrap_err();
        assert_eq!(bad.kind, ErrorKind::InvalidArgument);
        assert_eq!(bad.to_string(), "'abc' is not a valid id.");
    }
}
