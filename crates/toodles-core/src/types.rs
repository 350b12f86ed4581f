use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// Timestamp layout SQLite produces for `datetime('now', 'localtime')`.
pub const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single todo entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    /// Row id, assigned by the store.
    pub id: i64,
    /// Short one-line title.
    pub title: String,
    /// Free-form details, edited through an external editor.
    pub details: Option<String>,
    /// Completion flag.
    pub done: bool,
    /// Local time the entry was created.
    pub created: NaiveDateTime,
}

/// Metadata for a file stored alongside a todo.
///
/// The content itself stays in the store and is only loaded on request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Row id, assigned by the store.
    pub id: i64,
    /// Todo this attachment belongs to.
    pub todo_id: i64,
    /// File name component of the attached path.
    pub name: String,
    /// Content size in bytes.
    pub size: i64,
}

/// Which todos to show when listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ListFilter {
    /// Every entry.
    #[default]
    All,
    /// Only entries marked as done.
    Done,
    /// Only entries that are still open.
    Open,
}

impl ListFilter {
    /// Lenient conversion used by the `list` command.
    ///
    /// Unknown keywords and the empty string fall back to [`ListFilter::All`].
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        keyword.parse().unwrap_or_default()
    }

    /// Keyword accepted on the command line for this filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Done => "done",
            Self::Open => "open",
        }
    }
}

impl FromStr for ListFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Self::All),
            "done" => Ok(Self::Done),
            "open" => Ok(Self::Open),
            other => Err(format!("unknown list option '{other}'")),
        }
    }
}

impl fmt::Display for ListFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
