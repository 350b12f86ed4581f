//! SQLite-backed persistence for todos and their attachments.
//!
//! [`TodoStore`] is the seam the CLI talks to; [`SqliteStore`] implements it
//! over a single database file holding the `TODOS` and `ATTACHMENTS` tables.

use crate::types::CREATED_FORMAT;
use crate::{Attachment, Error, ListFilter, Result, Todo};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const CREATE_TODOS: &str = "create table if not exists TODOS (
    ID INTEGER,
    TITLE TEXT,
    DETAILS TEXT,
    DONE INTEGER NOT NULL DEFAULT 0 CHECK(DONE = 0 or DONE = 1),
    CREATED DATE DEFAULT (datetime('now', 'localtime')),
    primary key(ID autoincrement))";

const CREATE_ATTACHMENTS: &str = "create table if not exists ATTACHMENTS (
    ID INTEGER,
    NAME TEXT NOT NULL,
    TODO_ID INTEGER NOT NULL,
    ATTACHMENT BLOB NOT NULL,
    SIZE INTEGER NOT NULL,
    primary key(ID autoincrement),
    foreign key(TODO_ID) references TODOS(ID))";

const SELECT_TODOS: &str = "select ID, TITLE, DETAILS, DONE, CREATED from TODOS";

/// Persistence operations the command layer relies on.
///
/// Every failure carries a message suitable for showing to the user as-is.
pub trait TodoStore {
    /// Create a todo and return its id. The title must not be blank.
    fn create_todo(&mut self, title: &str, details: Option<&str>) -> Result<i64>;

    /// List todos matching `filter`, ordered by id.
    fn list_todos(&self, filter: ListFilter) -> Result<Vec<Todo>>;

    /// Delete every todo and attachment.
    fn erase_all(&mut self) -> Result<()>;

    /// Todos whose title contains `needle`, ordered by id.
    fn search_by_title(&self, needle: &str) -> Result<Vec<Todo>>;

    /// Delete a todo together with its attachments.
    fn delete_todo(&mut self, id: i64) -> Result<()>;

    /// Details text of a todo; empty when none were saved.
    fn details(&self, id: i64) -> Result<String>;

    /// Replace the details text of a todo.
    fn save_details(&mut self, id: i64, details: &str) -> Result<()>;

    /// Mark a todo as done (`true`) or open (`false`).
    fn set_done(&mut self, id: i64, done: bool) -> Result<()>;

    /// Store the file at `path` as an attachment of `todo_id`; returns the attachment id.
    fn attach_file(&mut self, todo_id: i64, path: &Path) -> Result<i64>;

    /// Delete a single attachment.
    fn delete_attachment(&mut self, id: i64) -> Result<()>;

    /// Attachment metadata for a todo.
    fn list_attachments(&self, todo_id: i64) -> Result<Vec<Attachment>>;

    /// Raw content of an attachment.
    fn attachment_content(&self, id: i64) -> Result<Vec<u8>>;

    /// Write an attachment's content to `dest`.
    fn save_attachment(&self, id: i64, dest: &Path) -> Result<()>;
}

/// [`TodoStore`] backed by a SQLite database file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and make sure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            Error::Environment(format!("Failed to open storage {}: {e}", path.display()))
        })?;
        let store = Self::with_connection(conn)?;
        info!(path = %path.display(), "storage ready");
        Ok(store)
    }

    /// Database that lives only as long as the returned value.
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(&format!("{CREATE_TODOS};\n{CREATE_ATTACHMENTS};"))
            .map_err(|e| Error::Environment(format!("Failed to create storage schema: {e}")))?;
        Ok(Self { conn })
    }

    fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
        let created: String = row.get(4)?;
        let created = NaiveDateTime::parse_from_str(&created, CREATED_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

        Ok(Todo {
            id: row.get(0)?,
            title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            details: row.get(2)?,
            done: row.get::<_, i64>(3)? != 0,
            created,
        })
    }

    fn todo_exists(&self, id: i64) -> Result<bool> {
        let found = self
            .conn
            .query_row("select 1 from TODOS where ID = ?1", [id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn todo_not_found(id: i64) -> Error {
        Error::NotFound(format!("Todo with id {id}"))
    }

    fn attachment_not_found(id: i64) -> Error {
        Error::NotFound(format!("Attachment with id {id}"))
    }
}

impl TodoStore for SqliteStore {
    fn create_todo(&mut self, title: &str, details: Option<&str>) -> Result<i64> {
        if title.trim().is_empty() {
            return Err(Error::InvalidInput("Please provide a title.".into()));
        }
        let details = details.filter(|d| !d.is_empty());

        self.conn.execute(
            "insert into TODOS (TITLE, DETAILS) values (?1, ?2)",
            params![title, details],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "created todo");
        Ok(id)
    }

    fn list_todos(&self, filter: ListFilter) -> Result<Vec<Todo>> {
        let condition = match filter {
            ListFilter::All => "",
            ListFilter::Done => " where DONE = 1",
            ListFilter::Open => " where DONE = 0",
        };
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_TODOS}{condition} order by ID"))?;
        let todos = stmt
            .query_map([], Self::todo_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(todos)
    }

    fn erase_all(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        let attachments = tx.execute("delete from ATTACHMENTS", [])?;
        let todos = tx.execute("delete from TODOS", [])?;
        tx.commit()?;
        info!(todos, attachments, "erased storage");
        Ok(())
    }

    fn search_by_title(&self, needle: &str) -> Result<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_TODOS} where TITLE like ?1 order by ID"))?;
        let todos = stmt
            .query_map([format!("%{needle}%")], Self::todo_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(todos)
    }

    fn delete_todo(&mut self, id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        let attachments = tx.execute("delete from ATTACHMENTS where TODO_ID = ?1", [id])?;
        let removed = tx.execute("delete from TODOS where ID = ?1", [id])?;
        if removed == 0 {
            return Err(Self::todo_not_found(id));
        }
        tx.commit()?;
        debug!(id, attachments, "deleted todo");
        Ok(())
    }

    fn details(&self, id: i64) -> Result<String> {
        self.conn
            .query_row("select DETAILS from TODOS where ID = ?1", [id], |row| {
                row.get::<_, Option<String>>(0)
            })
            .optional()?
            .map(Option::unwrap_or_default)
            .ok_or_else(|| Self::todo_not_found(id))
    }

    fn save_details(&mut self, id: i64, details: &str) -> Result<()> {
        let updated = self.conn.execute(
            "update TODOS set DETAILS = ?1 where ID = ?2",
            params![details, id],
        )?;
        if updated == 0 {
            return Err(Self::todo_not_found(id));
        }
        Ok(())
    }

    fn set_done(&mut self, id: i64, done: bool) -> Result<()> {
        let updated = self.conn.execute(
            "update TODOS set DONE = ?1 where ID = ?2",
            params![i64::from(done), id],
        )?;
        if updated == 0 {
            return Err(Self::todo_not_found(id));
        }
        debug!(id, done, "updated done flag");
        Ok(())
    }

    fn attach_file(&mut self, todo_id: i64, path: &Path) -> Result<i64> {
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidInput("Please provide a file path.".into()));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidInput("Please provide a valid filename.".into()))?;
        if !self.todo_exists(todo_id)? {
            return Err(Self::todo_not_found(todo_id));
        }

        let content = fs::read(path)?;
        let size = i64::try_from(content.len())
            .map_err(|_| Error::Storage(format!("{name} is too large to attach.")))?;

        self.conn.execute(
            "insert into ATTACHMENTS (NAME, TODO_ID, ATTACHMENT, SIZE) values (?1, ?2, ?3, ?4)",
            params![name, todo_id, content, size],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, todo_id, size, "stored attachment");
        Ok(id)
    }

    fn delete_attachment(&mut self, id: i64) -> Result<()> {
        let removed = self
            .conn
            .execute("delete from ATTACHMENTS where ID = ?1", [id])?;
        if removed == 0 {
            return Err(Self::attachment_not_found(id));
        }
        Ok(())
    }

    fn list_attachments(&self, todo_id: i64) -> Result<Vec<Attachment>> {
        let mut stmt = self.conn.prepare(
            "select ID, TODO_ID, NAME, SIZE from ATTACHMENTS where TODO_ID = ?1 order by ID",
        )?;
        let attachments = stmt
            .query_map([todo_id], |row| {
                Ok(Attachment {
                    id: row.get(0)?,
                    todo_id: row.get(1)?,
                    name: row.get(2)?,
                    size: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(attachments)
    }

    fn attachment_content(&self, id: i64) -> Result<Vec<u8>> {
        self.conn
            .query_row(
                "select ATTACHMENT from ATTACHMENTS where ID = ?1",
                [id],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?
            .ok_or_else(|| Self::attachment_not_found(id))
    }

    fn save_attachment(&self, id: i64, dest: &Path) -> Result<()> {
        if dest.as_os_str().is_empty() {
            return Err(Error::InvalidInput("Please provide a save path.".into()));
        }
        let content = self.attachment_content(id)?;
        fs::write(dest, content)?;
        debug!(id, dest = %dest.display(), "saved attachment to disk");
        Ok(())
    }
}
