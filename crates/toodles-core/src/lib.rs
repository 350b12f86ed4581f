//! # toodles-core
//!
//! Core functionality for toodles - a small, local todo manager.
//!
//! This crate owns everything that is not about reading commands from a
//! terminal: where the application lives on disk, how it is configured, what a
//! todo looks like, and how todos and their attachments are persisted.
//!
//! ## Architecture
//!
//! - **Environment**: resolves and creates the application directory
//! - **Configuration**: optional `config.toml` inside the application directory
//! - **Types**: todos, attachments and list filters
//! - **Storage**: the [`TodoStore`] trait and its SQLite implementation
//! - **Error Handling**: one error enum with categories for reporting
//!
//! ## Quick Start
//!
//! ```rust
//! use toodles_core::{ListFilter, SqliteStore, TodoStore};
//!
//! let mut store = SqliteStore::in_memory()?;
//! let id = store.create_todo("Buy milk", None)?;
//! store.set_done(id, true)?;
//!
//! let done = store.list_todos(ListFilter::Done)?;
//! assert_eq!(done.len(), 1);
//! # Ok::<(), toodles_core::Error>(())
//! ```

/// Configuration file handling
pub mod config;
/// Application directory bootstrap
pub mod env;
/// Error types and result aliases
pub mod error;
/// Storage trait and SQLite backend
pub mod storage;
/// Core data types
pub mod types;

pub use config::{Config, EditorConfig, SessionConfig};
pub use env::AppEnv;
pub use error::{Error, Result};
pub use storage::{SqliteStore, TodoStore};
pub use types::*;
