#![allow(dead_code, clippy::expect_used)]

use std::cell::RefCell;
use std::io::{self, Cursor, Write};
use std::rc::Rc;

use tempfile::TempDir;
use toodles_core::{AppEnv, Config, SqliteStore};

use crate::registry;
use crate::session::{Console, Flow, Session};

/// Writer whose bytes stay readable after being boxed into a [`Console`].
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.borrow_mut());
        String::from_utf8(bytes).expect("output is utf-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Session over an in-memory store with scripted input and captured output.
pub(crate) struct ScriptedSession {
    pub(crate) session: Session,
    pub(crate) dir: TempDir,
    output: SharedBuffer,
}

impl ScriptedSession {
    pub(crate) fn new(input: &str) -> Self {
        Self::with_config(input, Config::default())
    }

    pub(crate) fn from_bytes(input: Vec<u8>) -> Self {
        Self::build(input, Config::default())
    }

    pub(crate) fn with_config(input: &str, config: Config) -> Self {
        Self::build(input.as_bytes().to_vec(), config)
    }

    fn build(input: Vec<u8>, mut config: Config) -> Self {
        colored::control::set_override(false);
        config.session.random_prompt = false;

        let dir = TempDir::new().expect("temp dir");
        let env = AppEnv::with_app_dir(dir.path().to_path_buf()).expect("app dir");
        let store = SqliteStore::in_memory().expect("in-memory store");
        let output = SharedBuffer::default();
        let console = Console::new(
            Box::new(Cursor::new(input)),
            Box::new(output.clone()),
        );

        Self {
            session: Session::new(Box::new(store), env, config, console),
            dir,
            output,
        }
    }

    pub(crate) fn run_line(&mut self, line: &str) -> Flow {
        self.session.execute_line(line)
    }

    pub(crate) fn take_output(&self) -> String {
        self.output.take()
    }

    /// Resolve `line` and run its handler directly, returning the raw result.
    pub(crate) fn invoke(&mut self, line: &str) -> crate::error::CommandResult<Flow> {
        let invocation = registry::resolve(line).expect("registered command");
        (invocation.definition.handler)(&mut self.session, &invocation)
    }
}
