//! Interactive session: prompt, read, resolve, execute, record.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use rand::seq::SliceRandom;
use toodles_core::{AppEnv, Config, TodoStore};
use tracing::{debug, warn};

use crate::binder::LINE_CAPACITY;
use crate::error::{CommandError, CommandResult};
use crate::history::HistoryRing;
use crate::registry;
use crate::render;

/// Prompts shown before each line of input.
pub const PROMPTS: &[&str] = &[
    "toodles :) > ",
    ">>> ",
    "==> ",
    "*-* > ",
    ":-* > ",
    "wanna party? > ",
    "omg i love cookies!... > ",
    "funny, huh? > ",
    "¯\\_(ツ)_/¯ > ",
    "ugh... duh... > ",
    "🍆💦 > ",
    "I know, right?... > ",
    "Okay, boomer... > ",
];

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// End the session.
    Exit,
}

/// Line-oriented terminal I/O.
pub struct Console {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl Console {
    /// Console over arbitrary reader and writer.
    pub fn new(input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        Self { input, output }
    }

    /// Console over the process's standard streams.
    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdin().lock()), Box::new(io::stdout()))
    }

    /// Read one line without its terminator, truncated to the line bound.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    /// Returns `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&raw);
        let content = line.trim_end_matches(['\n', '\r']);
        let bound = LINE_CAPACITY - 1;
        if content.chars().count() > bound {
            warn!(bound, "input line truncated");
            return Ok(Some(content.chars().take(bound).collect()));
        }
        Ok(Some(content.to_string()))
    }

    /// Print `prompt` and read the answer; end of input reads as empty.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }
}

impl Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

/// State of one interactive session.
pub struct Session {
    pub(crate) store: Box<dyn TodoStore>,
    pub(crate) history: HistoryRing,
    pub(crate) console: Console,
    pub(crate) env: AppEnv,
    pub(crate) config: Config,
    replay_depth: usize,
}

impl Session {
    /// New session with an empty history.
    pub fn new(store: Box<dyn TodoStore>, env: AppEnv, config: Config, console: Console) -> Self {
        Self {
            store,
            history: HistoryRing::new(),
            console,
            env,
            config,
            replay_depth: 0,
        }
    }

    /// Command history recorded so far.
    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    /// Run until `exit`, `quit` or end of input.
    pub fn run(&mut self) -> CommandResult<()> {
        writeln!(self.console, "{}", render::greeting())?;

        loop {
            let prompt = self.next_prompt();
            write!(self.console, "{}", prompt.green())?;
            self.console.flush()?;

            match self.console.read_line() {
                Ok(Some(line)) => {
                    if self.execute_line(&line) == Flow::Exit {
                        break;
                    }
                },
                Ok(None) => {
                    debug!("end of input");
                    writeln!(self.console)?;
                    break;
                },
                Err(err) => {
                    self.report(&CommandError::io(
                        anyhow::Error::new(err).context("Error retrieving line."),
                    ));
                },
            }
        }

        writeln!(self.console, "{}", render::farewell())?;
        Ok(())
    }

    /// Resolve and execute one line, then record it in history.
    ///
    /// Unknown commands are reported and not recorded; `exit` is not
    /// recorded either.
    pub fn execute_line(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Continue;
        }

        let Some(invocation) = registry::resolve(line) else {
            self.report(&CommandError::invalid_command());
            return Flow::Continue;
        };

        let flow = match (invocation.definition.handler)(self, &invocation) {
            Ok(flow) => flow,
            Err(err) => {
                self.report(&err);
                Flow::Continue
            },
        };
        if flow == Flow::Exit {
            return Flow::Exit;
        }

        if let Err(err) = self.history.append(line) {
            self.report(&err.into());
        }
        flow
    }

    /// Execute a line taken from history, bounded by the configured depth.
    pub(crate) fn replay(&mut self, line: &str) -> CommandResult<Flow> {
        let limit = self.config.session.max_replay_depth;
        if self.replay_depth >= limit {
            return Err(CommandError::invalid_argument(format!(
                "History replay nested deeper than {limit} levels."
            )));
        }

        self.replay_depth += 1;
        let flow = self.execute_line(line);
        self.replay_depth -= 1;
        Ok(flow)
    }

    /// Print an error in the `ERR: message` format.
    pub fn report(&mut self, err: &CommandError) {
        debug!(kind = %err.kind, "command failed");
        if let Err(io_err) = writeln!(self.console, "{}", render::error_line(err)) {
            warn!("failed to print error: {io_err}");
        }
    }

    fn next_prompt(&self) -> &'static str {
        if self.config.session.random_prompt {
            PROMPTS
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(PROMPTS[0])
        } else {
            PROMPTS[0]
        }
    }
}
