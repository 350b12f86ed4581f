//! Logging initialization and color control.
//!
//! Diagnostics go to stderr so they never mix with tables on stdout. The
//! level comes from `TOODLES_LOG` and defaults to `warn`.

use anyhow::Result;
use colored::control as color_control;
use is_terminal::IsTerminal;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Environment variable selecting the log level.
pub const LOG_ENV: &str = "TOODLES_LOG";

/// Parse a level name such as `debug` or `WARN`.
pub fn parse_level(value: &str) -> Option<Level> {
    value.trim().parse().ok()
}

/// Install the global tracing subscriber and decide on colored output.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging() -> Result<()> {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if env_no_color || !std::io::stdout().is_terminal() {
        color_control::set_override(false);
    }
    Ok(())
}
