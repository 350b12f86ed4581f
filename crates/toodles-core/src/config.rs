//! Configuration management for toodles.
//!
//! Configuration is optional. When `config.toml` exists in the application
//! directory it is parsed as TOML; missing keys keep their defaults, so a file
//! may set a single value.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [editor]
//! command = "nano"
//! temp_file = "toodles.details.edit"
//!
//! [session]
//! max_replay_depth = 16
//! random_prompt = true
//! ```
//!
//! ## Editor Resolution
//!
//! The editor used by `edit` is, in order: `editor.command` from the file,
//! the `EDITOR` environment variable, then `vim`.
//!
//! ```rust
//! use toodles_core::Config;
//!
//! let config: Config = toml::from_str("[editor]\ncommand = \"nano\"")?;
//! assert_eq!(config.editor.resolve_command(), "nano");
//! assert_eq!(config.session.max_replay_depth, 16);
//! # Ok::<(), toml::de::Error>(())
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Editor launched when none is configured and `EDITOR` is unset.
pub const DEFAULT_EDITOR: &str = "vim";
/// File the `edit` command hands to the editor.
pub const DEFAULT_EDIT_TEMP_FILE: &str = "toodles.details.edit";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External editor settings
    pub editor: EditorConfig,
    /// Interactive session settings
    pub session: SessionConfig,
}

/// Settings for the external editor used to edit todo details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Editor command line. May contain arguments, e.g. `"code --wait"`.
    pub command: Option<String>,
    /// Name of the temporary file created in the application directory.
    pub temp_file: String,
}

/// Settings for the interactive prompt loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How many nested history replays are allowed before giving up.
    ///
    /// A history entry can itself be a replay command; this bounds the chain.
    pub max_replay_depth: usize,
    /// Pick a random prompt from the prompt pool on every iteration.
    pub random_prompt: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: None,
            temp_file: DEFAULT_EDIT_TEMP_FILE.to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_replay_depth: 16,
            random_prompt: true,
        }
    }
}

impl EditorConfig {
    /// Editor command line to run, honoring the configured value, then
    /// `EDITOR`, then [`DEFAULT_EDITOR`].
    #[must_use]
    pub fn resolve_command(&self) -> String {
        if let Some(command) = self.command.as_deref().map(str::trim) {
            if !command.is_empty() {
                return command.to_string();
            }
        }

        match std::env::var("EDITOR") {
            Ok(editor) if !editor.trim().is_empty() => editor.trim().to_string(),
            _ => DEFAULT_EDITOR.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))?;

        if config.editor.temp_file.trim().is_empty() {
            return Err(Error::Config("editor.temp_file must not be empty".into()));
        }

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();

        assert_eq!(config.editor.command, None);
        assert_eq!(config.editor.temp_file, "toodles.details.edit");
        assert_eq!(config.session.max_replay_depth, 16);
        assert!(config.session.random_prompt);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[session]\nmax_replay_depth = 2\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.session.max_replay_depth, 2);
        assert!(config.session.random_prompt);
        assert_eq!(config.editor, EditorConfig::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[session\nmax_replay_depth = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_configured_editor_wins() {
        let editor = EditorConfig {
            command: Some("  nano -w ".into()),
            ..EditorConfig::default()
        };
        assert_eq!(editor.resolve_command(), "nano -w");
    }
}
