#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::Path;
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Create a `toodles` command whose application directory is `home`.
///
/// Colors are disabled and the editor is pinned so runs are deterministic.
#[allow(dead_code)]
pub fn toodles_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("toodles"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("TOODLES_HOME", home);
    cmd.env("NO_COLOR", "1");
    cmd.env("EDITOR", "true");
    cmd.env_remove("TOODLES_LOG");
    cmd
}

/// Add a todo through non-interactive mode.
#[allow(dead_code)]
pub fn add_todo(home: &Path, title: &str) {
    toodles_cmd(home)
        .args(["-c", "add", "-t", title])
        .assert()
        .success();
}
