//! toodles binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = toodles_cli::logging::initialize_logging() {
        eprintln!("failed to initialize logging: {err}");
    }
    toodles_cli::run()
}
