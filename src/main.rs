//! Tether CLI - task dependency tracking with cycle-safe mutation

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = tether::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
