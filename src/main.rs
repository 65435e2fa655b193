//! Bundle CLI - dependency-ordered source bundling

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = bundle_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
