//! gpub - book specs from Go game records

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = gpub::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
