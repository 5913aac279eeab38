//! doit - a minimal makefile-style task runner

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = doit::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
