//! Command-line entry point.
//!
//! Usage: `ftdi-pwr check|reset|power|longpower`

use std::env;
use std::path::Path;
use std::process::ExitCode;

use ftdi_pwr::control::{self, Command};

fn usage(argv0: &str) {
    let program = Path::new(argv0)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(env!("CARGO_BIN_NAME"));
    println!("Usage: {program} check|reset|power|longpower");
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let argv0 = args.first().map(String::as_str).unwrap_or("");

    if args.len() != 2 {
        usage(argv0);
        return ExitCode::FAILURE;
    }

    let Some(cmd) = Command::from_verb(&args[1]) else {
        usage(argv0);
        return ExitCode::FAILURE;
    };

    match control::run(cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
