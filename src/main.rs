//! `provision` binary entry point.

use std::process::ExitCode;

use clap::Parser;

use provision::{cli::Cli, commands, logging};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber();
    let log = logging::Logger::new();

    match commands::run(&args, &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
