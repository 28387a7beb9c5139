use std::io;
use std::process::ExitCode;

use clap::Parser;
use fare_calculator::cli::{self, CliArgs};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    cli::init_logger(args.verbose);

    match cli::run(&args, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "fare calculation failed");
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
