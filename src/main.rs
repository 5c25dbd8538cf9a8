// src/main.rs
use std::process::ExitCode;

use env_logger::Env;

use waterfall::cli::{self, parse_args, print_error, print_sample_formats};
use waterfall::WaterfallError;

fn main() -> ExitCode {
    let args = parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit());

    let level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err);
            let is_config = err
                .chain()
                .any(|cause| cause.downcast_ref::<WaterfallError>().is_some_and(|e| e.is_config()));
            if is_config {
                print_sample_formats();
            }
            ExitCode::FAILURE
        }
    }
}
