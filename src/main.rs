//! landpr binary entry point

mod cli;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();

    // An interrupt cancels the in-flight flow; dropping it runs the HEAD
    // restore guard before the process exits.
    tokio::select! {
        result = cli::land::run_land(&args) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("exiting on interrupt");
            ExitCode::FAILURE
        }
    }
}
