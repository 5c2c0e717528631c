//! # Storefront Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging, to stderr)
//! 2. Parse the command line
//! 3. Hand off to [`storefront_app::run`]
//! 4. Print the result to stdout, or the error to stderr with exit code 1

use std::process::ExitCode;

use clap::Parser;
use storefront_app::cli::{render_error, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    storefront_app::init_tracing();

    let cli = Cli::parse();
    let json = cli.json;

    match storefront_app::run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", render_error(&err, json));
            ExitCode::FAILURE
        }
    }
}
