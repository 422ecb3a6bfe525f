//! Binary crate for the `cityweather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive prompts (API key, city names)
//! - Logging and output formatting

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod logger;
mod output;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // A missing .env is normal; the key may come from the config file instead.
    dotenvy::dotenv().ok();

    let cmd = cli::Cli::parse();
    logger::initialize(cmd.verbose)?;
    cmd.run().await
}
