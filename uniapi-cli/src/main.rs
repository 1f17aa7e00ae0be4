//! Binary crate for the `uniapi` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and building configuration
//! - The interactive menu loop and per-provider handlers
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod console;
mod handler;
mod logging;
mod menu;

#[cfg(test)]
mod testing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
