//! barbersbar-update CLI entry point
//!
//! Parses arguments, runs the selected command and turns failures into a
//! readable message with a non-zero exit code. Update checks themselves never
//! fail the process; only setup problems (unreadable settings, a broken
//! app.json, an unwritable output file) do.

use anyhow::Result;
use barbersbar_update::cli;
use barbersbar_update::core::error::user_friendly_error;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
