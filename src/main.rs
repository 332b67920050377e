//! sfc-inherit CLI entry point
//!
//! Parses arguments, runs the selected command and turns any failure into a
//! colored error report with a suggestion.
//!
//! - `resolve` - print a component with its inheritance chain merged in
//! - `deps` - list the ancestor files a component depends on

use anyhow::Result;
use clap::Parser;
use sfc_inherit::cli;
use sfc_inherit::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
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
