//! Command-line interface for sfc-inherit.
//!
//! # Commands
//!
//! - `resolve` - print (or write) a component with its inheritance chain merged
//! - `deps` - list the ancestor files a component was merged from
//!
//! # Global Options
//!
//! - `--verbose` - debug logging to stderr
//! - `--quiet` - errors only
//! - `--config <PATH>` - use this `sfc-inherit.toml` instead of searching for one
//!
//! # Examples
//!
//! ```bash
//! sfc-inherit resolve src/views/Home.vue
//! sfc-inherit resolve src/views/Home.vue --alias @=src -o dist/Home.vue
//! sfc-inherit deps src/views/Home.vue --format json
//! sfc-inherit --config ./sfc-inherit.toml --verbose resolve Home.vue
//! ```
//!
//! Logging honours `RUST_LOG` when neither `--verbose` nor `--quiet` is given.

mod common;
mod deps;
mod resolve;

pub use common::ComponentArgs;
pub use deps::{DepsCommand, DepsFormat};
pub use resolve::ResolveCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Top-level command line of `sfc-inherit`.
#[derive(Parser, Debug)]
#[command(
    name = "sfc-inherit",
    about = "Resolve template inheritance between single-file components",
    version,
    author,
    long_about = "sfc-inherit merges a component with the base components it extends, filling \
                  named extension points and leaving unfilled points with their default content."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to an sfc-inherit.toml to use instead of the nearest one
    ///
    /// Without this option the file is searched for in the component's
    /// directory and its parents, then in the user configuration directory.
    #[arg(short, long, global = true, env = "SFC_INHERIT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a component with its ancestors merged in
    Resolve(ResolveCommand),

    /// List the ancestor files a component depends on
    Deps(DepsCommand),
}

impl Cli {
    /// Install logging and run the selected command.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        let config = self.config.as_deref();
        match self.command {
            Commands::Resolve(cmd) => cmd.execute(config, self.quiet).await,
            Commands::Deps(cmd) => cmd.execute(config).await,
        }
    }

    /// Log filter for the selected verbosity; `None` defers to `RUST_LOG`.
    fn log_directive(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }

    fn init_logging(&self) {
        let filter = match self.log_directive() {
            Some(directive) => EnvFilter::new(directive),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}
