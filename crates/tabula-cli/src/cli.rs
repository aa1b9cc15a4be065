//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// Tabula - form-backed CSV store
#[derive(Parser, Debug)]
#[command(name = "tabula", version)]
#[command(about = "Collect form submissions into a CSV file and serve them back", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server until Ctrl-C
    Serve,
    /// Print every stored record
    Rows {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `tabula config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print a value by dotted key (e.g. `server.port`)
    Get {
        /// Dotted key
        key: String,
    },
    /// Write a default config file
    Init {
        /// Target file (defaults to the platform config dir)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print overridable settings as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for docker run
        #[arg(long)]
        docker_env: bool,
    },
}
