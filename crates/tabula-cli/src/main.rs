//! Tabula binary entry point.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use clap::Parser;
use tabula_cli::commands::{run_rows, run_serve};
use tabula_cli::config_handlers::handle_config_command;
use tabula_cli::logging::init_logging;
use tabula_cli::{Cli, Command};
use tabula_core::TabulaConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Serve => {
            let config = TabulaConfig::load(config_path)?;
            run_serve(config).await?;
        }
        Command::Rows { json } => {
            let config = TabulaConfig::load(config_path)?;
            run_rows(&config, json, &mut std::io::stdout().lock())?;
        }
        Command::Config { action } => {
            handle_config_command(config_path, action, &mut std::io::stdout().lock())?;
        }
    }
    Ok(())
}
