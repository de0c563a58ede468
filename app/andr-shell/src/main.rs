//! andr - application shell
//!
//! Restores (or creates) the persisted user session on start and performs
//! network fetches off the interactive thread.
//!
//! # Examples
//!
//! ```bash
//! # Startup flow, then fetch the configured resource
//! andr start --fetch
//!
//! # Inspect or replace the stored identity
//! andr session show --pretty
//! andr session save --id u42 --name Ada
//!
//! # Pins for the current user
//! andr pins add --name "Ferry Building" --lat 37.7955 --lng -122.3937
//! andr pins list
//!
//! # One background fetch
//! andr fetch --url https://jsonplaceholder.typicode.com/todos/1
//! ```

mod app;
mod cli;
mod commands;
mod error;
mod logger;
mod pin_commands;
mod report;
mod session_commands;

#[cfg(test)]
mod tests;

use crate::{
    app::App,
    cli::Cli,
    error::{AppError, Result as AppErrorResult},
};

use andr_config::Config;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let app = match bootstrap() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match app.execute(cli.command).await {
        Ok(value) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing output: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            if let Some(hint) = e.hint() {
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Loads and validates configuration, then installs the logger.
fn bootstrap() -> AppErrorResult<App> {
    let config = Config::load()?;
    config.validate()?;

    let log_file = config.log_file_path()?;
    if let Some(dir) = log_file.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(dir).map_err(|e| AppError::log_dir(dir, e))?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file, config.logging.colored)?;

    info!("Starting andr v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    App::from_config(config)
}
