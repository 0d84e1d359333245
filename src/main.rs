//! Stagehand CLI - deploy serverless component instances
//!
//! Usage: stagehand <COMMAND>
//!
//! Commands:
//!   dev     Watch the project and redeploy on every change
//!   deploy  Deploy once with remote debugging disabled

use std::process::ExitCode;

use clap::Parser;
use is_terminal::IsTerminal;

mod cli;
mod commands;
mod logging;
mod ui;

use cli::{Cli, ColorWhen, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    let log_color = match cli.color {
        Some(ColorWhen::Always) => true,
        Some(ColorWhen::Never) => false,
        Some(ColorWhen::Auto) | None => std::io::stderr().is_terminal(),
    };
    logging::init(cli.verbose, log_color);

    let result = match cli.command {
        Commands::Dev { dir, filter } => {
            commands::dev::cmd_dev(&dir, filter, json, cli.verbose, cli.color)
        }
        Commands::Deploy { dir } => {
            commands::deploy::cmd_deploy(&dir, json, cli.verbose, cli.color)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            ui::error::print_error(&e, json);
            ExitCode::FAILURE
        }
    }
}
