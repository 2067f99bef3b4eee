//! Terminal front-end: CLI, config, logging and the console event loop.
mod app;
pub mod cli;
mod config;
mod effects;
mod logging;
mod ui;

use anyhow::Result;
use higgins_logging::higgins_info;

use cli::{Cli, Command};
use config::AppConfig;

pub fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli(&cli);
    logging::initialize(&config.logging);
    higgins_info!("Starting with function {}", config.function_name);

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => app::run_chat(&config),
        Command::Ask { text } => app::run_ask(&config, text),
    }
}
