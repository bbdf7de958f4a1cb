//! chanlog - write messages through the process-wide log dispatcher
//!
//! Usage:
//!   chanlog "disk failed" --severity warning --channel core
//!   some-tool | chanlog --channel tool --file tool.log
//!   chanlog --config log.toml --print-config

mod cli;

use chanlog::LogConfig;
use clap::Parser;
use cli::Cli;
use std::io::{self, BufRead};

fn main() -> chanlog::Result<()> {
    // Arm the message clock before anything else.
    let _ = chanlog::current_message_time();

    let cli = Cli::parse();
    chanlog::init_tracing(cli.verbose);

    let base = match &cli.config {
        Some(path) => LogConfig::load(path)?,
        None => Cli::default_config(),
    };
    let config = cli.apply_overrides(base);

    if cli.print_config {
        print!("{}", config.to_toml());
        return Ok(());
    }

    chanlog::global().apply_config(&config);
    tracing::debug!(level = %config.level, filter = %config.filter, "logging configured");

    if cli.messages.is_empty() {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            chanlog::write(&cli.channel, cli.severity, &line);
        }
    } else {
        for message in &cli.messages {
            chanlog::write(&cli.channel, cli.severity, message);
        }
    }

    chanlog::flush();
    Ok(())
}
