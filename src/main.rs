// Security Console - Main Entry Point
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Security Console - A terminal menu for firewall, MAC address and VPN
//! maintenance.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod admin;
mod config;
mod console;
mod exec;
mod firewall;
mod models;
mod network;
mod storage;
mod vpn;

use admin::ConsoleActions;
use config::Settings;
use console::{Console, TerminalIo};
use exec::SystemRunner;
use storage::MacHistory;

/// Operator console for firewall, MAC address and VPN maintenance.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    init_logging(&cli.log_level);

    let settings = Settings::load(cli.config.clone().unwrap_or_else(Settings::default_path));

    let runner = SystemRunner::new();
    let history = MacHistory::new(settings.state_dir());
    let actions = ConsoleActions::new(&runner, settings.values(), history);

    let stdin = io::stdin();
    let mut terminal = TerminalIo::new(stdin.lock(), io::stdout());
    Console::new(actions).run(&mut terminal)
}

/// Log to stderr so records do not interleave with the menu on stdout.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from(["security-console", "--config", "/tmp/s.json", "--no-color"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.json")));
        assert!(cli.no_color);
        assert_eq!(cli.log_level, "info");
    }
}
