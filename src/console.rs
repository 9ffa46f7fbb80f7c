// Security Console - Console
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! The interactive menu loop.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::{debug, warn};

use crate::admin::{
    find_action, AdminActionResult, ConsoleActions, Prompt, EXIT_ACTION, MENU_ACTIONS,
};

/// Line-oriented terminal I/O.
pub struct TerminalIo<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalIo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                warn!("Failed to read input: {}", e);
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalIo<R, W> {
    fn ask(&mut self, question: &str) -> Option<String> {
        if write!(self.output, "{}", question).and_then(|_| self.output.flush()).is_err() {
            return None;
        }
        self.read_line()
    }
}

/// Menu-driven console over a set of actions.
pub struct Console<'a> {
    actions: ConsoleActions<'a>,
}

impl<'a> Console<'a> {
    pub fn new(actions: ConsoleActions<'a>) -> Self {
        Self { actions }
    }

    /// Show the menu and dispatch choices until exit or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, io: &mut TerminalIo<R, W>) -> Result<()> {
        loop {
            print_menu(&mut io.output).context("Failed to write menu")?;

            let Some(choice) = io.ask("\nChoose an option: ") else {
                writeln!(io.output).context("Failed to write output")?;
                break;
            };
            let choice = choice.trim();
            if choice.eq_ignore_ascii_case("q") {
                break;
            }

            let Some(action) = find_action(choice) else {
                writeln!(io.output, "{}", format!("Invalid option: {}", choice).yellow())
                    .context("Failed to write output")?;
                continue;
            };

            if action.id == EXIT_ACTION {
                break;
            }

            debug!("Selected action {} ({})", action.key, action.id);
            writeln!(io.output, "\n>>> {}\n", action.title).context("Failed to write output")?;

            let result = self.actions.execute(action.id, io);
            print_result(&mut io.output, &result).context("Failed to write result")?;
        }

        writeln!(io.output, "Exiting...").context("Failed to write output")?;
        Ok(())
    }
}

fn print_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "\n{}", "===== SECURITY CONSOLE =====".bold())?;

    let mut current = None;
    for action in MENU_ACTIONS {
        if current != Some(action.category) {
            writeln!(out, "\n--- {} ---", action.category.heading())?;
            current = Some(action.category);
        }
        writeln!(out, "{}) {}", action.key, action.title)?;
    }
    Ok(())
}

fn print_result<W: Write>(out: &mut W, result: &AdminActionResult) -> std::io::Result<()> {
    writeln!(out)?;
    if result.success {
        writeln!(out, "{}", result.message.green())?;
    } else {
        writeln!(out, "{}", result.message.red())?;
    }
    for warning in &result.warnings {
        writeln!(out, "{} {}", "WARNING:".yellow().bold(), warning.yellow())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::config::AppSettings;
    use crate::exec::testing::FakeRunner;
    use crate::storage::MacHistory;

    fn run_console(runner: &FakeRunner, script: &str) -> String {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings {
            sysfs_net_root: dir.path().join("sysfs"),
            ..AppSettings::default()
        };
        let actions = ConsoleActions::new(runner, &settings, MacHistory::new(dir.path()));

        let mut io = TerminalIo::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        Console::new(actions).run(&mut io).unwrap();
        String::from_utf8(io.output).unwrap()
    }

    #[test]
    fn menu_lists_every_action_under_headings() {
        let runner = FakeRunner::new();
        let output = run_console(&runner, "0\n");

        assert!(output.contains("--- Firewall ---"));
        assert!(output.contains("13) Connect VPN by Country"));
        assert!(output.contains("0) Exit"));
        assert!(output.ends_with("Exiting...\n"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn dispatches_choice_then_exits() {
        let runner = FakeRunner::new();
        let output = run_console(&runner, "4\n0\n");

        assert!(output.contains(">>> Firewall Status (UFW)"));
        assert!(output.contains("End of firewall status"));
        assert_eq!(runner.calls(), vec!["sudo ufw status"]);
    }

    #[test]
    fn unknown_choice_redisplays_menu() {
        let runner = FakeRunner::new();
        let output = run_console(&runner, "42\nq\n");

        assert!(output.contains("Invalid option: 42"));
        assert_eq!(output.matches("===== SECURITY CONSOLE =====").count(), 2);
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let runner = FakeRunner::new();
        let output = run_console(&runner, "");
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn free_text_prompt_reads_next_line() {
        let runner = FakeRunner::new().stdout("ufw status", "Status: inactive\n");
        let output = run_console(&runner, "13\n  France \n0\n");

        assert!(output.contains("Enter country"));
        assert!(runner.calls().contains(&"nordvpn connect France".to_string()));
    }
}
