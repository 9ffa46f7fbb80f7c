// Security Console - Command Runner
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! The external command executor and the command description it runs.

use std::fmt;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tracing::debug;

/// An external command: a program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl HostCommand {
    /// Create a command for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Create a command that runs `program` through a privilege escalation
    /// helper such as `sudo` or `doas -n`.
    ///
    /// The helper is split on whitespace: the first word is the program, the
    /// rest are its leading arguments. An empty helper runs `program`
    /// directly.
    pub fn privileged(escalation: &str, program: impl Into<String>) -> Self {
        let mut words = escalation.split_whitespace();
        match words.next() {
            Some(helper) => Self::new(helper).args(words).arg(program),
            None => Self::new(program),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Exit status and captured text of a finished command.
///
/// `stdout`/`stderr` are empty when the command ran attached to the
/// terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the command exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands to completion.
///
/// An `Err` means the command could not be started at all. A command that
/// ran and exited non-zero is an `Ok` with a failing [`CommandOutput`].
pub trait CommandRunner {
    /// Run with stdout/stderr captured.
    fn output(&self, command: &HostCommand) -> Result<CommandOutput>;

    /// Run attached to the operator's terminal (prompts and progress stay
    /// visible). Only the exit status is reported.
    fn status(&self, command: &HostCommand) -> Result<CommandOutput>;
}

/// [`CommandRunner`] backed by `std::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(command: &HostCommand) -> Command {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        cmd
    }
}

impl CommandRunner for SystemRunner {
    fn output(&self, command: &HostCommand) -> Result<CommandOutput> {
        debug!("Running (captured): {}", command);

        let output = Self::command(command)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to execute {}", command))?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn status(&self, command: &HostCommand) -> Result<CommandOutput> {
        debug!("Running: {}", command);

        let status = Self::command(command)
            .status()
            .with_context(|| format!("Failed to execute {}", command))?;

        Ok(CommandOutput {
            code: status.code(),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privileged_prefixes_escalation_helper() {
        let cmd = HostCommand::privileged("sudo", "ip").args(["link", "set", "eth0", "down"]);
        assert_eq!(cmd.program, "sudo");
        assert_eq!(cmd.to_string(), "sudo ip link set eth0 down");
    }

    #[test]
    fn privileged_helper_with_options_is_split() {
        let cmd = HostCommand::privileged(" doas  -n ", "ip").args(["link", "show"]);
        assert_eq!(cmd.program, "doas");
        assert_eq!(cmd.args, vec!["-n", "ip", "link", "show"]);
        assert_eq!(cmd.to_string(), "doas -n ip link show");
    }

    #[cfg(unix)]
    #[test]
    fn privileged_helper_with_options_spawns() {
        let runner = SystemRunner::new();
        let cmd = HostCommand::privileged("env --", "true");
        assert!(runner.status(&cmd).unwrap().success());
    }

    #[test]
    fn privileged_without_helper_runs_directly() {
        let cmd = HostCommand::privileged("  ", "ufw").arg("status");
        assert_eq!(cmd.to_string(), "ufw status");
    }

    #[test]
    fn signal_termination_is_not_success() {
        let killed = CommandOutput {
            code: None,
            ..Default::default()
        };
        let clean = CommandOutput {
            code: Some(0),
            ..Default::default()
        };
        assert!(!killed.success());
        assert!(clean.success());
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_reports_exit_codes() {
        let runner = SystemRunner::new();
        let ok = runner.output(&HostCommand::new("true")).unwrap();
        assert!(ok.success());
        let failed = runner.output(&HostCommand::new("false")).unwrap();
        assert_eq!(failed.code, Some(1));
    }

    #[test]
    fn system_runner_errors_when_program_is_missing() {
        let runner = SystemRunner::new();
        assert!(runner.output(&HostCommand::new("definitely-not-a-real-tool-xyz")).is_err());
    }
}
