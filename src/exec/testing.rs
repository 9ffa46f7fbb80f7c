// Security Console - Test Doubles
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Scripted [`CommandRunner`] for unit tests.

use std::cell::RefCell;

use anyhow::{anyhow, Result};

use super::runner::CommandOutput;
use super::{CommandRunner, HostCommand};

#[derive(Debug, Clone)]
enum Reply {
    Output(CommandOutput),
    Unavailable,
}

/// Records every command and answers from a list of rules.
///
/// A rule matches when its pattern is a substring of the rendered command
/// line; the first matching rule wins. Unmatched commands exit 0 with no
/// output.
#[derive(Debug, Default)]
pub struct FakeRunner {
    rules: Vec<(String, Reply)>,
    calls: RefCell<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands matching `pattern` exit with `code`.
    pub fn exit(mut self, pattern: &str, code: i32) -> Self {
        let output = CommandOutput {
            code: Some(code),
            ..Default::default()
        };
        self.rules.push((pattern.to_string(), Reply::Output(output)));
        self
    }

    /// Commands matching `pattern` succeed and print `stdout`.
    pub fn stdout(mut self, pattern: &str, stdout: &str) -> Self {
        let output = CommandOutput {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        };
        self.rules.push((pattern.to_string(), Reply::Output(output)));
        self
    }

    /// Commands matching `pattern` cannot be started.
    pub fn unavailable(mut self, pattern: &str) -> Self {
        self.rules.push((pattern.to_string(), Reply::Unavailable));
        self
    }

    /// Rendered command lines, in the order they were run.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of recorded commands containing `pattern`.
    pub fn count(&self, pattern: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.contains(pattern)).count()
    }

    fn answer(&self, command: &HostCommand) -> Result<CommandOutput> {
        let line = command.to_string();
        self.calls.borrow_mut().push(line.clone());

        let reply = self
            .rules
            .iter()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::Unavailable) => {
                Err(anyhow!("No such file or directory: {}", command.program))
            }
            None => Ok(CommandOutput {
                code: Some(0),
                ..Default::default()
            }),
        }
    }
}

impl CommandRunner for FakeRunner {
    fn output(&self, command: &HostCommand) -> Result<CommandOutput> {
        self.answer(command)
    }

    fn status(&self, command: &HostCommand) -> Result<CommandOutput> {
        self.answer(command).map(|output| CommandOutput {
            code: output.code,
            ..Default::default()
        })
    }
}
