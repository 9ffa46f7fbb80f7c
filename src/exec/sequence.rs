// Security Console - Command Sequences
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Ordered, fail-fast command lists.
//!
//! A [`CommandSequence`] runs its steps one after another and stops at the
//! first step that fails. Nothing already done is undone. Separate sequences
//! never affect each other; the caller decides what to do next from the
//! returned [`SequenceOutcome`].

use std::fmt;

use tracing::{error, info, warn};

use super::{CommandRunner, HostCommand};

/// Why a step did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The command ran and exited non-zero (`None` for a signal).
    Exit(Option<i32>),
    /// The command could not be started.
    Spawn(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit(Some(code)) => write!(f, "exit status {}", code),
            Self::Exit(None) => write!(f, "terminated by signal"),
            Self::Spawn(reason) => write!(f, "{}", reason),
        }
    }
}

/// The step that stopped a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    /// Zero-based position of the failed step.
    pub index: usize,
    pub command: HostCommand,
    pub reason: FailureReason,
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.command, self.reason)
    }
}

/// Result of running one sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// Every step exited successfully.
    Completed { steps: usize },
    /// A step failed; the steps after it were not run.
    Failed(StepFailure),
}

impl SequenceOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn failure(&self) -> Option<&StepFailure> {
        match self {
            Self::Completed { .. } => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

/// An ordered list of commands forming one logical operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSequence {
    label: String,
    steps: Vec<HostCommand>,
}

impl CommandSequence {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step.
    pub fn then(mut self, step: HostCommand) -> Self {
        self.steps.push(step);
        self
    }

    #[cfg(test)]
    pub fn steps(&self) -> &[HostCommand] {
        &self.steps
    }

    /// Run the steps attached to the terminal, halting on the first failure.
    pub fn run(&self, runner: &dyn CommandRunner) -> SequenceOutcome {
        for (index, step) in self.steps.iter().enumerate() {
            info!("Executing: {}", step);

            let reason = match runner.status(step) {
                Ok(output) if output.success() => continue,
                Ok(output) => FailureReason::Exit(output.code),
                Err(e) => FailureReason::Spawn(format!("{:#}", e)),
            };

            error!("{}: error executing {} ({})", self.label, step, reason);
            return SequenceOutcome::Failed(StepFailure {
                index,
                command: step.clone(),
                reason,
            });
        }

        SequenceOutcome::Completed {
            steps: self.steps.len(),
        }
    }
}

/// Outcome of a side command whose status never decides an operation's
/// result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Succeeded,
    Failed,
}

/// Run `command` attached to the terminal, log a failure and hand back only
/// whether it worked.
pub fn run_best_effort(runner: &dyn CommandRunner, command: &HostCommand, what: &str) -> Attempt {
    match runner.status(command) {
        Ok(output) if output.success() => Attempt::Succeeded,
        Ok(output) => {
            warn!("Error {}: {} ({})", what, command, FailureReason::Exit(output.code));
            Attempt::Failed
        }
        Err(e) => {
            warn!("Error {}: {:#}", what, e);
            Attempt::Failed
        }
    }
}
