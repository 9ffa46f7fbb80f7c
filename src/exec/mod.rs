// Security Console - Command Execution Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Blocking execution of external system tools.
//!
//! Everything the console changes on the host goes through a
//! [`CommandRunner`]. Commands block until the child process exits; there
//! are no timeouts and nothing is retried.
//!
//! ```text
//! Menu Action → CommandSequence → CommandRunner → ip / ufw / nordvpn / apt
//! ```

mod runner;
mod sequence;

#[cfg(test)]
pub mod testing;

pub use runner::{CommandRunner, HostCommand, SystemRunner};
pub use sequence::{run_best_effort, Attempt, CommandSequence, SequenceOutcome};

#[cfg(test)]
pub use sequence::{FailureReason, StepFailure};
