// Security Console - Firewall Guard
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Suspends an active firewall around a sensitive operation.
//!
//! ```text
//! CHECK ──inactive──────────────────────► RUN ──► done
//!   │                                      ▲
//!   └─active─► SUSPEND (best effort) ──────┘
//!                                          │
//!                      RECONCILE ◄─────────┘
//!                        ├─ operation ok     → re-enable (best effort)
//!                        └─ operation failed → leave disabled, warn
//! ```
//!
//! The guard's result is always the operation's own result. Firewall
//! command failures are logged and reported but never change it.

use tracing::{info, warn};

use super::{FirewallControl, FirewallState};
use crate::exec::Attempt;

/// What the guard did with the firewall after the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restoration {
    /// The firewall was not active to begin with.
    NotRequired,
    /// The operation succeeded and the firewall was re-enabled.
    Restored,
    /// The operation succeeded but re-enabling failed.
    RestoreFailed,
    /// The operation failed; the firewall was deliberately left disabled.
    LeftDisabled,
}

/// Outcome of one guarded invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardReport {
    /// Firewall state captured at entry.
    pub state_before: FirewallState,
    /// Result of the disable command, if one was issued.
    pub suspension: Option<Attempt>,
    pub restoration: Restoration,
    operation_succeeded: bool,
}

impl GuardReport {
    /// The wrapped operation's result, unchanged.
    pub fn succeeded(&self) -> bool {
        self.operation_succeeded
    }
}

/// Wraps sensitive operations with the suspend / restore protocol.
pub struct FirewallGuard<'a> {
    firewall: &'a dyn FirewallControl,
}

impl<'a> FirewallGuard<'a> {
    pub fn new(firewall: &'a dyn FirewallControl) -> Self {
        Self { firewall }
    }

    /// Query the firewall once, then run `operation` under the guard.
    pub fn run<F>(&self, operation: F) -> GuardReport
    where
        F: FnOnce() -> bool,
    {
        let state = self.firewall.query_state();
        self.run_with_state(state, operation)
    }

    /// Run `operation` given the state captured at entry.
    ///
    /// `state_before` is never re-read; a change made from outside during
    /// the operation is not noticed.
    pub fn run_with_state<F>(&self, state_before: FirewallState, operation: F) -> GuardReport
    where
        F: FnOnce() -> bool,
    {
        let suspension = match state_before {
            FirewallState::Inactive => None,
            FirewallState::Active => {
                info!("Firewall active, disabling temporarily");
                let attempt = self.firewall.suspend();
                match attempt {
                    Attempt::Succeeded => info!("Firewall disabled"),
                    Attempt::Failed => {
                        warn!("Firewall disable failed, continuing with the operation")
                    }
                }
                Some(attempt)
            }
        };

        let operation_succeeded = operation();

        let restoration = match (state_before, operation_succeeded) {
            (FirewallState::Inactive, _) => Restoration::NotRequired,
            (FirewallState::Active, true) => {
                info!("Operation successful, re-enabling firewall");
                match self.firewall.restore() {
                    Attempt::Succeeded => {
                        info!("Firewall re-enabled");
                        Restoration::Restored
                    }
                    Attempt::Failed => Restoration::RestoreFailed,
                }
            }
            (FirewallState::Active, false) => {
                warn!("Operation failed, firewall NOT re-enabled automatically");
                Restoration::LeftDisabled
            }
        };

        GuardReport {
            state_before,
            suspension,
            restoration,
            operation_succeeded,
        }
    }
}
