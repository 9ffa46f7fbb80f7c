// Security Console - Firewall Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! ufw control and the firewall-state guard for sensitive operations.

mod client;
mod guard;

pub use client::{RuleSet, UfwClient};
pub use guard::{FirewallGuard, Restoration};

use crate::exec::Attempt;

/// Marker `ufw status` prints when the firewall is running.
pub const ACTIVE_MARKER: &str = "Status: active";

/// Whether the packet filter is enforcing, read at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirewallState {
    Active,
    Inactive,
}

impl FirewallState {
    /// Interpret `ufw status` output.
    pub fn from_status_text(text: &str) -> Self {
        let marker_capitalised = "Status: Active";
        if text.contains(ACTIVE_MARKER) || text.contains(marker_capitalised) {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

/// The three firewall primitives the guard needs.
pub trait FirewallControl {
    /// Current state, re-read on every call.
    fn query_state(&self) -> FirewallState;

    /// Turn the firewall off.
    fn suspend(&self) -> Attempt;

    /// Turn the firewall back on.
    fn restore(&self) -> Attempt;
}
