// Security Console - Admin Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Operator actions offered by the console menu.
//!
//! This module contains:
//! - the numbered action table and its dispatcher
//! - flat maintenance sequences (apt, AppArmor, IPv6 sysctl)
//!
//! # Architecture
//!
//! Privileged commands are run through the configured escalation helper
//! (`sudo` by default); the helper handles authentication.
//!
//! ```text
//! Console → ConsoleActions → firewall / network / vpn → CommandRunner → sudo
//! ```

mod actions;
mod maintenance;

pub use actions::{
    find_action, AdminActionResult, ConsoleActions, Prompt, EXIT_ACTION, MENU_ACTIONS,
};
