// Security Console - Network Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Network interface identity management.
//!
//! This module contains:
//! - active interface enumeration via `ip -o link`
//! - hardware address generation, parsing and best-effort reads from sysfs
//! - the per-interface down / set address / up sequencer
//!
//! # Architecture
//!
//! ```text
//! IdentitySequencer → list_active_interfaces → ip -o link show up
//!                   → SysfsAddresses         → /sys/class/net/*/address
//!                   → CommandSequence        → sudo ip link set ...
//! ```

mod interfaces;
mod mac;
mod sequencer;

pub use interfaces::{SysfsAddresses, LOOPBACK, SYSFS_NET};
pub use mac::{CurrentAddress, MacAddress};
pub use sequencer::{AddressMode, IdentitySequencer, InterfaceChange, MacChangeReport};
