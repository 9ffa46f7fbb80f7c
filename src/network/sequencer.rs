// Security Console - Interface Identity Sequencer
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Changes the hardware address of every active interface.
//!
//! Each interface gets its own three-step sequence:
//!
//! ```text
//! ip link set <iface> down → ip link set dev <iface> address <mac> → ip link set <iface> up
//! ```
//!
//! A failing step abandons the rest of that interface's sequence only; the
//! next interface is processed regardless. Nothing is rolled back, so an
//! interface whose address change failed stays down.

use tracing::{info, warn};

use super::interfaces::{list_active_interfaces, EnumerationError, SysfsAddresses};
use super::MacAddress;
use crate::exec::{CommandRunner, CommandSequence, HostCommand, SequenceOutcome};
use crate::models::NetworkInterface;

/// Where the new address for each interface comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode<'a> {
    /// The same operator-supplied text for every interface.
    Manual(&'a str),
    /// A fresh random address per interface.
    Random,
}

impl AddressMode<'_> {
    fn next_address(&self) -> String {
        match self {
            Self::Manual(address) => address.to_string(),
            Self::Random => MacAddress::random().to_string(),
        }
    }
}

/// What happened to one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceChange {
    pub interface: NetworkInterface,
    pub new_address: String,
    pub outcome: SequenceOutcome,
}

impl InterfaceChange {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_success()
    }

    /// Where a failed sequence left the link, `None` on success.
    ///
    /// Step indices follow [`IdentitySequencer::link_sequence`].
    pub fn left_in(&self) -> Option<&'static str> {
        self.outcome.failure().map(|failure| match failure.index {
            0 => "unchanged",
            1 => "down with its old address",
            _ => "down with the new address",
        })
    }
}

/// Per-interface results of one MAC change run, in interface order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacChangeReport {
    pub changes: Vec<InterfaceChange>,
}

impl MacChangeReport {
    /// No active interface was found.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn failed(&self) -> impl Iterator<Item = &InterfaceChange> {
        self.changes.iter().filter(|c| !c.succeeded())
    }
}

/// Applies new hardware addresses through `ip link`.
pub struct IdentitySequencer<'a> {
    runner: &'a dyn CommandRunner,
    addresses: SysfsAddresses,
    ip_program: String,
    escalation: String,
}

impl<'a> IdentitySequencer<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        addresses: SysfsAddresses,
        ip_program: &str,
        escalation: &str,
    ) -> Self {
        Self {
            runner,
            addresses,
            ip_program: ip_program.to_string(),
            escalation: escalation.to_string(),
        }
    }

    /// Interfaces currently UP, loopback excluded. Never cached.
    pub fn active_interfaces(&self) -> Result<Vec<String>, EnumerationError> {
        list_active_interfaces(self.runner, &self.ip_program)
    }

    /// The down / set address / up sequence for one interface.
    pub fn link_sequence(&self, iface: &str, new_address: &str) -> CommandSequence {
        let ip = |args: &[&str]| {
            HostCommand::privileged(&self.escalation, self.ip_program.as_str())
                .args(args.iter().copied())
        };

        CommandSequence::new(format!("interface {}", iface))
            .then(ip(&["link", "set", iface, "down"]))
            .then(ip(&["link", "set", "dev", iface, "address", new_address]))
            .then(ip(&["link", "set", iface, "up"]))
    }

    /// Apply `new_address` to one interface.
    ///
    /// The old address is read only for reporting and never gates the
    /// change.
    pub fn apply_address(&self, iface: &str, new_address: &str) -> InterfaceChange {
        let interface = NetworkInterface::new(iface, self.addresses.current_address(iface));

        info!(
            "Changing MAC of {} from {} to {}",
            iface, interface.current_address, new_address
        );

        let change = InterfaceChange {
            interface,
            new_address: new_address.to_string(),
            outcome: self.link_sequence(iface, new_address).run(self.runner),
        };

        if let (Some(failure), Some(state)) = (change.outcome.failure(), change.left_in()) {
            warn!("Interface {} left {} after failed step: {}", iface, state, failure);
        }

        change
    }

    /// Enumerate active interfaces and apply an address to each, in order.
    ///
    /// Fails only if the enumeration fails, in which case no link command is
    /// issued.
    pub fn change_all(&self, mode: AddressMode<'_>) -> Result<MacChangeReport, EnumerationError> {
        let interfaces = self.active_interfaces()?;

        if interfaces.is_empty() {
            info!("No active interfaces found (excluding {})", super::LOOPBACK);
            return Ok(MacChangeReport::default());
        }

        info!("Active interfaces found: {}", interfaces.join(", "));
        Ok(self.apply_all(&interfaces, mode))
    }

    /// Apply an address to each of `interfaces`, in order, regardless of
    /// earlier failures.
    pub fn apply_all(&self, interfaces: &[String], mode: AddressMode<'_>) -> MacChangeReport {
        let changes = interfaces
            .iter()
            .map(|iface| self.apply_address(iface, &mode.next_address()))
            .collect();

        MacChangeReport { changes }
    }
}
