// Security Console - Interface Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Network interface model.

use crate::network::CurrentAddress;

/// An active network interface, as seen at the start of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    pub name: String,
    pub current_address: CurrentAddress,
}

impl NetworkInterface {
    /// Create a new interface.
    pub fn new(name: &str, current_address: CurrentAddress) -> Self {
        Self {
            name: name.to_string(),
            current_address,
        }
    }

    /// Get a human-readable type for the interface.
    pub fn interface_type(&self) -> &'static str {
        if self.name.starts_with("eth") || self.name.starts_with("en") {
            "Ethernet"
        } else if self.name.starts_with("wl") {
            "Wireless"
        } else if self.name.starts_with("br") {
            "Bridge"
        } else if self.name.starts_with("veth") || self.name.starts_with("docker") {
            "Virtual (Container)"
        } else if self.name.starts_with("virbr") {
            "Virtual (Libvirt)"
        } else if self.name.starts_with("tun")
            || self.name.starts_with("tap")
            || self.name == "nordlynx"
        {
            "Tunnel"
        } else {
            "Unknown"
        }
    }
}
