// Security Console - VPN Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! VPN session control.

mod client;

pub use client::VpnClient;
