// Security Console - Models
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Data models for host entities.

mod interface;

pub use interface::NetworkInterface;
