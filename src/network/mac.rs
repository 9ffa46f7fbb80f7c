// Security Console - MAC Addresses
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Hardware address generation and parsing.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail};

/// Locally administered bit of the first octet.
const LOCAL_BIT: u8 = 0b0000_0010;
/// Multicast (group) bit of the first octet.
const MULTICAST_BIT: u8 = 0b0000_0001;

/// A six-octet hardware address.
///
/// Displays in canonical form: lowercase, two hex digits per octet, colon
/// separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// A fresh random, locally administered, unicast address.
    ///
    /// Drawn from the thread-local OS-seeded generator, so every call is
    /// different and nothing is reproducible.
    pub fn random() -> Self {
        let mut octets: [u8; 6] = rand::random();
        octets[0] = (octets[0] | LOCAL_BIT) & !MULTICAST_BIT;
        Self(octets)
    }

    pub fn is_locally_administered(&self) -> bool {
        self.0[0] & LOCAL_BIT != 0
    }

    pub fn is_multicast(&self) -> bool {
        self.0[0] & MULTICAST_BIT != 0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}", a, b, c, d, e, g)
    }
}

impl FromStr for MacAddress {
    type Err = anyhow::Error;

    /// Accepts `aa:bb:cc:dd:ee:ff` or `aa-bb-cc-dd-ee-ff`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let separator = if s.contains('-') { '-' } else { ':' };

        let parts: Vec<&str> = s.split(separator).collect();
        if parts.len() != 6 {
            bail!("Invalid MAC address '{}': expected 6 octets", s);
        }

        let mut octets = [0u8; 6];
        for (octet, part) in octets.iter_mut().zip(&parts) {
            if part.len() != 2 {
                bail!("Invalid MAC address '{}': octet '{}' must be two hex digits", s, part);
            }
            *octet = u8::from_str_radix(part, 16)
                .map_err(|_| {
                    anyhow!("Invalid MAC address '{}': '{}' is not hexadecimal", s, part)
                })?;
        }

        Ok(Self(octets))
    }
}

/// The address an interface had before a change, as far as we could tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentAddress {
    Known(MacAddress),
    /// Readable but not a six-octet address (InfiniBand, tunnels), kept as
    /// the kernel printed it.
    Other(String),
    Unknown,
}

impl fmt::Display for CurrentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(mac) => write!(f, "{}", mac),
            Self::Other(raw) => f.write_str(raw),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_addresses_are_local_unicast() {
        for _ in 0..256 {
            let mac = MacAddress::random();
            assert!(mac.is_locally_administered(), "{}", mac);
            assert!(!mac.is_multicast(), "{}", mac);
        }
    }

    #[test]
    fn random_addresses_render_canonically() {
        let text = MacAddress::random().to_string();
        assert_eq!(text.len(), 17);
        assert_eq!(text.split(':').count(), 6);
        assert!(text.chars().all(|c| c == ':' || c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn random_addresses_differ_between_calls() {
        // 40 random bits: a collision across 16 draws would point at a fixed seed.
        let drawn: std::collections::HashSet<_> = (0..16).map(|_| MacAddress::random()).collect();
        assert!(drawn.len() > 1);
    }

    #[test]
    fn parses_and_canonicalises() {
        let mac: MacAddress = "AA:BB:CC:0d:ee:FF".parse().unwrap();
        assert_eq!(mac.to_string(), "aa:bb:cc:0d:ee:ff");

        let dashed: MacAddress = "02-00-5E-10-00-01".parse().unwrap();
        assert_eq!(dashed.to_string(), "02:00:5e:10:00:01");
        assert!(dashed.is_locally_administered());
    }

    #[test]
    fn rejects_malformed_input() {
        let malformed = [
            "",
            "aa:bb:cc:dd:ee",
            "aa:bb:cc:dd:ee:ff:00",
            "aa:bb:cc:dd:ee:fg",
            "a:bb:cc:dd:ee:ff0",
        ];
        for bad in malformed {
            assert!(bad.parse::<MacAddress>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn multicast_bit_is_detected() {
        let mac: MacAddress = "01:00:5e:00:00:fb".parse().unwrap();
        assert!(mac.is_multicast());
        assert!(!mac.is_locally_administered());
    }

    #[test]
    fn unknown_displays_placeholder() {
        assert_eq!(CurrentAddress::Unknown.to_string(), "Unknown");
    }
}
