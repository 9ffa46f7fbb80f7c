// Security Console - Interface Enumeration
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Discovery of active interfaces and their current hardware addresses.
//!
//! # Data Sources
//!
//! - `ip -o link show up` - one line per link in the UP state
//! - `/sys/class/net/{iface}/address` - current hardware address

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{CurrentAddress, MacAddress};
use crate::exec::{CommandRunner, HostCommand};

/// Name of the loopback device, never part of an enumeration.
pub const LOOPBACK: &str = "lo";

/// Default sysfs directory holding one entry per network device.
pub const SYSFS_NET: &str = "/sys/class/net";

/// The link listing could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumerationError {
    /// The listing command could not be started.
    Unavailable(String),
    /// The listing command exited non-zero.
    Failed { code: Option<i32>, stderr: String },
}

impl fmt::Display for EnumerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "Unable to read interfaces: {}", reason),
            Self::Failed { code, stderr } => {
                write!(f, "Unable to read interfaces: link listing failed")?;
                if let Some(code) = code {
                    write!(f, " with exit status {}", code)?;
                }
                if !stderr.trim().is_empty() {
                    write!(f, ": {}", stderr.trim())?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for EnumerationError {}

/// List the names of interfaces currently UP, loopback excluded.
///
/// An empty list is a normal answer, not an error.
pub fn list_active_interfaces(
    runner: &dyn CommandRunner,
    ip_program: &str,
) -> Result<Vec<String>, EnumerationError> {
    let command = HostCommand::new(ip_program).args(["-o", "link", "show", "up"]);

    let output = runner
        .output(&command)
        .map_err(|e| EnumerationError::Unavailable(format!("{:#}", e)))?;

    if !output.success() {
        return Err(EnumerationError::Failed {
            code: output.code,
            stderr: output.stderr,
        });
    }

    let names = parse_link_list(&output.stdout);
    debug!("Active interfaces: {:?}", names);
    Ok(names)
}

/// Parse `ip -o link` output.
///
/// Format: `index: name[@parent]: <flags> ...`
fn parse_link_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split(':');
            fields.next()?;
            let field = fields.next()?.trim();
            // veth pairs and VLANs are printed as `name@parent`
            let name = field.split('@').next().unwrap_or(field);
            if name.is_empty() || name == LOOPBACK {
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}

/// Reads current hardware addresses from sysfs.
#[derive(Debug, Clone)]
pub struct SysfsAddresses {
    root: PathBuf,
}

impl SysfsAddresses {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Best-effort read of `iface`'s address.
    ///
    /// A read failure or an empty file yields [`CurrentAddress::Unknown`];
    /// text that is not a six-octet address is kept verbatim.
    pub fn current_address(&self, iface: &str) -> CurrentAddress {
        let path = self.root.join(iface).join("address");

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return CurrentAddress::Unknown;
            }
        };

        let text = content.trim();
        if text.is_empty() {
            warn!("No address reported for {}", iface);
            return CurrentAddress::Unknown;
        }

        match text.parse::<MacAddress>() {
            Ok(mac) => CurrentAddress::Known(mac),
            Err(e) => {
                debug!("Non-Ethernet address for {}: {:#}", iface, e);
                CurrentAddress::Other(text.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::FakeRunner;

    const LINKS: &str = concat!(
        "1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536 qdisc noqueue state UNKNOWN \\",
        "    link/loopback 00:00:00:00:00:00 brd 00:00:00:00:00:00\n",
        "2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc fq_codel state UP \\",
        "    link/ether 52:54:00:12:34:56 brd ff:ff:ff:ff:ff:ff\n",
        "3: wlan0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc noqueue state UP \\",
        "    link/ether 3c:22:fb:00:11:22 brd ff:ff:ff:ff:ff:ff\n",
    );

    #[test]
    fn lists_up_links_without_loopback() {
        let runner = FakeRunner::new().stdout("ip -o link show up", LINKS);
        let names = list_active_interfaces(&runner, "ip").unwrap();

        assert_eq!(names, vec!["eth0", "wlan0"]);
        assert_eq!(runner.calls(), vec!["ip -o link show up"]);
    }

    #[test]
    fn loopback_only_yields_empty_list() {
        let runner =
            FakeRunner::new().stdout("link show", "1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536\n");
        assert!(list_active_interfaces(&runner, "ip").unwrap().is_empty());
    }

    #[test]
    fn strips_parent_suffix_and_ignores_junk() {
        let names =
            parse_link_list("7: veth12ab@if6: <UP> mtu 1500\n\ngarbage line\n8: lo-backup: <UP>\n");
        assert_eq!(names, vec!["veth12ab", "lo-backup"]);
    }

    #[test]
    fn non_zero_exit_is_enumeration_error() {
        let runner = FakeRunner::new().exit("link show", 255);
        let err = list_active_interfaces(&runner, "ip").unwrap_err();
        assert_eq!(err, EnumerationError::Failed { code: Some(255), stderr: String::new() });
    }

    #[test]
    fn missing_tool_is_enumeration_error() {
        let runner = FakeRunner::new().unavailable("ip");
        let err = list_active_interfaces(&runner, "ip").unwrap_err();
        assert!(matches!(err, EnumerationError::Unavailable(_)));
        assert!(err.to_string().starts_with("Unable to read interfaces"));
    }

    #[test]
    fn reads_address_from_sysfs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("eth0")).unwrap();
        fs::write(dir.path().join("eth0").join("address"), "52:54:00:AB:cd:01\n").unwrap();

        let sysfs = SysfsAddresses::new(dir.path());
        assert_eq!(sysfs.current_address("eth0").to_string(), "52:54:00:ab:cd:01");
    }

    #[test]
    fn unreadable_address_degrades_to_unknown() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("tun0")).unwrap();
        fs::write(dir.path().join("tun0").join("address"), "\n").unwrap();

        let sysfs = SysfsAddresses::new(dir.path());
        assert_eq!(sysfs.current_address("tun0"), CurrentAddress::Unknown);
        assert_eq!(sysfs.current_address("missing0"), CurrentAddress::Unknown);
    }

    #[test]
    fn non_ethernet_address_is_kept_verbatim() {
        let ib = "80:00:02:08:fe:80:00:00:00:00:00:00:00:02:c9:03:00:0a:1b:2c";
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("ib0")).unwrap();
        fs::write(dir.path().join("ib0").join("address"), format!("{}\n", ib)).unwrap();

        let sysfs = SysfsAddresses::new(dir.path());
        assert_eq!(sysfs.current_address("ib0"), CurrentAddress::Other(ib.to_string()));
        assert_eq!(sysfs.current_address("ib0").to_string(), ib);
    }
}
