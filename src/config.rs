// Security Console - Configuration
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Console settings stored in a local JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::firewall::RuleSet;
use crate::network::SYSFS_NET;

/// Console settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Helper used to run privileged commands. Empty runs them directly.
    #[serde(default = "default_privilege_command")]
    pub privilege_command: String,
    /// `ip` binary from iproute2.
    #[serde(default = "default_ip_program")]
    pub ip_program: String,
    /// Firewall front-end.
    #[serde(default = "default_firewall_program")]
    pub firewall_program: String,
    /// VPN client.
    #[serde(default = "default_vpn_program")]
    pub vpn_program: String,
    /// Directory with one entry per network device.
    #[serde(default = "default_sysfs_net_root")]
    pub sysfs_net_root: PathBuf,
    /// Tunnel interface created by the VPN client.
    #[serde(default = "default_vpn_interface")]
    pub vpn_interface: String,
    /// Resolvers used for VPN DNS settings and firewall DNS rules.
    #[serde(default = "default_vpn_dns_servers")]
    pub vpn_dns_servers: Vec<String>,
    /// Reject malformed manual MAC addresses before touching any interface.
    #[serde(default = "default_true")]
    pub validate_manual_mac: bool,
}

fn default_privilege_command() -> String { "sudo".to_string() }
fn default_ip_program() -> String { "ip".to_string() }
fn default_firewall_program() -> String { "ufw".to_string() }
fn default_vpn_program() -> String { "nordvpn".to_string() }
fn default_sysfs_net_root() -> PathBuf { PathBuf::from(SYSFS_NET) }
fn default_vpn_interface() -> String { "nordlynx".to_string() }
fn default_vpn_dns_servers() -> Vec<String> {
    vec!["103.86.96.100".to_string(), "103.86.99.100".to_string()]
}
fn default_true() -> bool { true }

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            privilege_command: default_privilege_command(),
            ip_program: default_ip_program(),
            firewall_program: default_firewall_program(),
            vpn_program: default_vpn_program(),
            sysfs_net_root: default_sysfs_net_root(),
            vpn_interface: default_vpn_interface(),
            vpn_dns_servers: default_vpn_dns_servers(),
            validate_manual_mac: default_true(),
        }
    }
}

impl AppSettings {
    /// Replace values that would make an action unsafe with their defaults.
    ///
    /// An empty resolver list would leave the firewall rules with nothing but
    /// the port 53 deny rules, cutting off all DNS.
    fn sanitize(mut self, path: &Path) -> Self {
        self.vpn_dns_servers.retain(|server| !server.trim().is_empty());
        if self.vpn_dns_servers.is_empty() {
            warn!("No vpn_dns_servers in {}, using the defaults", path.display());
            self.vpn_dns_servers = default_vpn_dns_servers();
        }
        self
    }

    /// Rule inputs for the firewall client.
    pub fn rule_set(&self) -> RuleSet {
        RuleSet {
            vpn_interface: self.vpn_interface.clone(),
            dns_servers: self.vpn_dns_servers.clone(),
        }
    }
}

/// Settings manager that persists to a JSON file.
#[derive(Debug)]
pub struct Settings {
    settings: AppSettings,
    path: PathBuf,
}

impl Settings {
    /// Default location: `<config dir>/security-console/settings.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("security-console")
            .join("settings.json")
    }

    /// Load settings from `path`, falling back to defaults on any problem.
    ///
    /// A missing file is created with the defaults so it can be edited.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        let settings = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str::<AppSettings>(&content) {
                    Ok(s) => s.sanitize(&path),
                    Err(e) => {
                        warn!("Failed to parse settings {}: {}", path.display(), e);
                        AppSettings::default()
                    }
                },
                Err(e) => {
                    warn!("Failed to read settings {}: {}", path.display(), e);
                    AppSettings::default()
                }
            }
        } else {
            let fresh = Self {
                settings: AppSettings::default(),
                path,
            };
            fresh.save();
            return fresh;
        };

        Self { settings, path }
    }

    /// Save settings to disk.
    pub fn save(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        match serde_json::to_string_pretty(&self.settings) {
            Ok(content) => {
                if let Err(e) = fs::write(&self.path, content) {
                    warn!("Failed to save settings: {}", e);
                } else {
                    info!("Wrote default settings to {}", self.path.display());
                }
            }
            Err(e) => {
                warn!("Failed to serialize settings: {}", e);
            }
        }
    }

    /// The loaded values.
    pub fn values(&self) -> &AppSettings {
        &self.settings
    }

    /// Directory holding the settings file, used for other console state.
    pub fn state_dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
