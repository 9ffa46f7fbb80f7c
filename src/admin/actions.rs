// Security Console - Menu Actions
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! The numbered console actions and their execution.
//!
//! # Design Principles
//!
//! - Every action is explicit and operator-triggered
//! - One menu entry maps to exactly one operation
//! - VPN operations run under the firewall guard
//! - Operator input is trimmed; empty input cancels before any command runs

use std::fmt::Write as _;

use tracing::info;

use super::maintenance;
use crate::config::AppSettings;
use crate::exec::{Attempt, CommandRunner, SequenceOutcome};
use crate::firewall::{FirewallGuard, Restoration, UfwClient};
use crate::network::{
    AddressMode, IdentitySequencer, MacAddress, MacChangeReport, SysfsAddresses, LOOPBACK,
};
use crate::storage::MacHistory;
use crate::vpn::VpnClient;

/// A console action.
#[derive(Debug, Clone)]
pub struct AdminAction {
    /// What the operator types to select it
    pub key: &'static str,
    /// Unique identifier for this action
    pub id: &'static str,
    /// Menu text
    pub title: &'static str,
    /// Category for grouping
    pub category: ActionCategory,
}

/// Category of action for menu grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    System,
    Firewall,
    MacAddress,
    VpnAccount,
    VpnConnection,
    AppArmor,
    Hardening,
    History,
    Exit,
}

impl ActionCategory {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Firewall => "Firewall",
            Self::MacAddress => "MAC Address",
            Self::VpnAccount => "NordVPN - Authentication & Settings",
            Self::VpnConnection => "NordVPN - Connections",
            Self::AppArmor => "AppArmor",
            Self::Hardening => "Additional Security Options",
            Self::History => "History",
            Self::Exit => "Exit",
        }
    }
}

/// Result of an action execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminActionResult {
    pub success: bool,
    pub message: String,
    /// Conditions the operator must notice even when the action succeeded.
    pub warnings: Vec<String>,
}

impl AdminActionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            warnings: Vec::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            warnings: Vec::new(),
        }
    }

    fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

/// Action id of the exit entry; handled by the console loop.
pub const EXIT_ACTION: &str = "exit";

/// All console actions, in menu order.
pub const MENU_ACTIONS: &[AdminAction] = &[
    // System
    AdminAction {
        key: "1",
        id: "system_update",
        title: "System Update",
        category: ActionCategory::System,
    },
    // Firewall
    AdminAction {
        key: "2",
        id: "firewall_enable",
        title: "Enable Firewall (UFW)",
        category: ActionCategory::Firewall,
    },
    AdminAction {
        key: "3",
        id: "firewall_disable",
        title: "Disable Firewall (UFW)",
        category: ActionCategory::Firewall,
    },
    AdminAction {
        key: "4",
        id: "firewall_status",
        title: "Firewall Status (UFW)",
        category: ActionCategory::Firewall,
    },
    AdminAction {
        key: "5",
        id: "firewall_rules",
        title: "Apply Firewall Rules (UFW)",
        category: ActionCategory::Firewall,
    },
    // MAC address
    AdminAction {
        key: "6",
        id: "mac_manual",
        title: "Change MAC Address MANUALLY on all active interfaces",
        category: ActionCategory::MacAddress,
    },
    AdminAction {
        key: "7",
        id: "mac_random",
        title: "Change MAC Address RANDOMLY on all active interfaces",
        category: ActionCategory::MacAddress,
    },
    // NordVPN account
    AdminAction {
        key: "8",
        id: "vpn_login",
        title: "NordVPN Login",
        category: ActionCategory::VpnAccount,
    },
    AdminAction {
        key: "9",
        id: "vpn_settings_on",
        title: "Enable Advanced NordVPN Settings (killswitch / DNS / autoconnect)",
        category: ActionCategory::VpnAccount,
    },
    AdminAction {
        key: "10",
        id: "vpn_settings_off",
        title: "Disable Advanced NordVPN Settings",
        category: ActionCategory::VpnAccount,
    },
    AdminAction {
        key: "11",
        id: "vpn_status",
        title: "NordVPN Status",
        category: ActionCategory::VpnAccount,
    },
    // NordVPN connections
    AdminAction {
        key: "12",
        id: "vpn_connect",
        title: "Connect VPN (Auto)",
        category: ActionCategory::VpnConnection,
    },
    AdminAction {
        key: "13",
        id: "vpn_connect_country",
        title: "Connect VPN by Country",
        category: ActionCategory::VpnConnection,
    },
    AdminAction {
        key: "14",
        id: "vpn_disconnect",
        title: "Disconnect VPN",
        category: ActionCategory::VpnConnection,
    },
    // AppArmor
    AdminAction {
        key: "15",
        id: "apparmor_enable",
        title: "Enable AppArmor",
        category: ActionCategory::AppArmor,
    },
    AdminAction {
        key: "16",
        id: "apparmor_disable",
        title: "Disable AppArmor",
        category: ActionCategory::AppArmor,
    },
    // Hardening
    AdminAction {
        key: "17",
        id: "ipv6_disable",
        title: "Apply Additional Security (disable IPv6)",
        category: ActionCategory::Hardening,
    },
    AdminAction {
        key: "18",
        id: "ipv6_restore",
        title: "Restore Security Settings (enable IPv6)",
        category: ActionCategory::Hardening,
    },
    // History
    AdminAction {
        key: "19",
        id: "mac_history",
        title: "Show MAC Change History",
        category: ActionCategory::History,
    },
    // Exit
    AdminAction {
        key: "0",
        id: EXIT_ACTION,
        title: "Exit",
        category: ActionCategory::Exit,
    },
];

/// Look up the action selected by `choice`.
pub fn find_action(choice: &str) -> Option<&'static AdminAction> {
    let choice = choice.trim();
    MENU_ACTIONS.iter().find(|a| a.key == choice)
}

/// Source of free-text operator input.
pub trait Prompt {
    /// Ask `question`; `None` when input is closed.
    fn ask(&mut self, question: &str) -> Option<String>;
}

/// Executes console actions against the host.
pub struct ConsoleActions<'a> {
    runner: &'a dyn CommandRunner,
    settings: &'a AppSettings,
    history: MacHistory,
}

impl<'a> ConsoleActions<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        settings: &'a AppSettings,
        history: MacHistory,
    ) -> Self {
        Self { runner, settings, history }
    }

    fn firewall(&self) -> UfwClient<'a> {
        UfwClient::new(
            self.runner,
            &self.settings.firewall_program,
            &self.settings.privilege_command,
        )
    }

    fn vpn(&self) -> VpnClient<'a> {
        VpnClient::new(self.runner, &self.settings.vpn_program, &self.settings.vpn_dns_servers)
    }

    fn sequencer(&self) -> IdentitySequencer<'a> {
        IdentitySequencer::new(
            self.runner,
            SysfsAddresses::new(&self.settings.sysfs_net_root),
            &self.settings.ip_program,
            &self.settings.privilege_command,
        )
    }

    /// Execute an action by ID.
    pub fn execute(&mut self, action_id: &str, prompt: &mut dyn Prompt) -> AdminActionResult {
        let settings = self.settings;
        let escalation = settings.privilege_command.as_str();

        let result = match action_id {
            "system_update" => sequence_result(
                maintenance::system_update(escalation).run(self.runner),
                "System update completed",
                "System update stopped",
            ),
            "firewall_enable" => self.firewall_enable(),
            "firewall_disable" => self.firewall_disable(),
            "firewall_status" => match self.firewall().show_status(false) {
                Attempt::Succeeded => AdminActionResult::success("End of firewall status"),
                Attempt::Failed => AdminActionResult::failure("Error showing firewall status"),
            },
            "firewall_rules" => self.firewall_rules(),
            "mac_manual" => self.change_mac_manual(prompt),
            "mac_random" => self.change_mac_random(),
            "vpn_login" => self.guarded("NordVPN login", || self.vpn().login()),
            "vpn_settings_on" => self.vpn_settings_on(),
            "vpn_settings_off" => self.guarded("Disabling advanced VPN settings", || {
                self.vpn().disable_advanced_settings()
            }),
            "vpn_status" => self.guarded("VPN status", || self.vpn().status()),
            "vpn_connect" => self.guarded("VPN connection", || self.vpn().connect()),
            "vpn_connect_country" => self.connect_country(prompt),
            "vpn_disconnect" => self.guarded("VPN disconnect", || self.vpn().disconnect()),
            "apparmor_enable" => sequence_result(
                maintenance::apparmor(true, escalation).run(self.runner),
                "AppArmor enabled and started",
                "Error enabling/starting AppArmor",
            ),
            "apparmor_disable" => sequence_result(
                maintenance::apparmor(false, escalation).run(self.runner),
                "AppArmor disabled and stopped",
                "Error disabling/stopping AppArmor",
            ),
            "ipv6_disable" => sequence_result(
                maintenance::ipv6(true, escalation).run(self.runner),
                "IPv6 disabled (until reboot)",
                "Stopped: IPv6 may not be fully disabled",
            ),
            "ipv6_restore" => sequence_result(
                maintenance::ipv6(false, escalation).run(self.runner),
                "IPv6 restored",
                "Stopped: IPv6 may not have been fully restored",
            ),
            "mac_history" => self.mac_history(),
            _ => AdminActionResult::failure(format!("Unknown action: {}", action_id)),
        };

        info!(
            "Action {} {}",
            action_id,
            if result.success { "completed successfully" } else { "failed" }
        );
        result
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // FIREWALL ACTIONS
    // ═══════════════════════════════════════════════════════════════════════════

    fn firewall_enable(&self) -> AdminActionResult {
        let firewall = self.firewall();
        if !firewall.enable().is_success() {
            return AdminActionResult::failure("Error enabling firewall");
        }
        let result = AdminActionResult::success("Firewall enabled");
        match firewall.show_status(true) {
            Attempt::Succeeded => result,
            Attempt::Failed => result.with_warning("Error showing firewall status"),
        }
    }

    fn firewall_disable(&self) -> AdminActionResult {
        let firewall = self.firewall();
        if !firewall.disable().is_success() {
            return AdminActionResult::failure("Error disabling firewall");
        }
        let result = AdminActionResult::success("Firewall disabled");
        match firewall.show_status(false) {
            Attempt::Succeeded => result,
            Attempt::Failed => result.with_warning("Error showing firewall status"),
        }
    }

    fn firewall_rules(&self) -> AdminActionResult {
        let rules = self.settings.rule_set();
        if rules.dns_servers.is_empty() {
            return AdminActionResult::failure(NO_DNS_SERVERS);
        }
        sequence_result(
            self.firewall().apply_rules(&rules),
            "Firewall rules applied",
            "Firewall rules only partially applied",
        )
    }

    /// Run `operation` under the firewall guard and describe the outcome.
    fn guarded<F>(&self, what: &str, operation: F) -> AdminActionResult
    where
        F: FnOnce() -> bool,
    {
        let firewall = self.firewall();
        let report = FirewallGuard::new(&firewall).run(operation);

        let mut result = if report.succeeded() {
            AdminActionResult::success(format!("{} completed", what))
        } else {
            AdminActionResult::failure(format!("{} failed", what))
        };

        if report.suspension == Some(Attempt::Failed) {
            result = result.with_warning("Could not disable the firewall before the operation");
        }

        match report.restoration {
            Restoration::NotRequired | Restoration::Restored => result,
            Restoration::RestoreFailed => result.with_warning(
                "Firewall could not be re-enabled. \
                 It may still be disabled, check the firewall status.",
            ),
            Restoration::LeftDisabled => result.with_warning(
                "Firewall NOT re-enabled automatically. It remains disabled until you enable it.",
            ),
        }
    }

    fn vpn_settings_on(&self) -> AdminActionResult {
        if self.settings.vpn_dns_servers.is_empty() {
            return AdminActionResult::failure(NO_DNS_SERVERS);
        }
        self.guarded("Enabling advanced VPN settings", || {
            self.vpn().enable_advanced_settings()
        })
    }

    fn connect_country(&self, prompt: &mut dyn Prompt) -> AdminActionResult {
        let country = prompt
            .ask("Enter country (e.g., Italy, France, Germany): ")
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        if country.is_empty() {
            return AdminActionResult::failure("No country entered. Operation cancelled.");
        }

        self.guarded(&format!("Connection to {}", country), || self.vpn().connect_to(&country))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // MAC ADDRESS ACTIONS
    // ═══════════════════════════════════════════════════════════════════════════

    fn change_mac_manual(&mut self, prompt: &mut dyn Prompt) -> AdminActionResult {
        let sequencer = self.sequencer();

        let interfaces = match sequencer.active_interfaces() {
            Ok(interfaces) => interfaces,
            Err(e) => return AdminActionResult::failure(e.to_string()),
        };
        if interfaces.is_empty() {
            return no_interfaces();
        }

        let answer = prompt
            .ask(&format!(
                "Active interfaces found: {}\nEnter the MAC to apply (format xx:xx:xx:xx:xx:xx): ",
                interfaces.join(", ")
            ))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        if answer.is_empty() {
            return AdminActionResult::failure("No MAC address entered. Operation cancelled.");
        }

        let new_address = if self.settings.validate_manual_mac {
            match answer.parse::<MacAddress>() {
                Ok(mac) if mac.is_multicast() => {
                    return AdminActionResult::failure(format!(
                        "{} is a multicast address and cannot be assigned. Operation cancelled.",
                        mac
                    ))
                }
                Ok(mac) => {
                    if !mac.is_locally_administered() {
                        info!("{} is a globally administered (vendor) address", mac);
                    }
                    mac.to_string()
                }
                Err(e) => {
                    return AdminActionResult::failure(format!("{:#}. Operation cancelled.", e))
                }
            }
        } else {
            answer
        };

        let report = sequencer.apply_all(&interfaces, AddressMode::Manual(&new_address));
        self.history.record(&report);
        mac_report_result(&report, "Operation completed")
    }

    fn change_mac_random(&mut self) -> AdminActionResult {
        match self.sequencer().change_all(AddressMode::Random) {
            Ok(report) if report.is_empty() => no_interfaces(),
            Ok(report) => {
                self.history.record(&report);
                mac_report_result(&report, "Random MAC operation completed")
            }
            Err(e) => AdminActionResult::failure(e.to_string()),
        }
    }

    fn mac_history(&mut self) -> AdminActionResult {
        let entries = self.history.entries();
        if entries.is_empty() {
            return AdminActionResult::success("No MAC changes recorded yet");
        }

        let mut message = String::new();
        for entry in entries {
            let _ = writeln!(
                message,
                "{}  {:<12} {} -> {}  {}",
                entry.recorded_at,
                entry.interface,
                entry.old_address,
                entry.new_address,
                if entry.succeeded {
                    "ok".to_string()
                } else {
                    format!("failed at: {}", entry.failed_step)
                }
            );
        }
        AdminActionResult::success(message.trim_end().to_string())
    }
}

const NO_DNS_SERVERS: &str =
    "No VPN DNS servers configured (vpn_dns_servers is empty). Operation cancelled.";

fn no_interfaces() -> AdminActionResult {
    AdminActionResult::success(format!("No active interfaces found (excluding {}).", LOOPBACK))
}

fn sequence_result(outcome: SequenceOutcome, done: &str, stopped: &str) -> AdminActionResult {
    match outcome.failure() {
        None => AdminActionResult::success(done),
        Some(failure) => {
            AdminActionResult::failure(format!("{}: error executing {}", stopped, failure))
        }
    }
}

fn mac_report_result(report: &MacChangeReport, done: &str) -> AdminActionResult {
    let mut message = String::new();

    for change in &report.changes {
        let interface = &change.interface;
        let kind = interface.interface_type();
        let _ = writeln!(message, ">>> Interface {} ({}):", interface.name, kind);
        let _ = writeln!(message, "    Current MAC: {}", interface.current_address);
        let _ = writeln!(message, "    New MAC:     {}", change.new_address);
        match (change.outcome.failure(), change.left_in()) {
            (Some(failure), Some(state)) => {
                let _ = writeln!(message, "    Result:      error executing {}", failure);
                let _ = writeln!(message, "    Link:        {}", state);
            }
            _ => {
                let _ = writeln!(message, "    Result:      changed");
            }
        }
    }
    message.push_str(done);

    let failed: Vec<String> = report
        .failed()
        .map(|c| format!("{} ({})", c.interface.name, c.left_in().unwrap_or("unknown")))
        .collect();
    if failed.is_empty() {
        AdminActionResult::success(message)
    } else {
        AdminActionResult::failure(message)
            .with_warning(format!("Interfaces not fully changed: {}", failed.join(", ")))
    }
}
