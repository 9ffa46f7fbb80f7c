// Security Console - VPN Client
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! NordVPN command-line client.
//!
//! Every operation reports plain success/failure so it can be wrapped by
//! the firewall guard. Output of the VPN tool goes straight to the
//! terminal.

use tracing::{error, info};

use crate::exec::{run_best_effort, CommandRunner, CommandSequence, HostCommand};

/// Client for the `nordvpn` tool.
pub struct VpnClient<'a> {
    runner: &'a dyn CommandRunner,
    program: String,
    dns_servers: Vec<String>,
}

impl<'a> VpnClient<'a> {
    pub fn new(runner: &'a dyn CommandRunner, program: &str, dns_servers: &[String]) -> Self {
        Self {
            runner,
            program: program.to_string(),
            dns_servers: dns_servers.to_vec(),
        }
    }

    fn command<I, S>(&self, args: I) -> HostCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HostCommand::new(self.program.as_str()).args(args)
    }

    fn run(&self, label: &str, args: &[&str]) -> bool {
        CommandSequence::new(label)
            .then(self.command(args.iter().copied()))
            .run(self.runner)
            .is_success()
    }

    /// Start the interactive login procedure.
    pub fn login(&self) -> bool {
        info!("Starting NordVPN login...");
        self.run("login", &["login"])
    }

    /// Connect to the recommended server.
    pub fn connect(&self) -> bool {
        let ok = self.run("connect", &["connect"]);
        if ok {
            info!("VPN connection started");
        }
        ok
    }

    /// Connect to a server in `country`.
    ///
    /// The name is passed through as typed (trimmed). Empty input issues no
    /// command and fails.
    pub fn connect_to(&self, country: &str) -> bool {
        let country = country.trim();
        if country.is_empty() {
            error!("No country entered, connection cancelled");
            return false;
        }

        let ok = self.run("connect to country", &["connect", country]);
        if ok {
            info!("Connecting to {}", country);
        }
        ok
    }

    /// Disconnect, then show the status.
    pub fn disconnect(&self) -> bool {
        info!("Disconnecting NordVPN...");
        if !self.run("disconnect", &["disconnect"]) {
            return false;
        }
        run_best_effort(self.runner, &self.command(["status"]), "showing VPN status");
        true
    }

    /// Show the connection status.
    pub fn status(&self) -> bool {
        self.run("status", &["status"])
    }

    /// Killswitch on, custom DNS, autoconnect on.
    pub fn enable_advanced_settings(&self) -> bool {
        let mut dns = vec!["set".to_string(), "dns".to_string()];
        dns.extend(self.dns_servers.iter().cloned());

        let sequence = CommandSequence::new("advanced VPN settings")
            .then(self.command(["set", "killswitch", "on"]))
            .then(self.command(dns))
            .then(self.command(["set", "autoconnect", "on"]));

        if !sequence.run(self.runner).is_success() {
            return false;
        }

        run_best_effort(self.runner, &self.command(["status"]), "showing VPN status");
        info!("Advanced settings enabled");
        true
    }

    /// Killswitch off, default DNS, autoconnect off.
    pub fn disable_advanced_settings(&self) -> bool {
        let sequence = CommandSequence::new("advanced VPN settings")
            .then(self.command(["set", "killswitch", "off"]))
            .then(self.command(["set", "dns", "0"]))
            .then(self.command(["set", "autoconnect", "off"]));

        if !sequence.run(self.runner).is_success() {
            return false;
        }

        run_best_effort(self.runner, &self.command(["settings"]), "showing VPN settings");
        info!("Advanced settings disabled");
        true
    }
}
