// Security Console - ufw Client
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! ufw command-line client implementation.

use anyhow::{bail, Result};
use tracing::{info, warn};

use super::{FirewallControl, FirewallState};
use crate::exec::{
    run_best_effort, Attempt, CommandRunner, CommandSequence, HostCommand, SequenceOutcome,
};

/// Inputs for the VPN-aware rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    /// Tunnel interface allowed to carry outbound traffic and DNS.
    pub vpn_interface: String,
    /// Resolvers reachable on port 53 through the tunnel.
    pub dns_servers: Vec<String>,
}

/// Client for driving ufw.
pub struct UfwClient<'a> {
    runner: &'a dyn CommandRunner,
    program: String,
    escalation: String,
}

impl<'a> UfwClient<'a> {
    /// Create a new ufw client.
    pub fn new(runner: &'a dyn CommandRunner, program: &str, escalation: &str) -> Self {
        Self {
            runner,
            program: program.to_string(),
            escalation: escalation.to_string(),
        }
    }

    fn command<I, S>(&self, args: I) -> HostCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HostCommand::privileged(&self.escalation, self.program.as_str()).args(args)
    }

    /// Captured `ufw status` text.
    pub fn status_text(&self) -> Result<String> {
        let output = self.runner.output(&self.command(["status"]))?;
        if !output.success() {
            bail!("ufw status failed: {}", output.stderr.trim());
        }
        Ok(output.stdout)
    }

    /// Enable the firewall.
    pub fn enable(&self) -> SequenceOutcome {
        info!("Enabling ufw firewall...");
        CommandSequence::new("enable firewall")
            .then(self.command(["enable"]))
            .run(self.runner)
    }

    /// Disable the firewall.
    pub fn disable(&self) -> SequenceOutcome {
        info!("Disabling ufw firewall...");
        CommandSequence::new("disable firewall")
            .then(self.command(["disable"]))
            .run(self.runner)
    }

    /// Print the status to the terminal.
    pub fn show_status(&self, verbose: bool) -> Attempt {
        let command = if verbose {
            self.command(["status", "verbose"])
        } else {
            self.command(["status"])
        };
        run_best_effort(self.runner, &command, "showing firewall status")
    }

    /// Default policies plus DNS pinned to the VPN tunnel.
    pub fn rules_sequence(&self, rules: &RuleSet) -> CommandSequence {
        let iface = rules.vpn_interface.as_str();

        let mut sequence = CommandSequence::new("firewall rules")
            .then(self.command(["default", "deny", "incoming"]))
            .then(self.command(["default", "allow", "outgoing"]))
            .then(self.command(["logging", "on"]))
            .then(self.command(["allow", "in", "on", "lo"]))
            .then(self.command(["allow", "out", "on", iface]));

        for proto in ["udp", "tcp"] {
            for server in &rules.dns_servers {
                sequence = sequence.then(self.command([
                    "allow",
                    "out",
                    "on",
                    iface,
                    "to",
                    server.as_str(),
                    "port",
                    "53",
                    "proto",
                    proto,
                ]));
            }
        }

        for proto in ["udp", "tcp"] {
            sequence = sequence
                .then(self.command(["deny", "out", "to", "any", "port", "53", "proto", proto]));
        }

        sequence
    }

    /// Apply [`Self::rules_sequence`], stopping at the first failing rule.
    pub fn apply_rules(&self, rules: &RuleSet) -> SequenceOutcome {
        info!("Setting ufw firewall rules...");
        self.rules_sequence(rules).run(self.runner)
    }
}

impl FirewallControl for UfwClient<'_> {
    fn query_state(&self) -> FirewallState {
        match self.status_text() {
            Ok(text) => FirewallState::from_status_text(&text),
            Err(e) => {
                warn!("Unable to determine firewall status: {:#}", e);
                FirewallState::Inactive
            }
        }
    }

    fn suspend(&self) -> Attempt {
        run_best_effort(self.runner, &self.command(["disable"]), "disabling firewall")
    }

    fn restore(&self) -> Attempt {
        run_best_effort(self.runner, &self.command(["enable"]), "re-enabling firewall")
    }
}
