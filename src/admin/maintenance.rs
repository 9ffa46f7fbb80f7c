// Security Console - Host Maintenance Sequences
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Flat command lists for package updates, AppArmor and IPv6.
//!
//! These carry no state; each is run once through the fail-fast sequence
//! interpreter.

use crate::exec::{CommandSequence, HostCommand};

/// Sysctl keys toggled by the IPv6 hardening actions.
const IPV6_KEYS: [&str; 3] = [
    "net.ipv6.conf.all.disable_ipv6",
    "net.ipv6.conf.default.disable_ipv6",
    "net.ipv6.conf.lo.disable_ipv6",
];

/// Full apt upgrade followed by cleanup.
pub fn system_update(escalation: &str) -> CommandSequence {
    let apt = |args: &[&str]| HostCommand::privileged(escalation, "apt").args(args.iter().copied());

    CommandSequence::new("system update")
        .then(apt(&["update"]))
        .then(apt(&["full-upgrade", "-y"]))
        .then(apt(&["autoremove"]))
        .then(apt(&["clean"]))
}

/// Enable or disable AppArmor now and at boot.
pub fn apparmor(enable: bool, escalation: &str) -> CommandSequence {
    let verb = if enable { "enable" } else { "disable" };

    CommandSequence::new(format!("{} AppArmor", verb))
        .then(HostCommand::privileged(escalation, "systemctl").args([verb, "--now", "apparmor"]))
}

/// Disable IPv6 on all interfaces until reboot, or turn it back on.
pub fn ipv6(disable: bool, escalation: &str) -> CommandSequence {
    let value = if disable { "1" } else { "0" };
    let label = if disable { "disable IPv6" } else { "restore IPv6" };

    IPV6_KEYS.iter().fold(CommandSequence::new(label), |sequence, key| {
        let assignment = format!("{}={}", key, value);
        let sysctl = HostCommand::privileged(escalation, "sysctl");
        sequence.then(sysctl.args(["-w", assignment.as_str()]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::FakeRunner;

    fn lines(sequence: &CommandSequence) -> Vec<String> {
        sequence.steps().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn update_runs_apt_in_order() {
        assert_eq!(
            lines(&system_update("sudo")),
            vec![
                "sudo apt update",
                "sudo apt full-upgrade -y",
                "sudo apt autoremove",
                "sudo apt clean",
            ]
        );
    }

    #[test]
    fn update_stops_after_failed_refresh() {
        let runner = FakeRunner::new().exit("apt update", 100);
        assert!(!system_update("sudo").run(&runner).is_success());
        assert_eq!(runner.calls(), vec!["sudo apt update"]);
    }

    #[test]
    fn apparmor_toggles_unit() {
        assert_eq!(lines(&apparmor(true, "sudo")), vec!["sudo systemctl enable --now apparmor"]);
        assert_eq!(lines(&apparmor(false, "")), vec!["systemctl disable --now apparmor"]);
    }

    #[test]
    fn ipv6_covers_all_keys() {
        assert_eq!(
            lines(&ipv6(true, "sudo")),
            vec![
                "sudo sysctl -w net.ipv6.conf.all.disable_ipv6=1",
                "sudo sysctl -w net.ipv6.conf.default.disable_ipv6=1",
                "sudo sysctl -w net.ipv6.conf.lo.disable_ipv6=1",
            ]
        );
        assert!(lines(&ipv6(false, "sudo")).iter().all(|l| l.ends_with("=0")));
    }
}
