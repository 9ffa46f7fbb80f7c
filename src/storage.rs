// Security Console - Storage
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Persistent journal of MAC address changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::network::{InterfaceChange, MacChangeReport};

/// One applied (or attempted) address change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacHistoryEntry {
    pub recorded_at: String,
    pub interface: String,
    pub old_address: String,
    pub new_address: String,
    #[serde(default)]
    pub succeeded: bool,
    /// Failed step, empty on success.
    #[serde(default)]
    pub failed_step: String,
}

impl MacHistoryEntry {
    pub fn from_change(change: &InterfaceChange) -> Self {
        Self {
            recorded_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            interface: change.interface.name.clone(),
            old_address: change.interface.current_address.to_string(),
            new_address: change.new_address.clone(),
            succeeded: change.succeeded(),
            failed_step: change
                .outcome
                .failure()
                .map(|f| f.command.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Storage for the MAC change journal.
#[derive(Debug, Default)]
pub struct MacHistory {
    entries: Vec<MacHistoryEntry>,
    path: PathBuf,
    loaded: bool,
}

impl MacHistory {
    pub const FILE_NAME: &'static str = "mac_history.json";

    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            entries: Vec::new(),
            path: dir.as_ref().join(Self::FILE_NAME),
            loaded: false,
        }
    }

    fn ensure_loaded(&mut self) {
        if !self.loaded {
            self.load();
            self.loaded = true;
        }
    }

    fn load(&mut self) {
        if let Ok(content) = fs::read_to_string(&self.path) {
            match serde_json::from_str(&content) {
                Ok(entries) => {
                    self.entries = entries;
                }
                Err(e) => {
                    warn!("Failed to parse MAC history: {}", e);
                }
            }
        }
    }

    fn save(&self) {
        use std::io::Write;
        #[cfg(unix)]
        use std::os::unix::fs::PermissionsExt;

        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        match serde_json::to_string_pretty(&self.entries) {
            Ok(content) => match fs::File::create(&self.path) {
                Ok(mut file) => {
                    #[cfg(unix)]
                    {
                        if let Err(e) = file.set_permissions(fs::Permissions::from_mode(0o600)) {
                            warn!("Failed to set file permissions: {}", e);
                        }
                    }
                    if let Err(e) = file.write_all(content.as_bytes()) {
                        warn!("Failed to save MAC history: {}", e);
                    }
                }
                Err(e) => {
                    warn!("Failed to create MAC history file: {}", e);
                }
            },
            Err(e) => {
                warn!("Failed to serialize MAC history: {}", e);
            }
        }
    }

    /// Append every interface of `report` and persist.
    pub fn record(&mut self, report: &MacChangeReport) {
        if report.is_empty() {
            return;
        }
        self.ensure_loaded();
        self.entries
            .extend(report.changes.iter().map(MacHistoryEntry::from_change));
        self.save();
    }

    /// All entries, oldest first.
    pub fn entries(&mut self) -> &[MacHistoryEntry] {
        self.ensure_loaded();
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::{FailureReason, HostCommand, SequenceOutcome, StepFailure};
    use crate::models::NetworkInterface;
    use crate::network::CurrentAddress;

    fn report() -> MacChangeReport {
        MacChangeReport {
            changes: vec![
                InterfaceChange {
                    interface: NetworkInterface::new("eth0", CurrentAddress::Unknown),
                    new_address: "02:11:22:33:44:55".to_string(),
                    outcome: SequenceOutcome::Completed { steps: 3 },
                },
                InterfaceChange {
                    interface: NetworkInterface::new("wlan0", CurrentAddress::Unknown),
                    new_address: "02:11:22:33:44:66".to_string(),
                    outcome: SequenceOutcome::Failed(StepFailure {
                        index: 1,
                        command: HostCommand::new("ip").args(["link", "set", "dev", "wlan0"]),
                        reason: FailureReason::Exit(Some(2)),
                    }),
                },
            ],
        }
    }

    #[test]
    fn records_survive_reload() {
        let dir = tempfile::tempdir().unwrap();

        MacHistory::new(dir.path()).record(&report());
        let mut reloaded = MacHistory::new(dir.path());
        let entries = reloaded.entries();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].interface, "eth0");
        assert_eq!(entries[0].old_address, "Unknown");
        assert!(entries[0].succeeded);
        assert!(!entries[1].succeeded);
        assert_eq!(entries[1].failed_step, "ip link set dev wlan0");
    }

    #[test]
    fn appends_to_existing_journal() {
        let dir = tempfile::tempdir().unwrap();

        MacHistory::new(dir.path()).record(&report());
        MacHistory::new(dir.path()).record(&report());

        assert_eq!(MacHistory::new(dir.path()).entries().len(), 4);
    }

    #[test]
    fn empty_report_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        MacHistory::new(dir.path()).record(&MacChangeReport::default());
        assert!(!dir.path().join(MacHistory::FILE_NAME).exists());
    }

    #[cfg(unix)]
    #[test]
    fn journal_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        MacHistory::new(dir.path()).record(&report());

        let metadata = fs::metadata(dir.path().join(MacHistory::FILE_NAME)).unwrap();
        let mode = metadata.permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
