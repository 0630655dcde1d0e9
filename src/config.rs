// Zone Sync - Configuration
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Runner and reload settings read from a local JSON file. The file is
//! edited by hand and never written back.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::firewall::FIREWALL_CMD;

/// Settings file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// firewall-cmd executable.
    #[serde(default = "default_firewall_cmd")]
    pub firewall_cmd: String,
    /// Run firewall-cmd through pkexec.
    #[serde(default)]
    pub use_pkexec: bool,
    /// Verify firewalld reports RUNNING over D-Bus before applying.
    #[serde(default = "default_true")]
    pub check_daemon_state: bool,
    /// Reload firewalld after permanent changes.
    #[serde(default = "default_true")]
    pub reload_after_apply: bool,
}

fn default_firewall_cmd() -> String { FIREWALL_CMD.to_string() }
fn default_true() -> bool { true }

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            firewall_cmd: default_firewall_cmd(),
            use_pkexec: false,
            check_daemon_state: default_true(),
            reload_after_apply: default_true(),
        }
    }
}

/// Settings for one run: the file's contents plus command-line overrides.
#[derive(Debug)]
pub struct Settings {
    settings: AppSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Load from the user config directory.
    pub fn new() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("firewalld-zone-sync")
            .join("settings.json");
        Self::load(path)
    }

    /// Load from `path`, falling back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let settings = if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(s) => s,
                    Err(e) => {
                        warn!("Failed to parse settings: {}", e);
                        AppSettings::default()
                    }
                },
                Err(e) => {
                    warn!("Failed to read settings: {}", e);
                    AppSettings::default()
                }
            }
        } else {
            AppSettings::default()
        };

        Self { settings }
    }

    pub fn firewall_cmd(&self) -> &str {
        &self.settings.firewall_cmd
    }

    /// Override the executable for this run only.
    pub fn set_firewall_cmd(&mut self, program: &str) {
        self.settings.firewall_cmd = program.to_string();
    }

    pub fn use_pkexec(&self) -> bool {
        self.settings.use_pkexec
    }

    pub fn set_use_pkexec(&mut self, enabled: bool) {
        self.settings.use_pkexec = enabled;
    }

    pub fn check_daemon_state(&self) -> bool {
        self.settings.check_daemon_state
    }

    pub fn reload_after_apply(&self) -> bool {
        self.settings.reload_after_apply
    }

    pub fn set_reload_after_apply(&mut self, enabled: bool) {
        self.settings.reload_after_apply = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = Settings::load(dir.path().join("settings.json"));
        assert_eq!(settings.firewall_cmd(), "firewall-cmd");
        assert!(!settings.use_pkexec());
        assert!(settings.check_daemon_state());
        assert!(settings.reload_after_apply());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"use_pkexec": true, "reload_after_apply": false}"#).unwrap();

        let settings = Settings::load(&path);
        assert!(settings.use_pkexec());
        assert!(!settings.reload_after_apply());
        assert_eq!(settings.firewall_cmd(), "firewall-cmd");
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(Settings::load(&path).settings, AppSettings::default());
    }

    #[test]
    fn test_overrides_stay_in_memory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");

        let mut settings = Settings::load(&path);
        settings.set_firewall_cmd("/usr/local/bin/firewall-cmd");
        settings.set_use_pkexec(true);
        assert_eq!(settings.firewall_cmd(), "/usr/local/bin/firewall-cmd");
        assert!(settings.use_pkexec());

        assert!(!path.exists());
        assert_eq!(Settings::load(&path).settings, AppSettings::default());
    }
}
