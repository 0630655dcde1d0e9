// Zone Sync - Firewall Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! firewall-cmd execution and the firewalld D-Bus handle.

mod daemon;
mod runner;

pub use daemon::Daemon;
pub use runner::{CommandRunner, FirewallCmd, Invocation};

/// Default firewall-cmd executable.
pub const FIREWALL_CMD: &str = "firewall-cmd";

/// D-Bus bus name for firewalld.
pub const BUS_NAME: &str = "org.fedoraproject.FirewallD1";

/// D-Bus object paths.
pub mod paths {
    pub const ROOT: &str = "/org/fedoraproject/FirewallD1";
}

/// D-Bus interface names.
pub mod interfaces {
    /// Main firewalld interface (state property, reload).
    pub const MAIN: &str = "org.fedoraproject.FirewallD1";
    pub const PROPERTIES: &str = "org.freedesktop.DBus.Properties";
}

/// Value of the `state` property once firewalld has finished starting.
pub const STATE_RUNNING: &str = "RUNNING";
