// Zone Sync - firewalld D-Bus Handle
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Daemon state checks and reloads over D-Bus.

use tracing::info;
use zbus::blocking::Connection;
use zbus::zvariant::OwnedValue;

use super::{interfaces, paths, BUS_NAME, STATE_RUNNING};
use crate::error::{Error, Result};

/// Connection to the firewalld service on the system bus.
pub struct Daemon {
    connection: Connection,
}

impl Daemon {
    /// Connect to firewalld.
    pub fn connect() -> Result<Self> {
        info!("Connecting to firewalld...");
        let connection = Connection::system()?;
        Ok(Self { connection })
    }

    /// Current value of the daemon's `state` property.
    pub fn state(&self) -> Result<String> {
        let value: OwnedValue = self
            .connection
            .call_method(
                Some(BUS_NAME),
                paths::ROOT,
                Some(interfaces::PROPERTIES),
                "Get",
                &(interfaces::MAIN, "state"),
            )?
            .body()
            .deserialize()?;

        let state = String::try_from(value).map_err(zbus::Error::from)?;
        Ok(state)
    }

    /// Fail unless firewalld reports itself as running.
    pub fn ensure_running(&self) -> Result<()> {
        let state = self.state()?;
        if state != STATE_RUNNING {
            return Err(Error::DaemonNotRunning(state));
        }
        Ok(())
    }

    /// Reload the runtime configuration from the permanent one.
    pub fn reload(&self) -> Result<()> {
        self.connection.call_method(
            Some(BUS_NAME),
            paths::ROOT,
            Some(interfaces::MAIN),
            "reload",
            &(),
        )?;

        info!("Firewalld configuration reloaded");
        Ok(())
    }
}
