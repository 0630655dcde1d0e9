// Zone Sync - Errors
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Error types for command execution, queries and whole reconciliation passes.

use std::io;

/// A firewall-cmd invocation that could not run or exited with a failure.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with status {code:?}: {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// A read-only query whose result could not be obtained or interpreted.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("unrecognized zone target `{0}`")]
    InvalidTarget(String),

    #[error("malformed output from `{query}`: {output:?}")]
    Malformed { query: String, output: String },
}

/// Crate-level error for full reconciliation passes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("manifest error: {0}")]
    Manifest(String),

    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    #[error("firewalld is not running (state: {0})")]
    DaemonNotRunning(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
