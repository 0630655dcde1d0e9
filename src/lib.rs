// Zone Sync - Library Root
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Converge firewalld zones to a declared configuration.
//!
//! ```text
//! Manifest → ZoneReconciler → CommandRunner → firewall-cmd → firewalld
//!                 ↓
//!        ValueCodec + Diff
//! ```

pub mod codec;
pub mod config;
pub mod diff;
pub mod error;
pub mod firewall;
pub mod manifest;
pub mod models;
pub mod reconciler;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{CommandError, Error, QueryError, Result};
pub use reconciler::{ApplyAction, ApplyReport, ZoneReconciler};
