// Zone Sync - Zone Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Declared and live zone state.

use serde::{Deserialize, Serialize};

use super::{SetProperty, TargetPolicy};

/// Whether a declared zone should exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ensure {
    #[default]
    Present,
    Absent,
}

/// Desired state of one firewall zone.
///
/// A set-valued field of `None` leaves that property unmanaged. `Some` means
/// the zone should carry exactly those elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneSpec {
    pub name: String,
    #[serde(default)]
    pub ensure: Ensure,
    #[serde(default)]
    pub target: Option<TargetPolicy>,
    #[serde(default)]
    pub interfaces: Option<Vec<String>>,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    #[serde(default)]
    pub icmp_blocks: Option<Vec<String>>,
    #[serde(default)]
    pub masquerade: Option<bool>,
    #[serde(default)]
    pub ports: Option<Vec<String>>,
    #[serde(default)]
    pub services: Option<Vec<String>>,
    #[serde(default)]
    pub rich_rules: Option<Vec<String>>,
}

impl ZoneSpec {
    /// Create a spec that only declares the zone.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Declared elements for a set-valued property, if managed.
    pub fn declared(&self, property: SetProperty) -> Option<&[String]> {
        let values = match property {
            SetProperty::Interfaces => &self.interfaces,
            SetProperty::Sources => &self.sources,
            SetProperty::IcmpBlocks => &self.icmp_blocks,
            SetProperty::Ports => &self.ports,
            SetProperty::Services => &self.services,
            SetProperty::RichRules => &self.rich_rules,
        };
        values.as_deref()
    }
}

/// Zone state as reported by the daemon at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveSnapshot {
    pub name: String,
    pub target: TargetPolicy,
    pub interfaces: Vec<String>,
    pub sources: Vec<String>,
    pub icmp_blocks: Vec<String>,
    pub masquerade: bool,
    pub ports: Vec<String>,
    pub services: Vec<String>,
    pub rich_rules: Vec<String>,
}
