// Zone Sync - Manifest
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Declared zones loaded from a JSON file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{SetProperty, ZoneSpec};

/// A set of declared zones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub zones: Vec<ZoneSpec>,
}

impl Manifest {
    /// Read and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Manifest(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content)
            .map_err(|e| Error::Manifest(format!("{}: {}", path.display(), e)))
    }

    /// Parse and validate manifest JSON.
    pub fn parse(content: &str) -> Result<Self, String> {
        let manifest: Self = serde_json::from_str(content).map_err(|e| e.to_string())?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), String> {
        let mut names = HashSet::new();
        for zone in &self.zones {
            if zone.name.is_empty() || zone.name.chars().any(char::is_whitespace) {
                return Err(format!("invalid zone name {:?}", zone.name));
            }
            if !names.insert(zone.name.as_str()) {
                return Err(format!("zone {} declared more than once", zone.name));
            }
            for property in SetProperty::CREATE_ORDER {
                for value in zone.declared(property).unwrap_or_default() {
                    validate_element(property, value).map_err(|reason| {
                        format!("zone {}: {} entry {:?} {}", zone.name, property.name(), value, reason)
                    })?;
                }
            }
        }
        Ok(())
    }
}

/// Elements must survive the daemon's list splitting unchanged, otherwise
/// they never compare equal to the live value.
fn validate_element(property: SetProperty, value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("is empty");
    }
    match property {
        SetProperty::RichRules => {
            if value.contains(['\n', '\r']) {
                return Err("contains a line break");
            }
        }
        _ => {
            if value.chars().any(char::is_whitespace) {
                return Err("contains whitespace");
            }
        }
    }
    Ok(())
}
