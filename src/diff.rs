// Zone Sync - Diff
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Pure desired-versus-live comparison.

use std::collections::HashSet;

/// Elements to add and remove to turn a live set into a desired one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    /// `desired − live`, in desired order.
    pub to_add: Vec<String>,
    /// `live − desired`, in live order.
    pub to_remove: Vec<String>,
}

impl Diff {
    /// Compare two element lists. Duplicates on either side are collapsed.
    pub fn between(desired: &[String], live: &[String]) -> Self {
        let desired_set: HashSet<&str> = desired.iter().map(String::as_str).collect();
        let live_set: HashSet<&str> = live.iter().map(String::as_str).collect();

        Self {
            to_add: missing_from(desired, &live_set),
            to_remove: missing_from(live, &desired_set),
        }
    }

    /// Diff against an empty live set.
    pub fn from_empty(desired: &[String]) -> Self {
        Self::between(desired, &[])
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Number of commands needed to apply this diff.
    pub fn len(&self) -> usize {
        self.to_add.len() + self.to_remove.len()
    }
}

fn missing_from(values: &[String], other: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .filter(|value| !other.contains(value.as_str()))
        .filter(|value| seen.insert(value.as_str()))
        .cloned()
        .collect()
}

/// The desired scalar value, when it differs from the live one.
pub fn scalar<T: PartialEq + Clone>(desired: &T, live: &T) -> Option<T> {
    (desired != live).then(|| desired.clone())
}
