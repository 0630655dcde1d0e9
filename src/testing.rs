// Zone Sync - Test Runners
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! In-memory [`CommandRunner`]s for unit tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::CommandError;
use crate::firewall::{CommandRunner, Invocation};
use crate::models::SetProperty;

fn failure(invocation: &Invocation, stderr: &str) -> CommandError {
    CommandError::Failed {
        command: invocation.command_line().join(" "),
        code: Some(1),
        stderr: stderr.to_string(),
    }
}

fn is_mutation(flag: &str) -> bool {
    ["--add-", "--remove-", "--set-", "--new-", "--delete-"]
        .iter()
        .any(|prefix| flag.starts_with(prefix))
}

/// Records every invocation and answers from a table keyed by the first arg.
#[derive(Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
    responses: HashMap<String, String>,
    failing: HashSet<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, flag: &str, output: &str) -> Self {
        self.responses.insert(flag.to_string(), output.to_string());
        self
    }

    pub fn fail(mut self, flag: &str) -> Self {
        self.failing.insert(flag.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Argument lists of every call, in order.
    pub fn args(&self) -> Vec<Vec<String>> {
        self.calls.borrow().iter().map(|c| c.args.clone()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<String, CommandError> {
        self.calls.borrow_mut().push(invocation.clone());
        let flag = invocation.args.first().map(String::as_str).unwrap_or_default();
        if self.failing.contains(flag) {
            return Err(failure(invocation, "scripted failure"));
        }
        Ok(self.responses.get(flag).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct FakeZone {
    target: String,
    masquerade: bool,
    lists: HashMap<SetProperty, Vec<String>>,
}

/// Stateful stand-in for firewalld that tracks zones and their properties.
pub struct FakeDaemon {
    zones: RefCell<BTreeMap<String, FakeZone>>,
    mutations: RefCell<usize>,
}

impl FakeDaemon {
    pub fn new(zones: &[&str]) -> Self {
        let zones = zones
            .iter()
            .map(|name| {
                let zone = FakeZone {
                    target: "default".to_string(),
                    ..Default::default()
                };
                (name.to_string(), zone)
            })
            .collect();
        Self {
            zones: RefCell::new(zones),
            mutations: RefCell::new(0),
        }
    }

    /// Seed a property's elements.
    pub fn with_list(self, zone: &str, property: SetProperty, values: &[&str]) -> Self {
        if let Some(z) = self.zones.borrow_mut().get_mut(zone) {
            z.lists
                .insert(property, values.iter().map(|v| v.to_string()).collect());
        }
        self
    }

    pub fn mutations(&self) -> usize {
        *self.mutations.borrow()
    }

    pub fn has_zone(&self, zone: &str) -> bool {
        self.zones.borrow().contains_key(zone)
    }

    pub fn list(&self, zone: &str, property: SetProperty) -> Vec<String> {
        self.zones
            .borrow()
            .get(zone)
            .and_then(|z| z.lists.get(&property).cloned())
            .unwrap_or_default()
    }

    pub fn masquerade(&self, zone: &str) -> bool {
        self.zones.borrow().get(zone).is_some_and(|z| z.masquerade)
    }
}

impl CommandRunner for FakeDaemon {
    fn run(&self, invocation: &Invocation) -> Result<String, CommandError> {
        let flag = invocation.args.first().cloned().unwrap_or_default();
        let value = invocation.args.get(1).cloned().unwrap_or_default();
        if is_mutation(&flag) {
            *self.mutations.borrow_mut() += 1;
        }

        let mut zones = self.zones.borrow_mut();
        match flag.as_str() {
            "--get-zones" => return Ok(format!("{}\n", zones.keys().cloned().collect::<Vec<_>>().join(" "))),
            "--get-icmptypes" => return Ok("echo-reply echo-request redirect\n".to_string()),
            "--new-zone" => {
                zones.insert(value, FakeZone { target: "default".to_string(), ..Default::default() });
                return Ok("success\n".to_string());
            }
            "--delete-zone" => {
                return match zones.remove(&value) {
                    Some(_) => Ok("success\n".to_string()),
                    None => Err(failure(invocation, "INVALID_ZONE")),
                };
            }
            _ => {}
        }

        let name = invocation.zone.clone().unwrap_or_default();
        let zone = zones
            .get_mut(&name)
            .ok_or_else(|| failure(invocation, "INVALID_ZONE"))?;

        match flag.as_str() {
            // The daemon answers without the sentinel.
            "--get-target" => return Ok(format!("{}\n", zone.target)),
            "--set-target" => {
                zone.target = value.trim_matches('%').to_string();
                return Ok("success\n".to_string());
            }
            "--query-masquerade" => {
                return match (zone.masquerade, invocation.fail_on_error) {
                    (true, _) => Ok("yes\n".to_string()),
                    (false, false) => Ok("no\n".to_string()),
                    (false, true) => Err(failure(invocation, "no")),
                };
            }
            "--add-masquerade" | "--remove-masquerade" => {
                zone.masquerade = flag == "--add-masquerade";
                return Ok("success\n".to_string());
            }
            _ => {}
        }

        for property in SetProperty::CREATE_ORDER {
            // The daemon lists elements in its own canonical form.
            let value = property.canonical(&value);
            let list = zone.lists.entry(property).or_default();
            if flag == property.list_flag() {
                let separator = if property == SetProperty::RichRules { "\n" } else { " " };
                return Ok(format!("{}\n", list.join(separator)));
            }
            if flag == property.add_flag() {
                if !list.contains(&value) {
                    list.push(value);
                }
                return Ok("success\n".to_string());
            }
            if flag == property.remove_flag() {
                list.retain(|v| *v != value);
                return Ok("success\n".to_string());
            }
        }

        Err(failure(invocation, "unknown option"))
    }
}
