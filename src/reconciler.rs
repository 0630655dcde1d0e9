// Zone Sync - Zone Reconciler
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Converges one firewalld zone to its declared state.
//!
//! Every property follows the same shape: query the live value, diff it
//! against the desired value, then issue one command per element. Live state
//! is never cached between calls, so changing one property cannot leave a
//! stale read of another.

use std::fmt;

use tracing::{debug, info, warn};

use crate::codec;
use crate::diff::{self, Diff};
use crate::error::{CommandError, QueryError, Result};
use crate::firewall::{CommandRunner, Invocation};
use crate::models::{Ensure, LiveSnapshot, SetProperty, TargetPolicy, ZoneSpec};

/// What a full pass did to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyAction {
    Created,
    Updated,
    Destroyed,
    Unchanged,
}

/// Outcome of [`ZoneReconciler::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub zone: String,
    pub action: ApplyAction,
    /// Mutating commands issued.
    pub commands: usize,
}

impl ApplyReport {
    /// Whether any mutating command was issued.
    pub fn changed(&self) -> bool {
        self.commands > 0
    }
}

impl fmt::Display for ApplyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.action {
            ApplyAction::Created => "created",
            ApplyAction::Updated => "updated",
            ApplyAction::Destroyed => "destroyed",
            ApplyAction::Unchanged => "unchanged",
        };
        write!(f, "{}: {} ({} commands)", self.zone, action, self.commands)
    }
}

/// Reconciles zones through a [`CommandRunner`].
pub struct ZoneReconciler<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> ZoneReconciler<'a, R> {
    /// Create a reconciler that issues commands through `runner`.
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    fn query(&self, invocation: Invocation) -> Result<String, QueryError> {
        let output = self.runner.run(&invocation)?;
        debug!("{:?} -> {:?}", invocation.command_line(), output);
        Ok(output)
    }

    fn mutate(&self, zone: &str, args: &[&str]) -> Result<(), CommandError> {
        info!("zone {}: {}", zone, args.join(" "));
        self.runner.run(&Invocation::zoned(zone, args.iter().copied()))?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════

    /// Names of every zone firewalld knows.
    pub fn list_zones(&self) -> Result<Vec<String>, QueryError> {
        let output = self.query(Invocation::global(["--get-zones"]))?;
        Ok(codec::split_tokens(&output))
    }

    /// Check whether firewalld knows a zone called `name`.
    pub fn exists(&self, name: &str) -> Result<bool, QueryError> {
        Ok(self.list_zones()?.iter().any(|zone| zone == name))
    }

    /// Create a zone and populate it. Properties are diffed against an empty
    /// zone without querying the daemon. Returns the number of commands issued.
    pub fn create(&self, spec: &ZoneSpec) -> Result<usize, CommandError> {
        info!("Creating zone {}", spec.name);
        self.runner
            .run(&Invocation::global(["--new-zone", spec.name.as_str()]))?;
        let mut commands = 1;

        if let Some(target) = spec.target {
            self.set_target(&spec.name, target)?;
            commands += 1;
        }

        for property in SetProperty::CREATE_ORDER {
            if let Some(desired) = spec.declared(property) {
                let diff = Diff::from_empty(&canonical(property, desired));
                self.apply_diff(&spec.name, property, &diff)?;
                commands += diff.len();
            }
        }

        if spec.masquerade == Some(true) {
            self.set_masquerade(&spec.name, true)?;
            commands += 1;
        }

        Ok(commands)
    }

    /// Delete a zone from the permanent configuration.
    pub fn destroy(&self, name: &str) -> Result<(), CommandError> {
        info!("Deleting zone {}", name);
        self.runner.run(&Invocation::global(["--delete-zone", name]))?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SCALAR PROPERTIES
    // ═══════════════════════════════════════════════════════════════════════

    /// Get the zone target, sentinel-wrapped whatever the daemon returned.
    pub fn get_target(&self, name: &str) -> Result<TargetPolicy, QueryError> {
        let output = self.query(Invocation::zoned(name, ["--get-target"]))?;
        if output.trim().is_empty() {
            return Err(QueryError::Malformed {
                query: "--get-target".to_string(),
                output,
            });
        }
        codec::normalize_target(&output)
    }

    /// Set the zone target.
    pub fn set_target(&self, name: &str, policy: TargetPolicy) -> Result<(), CommandError> {
        let token = policy.to_string();
        self.mutate(name, &["--set-target", token.as_str()])
    }

    /// Whether masquerading is enabled. A failed query means it was never
    /// configured and reads as disabled.
    pub fn get_masquerade(&self, name: &str) -> bool {
        match self.query(Invocation::zoned(name, ["--query-masquerade"]).lenient()) {
            Ok(output) => codec::parse_yes_no(&output),
            Err(e) => {
                warn!("Masquerade query for zone {} failed, assuming disabled: {}", name, e);
                false
            }
        }
    }

    /// Enable or disable masquerading.
    pub fn set_masquerade(&self, name: &str, enabled: bool) -> Result<(), CommandError> {
        let flag = if enabled { "--add-masquerade" } else { "--remove-masquerade" };
        self.mutate(name, &[flag])
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SET PROPERTIES
    // ═══════════════════════════════════════════════════════════════════════

    /// Current elements of a set-valued property. Empty output is an empty set.
    pub fn get_property(&self, name: &str, property: SetProperty) -> Result<Vec<String>, QueryError> {
        let mut invocation = Invocation::zoned(name, [property.list_flag()]);
        if !property.list_permanent() {
            invocation = invocation.runtime();
        }
        let output = self.query(invocation)?;
        Ok(property.parse_list(&output))
    }

    /// Converge a set-valued property and return the diff that was applied.
    /// Declared elements are compared in the form the daemon lists them.
    pub fn set_property(&self, name: &str, property: SetProperty, desired: &[String]) -> Result<Diff> {
        let live = self.get_property(name, property)?;
        let diff = Diff::between(&canonical(property, desired), &live);
        if diff.is_empty() {
            debug!("zone {}: {} already converged", name, property.name());
        }
        self.apply_diff(name, property, &diff)?;
        Ok(diff)
    }

    /// Issue one command per element. Adds come first so that swapping
    /// interfaces never leaves the zone without any.
    pub fn apply_diff(&self, name: &str, property: SetProperty, diff: &Diff) -> Result<(), CommandError> {
        for value in &diff.to_add {
            self.mutate(name, &[property.add_flag(), value.as_str()])?;
        }
        for value in &diff.to_remove {
            self.mutate(name, &[property.remove_flag(), value.as_str()])?;
        }
        Ok(())
    }

    /// Interfaces in the order the daemon reports them.
    pub fn get_interfaces(&self, name: &str) -> Result<Vec<String>, QueryError> {
        self.get_property(name, SetProperty::Interfaces)
    }

    /// Converge the zone's interfaces.
    pub fn set_interfaces(&self, name: &str, desired: &[String]) -> Result<Diff> {
        self.set_property(name, SetProperty::Interfaces, desired)
    }

    /// Sources sorted ascending.
    pub fn get_sources(&self, name: &str) -> Result<Vec<String>, QueryError> {
        self.get_property(name, SetProperty::Sources)
    }

    /// Converge the zone's sources.
    pub fn set_sources(&self, name: &str, desired: &[String]) -> Result<Diff> {
        self.set_property(name, SetProperty::Sources, desired)
    }

    /// Blocked ICMP types in the order the daemon reports them.
    pub fn get_icmp_blocks(&self, name: &str) -> Result<Vec<String>, QueryError> {
        self.get_property(name, SetProperty::IcmpBlocks)
    }

    /// Converge the zone's blocked ICMP types.
    pub fn set_icmp_blocks(&self, name: &str, desired: &[String]) -> Result<Diff> {
        self.set_property(name, SetProperty::IcmpBlocks, desired)
    }

    /// Open ports sorted ascending.
    pub fn get_ports(&self, name: &str) -> Result<Vec<String>, QueryError> {
        self.get_property(name, SetProperty::Ports)
    }

    /// Converge the zone's open ports.
    pub fn set_ports(&self, name: &str, desired: &[String]) -> Result<Diff> {
        self.set_property(name, SetProperty::Ports, desired)
    }

    /// Enabled services sorted ascending.
    pub fn get_services(&self, name: &str) -> Result<Vec<String>, QueryError> {
        self.get_property(name, SetProperty::Services)
    }

    /// Converge the zone's enabled services.
    pub fn set_services(&self, name: &str, desired: &[String]) -> Result<Diff> {
        self.set_property(name, SetProperty::Services, desired)
    }

    /// Rich rules as the daemon lists them, one per line.
    pub fn get_rich_rules(&self, name: &str) -> Result<Vec<String>, QueryError> {
        self.get_property(name, SetProperty::RichRules)
    }

    /// Converge the zone's rich rules.
    pub fn set_rich_rules(&self, name: &str, desired: &[String]) -> Result<Diff> {
        self.set_property(name, SetProperty::RichRules, desired)
    }

    /// Every ICMP type the daemon recognizes.
    pub fn list_icmp_types(&self) -> Result<Vec<String>, QueryError> {
        let output = self.query(Invocation::global(["--get-icmptypes"]))?;
        Ok(codec::split_tokens(&output))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // FULL PASSES
    // ═══════════════════════════════════════════════════════════════════════

    /// Query every property of an existing zone.
    pub fn snapshot(&self, name: &str) -> Result<LiveSnapshot, QueryError> {
        Ok(LiveSnapshot {
            name: name.to_string(),
            target: self.get_target(name)?,
            interfaces: self.get_interfaces(name)?,
            sources: self.get_sources(name)?,
            icmp_blocks: self.get_icmp_blocks(name)?,
            masquerade: self.get_masquerade(name),
            ports: self.get_ports(name)?,
            services: self.get_services(name)?,
            rich_rules: self.get_rich_rules(name)?,
        })
    }

    /// Converge the managed properties of an existing zone. Returns the number
    /// of commands issued.
    pub fn update(&self, spec: &ZoneSpec) -> Result<usize> {
        let name = spec.name.as_str();
        let mut commands = 0;

        if let Some(desired) = spec.target {
            if let Some(target) = diff::scalar(&desired, &self.get_target(name)?) {
                self.set_target(name, target)?;
                commands += 1;
            }
        }

        for property in SetProperty::CREATE_ORDER {
            if let Some(desired) = spec.declared(property) {
                commands += self.set_property(name, property, desired)?.len();
            }
        }

        if let Some(desired) = spec.masquerade {
            if let Some(enabled) = diff::scalar(&desired, &self.get_masquerade(name)) {
                self.set_masquerade(name, enabled)?;
                commands += 1;
            }
        }

        Ok(commands)
    }

    /// Create, update or destroy a zone so it matches `spec`.
    pub fn apply(&self, spec: &ZoneSpec) -> Result<ApplyReport> {
        let exists = self.exists(&spec.name)?;

        let (action, commands) = match (spec.ensure, exists) {
            (Ensure::Absent, true) => {
                self.destroy(&spec.name)?;
                (ApplyAction::Destroyed, 1)
            }
            (Ensure::Absent, false) => (ApplyAction::Unchanged, 0),
            (Ensure::Present, false) => (ApplyAction::Created, self.create(spec)?),
            (Ensure::Present, true) => match self.update(spec)? {
                0 => (ApplyAction::Unchanged, 0),
                n => (ApplyAction::Updated, n),
            },
        };

        Ok(ApplyReport {
            zone: spec.name.clone(),
            action,
            commands,
        })
    }
}

fn canonical(property: SetProperty, values: &[String]) -> Vec<String> {
    values.iter().map(|value| property.canonical(value)).collect()
}
