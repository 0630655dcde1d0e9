// Zone Sync - Set Properties
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Set-valued zone properties and their firewall-cmd flags.

use crate::codec;

/// How a property's list output is ordered when returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    /// Keep the order the daemon reported.
    Reported,
    /// Sort ascending.
    Sorted,
}

/// A set-valued zone property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetProperty {
    Interfaces,
    Sources,
    IcmpBlocks,
    Ports,
    Services,
    RichRules,
}

impl SetProperty {
    /// Order in which properties are populated on zone creation.
    pub const CREATE_ORDER: [SetProperty; 6] = [
        Self::IcmpBlocks,
        Self::Sources,
        Self::Interfaces,
        Self::Ports,
        Self::Services,
        Self::RichRules,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Interfaces => "interfaces",
            Self::Sources => "sources",
            Self::IcmpBlocks => "icmp_blocks",
            Self::Ports => "ports",
            Self::Services => "services",
            Self::RichRules => "rich_rules",
        }
    }

    pub fn list_flag(&self) -> &'static str {
        match self {
            Self::Interfaces => "--list-interfaces",
            Self::Sources => "--list-sources",
            Self::IcmpBlocks => "--list-icmp-blocks",
            Self::Ports => "--list-ports",
            Self::Services => "--list-services",
            Self::RichRules => "--list-rich-rules",
        }
    }

    pub fn add_flag(&self) -> &'static str {
        match self {
            Self::Interfaces => "--add-interface",
            Self::Sources => "--add-source",
            Self::IcmpBlocks => "--add-icmp-block",
            Self::Ports => "--add-port",
            Self::Services => "--add-service",
            Self::RichRules => "--add-rich-rule",
        }
    }

    pub fn remove_flag(&self) -> &'static str {
        match self {
            Self::Interfaces => "--remove-interface",
            Self::Sources => "--remove-source",
            Self::IcmpBlocks => "--remove-icmp-block",
            Self::Ports => "--remove-port",
            Self::Services => "--remove-service",
            Self::RichRules => "--remove-rich-rule",
        }
    }

    /// Interfaces are listed from the runtime configuration, everything else
    /// from the permanent one.
    pub fn list_permanent(&self) -> bool {
        !matches!(self, Self::Interfaces)
    }

    pub fn ordering(&self) -> Ordering {
        match self {
            Self::Sources | Self::Ports | Self::Services => Ordering::Sorted,
            Self::Interfaces | Self::IcmpBlocks | Self::RichRules => Ordering::Reported,
        }
    }

    /// The form a declared element takes in the daemon's list output.
    pub fn canonical(&self, value: &str) -> String {
        match self {
            Self::RichRules => codec::normalize_rich_rule(value),
            _ => value.to_string(),
        }
    }

    /// Decode raw list output into elements.
    pub fn parse_list(&self, raw: &str) -> Vec<String> {
        match (self, self.ordering()) {
            // Rich rules contain spaces, one rule per line.
            (Self::RichRules, _) => codec::split_lines(raw),
            (_, Ordering::Sorted) => codec::sorted_tokens(raw),
            (_, Ordering::Reported) => codec::split_tokens(raw),
        }
    }
}
