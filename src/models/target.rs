// Zone Sync - Target Policy
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Zone target policy.
//!
//! firewalld wraps target tokens in a `%%` sentinel on the wire but does not
//! always include it when answering `--get-target`. A [`TargetPolicy`] is only
//! produced by [`crate::codec::normalize_target`], which accepts both forms,
//! and always renders with the sentinel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::QueryError;

/// Sentinel marker wrapped around target tokens.
pub const SENTINEL: &str = "%%";

/// Default disposition for traffic in a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetPolicy {
    Default,
    Accept,
    Reject,
    Drop,
}

impl TargetPolicy {
    /// Look up a bare token (no sentinel).
    pub(crate) fn from_token(token: &str) -> Option<Self> {
        [Self::Default, Self::Accept, Self::Reject, Self::Drop]
            .into_iter()
            .find(|policy| policy.token().eq_ignore_ascii_case(token))
    }

    /// The bare token as firewalld names it.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Accept => "ACCEPT",
            Self::Reject => "REJECT",
            Self::Drop => "DROP",
        }
    }
}

impl fmt::Display for TargetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SENTINEL}{}{SENTINEL}", self.token())
    }
}

impl FromStr for TargetPolicy {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::normalize_target(s)
    }
}

impl TryFrom<String> for TargetPolicy {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        codec::normalize_target(&value)
    }
}

impl From<TargetPolicy> for String {
    fn from(policy: TargetPolicy) -> Self {
        policy.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_sentinel() {
        assert_eq!(TargetPolicy::Reject.to_string(), "%%REJECT%%");
        assert_eq!(TargetPolicy::Default.to_string(), "%%default%%");
    }

    #[test]
    fn test_token_lookup_ignores_case() {
        assert_eq!(TargetPolicy::from_token("accept"), Some(TargetPolicy::Accept));
        assert_eq!(TargetPolicy::from_token("DEFAULT"), Some(TargetPolicy::Default));
        assert_eq!(TargetPolicy::from_token("%%DROP%%"), None);
        assert_eq!(TargetPolicy::from_token("LOG"), None);
    }

    #[test]
    fn test_serde_accepts_both_forms() {
        let wrapped: TargetPolicy = serde_json::from_str("\"%%REJECT%%\"").unwrap();
        let bare: TargetPolicy = serde_json::from_str("\"REJECT\"").unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(serde_json::to_string(&bare).unwrap(), "\"%%REJECT%%\"");
        assert!(serde_json::from_str::<TargetPolicy>("\"bogus\"").is_err());
    }
}
