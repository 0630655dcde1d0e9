// Zone Sync - Value Codec
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Normalization of firewall-cmd output.

use crate::error::QueryError;
use crate::models::{TargetPolicy, SENTINEL};

/// Parse a target token with or without the `%%` sentinel.
pub fn normalize_target(raw: &str) -> Result<TargetPolicy, QueryError> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix(SENTINEL)
        .and_then(|rest| rest.strip_suffix(SENTINEL))
        .unwrap_or(trimmed);

    TargetPolicy::from_token(inner).ok_or_else(|| QueryError::InvalidTarget(trimmed.to_string()))
}

/// Split on runs of whitespace, dropping empty tokens.
pub fn split_tokens(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// [`split_tokens`] sorted ascending.
pub fn sorted_tokens(raw: &str) -> Vec<String> {
    let mut tokens = split_tokens(raw);
    tokens.sort();
    tokens
}

/// Split into trimmed, non-empty lines.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rewrite a rich rule into the form firewalld lists it in: single spaces
/// between elements and every attribute value double-quoted.
///
/// Element order is kept as written. firewalld also reorders some elements
/// when listing, so rules should be declared in the listed order.
pub fn normalize_rich_rule(raw: &str) -> String {
    rich_rule_elements(raw)
        .into_iter()
        .map(|element| match element.split_once('=') {
            Some((key, value)) => format!("{}=\"{}\"", key, unquote(value)),
            None => element,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split on whitespace outside single or double quotes.
fn rich_rule_elements(raw: &str) -> Vec<String> {
    let mut elements = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in raw.trim().chars() {
        match quote {
            Some(q) if c == q => {
                quote = None;
                current.push(c);
            }
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                current.push(c);
            }
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    elements.push(std::mem::take(&mut current));
                }
            }
            None => current.push(c),
        }
    }
    if !current.is_empty() {
        elements.push(current);
    }
    elements
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|q| value.strip_prefix(q).and_then(|v| v.strip_suffix(q)))
        .unwrap_or(value)
}

pub fn parse_yes_no(raw: &str) -> bool {
    raw.trim() == "yes"
}
