// Zone Sync - Command Line
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "firewalld-zone-sync")]
#[command(about = "Converge firewalld zones to a declared configuration")]
pub struct Cli {
    /// Log every firewall-cmd call.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// firewall-cmd executable to run instead of the configured one.
    #[arg(long, global = true)]
    pub firewall_cmd: Option<String>,
    /// Run firewall-cmd through pkexec.
    #[arg(long, global = true)]
    pub pkexec: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Converge every zone declared in a manifest.
    Apply(ApplyArgs),
    /// Print the live state of a zone as JSON.
    Show(ZoneArgs),
    /// Exit 0 if the zone exists, 1 otherwise.
    Exists(ZoneArgs),
    /// Delete a zone.
    Delete(ZoneArgs),
    /// List the ICMP types firewalld knows.
    IcmpTypes,
}

#[derive(Parser, Debug)]
pub struct ApplyArgs {
    pub manifest: PathBuf,
    /// Do not reload firewalld after changes.
    #[arg(long)]
    pub no_reload: bool,
}

#[derive(Parser, Debug)]
pub struct ZoneArgs {
    pub zone: String,
}
