// Zone Sync - Main Entry Point
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! firewalld-zone-sync - converge firewalld zones from a JSON manifest.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use zone_sync::config::Settings;
use zone_sync::firewall::{Daemon, FirewallCmd};
use zone_sync::manifest::Manifest;
use zone_sync::ZoneReconciler;

mod cli;

use cli::{ApplyArgs, Cli, Command, ZoneArgs};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut settings = Settings::new();
    if let Some(program) = &cli.firewall_cmd {
        settings.set_firewall_cmd(program);
    }
    if cli.pkexec {
        settings.set_use_pkexec(true);
    }

    // zbus runs its blocking connection on the tokio executor.
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let _guard = runtime.enter();

    let runner = FirewallCmd::from_settings(&settings);
    let reconciler = ZoneReconciler::new(&runner);

    match cli.command {
        Command::Apply(args) => run_apply(&reconciler, settings, args),
        Command::Show(ZoneArgs { zone }) => {
            let snapshot = reconciler
                .snapshot(&zone)
                .with_context(|| format!("Failed to read zone {}", zone))?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Exists(ZoneArgs { zone }) => {
            let exists = reconciler.exists(&zone).context("Failed to list zones")?;
            Ok(if exists { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Command::Delete(ZoneArgs { zone }) => {
            reconciler
                .destroy(&zone)
                .with_context(|| format!("Failed to delete zone {}", zone))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::IcmpTypes => {
            for icmp_type in reconciler.list_icmp_types().context("Failed to list ICMP types")? {
                println!("{}", icmp_type);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_apply(
    reconciler: &ZoneReconciler<'_, FirewallCmd>,
    mut settings: Settings,
    args: ApplyArgs,
) -> Result<ExitCode> {
    if args.no_reload {
        settings.set_reload_after_apply(false);
    }

    let manifest = Manifest::load(&args.manifest)?;

    let daemon = if settings.check_daemon_state() || settings.reload_after_apply() {
        let daemon = Daemon::connect().context("Failed to connect to firewalld over D-Bus")?;
        if settings.check_daemon_state() {
            daemon.ensure_running()?;
        }
        Some(daemon)
    } else {
        None
    };

    let mut changed = false;
    for spec in &manifest.zones {
        let report = reconciler
            .apply(spec)
            .with_context(|| format!("Failed to converge zone {}", spec.name))?;
        changed |= report.changed();
        println!("{}", report);
    }

    match daemon {
        Some(daemon) if changed && settings.reload_after_apply() => daemon.reload()?,
        _ => info!("Skipping firewalld reload"),
    }

    Ok(ExitCode::SUCCESS)
}
