// Zone Sync - Command Runner
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Execution of single firewall-cmd invocations.

use std::process::Command;

use tracing::debug;

use crate::config::Settings;
use crate::error::CommandError;

/// One firewall-cmd call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub args: Vec<String>,
    /// Rendered as `--zone=<name>`.
    pub zone: Option<String>,
    /// Rendered as `--permanent`.
    pub permanent: bool,
    /// When false, a non-zero exit status still yields stdout.
    pub fail_on_error: bool,
}

impl Invocation {
    /// A permanent call outside any zone.
    pub fn global<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            zone: None,
            permanent: true,
            fail_on_error: true,
        }
    }

    /// A permanent call scoped to `zone`.
    pub fn zoned<I, S>(zone: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            zone: Some(zone.to_string()),
            ..Self::global(args)
        }
    }

    /// Target the runtime configuration instead of the permanent one.
    pub fn runtime(mut self) -> Self {
        self.permanent = false;
        self
    }

    /// Do not treat a non-zero exit status as a failure.
    pub fn lenient(mut self) -> Self {
        self.fail_on_error = false;
        self
    }

    /// Arguments passed to firewall-cmd.
    pub fn command_line(&self) -> Vec<String> {
        let mut line = Vec::with_capacity(self.args.len() + 2);
        if self.permanent {
            line.push("--permanent".to_string());
        }
        if let Some(zone) = &self.zone {
            line.push(format!("--zone={zone}"));
        }
        line.extend(self.args.iter().cloned());
        line
    }
}

/// Executes firewall-cmd invocations and returns raw stdout.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<String, CommandError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<String, CommandError> {
        (**self).run(invocation)
    }
}

/// Runs the real firewall-cmd binary, optionally through pkexec.
#[derive(Debug, Clone)]
pub struct FirewallCmd {
    program: String,
    use_pkexec: bool,
}

impl FirewallCmd {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            use_pkexec: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.firewall_cmd()).with_pkexec(settings.use_pkexec())
    }

    /// Authenticate through Polkit before running.
    pub fn with_pkexec(mut self, enabled: bool) -> Self {
        self.use_pkexec = enabled;
        self
    }

    fn argv(&self, invocation: &Invocation) -> (String, Vec<String>) {
        let line = invocation.command_line();
        if self.use_pkexec {
            let mut args = vec![self.program.clone()];
            args.extend(line);
            ("pkexec".to_string(), args)
        } else {
            (self.program.clone(), line)
        }
    }
}

impl CommandRunner for FirewallCmd {
    fn run(&self, invocation: &Invocation) -> Result<String, CommandError> {
        let (program, args) = self.argv(invocation);
        let command = format!("{} {}", program, args.join(" "));
        debug!("Running {}", command);

        let output = Command::new(&program)
            .args(&args)
            .output()
            .map_err(|source| CommandError::Spawn {
                command: command.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            if invocation.fail_on_error {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                return Err(CommandError::Failed {
                    command,
                    code: output.status.code(),
                    stderr,
                });
            }
            debug!("{} exited with {:?}, ignoring", command, output.status.code());
        }

        Ok(stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_flags() {
        let inv = Invocation::zoned("public", ["--query-masquerade"]).lenient();
        assert_eq!(inv.command_line(), vec!["--permanent", "--zone=public", "--query-masquerade"]);
        assert!(!inv.fail_on_error);

        let inv = Invocation::zoned("restricted", ["--list-interfaces"]).runtime();
        assert_eq!(inv.command_line(), vec!["--zone=restricted", "--list-interfaces"]);

        let inv = Invocation::global(["--new-zone", "restricted"]);
        assert_eq!(inv.command_line(), vec!["--permanent", "--new-zone", "restricted"]);
    }

    #[test]
    fn test_pkexec_prefix() {
        let runner = FirewallCmd::new("firewall-cmd").with_pkexec(true);
        let (program, args) = runner.argv(&Invocation::global(["--get-zones"]));
        assert_eq!(program, "pkexec");
        assert_eq!(args, vec!["firewall-cmd", "--permanent", "--get-zones"]);
    }

    #[test]
    fn test_runs_program_and_captures_stdout() {
        let runner = FirewallCmd::new("echo");
        let out = runner
            .run(&Invocation::zoned("public", ["--list-sources"]))
            .unwrap();
        assert_eq!(out, "--permanent --zone=public --list-sources\n");
    }

    #[test]
    fn test_failure_respects_fail_on_error() {
        let runner = FirewallCmd::new("false");
        let strict = Invocation::global(["--get-zones"]);
        assert!(matches!(
            runner.run(&strict),
            Err(CommandError::Failed { code: Some(1), .. })
        ));
        assert_eq!(runner.run(&strict.lenient()).unwrap(), "");
    }

    #[test]
    fn test_missing_program() {
        let runner = FirewallCmd::new("/nonexistent/firewall-cmd");
        assert!(matches!(
            runner.run(&Invocation::global(["--get-zones"])),
            Err(CommandError::Spawn { .. })
        ));
    }
}
