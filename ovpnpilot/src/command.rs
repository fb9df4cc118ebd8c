//! Command resolution: logical tool name to a runnable invocation.
//!
//! Tools either live as local binaries under the configured `bin_dir` or
//! run inside a remote execution context (typically
//! `docker compose exec <service>`). The [`Resolver`] hides that choice
//! from the lifecycle layer.

use std::fmt;
use std::time::Duration;

use crate::config::Config;

/// Ceiling for non-interactive (fire-and-forget) commands.
pub const FLASH_TIMEOUT: Duration = Duration::from_secs(30);

/// Ceiling for interactive automation sessions.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(300);

/// One fully resolved command, immutable once constructed.
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    /// Executable path (or remote-exec entrypoint, e.g. `docker`).
    pub program: String,

    /// Final argument list, in order.
    pub args: Vec<String>,

    /// Ceiling on the child's total runtime.
    pub timeout: Duration,
}

impl CommandInvocation {
    /// Create a new invocation.
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Resolves logical tool names against the configured execution context.
#[derive(Debug, Clone)]
pub struct Resolver {
    bin_dir: std::path::PathBuf,
    remote_exec: Vec<String>,
}

impl Resolver {
    /// Create a resolver from the runtime configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            bin_dir: config.bin_dir.clone(),
            remote_exec: config.remote_exec.clone(),
        }
    }

    /// Resolve a tool invocation with an explicit timeout.
    pub fn resolve(&self, tool: &str, args: &[&str], timeout: Duration) -> CommandInvocation {
        if let Some((program, prefix)) = self.remote_exec.split_first() {
            let mut full = prefix.to_vec();
            full.push(tool.to_string());
            full.extend(args.iter().map(|a| a.to_string()));
            CommandInvocation::new(program.clone(), full, timeout)
        } else {
            let program = self.bin_dir.join(tool).to_string_lossy().into_owned();
            CommandInvocation::new(program, args.iter().map(|a| a.to_string()).collect(), timeout)
        }
    }

    /// Resolve a fire-and-forget invocation ([`FLASH_TIMEOUT`]).
    pub fn flash(&self, tool: &str, args: &[&str]) -> CommandInvocation {
        self.resolve(tool, args, FLASH_TIMEOUT)
    }

    /// Resolve an interactive invocation ([`SESSION_TIMEOUT`]).
    pub fn interactive(&self, tool: &str, args: &[&str]) -> CommandInvocation {
        self.resolve(tool, args, SESSION_TIMEOUT)
    }
}
