//! # Ovpnpilot
//!
//! Expect-style automation for OpenVPN and easy-rsa client management.
//!
//! Ovpnpilot drives the otherwise-interactive `easyrsa` / `ovpn_*` command
//! line tools from async Rust: it spawns the tool as a child process,
//! watches stdout and stderr for prompt lines (heuristically, a trimmed
//! line ending in `:`), and injects scripted responses on stdin until the
//! tool exits or a deadline elapses.
//!
//! ## Features
//!
//! - Async child-process sessions via tokio (no PTY, plain pipes)
//! - Chunk-boundary-safe prompt detection on a per-channel accumulator
//! - Per-workflow prompt scripts (issue, revoke, PKI initialization)
//! - Local-binary or remote-exec (e.g. `docker compose exec`) resolution
//! - Client lifecycle operations with best-effort artifact cleanup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ovpnpilot::{lifecycle, Config};
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ovpnpilot::Error> {
//!     let config = Config::from_env();
//!     let ca_pass = SecretString::from("capass".to_string());
//!
//!     lifecycle::issue(&config, "alice", ca_pass, None).await?;
//!
//!     for client in lifecycle::list_clients(&config).await? {
//!         println!("{} {}", client.name, client.status);
//!     }
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod exec;
pub mod lifecycle;
pub mod script;

// Re-export main types for convenience
pub use command::{CommandInvocation, Resolver};
pub use config::Config;
pub use error::{Error, ExecError};
pub use exec::{drive, run, OutputChannel};
pub use lifecycle::Client;
pub use script::{InitPkiScript, IssueScript, PromptResponder, RevokeScript};
