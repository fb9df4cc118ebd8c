//! Error types for ovpnpilot.

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::exec::OutputChannel;

/// Main error type for ovpnpilot operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Child-process execution errors
    #[error("Exec error: {0}")]
    Exec(#[from] ExecError),

    /// The requested client does not exist
    #[error("no client named {name}")]
    NotFound { name: String },

    /// Client name rejected before any command was built
    #[error("invalid client name {name:?}: only word characters are allowed")]
    InvalidName { name: String },

    /// The configured server URL could not be parsed
    #[error("invalid server url {url:?}")]
    InvalidServerUrl { url: String },

    /// Client roster output could not be parsed
    #[error("client list parse error: {0}")]
    Roster(#[from] csv::Error),

    /// I/O error outside of a child-process session
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Execution layer errors (process spawning, stream I/O, timeouts).
#[derive(Error, Debug)]
pub enum ExecError {
    /// The child process could not be started
    #[error("failed to spawn {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Unexpected read error on an output pipe
    #[error("read error on child {channel}: {source}")]
    Read {
        channel: OutputChannel,
        #[source]
        source: io::Error,
    },

    /// Failed to write a response to the child's stdin
    #[error("write to child stdin failed: {0}")]
    Write(#[source] io::Error),

    /// Failed to collect the child's exit status
    #[error("failed to wait on child: {0}")]
    Wait(#[source] io::Error),

    /// Deadline elapsed while the session was still open
    #[error("command timed out after {0:?}")]
    Timeout(Duration),

    /// The process completed but reported failure
    #[error("command exited with status {status:?}")]
    NonZeroExit {
        status: Option<i32>,
        /// Combined output captured before exit, for diagnostics.
        output: String,
    },
}

/// Result type alias using ovpnpilot's Error.
pub type Result<T> = std::result::Result<T, Error>;
