//! Child-process execution.
//!
//! Two entry points: [`run`] executes a command to completion and captures
//! its combined output (fire-and-forget), [`drive`] runs an interactive
//! automation session that answers prompts on the child's stdin.

mod buffer;
mod flash;
mod session;

pub use buffer::PromptBuffer;
pub use flash::run;
pub use session::drive;

use std::fmt;

/// Identifies which output pipe a chunk arrived on.
///
/// Used to route echo/display output and to tag prompt candidates; it
/// never gates prompt matching itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputChannel {
    /// The child's stdout.
    Stdout,
    /// The child's stderr.
    Stderr,
}

impl fmt::Display for OutputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputChannel::Stdout => write!(f, "stdout"),
            OutputChannel::Stderr => write!(f, "stderr"),
        }
    }
}
