//! Prompt scripts: per-workflow policies mapping an observed prompt line
//! to the text to inject on the child's stdin.
//!
//! Matching is always on a prefix of the trimmed last line, never exact
//! equality, because the tools append default-value hints after the colon
//! (`"Continue with revocation: (y/n) [y]:"` still matches
//! `"Continue with revocation:"`). A script that does not recognize a line
//! returns `None` and the session keeps accumulating.

mod initpki;
mod issue;
mod revoke;

pub use initpki::InitPkiScript;
pub use issue::IssueScript;
pub use revoke::RevokeScript;

use crate::exec::OutputChannel;

/// Policy for answering prompts in one automation session.
///
/// Implementations must be stateless across calls except through captured
/// workflow context (secrets, hostname); the engine may probe the same
/// accumulated text at most once per trigger.
pub trait PromptResponder: Send + Sync {
    /// Given the channel and the trimmed last line of its accumulator,
    /// return the response to write verbatim to the child's stdin, or
    /// `None` to keep accumulating.
    ///
    /// Responses carry their own trailing newline.
    fn respond(&self, channel: OutputChannel, line: &str) -> Option<String>;
}
