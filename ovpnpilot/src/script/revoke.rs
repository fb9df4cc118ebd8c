//! Prompt script for certificate revocation (`ovpn_revokeclient`).

use secrecy::{ExposeSecret, SecretString};

use super::PromptResponder;
use crate::exec::OutputChannel;

/// Answers the prompts seen while revoking a client certificate:
/// confirms the revocation and supplies the CA passphrase for re-signing
/// the CRL.
pub struct RevokeScript {
    ca_pass: SecretString,
}

impl RevokeScript {
    /// Create a revocation script.
    pub fn new(ca_pass: SecretString) -> Self {
        Self { ca_pass }
    }
}

impl PromptResponder for RevokeScript {
    fn respond(&self, _channel: OutputChannel, line: &str) -> Option<String> {
        if line.starts_with("Continue with revocation:") {
            Some("yes\n".to_string())
        } else if line.starts_with("Enter pass phrase for") {
            Some(format!("{}\n", self.ca_pass.expose_secret()))
        } else {
            None
        }
    }
}
