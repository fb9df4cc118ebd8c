//! Prompt script for PKI initialization (`ovpn_initpki`).

use secrecy::{ExposeSecret, SecretString};

use super::PromptResponder;
use crate::exec::OutputChannel;

/// Answers the prompts seen while (re)initializing the PKI: confirms
/// removal of any existing PKI, supplies the CA key passphrase wherever
/// it is asked for (new, confirmation, and existing-key variants), and
/// fills in the CA common name.
pub struct InitPkiScript {
    ca_pass: SecretString,
    common_name: String,
}

impl InitPkiScript {
    /// Create an initialization script.
    ///
    /// `common_name` is typically the host component of the configured
    /// server URL.
    pub fn new(ca_pass: SecretString, common_name: impl Into<String>) -> Self {
        Self {
            ca_pass,
            common_name: common_name.into(),
        }
    }
}

impl PromptResponder for InitPkiScript {
    fn respond(&self, _channel: OutputChannel, line: &str) -> Option<String> {
        if line.starts_with("Confirm removal:") {
            Some("yes\n".to_string())
        } else if line.starts_with("Enter New CA Key Passphrase:")
            || line.starts_with("Re-Enter New CA Key Passphrase:")
            || line.starts_with("Enter pass phrase for")
        {
            Some(format!("{}\n", self.ca_pass.expose_secret()))
        } else if line.starts_with("Common Name (eg: your user, host, or server name)") {
            Some(format!("{}\n", self.common_name))
        } else {
            None
        }
    }
}
