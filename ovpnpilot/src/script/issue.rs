//! Prompt script for certificate issuance (`easyrsa build-client-full`).

use secrecy::{ExposeSecret, SecretString};

use super::PromptResponder;
use crate::exec::OutputChannel;

/// Answers the prompts seen while issuing a client certificate.
///
/// openssl asks for the new key's passphrase twice (entry and verify);
/// easy-rsa then asks for the CA key's passphrase to sign the request.
/// With a `nopass` client there is no PEM prompt to answer and
/// `client_pass` stays `None`.
pub struct IssueScript {
    ca_pass: SecretString,
    client_pass: Option<SecretString>,
}

impl IssueScript {
    /// Create an issuance script.
    pub fn new(ca_pass: SecretString, client_pass: Option<SecretString>) -> Self {
        Self {
            ca_pass,
            client_pass,
        }
    }
}

impl PromptResponder for IssueScript {
    fn respond(&self, _channel: OutputChannel, line: &str) -> Option<String> {
        if line.starts_with("Enter PEM pass phrase:")
            || line.starts_with("Verifying - Enter PEM pass phrase:")
        {
            self.client_pass
                .as_ref()
                .map(|pass| format!("{}\n", pass.expose_secret()))
        } else if line.starts_with("Enter pass phrase for") {
            Some(format!("{}\n", self.ca_pass.expose_secret()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> IssueScript {
        IssueScript::new(
            SecretString::from("capass".to_string()),
            Some(SecretString::from("secret".to_string())),
        )
    }

    #[test]
    fn test_pem_prompts() {
        let script = script();
        assert_eq!(
            script.respond(OutputChannel::Stderr, "Enter PEM pass phrase:"),
            Some("secret\n".to_string())
        );
        assert_eq!(
            script.respond(OutputChannel::Stderr, "Verifying - Enter PEM pass phrase:"),
            Some("secret\n".to_string())
        );
    }

    #[test]
    fn test_ca_prompt_with_key_path_suffix() {
        let script = script();
        assert_eq!(
            script.respond(
                OutputChannel::Stdout,
                "Enter pass phrase for /etc/openvpn/pki/private/ca.key:"
            ),
            Some("capass\n".to_string())
        );
    }

    #[test]
    fn test_unrecognized_line() {
        let script = script();
        assert_eq!(
            script.respond(OutputChannel::Stdout, "Using SSL: openssl"),
            None
        );
    }

    #[test]
    fn test_nopass_client_ignores_pem_prompt() {
        let script = IssueScript::new(SecretString::from("capass".to_string()), None);
        assert_eq!(
            script.respond(OutputChannel::Stderr, "Enter PEM pass phrase:"),
            None
        );
        assert_eq!(
            script.respond(OutputChannel::Stdout, "Enter pass phrase for ca.key:"),
            Some("capass\n".to_string())
        );
    }
}
