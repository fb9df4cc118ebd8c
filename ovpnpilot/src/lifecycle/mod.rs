//! Client lifecycle operations: issue, revoke, and PKI initialization,
//! plus the roster/ccd collaborators consumed by the web caller.
//!
//! Every operation validates the client name up front (word characters
//! only, so no shell metacharacters ever reach a spawned process) and
//! performs best-effort cleanup of intermediate artifacts on the way out,
//! regardless of how the automation ended. Cleanup failures are logged
//! and never mask the primary error.
//!
//! Running two operations against the same PKI store concurrently is
//! unsafe at the external-tool level; callers must serialize them.

mod ccd;
mod roster;

pub use ccd::{client_config, set_client_config};
pub use roster::{get_client, list_clients, Client};

use std::path::PathBuf;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::SecretString;

use crate::command::Resolver;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::exec;
use crate::script::{InitPkiScript, IssueScript, RevokeScript};

static CLIENT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+$").expect("client name pattern"));

/// Validate a client name before it reaches any spawned command.
///
/// Hard precondition for every lifecycle operation: only word characters
/// are accepted.
pub fn validate_client_name(name: &str) -> Result<()> {
    if CLIENT_NAME.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Issue a client certificate (`easyrsa build-client-full`).
///
/// With `client_pass = None` the key is generated without a passphrase
/// (`nopass`). The intermediate request file is removed afterwards whether
/// or not issuance succeeded.
pub async fn issue(
    config: &Config,
    name: &str,
    ca_pass: SecretString,
    client_pass: Option<SecretString>,
) -> Result<()> {
    validate_client_name(name)?;

    let mut args = vec!["build-client-full", name];
    if client_pass.is_none() {
        args.push("nopass");
    }
    let invocation = Resolver::new(config).interactive("easyrsa", &args);
    let script = IssueScript::new(ca_pass, client_pass);

    let result = exec::drive(&invocation, &script).await;
    remove_artifact(config.pki_dir.join("reqs").join(format!("{name}.req"))).await;
    Ok(result?)
}

/// Revoke a client certificate (`ovpn_revokeclient <name> remove`).
///
/// The issued certificate, private key, and ccd file are removed
/// afterwards whether or not revocation succeeded.
pub async fn revoke(config: &Config, name: &str, ca_pass: SecretString) -> Result<()> {
    validate_client_name(name)?;

    let invocation = Resolver::new(config).interactive("ovpn_revokeclient", &[name, "remove"]);
    let script = RevokeScript::new(ca_pass);

    let result = exec::drive(&invocation, &script).await;
    remove_artifact(config.pki_dir.join("issued").join(format!("{name}.crt"))).await;
    remove_artifact(config.pki_dir.join("private").join(format!("{name}.key"))).await;
    remove_artifact(config.ccd_dir().join(name)).await;
    Ok(result?)
}

/// Initialize (or reinitialize) the PKI.
///
/// Generates the server configuration for the configured URL, then drives
/// `ovpn_initpki` with the CA passphrase and the URL's host component as
/// the CA common name.
pub async fn initialize(config: &Config, ca_pass: SecretString) -> Result<()> {
    let common_name = config.server_host()?;
    let resolver = Resolver::new(config);

    let genconfig = resolver.flash("ovpn_genconfig", &["-u", &config.server_url]);
    exec::run(&genconfig).await?;

    let initpki = resolver.interactive("ovpn_initpki", &[]);
    let script = InitPkiScript::new(ca_pass, common_name);
    exec::drive(&initpki, &script).await?;
    Ok(())
}

/// Remove an intermediate artifact, best-effort.
async fn remove_artifact(path: PathBuf) {
    match tokio::fs::remove_file(&path).await {
        Ok(()) => debug!("removed {}", path.display()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => warn!("cleanup of {} failed: {err}", path.display()),
    }
}
