//! Client roster: listing all clients and fetching a single bundle.

use log::debug;
use serde::{Deserialize, Serialize};

use super::validate_client_name;
use crate::command::Resolver;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::exec;

/// `ovpn_getclient` reports a missing client as a success with this text
/// instead of a non-zero exit.
const NOT_FOUND_PREFIX: &str = "Unable to find";
const NOT_FOUND_SUFFIX: &str = "please try again or generate the key first";

/// One row of the client roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Client (certificate) name.
    pub name: String,

    /// Validity start, as printed by the tool.
    pub begin: String,

    /// Validity end, as printed by the tool.
    pub end: String,

    /// Certificate status (e.g. `VALID`, `REVOKED`).
    pub status: String,

    /// Free-text per-client configuration from the ccd file, if any.
    /// Loaded out-of-band; not part of the CSV.
    #[serde(skip)]
    pub config: Option<String>,
}

/// List all known clients.
///
/// Runs `ovpn_listclients`, parses its headered CSV output, and merges in
/// each client's ccd contents (missing or unreadable ccd files are simply
/// `None`).
pub async fn list_clients(config: &Config) -> Result<Vec<Client>> {
    let invocation = Resolver::new(config).flash("ovpn_listclients", &[]);
    let output = exec::run(&invocation).await?;

    let mut clients = parse_roster(&output)?;
    debug!("roster has {} clients", clients.len());

    for client in &mut clients {
        client.config = super::client_config(config, &client.name)
            .await
            .ok()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
    }

    Ok(clients)
}

/// Fetch one client's generated `.ovpn` bundle.
///
/// The tool's "Unable to find ..." text is mapped to
/// [`Error::NotFound`] rather than returned as a payload.
pub async fn get_client(config: &Config, name: &str) -> Result<String> {
    validate_client_name(name)?;

    let invocation = Resolver::new(config).flash("ovpn_getclient", &[name]);
    let output = exec::run(&invocation).await?;

    if is_not_found(&output) {
        return Err(Error::NotFound {
            name: name.to_string(),
        });
    }
    Ok(output)
}

fn parse_roster(output: &str) -> Result<Vec<Client>> {
    let mut reader = csv::Reader::from_reader(output.as_bytes());
    let mut clients = Vec::new();
    for record in reader.deserialize() {
        clients.push(record?);
    }
    Ok(clients)
}

fn is_not_found(output: &str) -> bool {
    let trimmed = output.trim();
    trimmed.starts_with(NOT_FOUND_PREFIX) && trimmed.ends_with(NOT_FOUND_SUFFIX)
}
