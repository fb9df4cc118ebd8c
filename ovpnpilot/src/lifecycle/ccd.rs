//! Per-client configuration (ccd) files.
//!
//! One flat file per client name under `<openvpn_dir>/ccd/`; name
//! validation doubles as the path-traversal guard.

use super::validate_client_name;
use crate::config::Config;
use crate::error::Result;

/// Read a client's ccd file.
pub async fn client_config(config: &Config, name: &str) -> Result<String> {
    validate_client_name(name)?;
    let path = config.ccd_dir().join(name);
    Ok(tokio::fs::read_to_string(&path).await?)
}

/// Write a client's ccd file, trimming surrounding whitespace.
pub async fn set_client_config(config: &Config, name: &str, content: &str) -> Result<()> {
    validate_client_name(name)?;
    let path = config.ccd_dir().join(name);
    tokio::fs::write(&path, content.trim()).await?;
    Ok(())
}
