//! Runtime configuration.
//!
//! All paths and the server URL live in one explicit [`Config`] value that
//! is constructed once at startup and passed by reference into the
//! components that need it. Nothing in the crate reads the environment on
//! its own; [`Config::from_env`] is the single, optional entry point for
//! environment-driven setup.

use std::env;
use std::path::PathBuf;

use url::Url;

use crate::error::{Error, Result};

/// Configuration for locating the OpenVPN installation and its tools.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenVPN configuration directory (holds `ccd/`).
    pub openvpn_dir: PathBuf,

    /// easy-rsa PKI directory (holds `reqs/`, `issued/`, `private/`).
    pub pki_dir: PathBuf,

    /// Directory containing the `easyrsa` / `ovpn_*` tools.
    pub bin_dir: PathBuf,

    /// Remote execution prefix, e.g.
    /// `["docker", "compose", "-f", "compose.yaml", "exec", "openvpn"]`.
    /// When non-empty, tools run through this prefix instead of `bin_dir`.
    pub remote_exec: Vec<String>,

    /// Public server URL, e.g. `udp://vpn.example.com:1194`. Its host
    /// component becomes the CA common name during PKI initialization.
    pub server_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openvpn_dir: PathBuf::from("/etc/openvpn"),
            pki_dir: PathBuf::from("/etc/openvpn/pki"),
            bin_dir: PathBuf::from("/usr/local/bin"),
            remote_exec: Vec::new(),
            server_url: "udp://localhost:1194".to_string(),
        }
    }
}

impl Config {
    /// Build a configuration from the environment, falling back to
    /// defaults for anything unset.
    ///
    /// Recognized variables: `OPENVPN`, `EASYRSA_PKI`, `OVPN_BIN_PATH`,
    /// `OVPN_DOCKER_EXEC_COMMAND` (whitespace-separated argv prefix),
    /// `OVPN_HOSTNAME`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("OPENVPN") {
            if !dir.is_empty() {
                config.openvpn_dir = PathBuf::from(dir);
            }
        }
        if let Ok(pki) = env::var("EASYRSA_PKI") {
            if !pki.is_empty() {
                config.pki_dir = PathBuf::from(pki);
            }
        }
        if let Ok(bin) = env::var("OVPN_BIN_PATH") {
            if !bin.is_empty() {
                config.bin_dir = PathBuf::from(bin);
            }
        }
        if let Ok(prefix) = env::var("OVPN_DOCKER_EXEC_COMMAND") {
            config.remote_exec = prefix.split_whitespace().map(str::to_string).collect();
        }
        if let Ok(hostname) = env::var("OVPN_HOSTNAME") {
            if !hostname.is_empty() {
                config.server_url = hostname;
            }
        }

        config
    }

    /// Directory holding per-client config (ccd) files.
    pub fn ccd_dir(&self) -> PathBuf {
        self.openvpn_dir.join("ccd")
    }

    /// Host component of [`server_url`](Self::server_url).
    pub fn server_host(&self) -> Result<String> {
        let url = Url::parse(&self.server_url).map_err(|_| Error::InvalidServerUrl {
            url: self.server_url.clone(),
        })?;
        url.host_str()
            .map(str::to_string)
            .ok_or_else(|| Error::InvalidServerUrl {
                url: self.server_url.clone(),
            })
    }
}
