//! Lifecycle operations end-to-end against fake `ovpn_*` / `easyrsa`
//! tools installed in a temporary bin directory.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use secrecy::SecretString;
use tempfile::TempDir;

use ovpnpilot::{lifecycle, Config, Error};

/// Install an executable shell script as a fake tool.
fn install_tool(bin_dir: &Path, name: &str, body: &str) {
    let path = bin_dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// A scratch OpenVPN layout: bin/, ccd/, pki/{reqs,issued,private}.
fn scratch() -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for sub in ["bin", "ccd", "pki/reqs", "pki/issued", "pki/private"] {
        fs::create_dir_all(root.join(sub)).unwrap();
    }
    let config = Config {
        openvpn_dir: root.to_path_buf(),
        pki_dir: root.join("pki"),
        bin_dir: root.join("bin"),
        remote_exec: Vec::new(),
        server_url: "udp://vpn.example.com:1194".to_string(),
    };
    (dir, config)
}

fn capass() -> SecretString {
    SecretString::from("capass".to_string())
}

#[tokio::test]
async fn issue_answers_prompts_and_cleans_request_file() {
    let (dir, config) = scratch();
    let out = dir.path().join("received");

    install_tool(
        &config.bin_dir,
        "easyrsa",
        &format!(
            r#"
printf 'Enter PEM pass phrase:'; read a
printf 'Verifying - Enter PEM pass phrase:'; read b
printf 'Enter pass phrase for ca.key:'; read c
printf '%s\n%s\n%s\n' "$a" "$b" "$c" > {out}
"#,
            out = out.display()
        ),
    );
    fs::write(config.pki_dir.join("reqs/alice.req"), "req").unwrap();

    lifecycle::issue(
        &config,
        "alice",
        capass(),
        Some(SecretString::from("secret".to_string())),
    )
    .await
    .unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "secret\nsecret\ncapass\n"
    );
    assert!(!config.pki_dir.join("reqs/alice.req").exists());
}

#[tokio::test]
async fn issue_cleans_request_file_even_on_failure() {
    let (_dir, config) = scratch();
    install_tool(&config.bin_dir, "easyrsa", "echo boom; exit 1");
    fs::write(config.pki_dir.join("reqs/alice.req"), "req").unwrap();

    let err = lifecycle::issue(&config, "alice", capass(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Exec(_)));
    assert!(!config.pki_dir.join("reqs/alice.req").exists());
}

#[tokio::test]
async fn revoke_confirms_and_removes_artifacts() {
    let (dir, config) = scratch();
    let out = dir.path().join("received");

    install_tool(
        &config.bin_dir,
        "ovpn_revokeclient",
        &format!(
            r#"
printf 'Continue with revocation:'; read confirm
printf 'Enter pass phrase for ca.key:'; read pass
printf '%s\n%s\n' "$confirm" "$pass" > {out}
"#,
            out = out.display()
        ),
    );
    fs::write(config.pki_dir.join("issued/alice.crt"), "crt").unwrap();
    fs::write(config.pki_dir.join("private/alice.key"), "key").unwrap();
    fs::write(config.ccd_dir().join("alice"), "push-reset").unwrap();

    lifecycle::revoke(&config, "alice", capass()).await.unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), "yes\ncapass\n");
    assert!(!config.pki_dir.join("issued/alice.crt").exists());
    assert!(!config.pki_dir.join("private/alice.key").exists());
    assert!(!config.ccd_dir().join("alice").exists());
}

#[tokio::test]
async fn initialize_generates_config_and_drives_initpki() {
    let (dir, config) = scratch();
    let out = dir.path().join("received");

    install_tool(&config.bin_dir, "ovpn_genconfig", "echo wrote server.conf");
    install_tool(
        &config.bin_dir,
        "ovpn_initpki",
        &format!(
            r#"
printf 'Confirm removal:'; read confirm
printf 'Enter New CA Key Passphrase:'; read new
printf 'Re-Enter New CA Key Passphrase:'; read again
printf 'Common Name (eg: your user, host, or server name) [Easy-RSA CA]:'; read cn
printf '%s\n%s\n%s\n%s\n' "$confirm" "$new" "$again" "$cn" > {out}
"#,
            out = out.display()
        ),
    );

    lifecycle::initialize(&config, capass()).await.unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "yes\ncapass\ncapass\nvpn.example.com\n"
    );
}

#[tokio::test]
async fn initialize_rejects_bad_server_url() {
    let (_dir, mut config) = scratch();
    config.server_url = "no scheme here".to_string();

    assert!(matches!(
        lifecycle::initialize(&config, capass()).await,
        Err(Error::InvalidServerUrl { .. })
    ));
}

#[tokio::test]
async fn list_clients_merges_ccd_config() {
    let (_dir, config) = scratch();
    install_tool(
        &config.bin_dir,
        "ovpn_listclients",
        r#"cat <<'EOF'
name,begin,end,status
alice,Jun 10 2024,Jun 10 2026,VALID
bob,Jan 01 2023,Jan 01 2025,REVOKED
EOF"#,
    );
    fs::write(config.ccd_dir().join("alice"), "ifconfig-push 10.8.0.2\n").unwrap();

    let clients = lifecycle::list_clients(&config).await.unwrap();
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].name, "alice");
    assert_eq!(clients[0].config.as_deref(), Some("ifconfig-push 10.8.0.2"));
    assert_eq!(clients[1].name, "bob");
    assert!(clients[1].config.is_none());
}

#[tokio::test]
async fn get_client_returns_bundle() {
    let (_dir, config) = scratch();
    install_tool(
        &config.bin_dir,
        "ovpn_getclient",
        "printf 'client\\ndev tun\\nproto udp\\n'",
    );

    let bundle = lifecycle::get_client(&config, "alice").await.unwrap();
    assert!(bundle.contains("dev tun"));
}

#[tokio::test]
async fn get_client_maps_not_found_text() {
    let (_dir, config) = scratch();
    install_tool(
        &config.bin_dir,
        "ovpn_getclient",
        r#"printf 'Unable to find "%s", please try again or generate the key first\n' "$1""#,
    );

    let err = lifecycle::get_client(&config, "ghost").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { name } if name == "ghost"));
}

#[tokio::test]
async fn get_client_rejects_invalid_name() {
    let (_dir, config) = scratch();
    assert!(matches!(
        lifecycle::get_client(&config, "../ca").await,
        Err(Error::InvalidName { .. })
    ));
}
