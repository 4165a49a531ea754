mod common;

use common::capture_logs;
use entra_token_fetch::{
    auth::{
        fetch_from_env, report, AuthError, FetcherConfig, Outcome, DEFAULT_REQUEST_TIMEOUT,
        MISSING_CONFIG_MESSAGE,
    },
    utils::from_env::FromEnv,
};
use serial_test::serial;
use std::time::Duration;

const VARS: [&str; 4] = [
    "CLIENT_ID_FWV",
    "CLIENT_SECRET_FWV",
    "TENANT_ID",
    "TOKEN_REQUEST_TIMEOUT_MS",
];

fn set_env(client_id: Option<&str>, client_secret: Option<&str>, tenant_id: Option<&str>) {
    for var in VARS {
        std::env::remove_var(var);
    }
    for (var, value) in VARS.iter().zip([client_id, client_secret, tenant_id]) {
        if let Some(value) = value {
            std::env::set_var(var, value);
        }
    }
}

#[test]
#[serial]
fn loads_complete_config() {
    set_env(Some("id1"), Some("secret"), Some("tenant1"));

    let config = FetcherConfig::load().unwrap();
    assert_eq!(config.credentials.client_id().as_str(), "id1");
    assert_eq!(config.credentials.client_secret().secret(), "secret");
    assert_eq!(config.credentials.tenant_id(), "tenant1");
    assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    assert!(FetcherConfig::check_inventory().is_ok());
}

#[test]
#[serial]
fn any_absent_or_empty_value_is_missing_configuration() {
    let id = [None, Some(""), Some("id1")];
    let secret = [None, Some(""), Some("secret")];
    let tenant = [None, Some(""), Some("tenant1")];

    for client_id in id {
        for client_secret in secret {
            for tenant_id in tenant {
                set_env(client_id, client_secret, tenant_id);
                let complete = [client_id, client_secret, tenant_id]
                    .iter()
                    .all(|v| v.is_some_and(|s| !s.is_empty()));

                match FetcherConfig::load() {
                    Ok(_) => assert!(complete),
                    Err(err) => {
                        assert!(!complete);
                        assert!(matches!(err, AuthError::MissingConfiguration(_)));
                        assert!(FetcherConfig::check_inventory().is_err());
                    }
                }
            }
        }
    }
}

#[test]
#[serial]
fn missing_secret_prints_fixed_message() {
    set_env(Some("id1"), Some(""), Some("tenant1"));

    let missing = FetcherConfig::check_inventory().unwrap_err();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].var, "CLIENT_SECRET_FWV");

    let err = FetcherConfig::load().unwrap_err();
    let mut out = Vec::new();
    assert_eq!(report(Err(err), &mut out), Outcome::Misconfigured);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{MISSING_CONFIG_MESSAGE}\n")
    );
}

#[test]
#[serial]
fn reads_request_timeout() {
    set_env(Some("id1"), Some("secret"), Some("tenant1"));
    std::env::set_var("TOKEN_REQUEST_TIMEOUT_MS", "1500");

    let config = FetcherConfig::load().unwrap();
    assert_eq!(config.request_timeout, Duration::from_millis(1500));

    std::env::set_var("TOKEN_REQUEST_TIMEOUT_MS", "soon");
    let err = FetcherConfig::load().unwrap_err();
    assert!(matches!(err, AuthError::InvalidConfiguration(_)));
    assert!(err.is_configuration());
}

#[tokio::test]
#[serial]
async fn entry_point_stops_before_any_request_when_config_is_missing() {
    let (logs, _guard) = capture_logs();
    set_env(Some("id1"), Some(""), Some("tenant1"));

    let mut out = Vec::new();
    assert_eq!(fetch_from_env(&mut out).await, Outcome::Misconfigured);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{MISSING_CONFIG_MESSAGE}\n")
    );
    assert_eq!(logs.lines_with("requesting access token"), 0);
    assert_eq!(logs.lines_with("missing environment variable"), 1);
    assert!(logs
        .contents()
        .lines()
        .any(|line| line.contains("missing environment variable")
            && line.contains("CLIENT_SECRET_FWV")));
}

#[cfg(unix)]
#[test]
#[serial]
fn non_unicode_value_is_invalid_not_missing() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    set_env(Some("id1"), None, Some("tenant1"));
    std::env::set_var("CLIENT_SECRET_FWV", OsStr::from_bytes(&[0x73, 0x80]));

    assert!(FetcherConfig::check_inventory().is_ok());
    let err = FetcherConfig::load().unwrap_err();
    assert!(matches!(err, AuthError::InvalidConfiguration(_)));

    let mut out = Vec::new();
    assert_eq!(report(Err(err), &mut out), Outcome::Misconfigured);
    assert!(out.is_empty());

    std::env::remove_var("CLIENT_SECRET_FWV");
}
