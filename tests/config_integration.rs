//! CLI and configuration integration tests.
//!
//! These tests verify argument parsing, config file loading and the
//! startup checks for required secrets.

use std::ffi::OsString;
use std::io::Write;
use tempfile::NamedTempFile;

use yalda_relay::cli::parse_args_from;
use yalda_relay::config::{Config, ConfigError};

fn args(args: &[&str]) -> Vec<OsString> {
    std::iter::once("yalda-relay")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

fn config_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_cli_full_options() {
    let result = parse_args_from(args(&[
        "-H",
        "127.0.0.1",
        "-p",
        "8080",
        "-c",
        "/etc/yalda-relay.json",
        "-l",
        "debug",
    ]))
    .unwrap();

    assert_eq!(result.host.unwrap().to_string(), "127.0.0.1");
    assert_eq!(result.port, Some(8080));
    assert_eq!(
        result.config.unwrap().to_str().unwrap(),
        "/etc/yalda-relay.json"
    );
    assert_eq!(result.log_level.as_deref(), Some("debug"));
}

#[test]
fn test_file_with_secrets_validates() {
    let file = config_file(
        r#"{
            "telegram": { "bot_token": "123:abc" },
            "completion": { "api_key": "sk-test", "model": "gpt-4o" }
        }"#,
    );

    let config = Config::from_file(file.path()).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.completion_params().model, "gpt-4o");
    assert_eq!(config.completion_params().max_tokens, 300);
}

#[test]
fn test_file_without_secrets_fails_validation() {
    let file = config_file(r#"{ "server": { "port": 9000 } }"#);

    let config = Config::from_file(file.path()).unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::Missing(_)));
    assert!(err.to_string().contains("must be set"));
}

#[test]
fn test_cli_overrides_file() {
    let file = config_file(r#"{ "server": { "host": "0.0.0.0", "port": 9000 } }"#);

    let parsed = parse_args_from(args(&["-H", "127.0.0.1"])).unwrap();
    let mut config = Config::from_file(file.path()).unwrap();
    config.apply_args(&parsed);

    let server = config.to_server_config().unwrap();
    assert_eq!(server.bind_address(), "127.0.0.1:9000");
}

#[test]
fn test_invalid_json_file() {
    let file = config_file("{ server: ");
    let result = Config::from_file(file.path());
    assert!(matches!(result, Err(ConfigError::Json(_))));
}

#[test]
fn test_missing_file() {
    let result = Config::from_file(std::path::Path::new("/nonexistent/yalda-relay.json"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
