use super::{Config, DEFAULT_BODY_LIMIT, DEFAULT_PORT};
use serial_test::serial;
use std::env;
use std::net::{IpAddr, Ipv4Addr};

fn clear_env() {
    unsafe {
        env::remove_var("AADHAAR_HOST");
        env::remove_var("AADHAAR_PORT");
    }
}

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(config.port, 3015);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.body_limit, 16 * 1024 * 1024);
    assert_eq!(config.addr().to_string(), "0.0.0.0:3015");
}

#[test]
#[serial]
fn test_config_new_without_env_matches_default() {
    clear_env();
    assert_eq!(Config::new(), Config::default());
}

#[test]
#[serial]
fn test_config_new_respects_env_vars() {
    unsafe {
        env::set_var("AADHAAR_HOST", "127.0.0.1");
        env::set_var("AADHAAR_PORT", "8080");
    }

    let config = Config::new();
    assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(config.port, 8080);
    assert_eq!(config.body_limit, DEFAULT_BODY_LIMIT);

    clear_env();
}

#[test]
#[serial]
fn test_config_ignores_invalid_env_values() {
    unsafe {
        env::set_var("AADHAAR_HOST", "not-an-ip");
        env::set_var("AADHAAR_PORT", "99999");
    }

    let config = Config::new();
    assert_eq!(config, Config::default());

    clear_env();
}

#[test]
#[serial]
fn test_config_precedence_cli_over_env() {
    // Precedence: CLI flag > env var > default
    unsafe {
        env::set_var("AADHAAR_PORT", "8080");
    }

    let config = Config::new().with_port(9000);
    assert_eq!(config.port, 9000, "CLI flag should override env var");

    clear_env();
}

#[test]
fn test_config_builders() {
    let config = Config::default()
        .with_host(IpAddr::V4(Ipv4Addr::LOCALHOST))
        .with_port(4000)
        .with_body_limit(1024);

    assert_eq!(config.addr().to_string(), "127.0.0.1:4000");
    assert_eq!(config.body_limit, 1024);
}
