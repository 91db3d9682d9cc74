use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "STINTEL_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.backend_url, "http://localhost:5000");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "stintel/0.1 (startup-intelligence)");
    assert_eq!(cfg.page_size.get(), 5);
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn backend_url_override() {
    let mut map = HashMap::new();
    map.insert("STINTEL_BACKEND_URL", "http://analysis.internal:8080");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.backend_url, "http://analysis.internal:8080");
}

#[test]
fn blank_backend_url_is_rejected() {
    let mut map = HashMap::new();
    map.insert("STINTEL_BACKEND_URL", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STINTEL_BACKEND_URL"),
        "expected InvalidEnvVar(STINTEL_BACKEND_URL), got: {result:?}"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("STINTEL_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("STINTEL_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STINTEL_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(STINTEL_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("STINTEL_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STINTEL_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(STINTEL_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn page_size_override() {
    let mut map = HashMap::new();
    map.insert("STINTEL_PAGE_SIZE", "10");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.page_size.get(), 10);
}

#[test]
fn page_size_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("STINTEL_PAGE_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STINTEL_PAGE_SIZE"),
        "expected InvalidEnvVar(STINTEL_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn user_agent_and_log_level_overrides() {
    let mut map = HashMap::new();
    map.insert("STINTEL_USER_AGENT", "custom-agent/2.0");
    map.insert("STINTEL_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn invalid_env_is_rejected_through_builder() {
    let mut map = HashMap::new();
    map.insert("STINTEL_ENV", "qa");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STINTEL_ENV"),
        "expected InvalidEnvVar(STINTEL_ENV), got: {result:?}"
    );
}
