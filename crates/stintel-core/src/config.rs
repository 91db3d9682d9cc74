use std::num::NonZeroUsize;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
const DEFAULT_USER_AGENT: &str = "stintel/0.1 (startup-intelligence)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let parse_page_size = |var: &str, default: &str| -> Result<NonZeroUsize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<NonZeroUsize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("STINTEL_ENV", "development"))?;

    let backend_url = or_default("STINTEL_BACKEND_URL", DEFAULT_BACKEND_URL);
    if backend_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "STINTEL_BACKEND_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let request_timeout_secs = parse_positive_u64("STINTEL_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("STINTEL_USER_AGENT", DEFAULT_USER_AGENT);
    let page_size = parse_page_size("STINTEL_PAGE_SIZE", "5")?;
    let log_level = or_default("STINTEL_LOG_LEVEL", "info");

    Ok(AppConfig {
        env,
        backend_url,
        request_timeout_secs,
        user_agent,
        page_size,
        log_level,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STINTEL_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
