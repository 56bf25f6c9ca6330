//! Service configuration, read from the environment at startup.
//!
//! Store address, credentials, queue name and listen port have no defaults;
//! leaving one out stops the service before it accepts requests.

use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const REDIS_HOST_VAR: &str = "QUEUE_REDIS_IP";
pub const REDIS_PORT_VAR: &str = "QUEUE_REDIS_PORT";
pub const REDIS_PASSWORD_VAR: &str = "QUEUE_REDIS_PASSWORD";
pub const QUEUE_NAME_VAR: &str = "SALES_QUEUE_NAME";
pub const SERVER_PORT_VAR: &str = "STORE_ENGINE_ORCHESTRATOR_QUEUE_SERVER_PORT";
pub const HOST_VAR: &str = "HOST";
pub const ENQUEUE_TIMEOUT_VAR: &str = "ENQUEUE_TIMEOUT_MS";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_ENQUEUE_TIMEOUT_MS: u64 = 2000;
/// Five minutes. Larger values overflow deadline arithmetic in the pool.
pub const MAX_ENQUEUE_TIMEOUT_MS: u64 = 300_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub redis_host: String,
    pub redis_port: u16,
    /// Empty means the store does not require authentication.
    pub redis_password: String,
    pub queue_name: String,
    pub host: String,
    pub port: u16,
    /// Upper bound on one append, including connection checkout.
    pub enqueue_timeout: Duration,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any name → value lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required =
            |name: &str| -> Result<String, ConfigError> { lookup(name).ok_or_else(|| missing(name)) };
        let non_empty = |name: &str| -> Result<String, ConfigError> {
            let value = required(name)?;
            if value.trim().is_empty() {
                return Err(invalid(name));
            }
            Ok(value.trim().to_string())
        };

        let timeout_ms = match lookup(ENQUEUE_TIMEOUT_VAR) {
            Some(raw) => parse::<u64>(ENQUEUE_TIMEOUT_VAR, &raw)?,
            None => DEFAULT_ENQUEUE_TIMEOUT_MS,
        };
        if timeout_ms == 0 || timeout_ms > MAX_ENQUEUE_TIMEOUT_MS {
            return Err(invalid(ENQUEUE_TIMEOUT_VAR));
        }

        Ok(AppConfig {
            redis_host: non_empty(REDIS_HOST_VAR)?,
            redis_port: parse(REDIS_PORT_VAR, &required(REDIS_PORT_VAR)?)?,
            redis_password: required(REDIS_PASSWORD_VAR)?,
            queue_name: non_empty(QUEUE_NAME_VAR)?,
            host: lookup(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse(SERVER_PORT_VAR, &required(SERVER_PORT_VAR)?)?,
            enqueue_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn parse<T: FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| invalid(name))
}

fn missing(name: &str) -> ConfigError {
    ConfigError::MissingRequired(name.to_string())
}

fn invalid(name: &str) -> ConfigError {
    ConfigError::InvalidValue(name.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn full_env() -> HashMap<String, String> {
        [
            (REDIS_HOST_VAR, "10.0.0.5"),
            (REDIS_PORT_VAR, "6379"),
            (REDIS_PASSWORD_VAR, "s3cret"),
            (QUEUE_NAME_VAR, "sales_queue"),
            (SERVER_PORT_VAR, "8081"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn load(vars: &HashMap<String, String>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let config = load(&full_env()).expect("complete configuration");

        assert_eq!(config.redis_host, "10.0.0.5");
        assert_eq!(config.redis_port, 6379);
        assert_eq!(config.redis_password, "s3cret");
        assert_eq!(config.queue_name, "sales_queue");
        assert_eq!(config.port, 8081);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(
            config.enqueue_timeout,
            Duration::from_millis(DEFAULT_ENQUEUE_TIMEOUT_MS)
        );
    }

    #[test]
    fn every_required_variable_is_enforced() {
        for name in [
            REDIS_HOST_VAR,
            REDIS_PORT_VAR,
            REDIS_PASSWORD_VAR,
            QUEUE_NAME_VAR,
            SERVER_PORT_VAR,
        ] {
            let mut vars = full_env();
            vars.remove(name);

            assert_eq!(
                load(&vars),
                Err(ConfigError::MissingRequired(name.to_string())),
                "{} should be required",
                name
            );
        }
    }

    #[test]
    fn empty_password_is_allowed() {
        let mut vars = full_env();
        vars.insert(REDIS_PASSWORD_VAR.to_string(), String::new());

        assert_eq!(load(&vars).unwrap().redis_password, "");
    }

    #[test]
    fn blank_queue_name_is_invalid() {
        let mut vars = full_env();
        vars.insert(QUEUE_NAME_VAR.to_string(), "  ".to_string());

        assert_eq!(
            load(&vars),
            Err(ConfigError::InvalidValue(QUEUE_NAME_VAR.to_string()))
        );
    }

    #[test]
    fn non_numeric_port_is_invalid() {
        let mut vars = full_env();
        vars.insert(REDIS_PORT_VAR.to_string(), "redis".to_string());

        assert_eq!(
            load(&vars),
            Err(ConfigError::InvalidValue(REDIS_PORT_VAR.to_string()))
        );
    }

    #[test]
    fn timeout_override_and_zero_timeout() {
        let mut vars = full_env();
        vars.insert(ENQUEUE_TIMEOUT_VAR.to_string(), "750".to_string());
        assert_eq!(
            load(&vars).unwrap().enqueue_timeout,
            Duration::from_millis(750)
        );

        vars.insert(ENQUEUE_TIMEOUT_VAR.to_string(), "0".to_string());
        assert_eq!(
            load(&vars),
            Err(ConfigError::InvalidValue(ENQUEUE_TIMEOUT_VAR.to_string()))
        );
    }

    #[test]
    fn timeout_above_the_cap_is_invalid() {
        let mut vars = full_env();
        vars.insert(
            ENQUEUE_TIMEOUT_VAR.to_string(),
            MAX_ENQUEUE_TIMEOUT_MS.to_string(),
        );
        assert_eq!(
            load(&vars).unwrap().enqueue_timeout,
            Duration::from_millis(MAX_ENQUEUE_TIMEOUT_MS)
        );

        for raw in [(MAX_ENQUEUE_TIMEOUT_MS + 1).to_string(), u64::MAX.to_string()] {
            vars.insert(ENQUEUE_TIMEOUT_VAR.to_string(), raw);
            assert_eq!(
                load(&vars),
                Err(ConfigError::InvalidValue(ENQUEUE_TIMEOUT_VAR.to_string()))
            );
        }
    }

    #[test]
    fn host_override() {
        let mut vars = full_env();
        vars.insert(HOST_VAR.to_string(), "127.0.0.1".to_string());

        assert_eq!(load(&vars).unwrap().host, "127.0.0.1");
    }
}
