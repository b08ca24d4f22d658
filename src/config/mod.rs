//! Configuration module for the TaskTide backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

use crate::errors::AppError;
use crate::models::UserRole;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Human-readable or JSON log lines
    pub log_format: LogFormat,
    /// Demo identity the session starts as
    pub default_role: UserRole,
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first when present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let bind_addr = lookup("TASKTIDE_BIND_ADDR")
            .unwrap_or_else(|| "127.0.0.1:8080".to_string());
        let bind_addr = bind_addr.parse::<SocketAddr>().map_err(|_| {
            AppError::Config(format!("Invalid TASKTIDE_BIND_ADDR format: {}", bind_addr))
        })?;

        let log_level = lookup("TASKTIDE_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let log_format = match lookup("TASKTIDE_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "Invalid TASKTIDE_LOG_FORMAT: {} (expected pretty or json)",
                    other
                )))
            }
        };

        let default_role = match lookup("TASKTIDE_DEFAULT_ROLE") {
            None => UserRole::Student,
            Some(role) => UserRole::parse(&role).ok_or_else(|| {
                AppError::Config(format!("Invalid TASKTIDE_DEFAULT_ROLE: {}", role))
            })?,
        };

        Ok(Self {
            bind_addr,
            log_level,
            log_format,
            default_role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.default_role, UserRole::Student);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TASKTIDE_BIND_ADDR", "0.0.0.0:9000"),
            ("TASKTIDE_LOG_LEVEL", "debug"),
            ("TASKTIDE_LOG_FORMAT", "json"),
            ("TASKTIDE_DEFAULT_ROLE", "class_representative"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.default_role, UserRole::ClassRepresentative);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        for pairs in [
            [("TASKTIDE_BIND_ADDR", "not-an-address")],
            [("TASKTIDE_LOG_FORMAT", "xml")],
            [("TASKTIDE_DEFAULT_ROLE", "admin")],
        ] {
            let err = config_from(&pairs).unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
        }
    }
}
