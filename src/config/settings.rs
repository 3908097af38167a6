//! Application settings loading.
//!
//! Settings come from three layers, later ones winning: built-in defaults, an optional TOML
//! file (`CONFIG_PATH`, default `config.toml`), and the `DATABASE_URL`, `HOST` and `PORT`
//! environment variables. A missing file is not an error; a malformed one is.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default location of the optional settings file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Runtime settings for the service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Connection URL; the scheme selects the driver
    pub database_url: String,
    /// Interface the HTTP listener binds to
    pub host: String,
    /// Port the HTTP listener binds to
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://data/transactions.sqlite?mode=rwc".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl AppConfig {
    /// `host:port` for the HTTP listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Applies environment overrides using `lookup` to read variables.
    ///
    /// # Errors
    /// Returns `Error::Config` if `PORT` is set but is not a valid port number.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port.trim().parse().map_err(|e| Error::Config {
                message: format!("Invalid PORT {port:?}: {e}"),
            })?;
        }
        Ok(self)
    }
}

/// Parses settings from TOML text. Missing keys keep their defaults.
///
/// # Errors
/// Returns `Error::Config` if the TOML syntax is invalid or a value has the wrong type.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file: {e}"),
    })
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file {:?}: {e}", path.as_ref()),
    })?;
    parse_config(&contents)
}

/// Loads settings from the optional file and the process environment.
///
/// # Errors
/// Returns an error if the file exists but is malformed, or an override is invalid.
pub fn load_app_config() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let base = if Path::new(&path).exists() {
        info!("Loading configuration from {}", path);
        load_config(&path)?
    } else {
        debug!("No configuration file at {}, using defaults", path);
        AppConfig::default()
    };
    base.with_overrides(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
            database_url = "postgres://localhost/ledger"
            "#,
        )
        .unwrap();

        assert_eq!(config.database_url, "postgres://localhost/ledger");
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let result = parse_config("port = \"eighty\"");
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));
    }

    #[test]
    fn test_environment_overrides_file_values() {
        let config = AppConfig::default()
            .with_overrides(env(&[("PORT", "8080"), ("DATABASE_URL", "sqlite::memory:")]))
            .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let result = AppConfig::default().with_overrides(env(&[("PORT", "http")]));
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let result = load_config("does/not/exist.toml");
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));
    }
}
