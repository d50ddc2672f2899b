//! Server configuration read from environment variables.
//!
//!   EMPRESA_DATABASE_PATH — SQLite file (default: empresa.sqlite3)
//!   EMPRESA_BIND_ADDR     — listen address (default: 0.0.0.0:8000)
//!   EMPRESA_LOG_LEVEL     — trace|debug|info|warn|error (default by build mode)
//!   EMPRESA_LOG_DIR       — absolute directory for rotating logs (default: stderr)

use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_DATABASE_PATH: &str = "empresa.sqlite3";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is set but empty")]
    Empty { key: &'static str },
    #[error("{key} is not a valid socket address: `{value}`")]
    InvalidBindAddr { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(key) {
                Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { key }),
                Some(value) => Ok(Some(value.trim().to_string())),
                None => Ok(None),
            }
        };

        let database_path = read("EMPRESA_DATABASE_PATH")?
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());
        let bind_text =
            read("EMPRESA_BIND_ADDR")?.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_text
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr {
                key: "EMPRESA_BIND_ADDR",
                value: bind_text.clone(),
            })?;
        let log_level = read("EMPRESA_LOG_LEVEL")?
            .unwrap_or_else(|| empresa_core::default_log_level().to_string());

        Ok(Self {
            database_path: PathBuf::from(database_path),
            bind_addr,
            log_level,
            log_dir: read("EMPRESA_LOG_DIR")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ServerConfig};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_path.to_str(), Some("empresa.sqlite3"));
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.log_level, empresa_core::default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("EMPRESA_DATABASE_PATH", "/tmp/registry.db"),
            ("EMPRESA_BIND_ADDR", "127.0.0.1:9100"),
            ("EMPRESA_LOG_LEVEL", "warn"),
            ("EMPRESA_LOG_DIR", "/var/log/empresa"),
        ]))
        .unwrap();
        assert_eq!(config.database_path.to_str(), Some("/tmp/registry.db"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9100");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/empresa"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("EMPRESA_BIND_ADDR", "nope")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));

        let err = ServerConfig::from_lookup(lookup(&[("EMPRESA_LOG_DIR", "  ")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Empty {
                key: "EMPRESA_LOG_DIR"
            }
        );
    }
}
