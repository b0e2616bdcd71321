//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_WEBAPP_DIR: &str = "./webapp";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `DATABASE_URL`; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// `DATABASE_MAX_CONNECTIONS`
    pub max_connections: u32,
    /// `WEBAPP_DIR`: static web client served for unmatched paths.
    pub webapp_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                value: bind_addr.clone(),
                reason: e.to_string(),
            })?;

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: "DATABASE_MAX_CONNECTIONS",
                        value: raw,
                        reason: "must be at least 1".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "DATABASE_MAX_CONNECTIONS",
                        value: raw,
                        reason: e.to_string(),
                    });
                }
            },
        };

        Ok(Self {
            bind_addr,
            database_url: var("DATABASE_URL"),
            max_connections,
            webapp_dir: var("WEBAPP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WEBAPP_DIR)),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(cfg.webapp_dir, PathBuf::from(DEFAULT_WEBAPP_DIR));
    }

    #[test]
    fn values_are_read_from_source() {
        let cfg = config(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("DATABASE_URL", "postgres://news@localhost/newsdb"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("WEBAPP_DIR", "/srv/webapp"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://news@localhost/newsdb"));
        assert_eq!(cfg.max_connections, 4);
        assert_eq!(cfg.webapp_dir, PathBuf::from("/srv/webapp"));
    }

    #[test]
    fn blank_database_url_means_unset() {
        let cfg = config(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(cfg.database_url, None);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            config(&[("BIND_ADDR", "not-an-addr")]),
            Err(ConfigError::Invalid { var: "BIND_ADDR", .. })
        ));
        assert!(matches!(
            config(&[("DATABASE_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::Invalid { var: "DATABASE_MAX_CONNECTIONS", .. })
        ));
        assert!(matches!(
            config(&[("DATABASE_MAX_CONNECTIONS", "many")]),
            Err(ConfigError::Invalid { var: "DATABASE_MAX_CONNECTIONS", .. })
        ));
    }
}
