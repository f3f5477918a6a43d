//! Runtime configuration.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;

pub const DB_PATH_VAR: &str = "CONTACTMETHOD_DB_PATH";
pub const LOG_VAR: &str = "CONTACTMETHOD_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database holding persons, contact methods, mailboxes and tickets.
    pub db_path: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Config {
    /// Read the environment. `db_override` (the `--db` flag) wins over everything.
    pub fn load(db_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::from_lookup_with(|key| std::env::var(key).ok(), db_override.is_some())?;
        if let Some(path) = db_override {
            config.db_path = path;
        }
        Ok(config)
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with(lookup, false)
    }

    fn from_lookup_with<F>(lookup: F, db_overridden: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup(DB_PATH_VAR).filter(|_| !db_overridden) {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    key: DB_PATH_VAR.to_string(),
                    message: "path is empty".to_string(),
                });
            }
            Some(path) => PathBuf::from(path),
            None if db_overridden => PathBuf::new(),
            None => default_db_path()?,
        };

        let log_filter = [LOG_VAR, "RUST_LOG"]
            .into_iter()
            .find_map(|key| {
                lookup(key)
                    .filter(|f| !f.trim().is_empty())
                    .map(|f| (key, f))
            });
        let log_filter = match log_filter {
            Some((key, filter)) => {
                EnvFilter::try_new(&filter).map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
                filter
            }
            None => DEFAULT_LOG_FILTER.to_string(),
        };

        Ok(Self { db_path, log_filter })
    }
}

fn default_db_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(config_dir.join("contactmethod").join("contacts.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "/tmp/contacts.db"),
            (LOG_VAR, "contactmethod=debug"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/contacts.db"));
        assert_eq!(config.log_filter, "contactmethod=debug");
    }

    #[test]
    fn test_log_filter_falls_back_to_rust_log() {
        let config = Config::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "/tmp/contacts.db"),
            ("RUST_LOG", "warn"),
        ]))
        .unwrap();
        assert_eq!(config.log_filter, "warn");

        let config = Config::from_lookup(lookup_from(&[(DB_PATH_VAR, "/tmp/contacts.db")])).unwrap();
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_invalid_log_filter_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "/tmp/contacts.db"),
            (LOG_VAR, "contactmethod=loud"),
        ]));
        match result {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, LOG_VAR),
            other => panic!("expected invalid value, got {:?}", other),
        }

        let result = Config::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "/tmp/contacts.db"),
            ("RUST_LOG", "warn,contactmethod=verbose"),
        ]));
        match result {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "RUST_LOG"),
            other => panic!("expected invalid value, got {:?}", other),
        }
    }

    #[test]
    fn test_db_override_skips_environment() {
        let config = Config::from_lookup_with(lookup_from(&[(DB_PATH_VAR, "")]), true).unwrap();
        assert_eq!(config.db_path, PathBuf::new());

        let config = Config::load(Some(PathBuf::from("/tmp/override.db"))).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/override.db"));
    }

    #[test]
    fn test_empty_db_path_rejected() {
        let result = Config::from_lookup(lookup_from(&[(DB_PATH_VAR, "  ")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
