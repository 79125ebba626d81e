//! Store configuration
//!
//! A `StoreConfig` says which database file to open and how to configure the
//! connection. It can be built in code, deserialized with serde, or read from
//! `STAFFDB_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::{config_error, Result};

/// Path SQLite treats as a private in-memory database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "company.db";

pub const ENV_DATABASE_PATH: &str = "STAFFDB_DATABASE_PATH";
pub const ENV_FOREIGN_KEYS: &str = "STAFFDB_FOREIGN_KEYS";
pub const ENV_JOURNAL_MODE: &str = "STAFFDB_JOURNAL_MODE";

const JOURNAL_MODES: &[&str] = &["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL", "OFF"];

/// Connection settings for a [`Session`](crate::Session)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file, or `:memory:`
    pub database_path: PathBuf,

    /// Whether SQLite enforces `REFERENCES` clauses
    pub foreign_keys: bool,

    /// Optional `PRAGMA journal_mode` value (e.g. "WAL")
    pub journal_mode: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            foreign_keys: true,
            journal_mode: None,
        }
    }
}

impl StoreConfig {
    /// Configuration for a throwaway in-memory database
    pub fn in_memory() -> Self {
        Self {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            ..Self::default()
        }
    }

    /// Configuration for a database file at `path`
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: path.into(),
            ..Self::default()
        }
    }

    /// Whether this config targets an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }

    /// Read overrides from the process environment
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`, starting from the defaults
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DATABASE_PATH) {
            if path.trim().is_empty() {
                return Err(config_error(ENV_DATABASE_PATH, "cannot be empty"));
            }
            config.database_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(ENV_FOREIGN_KEYS) {
            config.foreign_keys = parse_flag(&raw)
                .ok_or_else(|| config_error(ENV_FOREIGN_KEYS, "expected on/off"))?;
        }

        if let Some(mode) = lookup(ENV_JOURNAL_MODE) {
            config.journal_mode = Some(mode);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check values that end up inside PRAGMA statements
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unknown journal mode.
    pub fn validate(&self) -> Result<()> {
        if let Some(mode) = &self.journal_mode {
            if !JOURNAL_MODES.contains(&mode.to_ascii_uppercase().as_str()) {
                return Err(config_error(
                    ENV_JOURNAL_MODE,
                    &format!("unknown journal mode {}", mode),
                ));
            }
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffdb_core::ExErrorKind;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.database_path, PathBuf::from("company.db"));
        assert!(config.foreign_keys);
        assert!(config.journal_mode.is_none());
        assert!(!config.is_in_memory());
        assert!(StoreConfig::in_memory().is_in_memory());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (ENV_DATABASE_PATH, "/tmp/hr.db"),
            (ENV_FOREIGN_KEYS, "off"),
            (ENV_JOURNAL_MODE, "wal"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/hr.db"));
        assert!(!config.foreign_keys);
        assert_eq!(config.journal_mode.as_deref(), Some("wal"));
    }

    #[test]
    fn test_lookup_rejects_bad_flag() {
        let err = StoreConfig::from_lookup(lookup_from(&[(ENV_FOREIGN_KEYS, "maybe")]))
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_lookup_rejects_unknown_journal_mode() {
        let err = StoreConfig::from_lookup(lookup_from(&[(
            ENV_JOURNAL_MODE,
            "WAL; DROP TABLE employees",
        )]))
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: StoreConfig =
            serde_json::from_str(r#"{ "database_path": "hr.db" }"#).unwrap();
        assert_eq!(config.database_path, PathBuf::from("hr.db"));
        assert!(config.foreign_keys);
    }
}
