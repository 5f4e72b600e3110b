//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! A `--db` flag on the command line overrides the database path.

use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

use shopledger_db::DbConfig;

/// Environment variable naming the database file.
pub const ENV_DB_PATH: &str = "SHOPLEDGER_DB_PATH";
/// Environment variable capping the pool size.
pub const ENV_MAX_CONNECTIONS: &str = "SHOPLEDGER_MAX_CONNECTIONS";
/// Environment variable controlling creation of a missing database file.
pub const ENV_CREATE_DB: &str = "SHOPLEDGER_CREATE_DB";

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size (default: 5)
    pub max_connections: u32,

    /// Create the database file when missing (default: true)
    pub create_if_missing: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `db_override` (the `--db` flag) wins over `SHOPLEDGER_DB_PATH`, which
    /// wins over the platform default.
    pub fn load(db_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok(), db_override)
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F, db_override: Option<PathBuf>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match (db_override, lookup(ENV_DB_PATH)) {
            (Some(path), _) => path,
            (None, Some(path)) if !path.trim().is_empty() => PathBuf::from(path),
            (None, Some(_)) => return Err(ConfigError::InvalidValue(ENV_DB_PATH.to_string())),
            (None, None) => default_database_path()?,
        };

        let max_connections: u32 = lookup(ENV_MAX_CONNECTIONS)
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue(ENV_MAX_CONNECTIONS.to_string()))?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidValue(ENV_MAX_CONNECTIONS.to_string()));
        }

        let create_if_missing: bool = lookup(ENV_CREATE_DB)
            .unwrap_or_else(|| "true".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue(ENV_CREATE_DB.to_string()))?;

        Ok(AppConfig {
            database_path,
            max_connections,
            create_if_missing,
        })
    }

    /// Connection settings for the store.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.max_connections)
            .create_if_missing(self.create_if_missing)
    }
}

/// Platform data directory + `shopledger.db`.
///
/// - **macOS**: `~/Library/Application Support/com.shopledger.shopledger/shopledger.db`
/// - **Windows**: `%APPDATA%\shopledger\shopledger\data\shopledger.db`
/// - **Linux**: `~/.local/share/shopledger/shopledger.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "shopledger", "shopledger")
        .ok_or(ConfigError::NoDataDirectory)?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .map_err(|e| ConfigError::DataDirectory(e.to_string()))?;

    Ok(data_dir.join("shopledger.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine the platform data directory; set SHOPLEDGER_DB_PATH")]
    NoDataDirectory,

    #[error("Could not create data directory: {0}")]
    DataDirectory(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_values_from_environment() {
        let config = AppConfig::from_lookup(
            lookup(&[
                (ENV_DB_PATH, "/tmp/shop.db"),
                (ENV_MAX_CONNECTIONS, "3"),
                (ENV_CREATE_DB, "false"),
            ]),
            None,
        )
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.max_connections, 3);
        assert!(!config.create_if_missing);
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let config =
            AppConfig::from_lookup(lookup(&[(ENV_DB_PATH, "/tmp/shop.db")]), None).unwrap();

        assert_eq!(config.max_connections, 5);
        assert!(config.create_if_missing);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for (key, value) in [
            (ENV_MAX_CONNECTIONS, "many"),
            (ENV_MAX_CONNECTIONS, "0"),
            (ENV_CREATE_DB, "yes please"),
            (ENV_DB_PATH, "  "),
        ] {
            let mut pairs = vec![(key, value)];
            if key != ENV_DB_PATH {
                pairs.push((ENV_DB_PATH, "/tmp/shop.db"));
            }
            let err = AppConfig::from_lookup(lookup(&pairs), None).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue(ref k) if k == key));
        }
    }

    #[test]
    fn test_flag_overrides_path() {
        let config = AppConfig::from_lookup(
            lookup(&[(ENV_DB_PATH, "/tmp/env.db")]),
            Some(PathBuf::from("/tmp/flag.db")),
        )
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/flag.db"));
        assert_eq!(config.db_config().database_path, PathBuf::from("/tmp/flag.db"));
        assert!(config.db_config().create_if_missing);
    }
}
