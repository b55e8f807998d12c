//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SyncError};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection configuration.
    pub database: DatabaseConfig,

    /// Synchronization behavior configuration.
    #[serde(default)]
    pub sync: SyncOptions,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.database.host.is_empty() {
            return Err(SyncError::Config("database.host is required".into()));
        }
        if self.database.database.is_empty() {
            return Err(SyncError::Config("database.database is required".into()));
        }
        if self.database.user.is_empty() {
            return Err(SyncError::Config("database.user is required".into()));
        }
        if self.database.port == 0 {
            return Err(SyncError::Config("database.port must be non-zero".into()));
        }
        Ok(())
    }
}

/// MariaDB connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host (default: "127.0.0.1").
    #[serde(default = "default_host")]
    pub host: String,

    /// Database port (default: 3306).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database name. Also scopes all catalog queries.
    pub database: String,

    /// Username.
    pub user: String,

    /// Password. Never serialized back out.
    #[serde(default, skip_serializing)]
    pub password: String,
}

/// Synchronization behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Combine varchar lengths into the reported column type, e.g.
    /// `varchar` + max length 255 becomes `varchar(255)` (default: true).
    #[serde(default = "default_true")]
    pub combine_varchar_length: bool,

    /// When to issue COMMIT checkpoints (default: per-table).
    #[serde(default)]
    pub commit: CommitGranularity,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            combine_varchar_length: true,
            commit: CommitGranularity::default(),
        }
    }
}

/// Commit checkpoint granularity.
///
/// MariaDB DDL commits implicitly, so the checkpoint only controls when an
/// explicit COMMIT is sent to mark a consistent point for monitoring tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitGranularity {
    /// COMMIT after each table's statements.
    #[default]
    PerTable,
    /// A single COMMIT at the end of the run.
    PerRun,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_yaml() -> &'static str {
        r#"
database:
  host: db.internal
  database: app
  user: sync
  password: secret
"#
    }

    #[test]
    fn test_defaults_fill_in() {
        let config = Config::from_yaml(
            r#"
database:
  database: app
  user: sync
"#,
        )
        .unwrap();

        assert_eq!(config.database.host, "127.0.0.1");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.password, "");
        assert!(config.sync.combine_varchar_length);
        assert_eq!(config.sync.commit, CommitGranularity::PerTable);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let config = Config::from_yaml(
            r#"
database:
  host: db.internal
  port: 3307
  database: app
  user: sync
sync:
  combine_varchar_length: false
  commit: per-run
"#,
        )
        .unwrap();

        assert_eq!(config.database.port, 3307);
        assert!(!config.sync.combine_varchar_length);
        assert_eq!(config.sync.commit, CommitGranularity::PerRun);
    }

    #[test]
    fn test_missing_user_is_rejected() {
        let err = Config::from_yaml(
            r#"
database:
  database: app
"#,
        )
        .unwrap_err();

        // serde reports the missing required field before validate() runs.
        assert!(err.to_string().contains("user"));
    }

    #[test]
    fn test_empty_database_name_is_rejected() {
        let err = Config::from_yaml(
            r#"
database:
  database: ""
  user: sync
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("database.database is required"));
    }

    #[test]
    fn test_zero_port_is_rejected() {
        let err = Config::from_yaml(
            r#"
database:
  port: 0
  database: app
  user: sync
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("database.port"));
    }

    #[test]
    fn test_password_is_not_serialized() {
        let config = Config::from_yaml(valid_yaml()).unwrap();
        let dumped = serde_yaml::to_string(&config).unwrap();

        assert!(!dumped.contains("secret"));
        assert!(!dumped.contains("password"));
    }
}
