//! Configuration file support.
//!
//! Looked up, first match wins:
//! 1. the path given with `--config`
//! 2. `./sql-insert-writer.toml`
//! 3. `<config dir>/sql-insert-writer/config.toml`
//!
//! ```toml
//! [database]
//! url = "postgresql://localhost/app"
//! max_connections = 1
//!
//! [defaults]
//! qualify = false
//! cast = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::engine::DEFAULT_MAX_CONNECTIONS;
use crate::error::{InsertWriterError, InsertWriterResult};

/// File name searched for in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "sql-insert-writer.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Flag values used when the command line says nothing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DefaultsConfig {
    pub qualify: bool,
    pub cast: bool,
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> InsertWriterResult<Self> {
        toml::from_str(content).map_err(|e| InsertWriterError::Config(e.to_string()))
    }

    /// Read and parse a configuration file.
    pub fn from_file(path: &Path) -> InsertWriterResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            InsertWriterError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Load the configuration, falling back to defaults when no file exists.
    ///
    /// An explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> InsertWriterResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("sql-insert-writer").join("config.toml"));
        }
        paths
    }

    /// Pick the database URL: command line (or `DATABASE_URL`) before the file.
    pub fn database_url(&self, cli: Option<&str>) -> InsertWriterResult<String> {
        cli.map(str::to_string)
            .or_else(|| self.database.url.clone())
            .ok_or_else(|| {
                InsertWriterError::Config(
                    "No database URL. Use --db, set DATABASE_URL, or add [database] url to the config file"
                        .to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
            [database]
            url = "sqlite:///tmp/app.db"
            max_connections = 3

            [defaults]
            cast = true
            "#,
        )
        .unwrap();

        assert_eq!(config.database.url.as_deref(), Some("sqlite:///tmp/app.db"));
        assert_eq!(config.database.max_connections, 3);
        assert!(config.defaults.cast);
        assert!(!config.defaults.qualify);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.database.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::from_toml("[database]\nurl = 5").unwrap_err();
        assert!(matches!(err, InsertWriterError::Config(_)));
    }

    #[test]
    fn test_database_url_precedence() {
        let config = Config::from_toml("[database]\nurl = \"sqlite::memory:\"").unwrap();
        assert_eq!(
            config.database_url(Some("postgresql://localhost/db")).unwrap(),
            "postgresql://localhost/db"
        );
        assert_eq!(config.database_url(None).unwrap(), "sqlite::memory:");
        assert!(Config::default().database_url(None).is_err());
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let missing = std::env::temp_dir().join("sql-insert-writer-missing.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join(format!(
            "sql-insert-writer-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[defaults]\nqualify = true\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(config.defaults.qualify);
    }
}
