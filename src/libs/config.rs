//! Configuration management for taskdeck.
//!
//! The only setting is where the database lives. It is resolved in this
//! order:
//!
//! 1. The `DATABASE_URL` environment variable (a `.env` file in the working
//!    directory is loaded first).
//! 2. `database_url` in `config.json` inside the per-user data directory.
//! 3. `taskdeck.db` inside the per-user data directory.
//!
//! ## Accepted URL forms
//!
//! | Form | Meaning |
//! |---|---|
//! | `file:./dev.db` | file path, relative to the working directory |
//! | `sqlite:///tmp/tasks.db`, `sqlite:tasks.db` | file path |
//! | `/var/lib/tasks.db` | bare file path |
//! | `:memory:`, `sqlite::memory:`, `file::memory:` | private in-memory database |
//!
//! Query strings (`file:./dev.db?mode=rwc`) are ignored.
//!
//! ```rust,no_run
//! use taskdeck::libs::config::Config;
//!
//! let config = Config::load()?;
//! println!("{:?}", config.database_location()?);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::error::TaskError;
use crate::libs::messages::Message;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DB_FILE_NAME: &str = "taskdeck.db";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Where the task database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

impl DatabaseLocation {
    pub fn parse(url: &str) -> Result<Self, TaskError> {
        let url = url.trim();
        if matches!(url, ":memory:" | "sqlite::memory:" | "file::memory:") {
            return Ok(DatabaseLocation::Memory);
        }

        let path = ["sqlite://", "sqlite:", "file:"]
            .iter()
            .find_map(|prefix| url.strip_prefix(prefix))
            .unwrap_or(url);
        let path = path.split('?').next().unwrap_or_default();

        if path.is_empty() {
            return Err(TaskError::Config(Message::ConfigParseError(format!("empty database path in '{}'", url)).to_string()));
        }

        Ok(DatabaseLocation::File(PathBuf::from(path)))
    }
}

/// Persisted settings, stored as `config.json` in the data directory.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
}

impl Config {
    /// Loads `.env` and then the stored configuration.
    ///
    /// `config.json` is not read while `DATABASE_URL` is set.
    pub fn load() -> Result<Config> {
        let _ = dotenv::dotenv();
        if env_database_url().is_some() {
            tracing::debug!("{} is set, skipping {}", DATABASE_URL_ENV, CONFIG_FILE_NAME);
            return Ok(Config::default());
        }
        Self::read()
    }

    /// Reads `config.json`, falling back to defaults when it does not exist.
    pub fn read() -> Result<Config> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| anyhow::anyhow!("{}", Message::ConfigParseError(e.to_string())))
    }

    pub fn save(&self) -> Result<()> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content).map_err(|e| anyhow::anyhow!("{}", Message::ConfigSaveError(e.to_string())))?;
        Ok(())
    }

    /// Interactive wizard, seeded with the current values.
    pub fn init() -> Result<Config> {
        let current = Self::read().unwrap_or_default();

        let database_url: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDatabaseUrl.to_string())
            .default(current.database_url.clone().unwrap_or_default())
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                if input.trim().is_empty() {
                    return Ok(());
                }
                DatabaseLocation::parse(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()?;

        let database_url = Some(database_url.trim().to_string()).filter(|url| !url.is_empty());

        Ok(Config { database_url })
    }

    /// Resolves the database location, honouring `DATABASE_URL`.
    pub fn database_location(&self) -> Result<DatabaseLocation, TaskError> {
        self.resolve_location(env_database_url().as_deref())
    }

    /// Resolves the database location given an explicit override.
    pub fn resolve_location(&self, override_url: Option<&str>) -> Result<DatabaseLocation, TaskError> {
        let url = override_url.filter(|url| !url.trim().is_empty()).or(self.database_url.as_deref());

        match url {
            Some(url) => DatabaseLocation::parse(url),
            None => Ok(DatabaseLocation::File(DataStorage::new().get_path(DB_FILE_NAME)?)),
        }
    }
}

fn env_database_url() -> Option<String> {
    env::var(DATABASE_URL_ENV).ok().filter(|url| !url.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory_forms() {
        for url in [":memory:", "sqlite::memory:", "file::memory:", "  :memory: "] {
            assert_eq!(DatabaseLocation::parse(url).unwrap(), DatabaseLocation::Memory);
        }
    }

    #[test]
    fn test_parse_file_forms() {
        let cases = [
            ("file:./dev.db", "./dev.db"),
            ("file:./dev.db?mode=rwc", "./dev.db"),
            ("sqlite:///tmp/tasks.db", "/tmp/tasks.db"),
            ("sqlite:tasks.db", "tasks.db"),
            ("/var/lib/tasks.db", "/var/lib/tasks.db"),
        ];
        for (url, expected) in cases {
            assert_eq!(DatabaseLocation::parse(url).unwrap(), DatabaseLocation::File(PathBuf::from(expected)), "{}", url);
        }
    }

    #[test]
    fn test_parse_rejects_empty_path() {
        assert!(DatabaseLocation::parse("file:").is_err());
        assert!(DatabaseLocation::parse("").is_err());
    }

    #[test]
    fn test_override_wins_over_stored_url() {
        let config = Config {
            database_url: Some("file:stored.db".to_string()),
        };

        assert_eq!(config.resolve_location(Some("file:env.db")).unwrap(), DatabaseLocation::File(PathBuf::from("env.db")));
        assert_eq!(config.resolve_location(None).unwrap(), DatabaseLocation::File(PathBuf::from("stored.db")));
        assert_eq!(config.resolve_location(Some("  ")).unwrap(), DatabaseLocation::File(PathBuf::from("stored.db")));
    }
}
