//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use salvager_engine::DEFAULT_SUGGESTION_LIMIT;
use salvager_store::DEFAULT_CHECKLIST_SLOT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the dataset JSON files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Checklist database file (defaults to `~/.salvager/checklist.db`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Slot the checklist is stored under
    #[serde(default = "default_checklist_slot")]
    pub checklist_slot: String,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Maximum autocomplete suggestions
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Salvager home directory (`~/.salvager`).
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".salvager"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Resolved checklist database path.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::home()?.join("checklist.db")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database: None,
            checklist_slot: default_checklist_slot(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            history_size: 1000,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_checklist_slot() -> String {
    DEFAULT_CHECKLIST_SLOT.to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_suggestion_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.checklist_slot, "salvager.checklist");
        assert!(config.settings.color);
        assert_eq!(config.settings.suggestion_limit, 10);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            data_dir = "/srv/salvager"

            [settings]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/salvager"));
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(config.settings.history_size, 1000);
        assert!(config.database.is_none());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.checklist_slot, DEFAULT_CHECKLIST_SLOT);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.database = Some(dir.path().join("checklist.db"));
        config.settings.color = false;
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.database, config.database);
        assert!(!reloaded.settings.color);
        assert_eq!(reloaded.database_path().unwrap(), dir.path().join("checklist.db"));
    }
}
