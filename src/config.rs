//! Configuration file handling.
//!
//! The configuration file is stored at `$COST_TRACKER_HOME/config.json`. It names the CSV file that
//! holds the cost table and says how many backup copies to keep.

use crate::backup::Backup;
use crate::codec;
use crate::model::Record;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "cost-tracker";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";
const COSTS_CSV: &str = "costs.csv";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$COST_TRACKER_HOME` and from there it loads `config.json`. It provides the paths
/// of the working CSV file and the backups directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    data_path: PathBuf,
}

impl Config {
    /// Creates the home directory, its backups subdirectory, a default `config.json`, and the
    /// working CSV file.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the home directory, e.g. `$HOME/cost-tracker`
    /// - `seed` - The rows the working file starts with.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    /// - Returns an error if the home directory already has a `config.json`.
    pub async fn create(dir: impl Into<PathBuf>, seed: &[Record]) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the cost-tracker home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let backups = root.join(BACKUPS);
        utils::make_dir(&backups).await?;

        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        let data_path = resolve(&root, &config_file.data_file());
        codec::save(&data_path, seed)
            .await
            .context("Unable to create the cost table file")?;

        Ok(Self {
            root,
            backups,
            config_path,
            config_file,
            data_path,
        })
    }

    /// This will
    /// - validate that the home directory and the config file exist
    /// - load the config file
    /// - validate that the backups directory exists
    /// - return the loaded configuration object
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The cost-tracker home directory is missing, run 'cost-tracker init'")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let data_path = resolve(&root, &config_file.data_file());

        let config = Self {
            backups: root.join(BACKUPS),
            root,
            config_path,
            config_file,
            data_path,
        };
        if !config.backups.is_dir() {
            bail!(
                "The backups directory is missing '{}'",
                config.backups.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The CSV file holding the cost table.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }
}

fn resolve(root: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

/// Represents the serialization format of `config.json`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Must be `cost-tracker`.
    app_name: String,

    /// The version of the config file format.
    config_version: u8,

    /// Path to the CSV file holding the cost table (optional, relative to config.json or absolute)
    /// Defaults to $COST_TRACKER_HOME/costs.csv if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_file: Option<PathBuf>,

    /// Number of backup copies to keep per kind of backup
    #[serde(default = "default_backup_copies")]
    backup_copies: u32,
}

fn default_backup_copies() -> u32 {
    BACKUP_COPIES
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_file: None,
            backup_copies: BACKUP_COPIES,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or names a different app.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    #[cfg(test)]
    pub fn new(data_file: Option<PathBuf>, backup_copies: u32) -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_file,
            backup_copies,
        }
    }

    /// Gets the data file path.
    ///
    /// If the path is relative, it should be interpreted as relative to the config.json file.
    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(COSTS_CSV))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("cost_home");

        let config = Config::create(&home, &Record::examples()).await.unwrap();

        assert!(config.backups().is_dir());
        assert!(config.config_path().is_file());
        assert_eq!(config.data_path(), config.root().join(COSTS_CSV));
        assert_eq!(config.backup_copies(), BACKUP_COPIES);
        let rows = codec::load(config.data_path()).await.unwrap();
        assert_eq!(rows, Record::examples());
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path(), &[]).await.unwrap();
        let e = Config::create(dir.path(), &[]).await.unwrap_err();
        assert!(e.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_config_load() {
        let dir = TempDir::new().unwrap();
        let created = Config::create(dir.path(), &[]).await.unwrap();
        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(created.data_path(), loaded.data_path());
        assert_eq!(created.backups(), loaded.backups());
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(dir.path().join("nothing")).await.is_err());
    }

    #[tokio::test]
    async fn test_config_load_missing_backups() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), &[]).await.unwrap();
        tokio::fs::remove_dir(config.backups()).await.unwrap();
        let e = Config::load(dir.path()).await.unwrap_err();
        assert!(e.to_string().contains("backups directory is missing"));
    }

    #[tokio::test]
    async fn test_config_custom_data_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), &[]).await.unwrap();
        let absolute = dir.path().join("elsewhere.csv");
        ConfigFile::new(Some(absolute.clone()), 2)
            .save(config.config_path())
            .await
            .unwrap();
        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(loaded.data_path(), absolute);
        assert_eq!(loaded.backup_copies(), 2);

        ConfigFile::new(Some(PathBuf::from("sub.csv")), 2)
            .save(config.config_path())
            .await
            .unwrap();
        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(loaded.data_path(), loaded.root().join("sub.csv"));
    }

    #[test]
    fn test_config_file_default() {
        let config = ConfigFile::default();
        assert_eq!(config.data_file(), PathBuf::from(COSTS_CSV));
        assert_eq!(config.backup_copies, 5);
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let original = ConfigFile::new(Some(PathBuf::from("my.csv")), 7);
        original.save(&config_path).await.unwrap();
        let loaded = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(original, loaded);
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "cost-tracker",
            "config_version": 1
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config.backup_copies, BACKUP_COPIES);
        assert_eq!(config.data_file(), PathBuf::from(COSTS_CSV));
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1,
            "backup_copies": 5
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let config = ConfigFile::new(None, 5);
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("data_file"));
    }
}
