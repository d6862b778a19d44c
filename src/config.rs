//! Configuration file handling for Spendwise.
//!
//! The configuration file is stored at `$SPENDWISE_HOME/config.json`. It says where the
//! transactions file lives and how amounts are shown.

use crate::error::Res;
use crate::utils;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "spendwise";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const TRANSACTIONS_JSON: &str = "transactions.json";
const DEFAULT_CURRENCY: &str = "₹";
pub(crate) const DEFAULT_PAGE_SIZE: usize = 20;

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$SPENDWISE_HOME` and from there it loads `$SPENDWISE_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory, an initial `config.json` and, if it does not exist yet, an
    /// empty transactions file.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the home directory, e.g. `$HOME/spendwise`
    /// - `currency` - The symbol shown in front of amounts. Defaults to `₹`.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists or any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>, currency: Option<&str>) -> Res<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the spendwise home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("A config file already exists at '{}'", config_path.display())
        }

        let config_file = ConfigFile {
            currency: currency
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        let config = Self {
            root,
            config_path,
            config_file,
        };

        let transactions_path = config.transactions_path();
        if !transactions_path.exists() {
            debug!("Creating {}", transactions_path.display());
            crate::load::write_transactions(&transactions_path, &[]).await?;
        }
        Ok(config)
    }

    /// Validates that `spendwise_home` exists and loads its config file.
    pub async fn load(spendwise_home: impl Into<PathBuf>) -> Res<Self> {
        let maybe_relative = spendwise_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Spendwise home is missing, did you run 'spendwise init'?")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Returns the stored `transactions_path` if it is absolute, otherwise resolves it against the
    /// home directory.
    pub fn transactions_path(&self) -> PathBuf {
        let p = &self.config_file.transactions_path;
        if p.is_absolute() {
            return p.clone();
        }
        self.root.join(p)
    }

    pub fn currency(&self) -> &str {
        &self.config_file.currency
    }

    pub fn page_size(&self) -> usize {
        self.config_file.page_size
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "spendwise",
///   "config_version": 1,
///   "transactions_path": "transactions.json",
///   "currency": "₹",
///   "page_size": 20
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "spendwise"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The transactions file, relative to the home directory or absolute. A `.csv` extension
    /// selects CSV, anything else is read as JSON.
    #[serde(default = "default_transactions_path")]
    transactions_path: PathBuf,

    #[serde(default = "default_currency")]
    currency: String,

    /// Rows per page for `list` when `--page-size` is not given
    #[serde(default = "default_page_size")]
    page_size: usize,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            transactions_path: default_transactions_path(),
            currency: default_currency(),
            page_size: default_page_size(),
        }
    }
}

fn default_transactions_path() -> PathBuf {
    PathBuf::from(TRANSACTIONS_JSON)
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl ConfigFile {
    /// Loads a ConfigFile from `path` and validates the `app_name`.
    async fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .context("Unable to load the config file")?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.page_size > 0,
            "Invalid page_size in config file: it must be at least 1"
        );

        Ok(config)
    }

    async fn save(&self, path: impl AsRef<Path>) -> Res<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("spendwise_home");

        let config = Config::create(&home_dir, Some("$")).await.unwrap();

        assert_eq!(config.currency(), "$");
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
        assert!(config.config_path().is_file());
        assert_eq!(
            config.transactions_path(),
            config.root().join(TRANSACTIONS_JSON)
        );
        let content = utils::read(&config.transactions_path()).await.unwrap();
        assert_eq!(content.trim(), "[]");
    }

    #[tokio::test]
    async fn test_config_create_then_load() {
        let dir = TempDir::new().unwrap();
        let created = Config::create(dir.path(), None).await.unwrap();
        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(created.config_file, loaded.config_file);
        assert_eq!(loaded.currency(), DEFAULT_CURRENCY);
    }

    #[tokio::test]
    async fn test_config_create_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path(), None).await.unwrap();
        let err = Config::create(dir.path(), None).await.unwrap_err();
        assert!(err.to_string().contains("already exists"), "{err}");
    }

    #[tokio::test]
    async fn test_config_create_keeps_existing_transactions() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join(TRANSACTIONS_JSON);
        utils::write(&existing, "[ ]").await.unwrap();
        let config = Config::create(dir.path(), None).await.unwrap();
        assert_eq!(
            utils::read(&config.transactions_path()).await.unwrap(),
            "[ ]"
        );
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nope")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_load_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("config file is missing"), "{err}");
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_JSON);
        let json = r#"{ "app_name": "spendwise", "config_version": 1 }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_JSON);
        let json = r#"{ "app_name": "wrong_app", "config_version": 1 }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_load_zero_page_size() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_JSON);
        let json = r#"{ "app_name": "spendwise", "config_version": 1, "page_size": 0 }"#;
        utils::write(&config_path, json).await.unwrap();

        assert!(ConfigFile::load(&config_path).await.is_err());
    }

    #[tokio::test]
    async fn test_absolute_transactions_path() {
        let temp_dir = TempDir::new().unwrap();
        let elsewhere = temp_dir.path().join("data").join("spends.csv");
        let home = temp_dir.path().join("home");
        utils::make_dir(&home).await.unwrap();
        let config_file = ConfigFile {
            transactions_path: elsewhere.clone(),
            ..ConfigFile::default()
        };
        config_file.save(home.join(CONFIG_JSON)).await.unwrap();

        let config = Config::load(&home).await.unwrap();
        assert_eq!(config.transactions_path(), elsewhere);
    }
}
