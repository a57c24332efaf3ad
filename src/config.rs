//! Configuration file handling for spendboard.
//!
//! The configuration file is stored at `$SPENDBOARD_HOME/config.json`. It names the directory that
//! holds the expense, income and category files and the sizes of the dashboard lists.

use crate::analytics::DEFAULT_TOP_CATEGORIES;
use crate::api::{CATEGORIES_JSON, EXPENSES_JSON, INCOME_JSON};
use crate::dashboard::{DashboardSettings, DEFAULT_RECENT_LIMIT};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "spendboard";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA_DIR: &str = "data";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$SPENDBOARD_HOME` and from there it loads `$SPENDBOARD_HOME/config.json`. It
/// provides paths to the data files, which are either configured or expected in a certain location
/// within the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    data_dir: PathBuf,
}

impl Config {
    /// Creates the home directory and the data directory and:
    /// - Creates an initial `config.json` file with default settings, unless one exists
    /// - Creates empty `expenses.json`, `income.json` and `categories.json` files, unless they exist
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the home directory, e.g. `$HOME/spendboard`
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        // Create the directory if it does not exist
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the spendboard home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        // Keep an existing config, otherwise write the defaults
        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            debug!("Keeping the existing config at {}", config_path.display());
            ConfigFile::load(&config_path).await?
        } else {
            let config_file = ConfigFile::default();
            config_file.save(&config_path).await?;
            config_file
        };

        let data_dir = resolve(&root, config_file.data_dir());
        utils::make_dir(&data_dir)
            .await
            .context("Unable to create the data directory")?;
        for name in [EXPENSES_JSON, INCOME_JSON, CATEGORIES_JSON] {
            let path = data_dir.join(name);
            if !path.is_file() {
                debug!("Creating empty data file {}", path.display());
                utils::write(&path, "[]").await?;
            }
        }

        Ok(Self {
            root,
            config_path,
            config_file,
            data_dir,
        })
    }

    /// This will
    /// - validate that the home directory exists and that the config file exists
    /// - load the config file
    /// - validate that the data directory exists
    /// - return the loaded configuration object
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The spendboard home directory is missing, run 'spendboard init'")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let data_dir = resolve(&root, config_file.data_dir());
        if !data_dir.is_dir() {
            bail!("The data directory is missing '{}'", data_dir.display())
        }

        Ok(Self {
            root,
            config_path,
            config_file,
            data_dir,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The directory holding `expenses.json`, `income.json` and `categories.json`.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            recent_limit: self.config_file.recent_activity_limit,
            top_categories_limit: self.config_file.top_categories_limit,
        }
    }

    pub fn top_categories_limit(&self) -> usize {
        self.config_file.top_categories_limit
    }
}

/// Returns `p` if it is absolute, otherwise `p` relative to `root`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

fn default_top_categories_limit() -> usize {
    DEFAULT_TOP_CATEGORIES
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "spendboard",
///   "config_version": 1,
///   "data_dir": "data",
///   "recent_activity_limit": 5,
///   "top_categories_limit": 5
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "spendboard"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path to the data directory (optional, relative to the home directory or absolute)
    /// Defaults to $SPENDBOARD_HOME/data if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_dir: Option<PathBuf>,

    /// Number of recent expenses and income records on the dashboard
    #[serde(default = "default_recent_limit")]
    recent_activity_limit: usize,

    /// Number of categories in the dashboard's top categories chart
    #[serde(default = "default_top_categories_limit")]
    top_categories_limit: usize,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_dir: None,
            recent_activity_limit: DEFAULT_RECENT_LIMIT,
            top_categories_limit: DEFAULT_TOP_CATEGORIES,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
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
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        utils::serialize(path.as_ref(), self)
            .await
            .context("Unable to write config file")
    }

    /// Gets the data directory path.
    ///
    /// If the path is relative, it should be interpreted as relative to the home directory.
    fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("spendboard_home");

        let config = Config::create(&home_dir).await.unwrap();

        assert!(config.config_path().is_file());
        assert!(config.data_dir().is_dir());
        assert_eq!(config.data_dir(), config.root().join(DATA_DIR));
        for name in [EXPENSES_JSON, INCOME_JSON, CATEGORIES_JSON] {
            let content = utils::read(&config.data_dir().join(name)).await.unwrap();
            assert_eq!(content, "[]");
        }
        assert_eq!(config.dashboard_settings(), DashboardSettings::default());
    }

    #[tokio::test]
    async fn test_config_create_keeps_existing_files() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path()).await.unwrap();
        let expenses = config.data_dir().join(EXPENSES_JSON);
        utils::write(&expenses, "[1]").await.unwrap();

        let again = Config::create(dir.path()).await.unwrap();
        assert_eq!(utils::read(&expenses).await.unwrap(), "[1]");
        assert_eq!(again.root(), config.root());
    }

    #[tokio::test]
    async fn test_config_load() {
        let dir = TempDir::new().unwrap();
        let created = Config::create(dir.path()).await.unwrap();
        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(created.data_dir(), loaded.data_dir());
        assert_eq!(created.config_file, loaded.config_file);
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(dir.path().join("nope")).await.is_err());
    }

    #[tokio::test]
    async fn test_config_load_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path()).await.unwrap();
        tokio::fs::remove_dir_all(config.data_dir()).await.unwrap();
        let err = Config::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("data directory is missing"));
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_JSON);
        let json = r#"{ "app_name": "spendboard", "config_version": 1 }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.data_dir(), PathBuf::from(DATA_DIR));
    }

    #[tokio::test]
    async fn test_config_file_custom_values() {
        let temp_dir = TempDir::new().unwrap();
        let elsewhere = temp_dir.path().join("elsewhere");
        utils::make_dir(&elsewhere).await.unwrap();
        let config_file = ConfigFile {
            data_dir: Some(elsewhere.clone()),
            recent_activity_limit: 3,
            top_categories_limit: 10,
            ..ConfigFile::default()
        };
        config_file
            .save(temp_dir.path().join(CONFIG_JSON))
            .await
            .unwrap();

        let config = Config::load(temp_dir.path()).await.unwrap();
        assert_eq!(config.data_dir(), elsewhere.as_path());
        assert_eq!(config.dashboard_settings().recent_limit, 3);
        assert_eq!(config.top_categories_limit(), 10);
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_JSON);
        let json = r#"{ "app_name": "wrong_app", "config_version": 1 }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("data_dir"));
        assert!(json.contains("\"top_categories_limit\":5"));
    }
}
