//! Configuration
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! `iceberg-fixtures.toml` (in the fixture root, or passed explicitly), and
//! `ICEBERG_FIXTURES_*` environment variables. Command-line flags are applied
//! on top by the binary.

use crate::artifact::{DEFAULT_REPOSITORY, JAR_URL};
use crate::error::{Error, Result};
use crate::layout::{FixtureLayout, DEFAULT_JAR_DIR_NAME, DEFAULT_WAREHOUSE_DIR_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "iceberg-fixtures.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub jar_url: String,
    pub repository: String,
    pub jar_dir_name: String,
    pub warehouse_dir_name: String,
    pub timeout_secs: u64,
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jar_url: JAR_URL.to_string(),
            repository: DEFAULT_REPOSITORY.to_string(),
            jar_dir_name: DEFAULT_JAR_DIR_NAME.to_string(),
            warehouse_dir_name: DEFAULT_WAREHOUSE_DIR_NAME.to_string(),
            timeout_secs: crate::download::DEFAULT_TIMEOUT.as_secs(),
            log_level: None,
        }
    }
}

impl Config {
    /// Load the config for a fixture root.
    ///
    /// An explicit `path` must exist; otherwise `<root>/iceberg-fixtures.toml`
    /// is read when present. Environment overrides are applied last.
    pub async fn load(root: &Path, path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None => {
                let default_path = root.join(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    Self::from_file(&default_path).await?
                } else {
                    Self::default()
                }
            }
        };

        config.merge_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "timeout_secs must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content, path)
    }

    fn from_toml_str(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    fn merge_env_from<F>(&mut self, get: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = get("ICEBERG_FIXTURES_JAR_URL") {
            self.jar_url = url;
        }

        if let Some(repository) = get("ICEBERG_FIXTURES_REPOSITORY") {
            self.repository = repository;
        }

        if let Some(timeout) = get("ICEBERG_FIXTURES_TIMEOUT_SECS") {
            self.timeout_secs = timeout.parse().map_err(|_| {
                Error::Config(format!(
                    "ICEBERG_FIXTURES_TIMEOUT_SECS must be a whole number of seconds, got '{timeout}'"
                ))
            })?;
        }

        if let Some(log_level) = get("ICEBERG_FIXTURES_LOG_LEVEL") {
            self.log_level = Some(log_level);
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn layout(&self, root: impl Into<PathBuf>) -> FixtureLayout {
        FixtureLayout::new(root).with_dir_names(&self.jar_dir_name, &self.warehouse_dir_name)
    }
}
