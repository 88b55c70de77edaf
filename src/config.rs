//! Loader Configuration Module
//! Where the dataset comes from and how its archive is laid out.

use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Public download location of the UCI HAR dataset.
pub const DEFAULT_URL: &str =
    "https://archive.ics.uci.edu/static/public/240/human+activity+recognition+using+smartphones.zip";

/// Environment variable overriding the download URL.
pub const URL_ENV_VAR: &str = "HAR_DATASET_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),
    #[error("Config file not found: {0}")]
    MissingFile(PathBuf),
}

/// Settings for one dataset download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub url: String,
    /// Name of the zip entry nested inside the downloaded archive.
    pub inner_archive: String,
    /// Top-level directory inside the nested archive.
    pub dataset_root: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            inner_archive: "UCI HAR Dataset.zip".to_string(),
            dataset_root: "UCI HAR Dataset".to_string(),
        }
    }
}

impl LoaderConfig {
    /// Load configuration, highest priority last:
    /// 1. Default values
    /// 2. The JSON file at `path`, when given
    /// 3. `HAR_DATASET_URL` for the URL
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(path)?.extract().map_err(ConfigError::from)
    }

    /// Build the provider chain.
    pub fn figment(path: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Json::file(path));
        }

        Ok(figment.merge(Env::raw().only(&[URL_ENV_VAR]).map(|_| "url".into())))
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Path of a file relative to the dataset root, using `/` as the zip separator.
    pub fn entry_path(&self, relative: &str) -> String {
        format!("{}/{}", self.dataset_root, relative)
    }
}
