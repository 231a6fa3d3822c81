//! # Configuration Management
//!
//! Handles the relbridge configuration file and its directory, including XDG
//! base directory support. The file stores the tracker connection, the legacy
//! single project filter, and the per-application project filters.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::consts::{CONFIG_FILE_NAME, DEFAULT_SERVICE_PATH, ENV_TRACKER_PASSWORD, ENV_TRACKER_URL, ENV_TRACKER_USER};

/// Represents the configuration directories for the relbridge application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs =
      ProjectDirs::from("eddieland", "", "relbridge").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

fn default_service_path() -> String {
  DEFAULT_SERVICE_PATH.to_string()
}

/// Connection settings for the issue tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
  /// Tracker base URL (e.g. https://jira.example.com)
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub base_url: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub username: Option<String>,

  /// Usually left unset in favor of `.netrc` or `RELBRIDGE_PASSWORD`
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub password: Option<String>,

  /// Remote procedure endpoint, relative to the base URL
  #[serde(default = "default_service_path")]
  pub service_path: String,
}

impl Default for ConnectionConfig {
  fn default() -> Self {
    Self {
      base_url: None,
      username: None,
      password: None,
      service_path: default_service_path(),
    }
  }
}

/// Contents of `relbridge.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelbridgeConfig {
  /// Legacy single project filter, used when an application has no entry of
  /// its own
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub project: Option<String>,

  #[serde(default)]
  pub connection: ConnectionConfig,

  /// Application name to project key
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub applications: BTreeMap<String, String>,
}

impl RelbridgeConfig {
  /// Load the configuration from `path`, or the defaults when it is absent
  pub fn load(path: &Path) -> Result<Self> {
    if !path.exists() {
      tracing::debug!("No configuration file at {}, using defaults", path.display());
      return Ok(Self::default());
    }

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read configuration from {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse configuration from {}", path.display()))
  }

  /// Save the configuration to `path`, creating parent directories
  pub fn save(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

    fs::write(path, content).with_context(|| format!("Failed to write configuration to {}", path.display()))
  }

  /// Apply explicit connection overrides; `None` keeps the file value
  pub fn with_overrides(mut self, base_url: Option<String>, username: Option<String>, password: Option<String>) -> Self {
    if base_url.is_some() {
      self.connection.base_url = base_url;
    }
    if username.is_some() {
      self.connection.username = username;
    }
    if password.is_some() {
      self.connection.password = password;
    }
    self
  }

  /// Apply the `RELBRIDGE_*` environment overrides
  pub fn with_env_overrides(self) -> Self {
    let read = |name: &str| std::env::var(name).ok().filter(|value| !value.trim().is_empty());
    self.with_overrides(read(ENV_TRACKER_URL), read(ENV_TRACKER_USER), read(ENV_TRACKER_PASSWORD))
  }

  /// Project key configured for an application, matched case-insensitively
  pub fn application_project(&self, application: &str) -> Option<&str> {
    let application = application.trim();
    self
      .applications
      .iter()
      .find(|(name, _)| name.eq_ignore_ascii_case(application))
      .map(|(_, key)| key.as_str())
  }
}
