//! # Tracker Client Setup
//!
//! Builds the tracker adapter for a command from the configuration file,
//! the `RELBRIDGE_*` environment overrides, and `.netrc`, and resolves the
//! project filter a release-scoped command operates on.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use relbridge_adapter::{ApplicationFilter, Credentials, TrackerAdapter, effective_filter};
use relbridge_core::creds::find_stored_credentials;
use relbridge_core::{RelbridgeConfig, ensure_url_scheme, get_config_dirs};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::cli::FilterArgs;

/// Resolve the configuration file path, defaulting to the user config
/// directory
pub fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
  match explicit {
    Some(path) => Ok(path),
    None => Ok(get_config_dirs()?.config_path()),
  }
}

/// Load the configuration file with environment overrides applied
pub fn load_config(explicit: Option<PathBuf>) -> Result<RelbridgeConfig> {
  let path = config_path(explicit)?;
  Ok(RelbridgeConfig::load(&path)?.with_env_overrides())
}

/// Build adapter credentials from the configuration, falling back to the
/// `.netrc` entry for the tracker host for anything the configuration lacks
pub fn resolve_credentials(config: &RelbridgeConfig, home: Option<&Path>) -> Result<Credentials> {
  let connection = &config.connection;
  let base_url = connection
    .base_url
    .as_deref()
    .context("No tracker URL configured. Set connection.base_url or the RELBRIDGE_URL environment variable.")?;
  let base_url = ensure_url_scheme(base_url)?;

  let stored = match (&connection.username, &connection.password, home) {
    (Some(_), Some(_), _) | (_, _, None) => None,
    (_, _, Some(home)) => find_stored_credentials(home, &base_url)?,
  };

  let username = connection
    .username
    .clone()
    .or_else(|| stored.as_ref().map(|creds| creds.username.clone()))
    .with_context(|| format!("No username configured for {base_url}. Set connection.username or RELBRIDGE_USER."))?;
  let password = connection
    .password
    .clone()
    .or_else(|| stored.map(|creds| creds.password))
    .with_context(|| {
      format!("No password found for {base_url}. Add it to ~/.netrc or set the RELBRIDGE_PASSWORD environment variable.")
    })?;

  Ok(Credentials::new(&base_url, &username, &password).with_service_path(&connection.service_path))
}

/// Create a runtime and an adapter for the configured tracker
pub fn create_runtime_and_adapter(config: &RelbridgeConfig) -> Result<(Runtime, TrackerAdapter)> {
  let rt = Runtime::new().context("Failed to create async runtime")?;

  let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
  let credentials = resolve_credentials(config, home.as_deref())?;
  debug!("Using tracker credentials {credentials:?}");

  let adapter = TrackerAdapter::new(credentials).context("Failed to create tracker adapter")?;
  Ok((rt, adapter))
}

/// Pick the project filter for a release-scoped command
///
/// An explicit project wins. Otherwise the application's configured project
/// is used, then the legacy `project` setting, and finally the tracker
/// project named like the application.
pub async fn resolve_filter(
  adapter: &TrackerAdapter,
  config: &RelbridgeConfig,
  args: &FilterArgs,
) -> Result<ApplicationFilter> {
  if let Some(project) = &args.project {
    return Ok(ApplicationFilter::for_project(project));
  }

  let configured = args
    .application
    .as_deref()
    .and_then(|application| config.application_project(application))
    .map(ApplicationFilter::for_project);

  let filter = effective_filter(configured.as_ref(), config.project.as_deref());
  if filter.is_empty()
    && let Some(application) = &args.application
  {
    return Ok(adapter.default_filter(application).await?);
  }

  Ok(filter)
}
