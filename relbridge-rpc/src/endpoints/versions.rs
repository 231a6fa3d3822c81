//! # Version Endpoints
//!
//! Release versions of a project: listing, creation, and release.

use anyhow::{Context, Result};
use serde_json::json;

use crate::client::RpcClient;
use crate::models::RemoteVersion;

impl RpcClient {
  /// Get all versions of a project
  pub async fn get_versions(&self, token: &str, project_key: &str) -> Result<Vec<RemoteVersion>> {
    self
      .call("getVersions", json!([token, project_key]))
      .await
      .with_context(|| format!("Failed to fetch versions of project {project_key}"))
  }

  /// Add a version to a project, returning the stored version
  pub async fn add_version(&self, token: &str, project_key: &str, version: &RemoteVersion) -> Result<RemoteVersion> {
    self
      .call("addVersion", json!([token, project_key, version]))
      .await
      .with_context(|| format!("Failed to add version {} to project {project_key}", version.name))
  }

  /// Push the released flag and release date of a version
  pub async fn release_version(&self, token: &str, project_key: &str, version: &RemoteVersion) -> Result<()> {
    self
      .call_unit("releaseVersion", json!([token, project_key, version]))
      .await
      .with_context(|| format!("Failed to release version {} of project {project_key}", version.name))
  }
}
