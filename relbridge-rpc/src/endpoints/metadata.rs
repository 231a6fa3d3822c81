//! # Metadata Endpoints
//!
//! Tracker-wide lookups: the workflow status list and the visible projects.

use anyhow::{Context, Result};
use serde_json::json;

use crate::client::RpcClient;
use crate::models::{RemoteProject, RemoteStatus};

impl RpcClient {
  /// Get every workflow status known to the tracker
  pub async fn get_statuses(&self, token: &str) -> Result<Vec<RemoteStatus>> {
    self
      .call("getStatuses", json!([token]))
      .await
      .context("Failed to fetch statuses")
  }

  /// Get every project visible to the session, without scheme details
  pub async fn get_projects(&self, token: &str) -> Result<Vec<RemoteProject>> {
    self
      .call("getProjectsNoSchemes", json!([token]))
      .await
      .context("Failed to fetch projects")
  }
}
