use anyhow::{Context, Result};
use serde_json::json;

use crate::client::RpcClient;
use crate::models::{RemoteAction, RemoteFieldValue, RemoteIssue};

impl RpcClient {
  /// Get the workflow actions available for an issue in its current state
  pub async fn get_available_actions(&self, token: &str, issue_key: &str) -> Result<Vec<RemoteAction>> {
    self
      .call("getAvailableActions", json!([token, issue_key]))
      .await
      .with_context(|| format!("Failed to fetch workflow actions for issue {issue_key}"))
  }

  /// Execute a workflow action on an issue
  pub async fn progress_workflow_action(
    &self,
    token: &str,
    issue_key: &str,
    action_id: &str,
    field_values: &[RemoteFieldValue],
  ) -> Result<RemoteIssue> {
    self
      .call("progressWorkflowAction", json!([token, issue_key, action_id, field_values]))
      .await
      .with_context(|| format!("Failed to run workflow action {action_id} on issue {issue_key}"))
  }
}
