//! # Tracker Adapter
//!
//! The uniform contract used by release automation. One adapter owns one
//! session and one status catalog; call [`TrackerAdapter::close`] when done
//! so the session is logged out.

use relbridge_rpc::RemoteComment;
use tracing::{debug, info};

use crate::catalog::StatusCatalog;
use crate::error::{AdapterError, Result};
use crate::filter::ApplicationFilter;
use crate::projects::{self, Project};
use crate::query::{self, Issue};
use crate::release::{self, ReleaseOutcome};
use crate::session::{Credentials, SessionManager};
use crate::transition::{self, WorkflowAction};

/// Result of a single status change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
  /// The issue already had the requested status; nothing was sent
  AlreadyInStatus,
  /// The issue was moved through `action`
  Transitioned { action: WorkflowAction },
}

/// Adapter between release automation and the issue tracker
pub struct TrackerAdapter {
  session: SessionManager,
  catalog: StatusCatalog,
}

/// Trim a requested status, rejecting names too short to match an action
fn validate_status(status: &str) -> Result<&str> {
  let status = status.trim();
  if status.chars().count() < 2 {
    return Err(AdapterError::configuration(format!(
      "Invalid status '{status}': a status name needs at least two characters"
    )));
  }
  Ok(status)
}

impl TrackerAdapter {
  pub fn new(credentials: Credentials) -> Result<Self> {
    Ok(Self::with_session(SessionManager::new(credentials)?))
  }

  pub fn with_session(session: SessionManager) -> Self {
    Self {
      session,
      catalog: StatusCatalog::new(),
    }
  }

  pub fn base_url(&self) -> &str {
    self.session.base_url()
  }

  /// Check that the tracker accepts the configured credentials
  pub async fn validate_connection(&self) -> Result<()> {
    self.session.validate().await
  }

  /// Projects visible to the session
  pub async fn list_projects(&self) -> Result<Vec<Project>> {
    projects::list_projects(&self.session).await
  }

  /// Filter for the project named like `application_name`, if any
  pub async fn default_filter(&self, application_name: &str) -> Result<ApplicationFilter> {
    projects::resolve_default_filter(&self.session, application_name).await
  }

  /// Issues fixed in `release_name` within the filtered project
  pub async fn enumerate_issues(&self, release_name: &str, filter: &ApplicationFilter) -> Result<Vec<Issue>> {
    query::enumerate_issues(&self.session, &self.catalog, release_name, filter).await
  }

  pub async fn get_issue(&self, issue_key: &str) -> Result<Issue> {
    query::get_issue(&self.session, &self.catalog, issue_key).await
  }

  pub async fn create_release(&self, release_name: &str, filter: &ApplicationFilter) -> Result<ReleaseOutcome> {
    release::create_release(&self.session, release_name, filter).await
  }

  pub async fn deploy_release(&self, release_name: &str, filter: &ApplicationFilter) -> Result<ReleaseOutcome> {
    release::deploy_release(&self.session, release_name, filter).await
  }

  pub async fn close_issue(&self, issue_key: &str) -> Result<()> {
    transition::close_issue(&self.session, issue_key).await
  }

  /// Close every issue of a release in order, returning how many were closed
  ///
  /// Stops at the first failure; issues closed before it stay closed.
  pub async fn close_all_issues(&self, release_name: &str, filter: &ApplicationFilter) -> Result<usize> {
    let issues = self.enumerate_issues(release_name, filter).await?;
    for issue in &issues {
      self.close_issue(&issue.key).await?;
    }

    info!("Closed {} issues of release '{release_name}'", issues.len());
    Ok(issues.len())
  }

  /// Post a comment on an issue
  pub async fn add_comment(&self, issue_key: &str, comment: &str) -> Result<()> {
    if comment.trim().is_empty() {
      return Err(AdapterError::configuration(format!(
        "Refusing to post an empty comment on issue {issue_key}"
      )));
    }

    let token = self.session.token().await?;
    let comment = RemoteComment {
      body: comment.to_string(),
    };
    self.session.client().add_comment(token, issue_key, &comment).await?;

    debug!("Commented on issue {issue_key}");
    Ok(())
  }

  /// Move an issue to `status` unless it already has it
  pub async fn change_issue_status(&self, issue_key: &str, status: &str) -> Result<StatusChange> {
    let status = validate_status(status)?;
    let issue = self.get_issue(issue_key).await?;
    self.change_status(&issue, status).await
  }

  async fn change_status(&self, issue: &Issue, status: &str) -> Result<StatusChange> {
    if issue.status == status {
      debug!("Issue {} is already in status '{status}'", issue.key);
      return Ok(StatusChange::AlreadyInStatus);
    }

    let action = transition::transition_issue(&self.session, &issue.key, status).await?;
    Ok(StatusChange::Transitioned { action })
  }

  /// Move every issue of a release that is in `from_status` to `to_status`,
  /// returning how many were moved
  ///
  /// Issues in any other status are skipped without querying their actions.
  /// Stops at the first failure.
  pub async fn change_status_for_all_issues(
    &self,
    release_name: &str,
    filter: &ApplicationFilter,
    from_status: &str,
    to_status: &str,
  ) -> Result<usize> {
    let to_status = validate_status(to_status)?;
    let from_status = from_status.trim();

    let mut changed = 0;
    for issue in self.enumerate_issues(release_name, filter).await? {
      if issue.status != from_status {
        debug!("Skipping issue {} in status '{}'", issue.key, issue.status);
        continue;
      }
      if let StatusChange::Transitioned { .. } = self.change_status(&issue, to_status).await? {
        changed += 1;
      }
    }

    info!("Moved {changed} issues of release '{release_name}' from '{from_status}' to '{to_status}'");
    Ok(changed)
  }

  /// Log out the session, if one was opened
  pub async fn close(&mut self) {
    self.session.close().await;
  }
}

#[cfg(test)]
mod tests {
  use relbridge_rpc::UNLIMITED_RESULTS;
  use relbridge_test_utils::{TEST_TOKEN, mount_logout, mount_rpc, mount_unexpected};
  use serde_json::json;
  use wiremock::MockServer;

  use super::*;
  use crate::test_support::{credentials, logged_in_session};

  async fn adapter(server: &MockServer) -> TrackerAdapter {
    TrackerAdapter::with_session(logged_in_session(server).await)
  }

  async fn mount_statuses(server: &MockServer) {
    mount_rpc(
      server,
      "getStatuses",
      json!([TEST_TOKEN]),
      json!([
          { "id": "1", "name": "Open" },
          { "id": "5", "name": "Resolved" },
          { "id": "6", "name": "Closed" }
      ]),
      1,
    )
    .await;
  }

  async fn mount_release_issues(server: &MockServer) {
    mount_rpc(
      server,
      "getVersions",
      json!([TEST_TOKEN, "OPS"]),
      json!([{ "id": "10", "name": "1.0" }]),
      1,
    )
    .await;
    mount_rpc(
      server,
      "getIssuesFromJqlSearch",
      json!([TEST_TOKEN, "fixVersion = \"1.0\" AND project = \"OPS\"", UNLIMITED_RESULTS]),
      json!([
          { "id": "1", "key": "OPS-1", "summary": "Open one", "status": "1" },
          { "id": "2", "key": "OPS-2", "summary": "Done", "status": "5" },
          { "id": "3", "key": "OPS-3", "summary": "Open two", "status": "1" }
      ]),
      1,
    )
    .await;
  }

  async fn mount_actions(server: &MockServer, issue_key: &str, times: u64) {
    mount_rpc(
      server,
      "getAvailableActions",
      json!([TEST_TOKEN, issue_key]),
      json!([
          { "id": "5", "name": "Resolve Issue" },
          { "id": "2", "name": "Close Issue" }
      ]),
      times,
    )
    .await;
  }

  async fn mount_progress(server: &MockServer, issue_key: &str, action_id: &str, times: u64) {
    mount_rpc(
      server,
      "progressWorkflowAction",
      json!([TEST_TOKEN, issue_key, action_id, []]),
      json!({ "id": "0", "key": issue_key }),
      times,
    )
    .await;
  }

  #[test]
  fn test_validate_status() {
    assert_eq!(validate_status("  Resolved ").unwrap(), "Resolved");
    assert!(matches!(validate_status(""), Err(AdapterError::Configuration(_))));
    assert!(matches!(validate_status(" X "), Err(AdapterError::Configuration(_))));
  }

  #[tokio::test]
  async fn test_change_issue_status_already_in_status_sends_nothing() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let adapter = adapter(&mock_server).await;
    mount_statuses(&mock_server).await;
    mount_rpc(
      &mock_server,
      "getIssue",
      json!([TEST_TOKEN, "OPS-2"]),
      json!({ "id": "2", "key": "OPS-2", "summary": "Done", "status": "5" }),
      1,
    )
    .await;
    mount_unexpected(&mock_server, "getAvailableActions").await;
    mount_unexpected(&mock_server, "progressWorkflowAction").await;

    let change = adapter.change_issue_status("OPS-2", " Resolved ").await?;
    assert_eq!(change, StatusChange::AlreadyInStatus);

    Ok(())
  }

  #[tokio::test]
  async fn test_change_issue_status_transitions() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let adapter = adapter(&mock_server).await;
    mount_statuses(&mock_server).await;
    mount_rpc(
      &mock_server,
      "getIssue",
      json!([TEST_TOKEN, "OPS-1"]),
      json!({ "id": "1", "key": "OPS-1", "summary": "Open one", "status": "1" }),
      1,
    )
    .await;
    mount_actions(&mock_server, "OPS-1", 1).await;
    mount_progress(&mock_server, "OPS-1", "5", 1).await;

    let change = adapter.change_issue_status("OPS-1", "Resolved").await?;
    assert_eq!(
      change,
      StatusChange::Transitioned {
        action: WorkflowAction {
          id: "5".to_string(),
          name: "Resolve Issue".to_string()
        }
      }
    );

    Ok(())
  }

  #[tokio::test]
  async fn test_change_issue_status_rejects_short_status_before_any_call() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    mount_unexpected(&mock_server, "login").await;
    let adapter = TrackerAdapter::new(credentials(&mock_server))?;

    let error = adapter.change_issue_status("OPS-1", "R").await.unwrap_err();
    assert!(matches!(error, AdapterError::Configuration(_)));

    Ok(())
  }

  #[tokio::test]
  async fn test_change_status_for_all_issues_only_touches_matching_issues() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let adapter = adapter(&mock_server).await;
    mount_statuses(&mock_server).await;
    mount_release_issues(&mock_server).await;
    mount_actions(&mock_server, "OPS-1", 1).await;
    mount_actions(&mock_server, "OPS-2", 0).await;
    mount_actions(&mock_server, "OPS-3", 1).await;
    mount_progress(&mock_server, "OPS-1", "5", 1).await;
    mount_progress(&mock_server, "OPS-3", "5", 1).await;

    let changed = adapter
      .change_status_for_all_issues("1.0", &ApplicationFilter::for_project("OPS"), "Open", "Resolved")
      .await?;
    assert_eq!(changed, 2);

    Ok(())
  }

  #[tokio::test]
  async fn test_close_all_issues_closes_each_issue() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let adapter = adapter(&mock_server).await;
    mount_statuses(&mock_server).await;
    mount_release_issues(&mock_server).await;
    for key in ["OPS-1", "OPS-2", "OPS-3"] {
      mount_actions(&mock_server, key, 1).await;
      mount_progress(&mock_server, key, "2", 1).await;
    }

    let closed = adapter
      .close_all_issues("1.0", &ApplicationFilter::for_project("OPS"))
      .await?;
    assert_eq!(closed, 3);

    Ok(())
  }

  #[tokio::test]
  async fn test_close_all_issues_stops_at_first_failure() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let adapter = adapter(&mock_server).await;
    mount_statuses(&mock_server).await;
    mount_release_issues(&mock_server).await;
    mount_actions(&mock_server, "OPS-1", 1).await;
    mount_progress(&mock_server, "OPS-1", "2", 1).await;
    mount_rpc(
      &mock_server,
      "getAvailableActions",
      json!([TEST_TOKEN, "OPS-2"]),
      json!([{ "id": "3", "name": "Reopen Issue" }]),
      1,
    )
    .await;
    mount_actions(&mock_server, "OPS-3", 0).await;

    let error = adapter
      .close_all_issues("1.0", &ApplicationFilter::for_project("OPS"))
      .await
      .unwrap_err();
    assert!(matches!(error, AdapterError::WorkflowMismatch { ref issue, .. } if issue == "OPS-2"));

    Ok(())
  }

  #[tokio::test]
  async fn test_add_comment() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let adapter = adapter(&mock_server).await;
    mount_rpc(
      &mock_server,
      "addComment",
      json!([TEST_TOKEN, "OPS-1", { "body": "Deployed to production" }]),
      json!(null),
      1,
    )
    .await;

    adapter.add_comment("OPS-1", "Deployed to production").await?;

    let error = adapter.add_comment("OPS-1", "   ").await.unwrap_err();
    assert!(matches!(error, AdapterError::Configuration(_)));

    Ok(())
  }

  #[tokio::test]
  async fn test_close_logs_out_once() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let mut adapter = adapter(&mock_server).await;
    mount_rpc(
      &mock_server,
      "getProjectsNoSchemes",
      json!([TEST_TOKEN]),
      json!([{ "key": "OPS", "name": "Operations" }]),
      1,
    )
    .await;
    mount_logout(&mock_server, 1).await;

    let projects = adapter.list_projects().await?;
    assert_eq!(projects.len(), 1);

    adapter.close().await;
    adapter.close().await;

    Ok(())
  }
}
