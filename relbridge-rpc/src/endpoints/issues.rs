//! # Issue Endpoints
//!
//! Issue lookup, query search, and comments.

use anyhow::{Context, Result};
use serde_json::json;

use crate::client::RpcClient;
use crate::models::{RemoteComment, RemoteIssue};

impl RpcClient {
  /// Get an issue by key
  pub async fn get_issue(&self, token: &str, issue_key: &str) -> Result<RemoteIssue> {
    self
      .call("getIssue", json!([token, issue_key]))
      .await
      .with_context(|| format!("Failed to fetch issue {issue_key}"))
  }

  /// Run a query search, returning at most `max_results` issues in the
  /// tracker's order
  pub async fn search_issues(&self, token: &str, query: &str, max_results: i32) -> Result<Vec<RemoteIssue>> {
    self
      .call("getIssuesFromJqlSearch", json!([token, query, max_results]))
      .await
      .with_context(|| format!("Failed to search issues with query: {query}"))
  }

  /// Add a comment to an issue
  pub async fn add_comment(&self, token: &str, issue_key: &str, comment: &RemoteComment) -> Result<()> {
    self
      .call_unit("addComment", json!([token, issue_key, comment]))
      .await
      .with_context(|| format!("Failed to comment on issue {issue_key}"))
  }
}

#[cfg(test)]
mod tests {
  use relbridge_core::url::combine_url;
  use relbridge_test_utils::{SERVICE_PATH, TEST_TOKEN, mount_rpc, rpc_path};
  use serde_json::json;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::RpcClient;
  use crate::consts::UNLIMITED_RESULTS;
  use crate::models::RemoteComment;

  #[tokio::test]
  async fn test_get_issue() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = RpcClient::new(&combine_url(&mock_server.uri(), SERVICE_PATH))?;
    mount_rpc(
      &mock_server,
      "getIssue",
      json!([TEST_TOKEN, "OPS-7"]),
      json!({ "id": "10007", "key": "OPS-7", "summary": "Patch hosts", "status": "3" }),
      1,
    )
    .await;

    let issue = client.get_issue(TEST_TOKEN, "OPS-7").await?;
    assert_eq!(issue.key, "OPS-7");
    assert_eq!(issue.status.as_deref(), Some("3"));

    Ok(())
  }

  #[tokio::test]
  async fn test_get_issue_not_found() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = RpcClient::new(&combine_url(&mock_server.uri(), SERVICE_PATH))?;

    Mock::given(method("POST"))
      .and(path(rpc_path("getIssue")))
      .respond_with(ResponseTemplate::new(500).set_body_json(json!({
          "error": { "message": "Issue Does Not Exist" }
      })))
      .mount(&mock_server)
      .await;

    let error = format!("{:#}", client.get_issue(TEST_TOKEN, "OPS-999").await.unwrap_err());
    assert!(error.contains("OPS-999"));
    assert!(error.contains("Issue Does Not Exist"));

    Ok(())
  }

  #[tokio::test]
  async fn test_search_issues_passes_unlimited_results() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = RpcClient::new(&combine_url(&mock_server.uri(), SERVICE_PATH))?;
    mount_rpc(
      &mock_server,
      "getIssuesFromJqlSearch",
      json!([TEST_TOKEN, "fixVersion = \"1.0\"", UNLIMITED_RESULTS]),
      json!([
          { "id": "1", "key": "OPS-1", "summary": "First", "status": "1" },
          { "id": "2", "key": "OPS-2", "summary": "Second", "status": "5" }
      ]),
      1,
    )
    .await;

    let issues = client
      .search_issues(TEST_TOKEN, "fixVersion = \"1.0\"", UNLIMITED_RESULTS)
      .await?;
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].key, "OPS-1");
    assert_eq!(issues[1].key, "OPS-2");

    Ok(())
  }

  #[tokio::test]
  async fn test_add_comment() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = RpcClient::new(&combine_url(&mock_server.uri(), SERVICE_PATH))?;
    mount_rpc(
      &mock_server,
      "addComment",
      json!([TEST_TOKEN, "OPS-1", { "body": "Deployed to production" }]),
      json!(null),
      1,
    )
    .await;

    let comment = RemoteComment {
      body: "Deployed to production".to_string(),
    };
    client.add_comment(TEST_TOKEN, "OPS-1", &comment).await?;

    Ok(())
  }
}
