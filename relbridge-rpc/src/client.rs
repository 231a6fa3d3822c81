use anyhow::{Context, Result};
use relbridge_core::url::combine_url;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::consts::USER_AGENT;

/// Represents a client for the tracker's remote procedure endpoint
pub struct RpcClient {
  pub(crate) client: Client,
  pub(crate) endpoint: String,
}

impl RpcClient {
  /// Create a new client for the fully resolved service endpoint
  pub fn new(endpoint: &str) -> Result<Self> {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      client,
      endpoint: endpoint.to_string(),
    })
  }

  /// The service endpoint this client talks to
  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }

  /// Invoke a remote method and decode its result
  pub(crate) async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
    let response = self.send(method, params).await?;

    response
      .json::<T>()
      .await
      .with_context(|| format!("Failed to parse response of remote method {method}"))
  }

  /// Invoke a remote method whose result carries nothing of interest
  pub(crate) async fn call_unit(&self, method: &str, params: Value) -> Result<()> {
    self.send(method, params).await.map(drop)
  }

  async fn send(&self, method: &str, params: Value) -> Result<Response> {
    let url = combine_url(&self.endpoint, method);
    debug!(method, "Calling remote method");

    let response = self
      .client
      .post(&url)
      .json(&params)
      .send()
      .await
      .with_context(|| format!("Failed to call remote method {method}"))?;

    match response.status() {
      status if status.is_success() => Ok(response),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your tracker credentials."
      )),
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Remote method {method} not found at {url}")),
      status => {
        let body = response.text().await.unwrap_or_default();
        Err(anyhow::anyhow!(
          "Unexpected error from {method}: HTTP {status} - {}",
          fault_message(&body)
        ))
      }
    }
  }
}

/// Pull the message out of a remote fault body, falling back to the raw text
fn fault_message(body: &str) -> String {
  serde_json::from_str::<Value>(body)
    .ok()
    .and_then(|fault| {
      fault
        .pointer("/error/message")
        .or_else(|| fault.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
    })
    .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
  use relbridge_test_utils::{SERVICE_PATH, rpc_path};
  use serde_json::json;
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  #[test]
  fn test_rpc_client_creation() -> Result<()> {
    let client = RpcClient::new("https://jira.example.com/rpc/json-rpc/jirasoapservice-v2")?;
    assert_eq!(client.endpoint(), "https://jira.example.com/rpc/json-rpc/jirasoapservice-v2");
    Ok(())
  }

  #[test]
  fn test_fault_message() {
    assert_eq!(
      fault_message(r#"{"error":{"code":500,"message":"Version already exists"}}"#),
      "Version already exists"
    );
    assert_eq!(fault_message(r#"{"message":"boom"}"#), "boom");
    assert_eq!(fault_message("plain failure"), "plain failure");
  }

  #[tokio::test]
  async fn test_call_sends_user_agent_and_params() -> Result<()> {
    let mock_server = MockServer::start().await;
    let client = RpcClient::new(&combine_url(&mock_server.uri(), SERVICE_PATH))?;

    Mock::given(method("POST"))
      .and(path(rpc_path("getStatuses")))
      .and(header("User-Agent", USER_AGENT))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .expect(1)
      .mount(&mock_server)
      .await;

    let statuses: Vec<Value> = client.call("getStatuses", json!(["token"])).await?;
    assert!(statuses.is_empty());

    Ok(())
  }

  #[tokio::test]
  async fn test_call_unauthorized() -> Result<()> {
    let mock_server = MockServer::start().await;
    let client = RpcClient::new(&combine_url(&mock_server.uri(), SERVICE_PATH))?;

    Mock::given(method("POST"))
      .and(path(rpc_path("getStatuses")))
      .respond_with(ResponseTemplate::new(401))
      .mount(&mock_server)
      .await;

    let result = client.call::<Value>("getStatuses", json!(["token"])).await;
    assert!(result.unwrap_err().to_string().contains("Authentication failed"));

    Ok(())
  }

  #[tokio::test]
  async fn test_call_remote_fault() -> Result<()> {
    let mock_server = MockServer::start().await;
    let client = RpcClient::new(&combine_url(&mock_server.uri(), SERVICE_PATH))?;

    Mock::given(method("POST"))
      .and(path(rpc_path("addVersion")))
      .respond_with(ResponseTemplate::new(500).set_body_json(json!({
          "error": { "code": 500, "message": "A version with this name already exists in this project." }
      })))
      .mount(&mock_server)
      .await;

    let error = client
      .call_unit("addVersion", json!(["token"]))
      .await
      .unwrap_err()
      .to_string();
    assert!(error.contains("addVersion"));
    assert!(error.contains("already exists"));

    Ok(())
  }
}
