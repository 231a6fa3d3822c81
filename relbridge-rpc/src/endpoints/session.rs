//! # Session Endpoints
//!
//! Login and logout against the tracker. The token returned by `login` is the
//! first positional parameter of every other remote method.

use anyhow::{Context, Result};
use serde_json::json;

use crate::client::RpcClient;

impl RpcClient {
  /// Authenticate and return a session token
  pub async fn login(&self, username: &str, password: &str) -> Result<String> {
    self
      .call("login", json!([username, password]))
      .await
      .with_context(|| format!("Failed to log in to {} as {username}", self.endpoint))
  }

  /// Invalidate a session token
  pub async fn logout(&self, token: &str) -> Result<bool> {
    self.call("logout", json!([token])).await.context("Failed to log out")
  }
}
