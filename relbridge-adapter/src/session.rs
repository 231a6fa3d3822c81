//! # Session Management
//!
//! Owns the tracker session token. The token is acquired on the first
//! authenticated call and reused for the lifetime of the manager; `close`
//! logs it out again on a best-effort basis.

use std::fmt;

use relbridge_core::consts::DEFAULT_SERVICE_PATH;
use relbridge_core::url::combine_url;
use relbridge_rpc::RpcClient;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::{AdapterError, Result};

/// Connection details for the tracker
#[derive(Clone)]
pub struct Credentials {
  pub base_url: String,
  pub username: String,
  pub password: String,
  /// Remote procedure endpoint, relative to `base_url`
  pub service_path: String,
}

impl Credentials {
  /// Create credentials using the default service path
  pub fn new(base_url: &str, username: &str, password: &str) -> Self {
    Self {
      base_url: base_url.to_string(),
      username: username.to_string(),
      password: password.to_string(),
      service_path: DEFAULT_SERVICE_PATH.to_string(),
    }
  }

  /// Replace the relative service path
  pub fn with_service_path(mut self, service_path: &str) -> Self {
    self.service_path = service_path.to_string();
    self
  }

  /// The full service endpoint: base URL and service path joined by one slash
  pub fn endpoint(&self) -> String {
    combine_url(&self.base_url, &self.service_path)
  }
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("base_url", &self.base_url)
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .field("service_path", &self.service_path)
      .finish()
  }
}

/// Lazily authenticated session against the tracker
///
/// Not meant to be shared between concurrent callers; the token cell only
/// guarantees that one login happens.
pub struct SessionManager {
  client: RpcClient,
  credentials: Credentials,
  token: OnceCell<String>,
}

impl SessionManager {
  /// Create a session manager; no remote call happens until a token is needed
  pub fn new(credentials: Credentials) -> Result<Self> {
    let client = RpcClient::new(&credentials.endpoint())?;

    Ok(Self {
      client,
      credentials,
      token: OnceCell::new(),
    })
  }

  /// The underlying remote procedure client
  pub fn client(&self) -> &RpcClient {
    &self.client
  }

  /// The configured tracker base URL
  pub fn base_url(&self) -> &str {
    &self.credentials.base_url
  }

  /// Whether a token has been acquired and not yet released
  pub fn has_session(&self) -> bool {
    self.token.initialized()
  }

  /// Return the session token, logging in on first use
  pub async fn token(&self) -> Result<&str> {
    let token = self
      .token
      .get_or_try_init(|| async {
        debug!(username = %self.credentials.username, "Logging in to {}", self.client.endpoint());
        self
          .client
          .login(&self.credentials.username, &self.credentials.password)
          .await
          .map_err(AdapterError::connectivity)
      })
      .await?;

    Ok(token.as_str())
  }

  /// Check connectivity with a fresh login/logout cycle
  ///
  /// The memoized token, if any, is left untouched.
  pub async fn validate(&self) -> Result<()> {
    let token = self
      .client
      .login(&self.credentials.username, &self.credentials.password)
      .await
      .map_err(AdapterError::connectivity)?;

    self.client.logout(&token).await.map_err(AdapterError::connectivity)?;

    info!("Validated connection to {}", self.client.endpoint());
    Ok(())
  }

  /// Log out the memoized token, if one was acquired
  ///
  /// Failures are logged and swallowed: the session may already have expired
  /// on the tracker side.
  pub async fn close(&mut self) {
    let Some(token) = self.token.take() else {
      return;
    };

    match self.client.logout(&token).await {
      Ok(_) => debug!("Logged out of {}", self.client.endpoint()),
      Err(e) => warn!("Ignoring logout failure: {e:#}"),
    }
  }
}

impl Drop for SessionManager {
  fn drop(&mut self) {
    if self.token.initialized() {
      warn!(
        "Session for {} dropped without logging out; it stays open until the tracker expires it",
        self.credentials.username
      );
    }
  }
}
