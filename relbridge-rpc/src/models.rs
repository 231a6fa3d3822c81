use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a workflow status known to the tracker
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteStatus {
  pub id: Option<String>,
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
}

/// Represents a tracker project
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteProject {
  #[serde(default)]
  pub id: Option<String>,
  pub key: String,
  pub name: String,
}

/// Represents a release version within a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteVersion {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  pub name: String,
  #[serde(default)]
  pub released: bool,
  #[serde(default)]
  pub archived: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub release_date: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sequence: Option<i64>,
}

impl RemoteVersion {
  /// A new, unreleased version that the tracker has not seen yet
  pub fn unreleased(name: &str) -> Self {
    Self {
      id: None,
      name: name.to_string(),
      released: false,
      archived: false,
      release_date: None,
      sequence: None,
    }
  }
}

/// Represents an issue as returned by searches and lookups
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteIssue {
  pub id: String,
  pub key: String,
  #[serde(default)]
  pub summary: String,
  /// Status identifier, resolved to a name through the status list
  #[serde(default)]
  pub status: Option<String>,
  #[serde(default)]
  pub project: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
}

/// Represents a workflow action available on an issue
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteAction {
  pub id: String,
  pub name: String,
}

/// Represents a comment payload
#[derive(Debug, Serialize)]
pub struct RemoteComment {
  pub body: String,
}

/// Represents a field value supplied alongside a workflow action
#[derive(Debug, Serialize)]
pub struct RemoteFieldValue {
  pub id: String,
  pub values: Vec<String>,
}
