use thiserror::Error;

/// Errors surfaced by the adapter
#[derive(Debug, Error)]
pub enum AdapterError {
  /// Missing or invalid input such as an empty release name or project filter
  #[error("{0}")]
  Configuration(String),

  /// Login or logout against the tracker failed
  #[error("Unable to connect to the issue tracker: {source:#}")]
  Connectivity {
    #[source]
    source: anyhow::Error,
  },

  /// No available workflow action matches the requested status
  #[error(
    "Cannot move issue {issue} to status '{requested}': no matching workflow action. Available actions: {}",
    format_actions(.available)
  )]
  WorkflowMismatch {
    issue: String,
    requested: String,
    available: Vec<String>,
  },

  /// A release version required by the operation does not exist
  #[error("Version '{version}' does not exist in project {project}")]
  NotFound { project: String, version: String },

  /// Any other failure reported by the tracker or the transport
  #[error(transparent)]
  Remote(#[from] anyhow::Error),
}

fn format_actions(actions: &[String]) -> String {
  if actions.is_empty() {
    "(none)".to_string()
  } else {
    actions.join(", ")
  }
}

impl AdapterError {
  pub(crate) fn configuration(message: impl Into<String>) -> Self {
    AdapterError::Configuration(message.into())
  }

  pub(crate) fn connectivity(source: anyhow::Error) -> Self {
    AdapterError::Connectivity { source }
  }
}

/// Result alias for adapter operations
pub type Result<T> = std::result::Result<T, AdapterError>;
