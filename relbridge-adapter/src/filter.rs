//! Project filters scoping release operations.

/// Associates a host application with a tracker project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
  project_key: Option<String>,
}

impl ApplicationFilter {
  /// A filter for `project_key`; a blank key yields an empty filter
  pub fn for_project(project_key: &str) -> Self {
    let key = project_key.trim();
    Self {
      project_key: (!key.is_empty()).then(|| key.to_string()),
    }
  }

  /// A filter that references no project
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn project_key(&self) -> Option<&str> {
    self.project_key.as_deref()
  }

  pub fn is_empty(&self) -> bool {
    self.project_key.is_none()
  }
}

/// Pick the filter for an invocation: the per-context filter when it names a
/// project, else the legacy single-filter value, else an empty filter.
pub fn effective_filter(context: Option<&ApplicationFilter>, legacy: Option<&str>) -> ApplicationFilter {
  match context {
    Some(filter) if !filter.is_empty() => filter.clone(),
    _ => legacy.map(ApplicationFilter::for_project).unwrap_or_default(),
  }
}
