//! # Project and Version Resolution
//!
//! Looks up the projects visible to the session and the release versions
//! within a project. Release names are compared case-insensitively on their
//! trimmed form, both here and in the release lifecycle.

use std::collections::HashSet;

use relbridge_rpc::{RemoteProject, RemoteVersion};
use tracing::debug;

use crate::error::Result;
use crate::filter::ApplicationFilter;
use crate::session::SessionManager;

/// A tracker project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
  pub key: String,
  pub name: String,
}

/// Whether two release names denote the same version
pub fn same_release_name(left: &str, right: &str) -> bool {
  left.trim().to_lowercase() == right.trim().to_lowercase()
}

/// All projects visible to the session, one per key (first wins), in the
/// tracker's order
pub async fn list_projects(session: &SessionManager) -> Result<Vec<Project>> {
  let token = session.token().await?;
  let projects = session.client().get_projects(token).await?;
  Ok(unique_projects(projects))
}

fn unique_projects(projects: Vec<RemoteProject>) -> Vec<Project> {
  let mut seen = HashSet::new();
  projects
    .into_iter()
    .filter(|project| seen.insert(project.key.clone()))
    .map(|project| Project {
      key: project.key,
      name: project.name,
    })
    .collect()
}

/// Filter for the project whose name matches the application name, or an
/// empty filter when none does
pub async fn resolve_default_filter(session: &SessionManager, application_name: &str) -> Result<ApplicationFilter> {
  let wanted = application_name.trim().to_lowercase();
  let filter = list_projects(session)
    .await?
    .into_iter()
    .find(|project| project.name.to_lowercase() == wanted)
    .map(|project| ApplicationFilter::for_project(&project.key))
    .unwrap_or_default();

  debug!("Default filter for application '{application_name}': {filter:?}");
  Ok(filter)
}

/// Find a release version by name within a project
pub async fn find_version(session: &SessionManager, project_key: &str, release_name: &str) -> Result<Option<RemoteVersion>> {
  let token = session.token().await?;
  let versions = session.client().get_versions(token, project_key).await?;

  Ok(
    versions
      .into_iter()
      .find(|version| same_release_name(&version.name, release_name)),
  )
}
