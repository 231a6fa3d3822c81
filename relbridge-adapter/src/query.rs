//! # Issue Queries
//!
//! Enumerates the issues fixed in a release by generating a query on the
//! fix version (and the project, when the filter names one) and normalizing
//! the hits into [`Issue`] snapshots.

use relbridge_core::url::trim_base_url;
use relbridge_rpc::{RemoteIssue, UNLIMITED_RESULTS};
use tracing::{debug, info};

use crate::catalog::StatusCatalog;
use crate::error::Result;
use crate::filter::ApplicationFilter;
use crate::projects::find_version;
use crate::session::SessionManager;

/// A snapshot of a tracker issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
  pub id: String,
  pub key: String,
  pub title: String,
  /// Display name of the issue's status
  pub status: String,
  pub url: String,
}

/// Browse URL of an issue
pub fn issue_url(base_url: &str, issue_key: &str) -> String {
  format!("{}/browse/{issue_key}", trim_base_url(base_url))
}

/// Quote a query value, escaping backslashes and double quotes
fn quote(value: &str) -> String {
  format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Query for the issues whose fix version is `release_name`, optionally
/// restricted to a project
pub fn release_query(release_name: &str, project_key: Option<&str>) -> String {
  let mut query = format!("fixVersion = {}", quote(release_name));
  if let Some(key) = project_key {
    query.push_str(&format!(" AND project = {}", quote(key)));
  }
  query
}

async fn to_issue(session: &SessionManager, catalog: &StatusCatalog, remote: RemoteIssue) -> Result<Issue> {
  let status = catalog.status_name(session, remote.status.as_deref()).await?;

  Ok(Issue {
    url: issue_url(session.base_url(), &remote.key),
    id: remote.id,
    key: remote.key,
    title: remote.summary,
    status,
  })
}

/// Fetch a single issue by key
pub async fn get_issue(session: &SessionManager, catalog: &StatusCatalog, issue_key: &str) -> Result<Issue> {
  let token = session.token().await?;
  let remote = session.client().get_issue(token, issue_key).await?;
  to_issue(session, catalog, remote).await
}

/// All issues fixed in `release_name`, in the tracker's order
///
/// A release without a matching version in the filtered project has no
/// issues yet, so this returns an empty list rather than an error.
pub async fn enumerate_issues(
  session: &SessionManager,
  catalog: &StatusCatalog,
  release_name: &str,
  filter: &ApplicationFilter,
) -> Result<Vec<Issue>> {
  let version_name = match filter.project_key() {
    Some(project_key) => match find_version(session, project_key, release_name).await? {
      Some(version) => version.name,
      None => {
        info!("Release '{release_name}' has no version in project {project_key}");
        return Ok(Vec::new());
      }
    },
    None => release_name.trim().to_string(),
  };

  let query = release_query(&version_name, filter.project_key());
  let token = session.token().await?;
  let remote_issues = session.client().search_issues(token, &query, UNLIMITED_RESULTS).await?;
  debug!("Query '{query}' returned {} issues", remote_issues.len());

  let mut issues = Vec::with_capacity(remote_issues.len());
  for remote in remote_issues {
    issues.push(to_issue(session, catalog, remote).await?);
  }
  Ok(issues)
}
