//! # Release Lifecycle
//!
//! Reconciles release versions with the tracker. Both operations are
//! idempotent: creating a version that exists and deploying a version that
//! is already released are no-ops reported through [`ReleaseOutcome`].

use chrono::Utc;
use relbridge_rpc::RemoteVersion;
use tracing::info;

use crate::error::{AdapterError, Result};
use crate::filter::ApplicationFilter;
use crate::projects::find_version;
use crate::session::SessionManager;

/// What a release operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
  Created,
  AlreadyExists,
  Released,
  AlreadyReleased,
}

/// Validate the release name and project filter shared by both operations,
/// returning the trimmed name and the project key
fn release_target<'a>(release_name: &'a str, filter: &'a ApplicationFilter) -> Result<(&'a str, &'a str)> {
  let name = release_name.trim();
  if name.is_empty() {
    return Err(AdapterError::configuration("A release name is required"));
  }

  let project_key = filter
    .project_key()
    .ok_or_else(|| AdapterError::configuration(format!("No project filter is configured for release '{name}'")))?;

  Ok((name, project_key))
}

/// Create the version `release_name` in the filtered project unless it exists
pub async fn create_release(
  session: &SessionManager,
  release_name: &str,
  filter: &ApplicationFilter,
) -> Result<ReleaseOutcome> {
  let (name, project_key) = release_target(release_name, filter)?;

  if find_version(session, project_key, name).await?.is_some() {
    info!("Version '{name}' already exists in project {project_key}");
    return Ok(ReleaseOutcome::AlreadyExists);
  }

  let token = session.token().await?;
  session
    .client()
    .add_version(token, project_key, &RemoteVersion::unreleased(name))
    .await?;

  info!("Created version '{name}' in project {project_key}");
  Ok(ReleaseOutcome::Created)
}

/// Mark the version `release_name` as released now
///
/// The version must already exist; a released version is left untouched.
pub async fn deploy_release(
  session: &SessionManager,
  release_name: &str,
  filter: &ApplicationFilter,
) -> Result<ReleaseOutcome> {
  let (name, project_key) = release_target(release_name, filter)?;

  let Some(mut version) = find_version(session, project_key, name).await? else {
    return Err(AdapterError::NotFound {
      project: project_key.to_string(),
      version: name.to_string(),
    });
  };

  if version.released {
    info!("Version '{}' of project {project_key} is already released", version.name);
    return Ok(ReleaseOutcome::AlreadyReleased);
  }

  version.released = true;
  version.release_date = Some(Utc::now());

  let token = session.token().await?;
  session.client().release_version(token, project_key, &version).await?;

  info!("Released version '{}' of project {project_key}", version.name);
  Ok(ReleaseOutcome::Released)
}

#[cfg(test)]
mod tests {
  use relbridge_test_utils::{TEST_TOKEN, mount_rpc, mount_unexpected, rpc_path};
  use serde_json::{Value, json};
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::test_support::{credentials, logged_in_session};

  async fn mount_versions(server: &MockServer, versions: Value, times: u64) {
    mount_rpc(server, "getVersions", json!([TEST_TOKEN, "OPS"]), versions, times).await;
  }

  #[tokio::test]
  async fn test_release_requires_name_and_project() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let session = SessionManager::new(credentials(&mock_server))?;

    let error = create_release(&session, "  ", &ApplicationFilter::for_project("OPS"))
      .await
      .unwrap_err();
    assert!(matches!(error, AdapterError::Configuration(_)));

    let error = deploy_release(&session, "1.0", &ApplicationFilter::empty())
      .await
      .unwrap_err();
    assert!(matches!(error, AdapterError::Configuration(_)));
    assert!(!session.has_session());

    Ok(())
  }

  #[tokio::test]
  async fn test_create_release_adds_missing_version() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let session = logged_in_session(&mock_server).await;
    mount_versions(&mock_server, json!([{ "id": "10", "name": "1.0" }]), 1).await;
    mount_rpc(
      &mock_server,
      "addVersion",
      json!([TEST_TOKEN, "OPS", { "name": "1.1", "released": false, "archived": false }]),
      json!({ "id": "11", "name": "1.1" }),
      1,
    )
    .await;

    let outcome = create_release(&session, " 1.1 ", &ApplicationFilter::for_project("OPS")).await?;
    assert_eq!(outcome, ReleaseOutcome::Created);

    Ok(())
  }

  #[tokio::test]
  async fn test_create_release_twice_adds_one_version() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let session = logged_in_session(&mock_server).await;
    mount_versions(&mock_server, json!([{ "id": "11", "name": "Release-1.1" }]), 2).await;
    mount_unexpected(&mock_server, "addVersion").await;
    let filter = ApplicationFilter::for_project("OPS");

    assert_eq!(
      create_release(&session, "release-1.1", &filter).await?,
      ReleaseOutcome::AlreadyExists
    );
    assert_eq!(
      create_release(&session, "RELEASE-1.1", &filter).await?,
      ReleaseOutcome::AlreadyExists
    );

    Ok(())
  }

  #[tokio::test]
  async fn test_deploy_release_missing_version_is_not_found() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let session = logged_in_session(&mock_server).await;
    mount_versions(&mock_server, json!([]), 1).await;
    mount_unexpected(&mock_server, "releaseVersion").await;

    let error = deploy_release(&session, "2.0", &ApplicationFilter::for_project("OPS"))
      .await
      .unwrap_err();
    assert!(matches!(
      &error,
      AdapterError::NotFound { project, version } if project == "OPS" && version == "2.0"
    ));

    Ok(())
  }

  #[tokio::test]
  async fn test_deploy_release_already_released_is_noop() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let session = logged_in_session(&mock_server).await;
    mount_versions(
      &mock_server,
      json!([{ "id": "10", "name": "1.0", "released": true, "releaseDate": "2024-03-01T12:00:00Z" }]),
      1,
    )
    .await;
    mount_unexpected(&mock_server, "releaseVersion").await;

    let outcome = deploy_release(&session, "1.0", &ApplicationFilter::for_project("OPS")).await?;
    assert_eq!(outcome, ReleaseOutcome::AlreadyReleased);

    Ok(())
  }

  #[tokio::test]
  async fn test_deploy_release_marks_version_released() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let session = logged_in_session(&mock_server).await;
    mount_versions(&mock_server, json!([{ "id": "10", "name": "1.0", "sequence": 3 }]), 1).await;
    Mock::given(method("POST"))
      .and(path(rpc_path("releaseVersion")))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
      .expect(1)
      .mount(&mock_server)
      .await;

    let outcome = deploy_release(&session, "1.0", &ApplicationFilter::for_project("OPS")).await?;
    assert_eq!(outcome, ReleaseOutcome::Released);

    let requests = mock_server.received_requests().await.unwrap_or_default();
    let release_request = requests
      .iter()
      .find(|request| request.url.path() == rpc_path("releaseVersion"))
      .expect("releaseVersion was called");
    let params: Value = release_request.body_json()?;

    assert_eq!(params[0], TEST_TOKEN);
    assert_eq!(params[1], "OPS");
    assert_eq!(params[2]["id"], "10");
    assert_eq!(params[2]["released"], true);
    assert_eq!(params[2]["sequence"], 3);
    assert!(params[2]["releaseDate"].is_string());

    Ok(())
  }
}
