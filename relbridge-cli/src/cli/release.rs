//! # Release Commands
//!
//! Commands scoped to a release: listing its issues, creating and deploying
//! its version, and bulk workflow changes over its issues.

use std::path::PathBuf;

use anyhow::Result;
use relbridge_adapter::{ApplicationFilter, Issue, ReleaseOutcome};
use relbridge_core::output::{format_key, format_release, format_status};
use relbridge_core::{print_header, print_info, print_success};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::FilterArgs;
use crate::clients::{create_runtime_and_adapter, load_config, resolve_filter};

#[derive(Tabled)]
struct IssueRow {
  #[tabled(rename = "Key")]
  key: String,
  #[tabled(rename = "Summary")]
  summary: String,
  #[tabled(rename = "Status")]
  status: String,
  #[tabled(rename = "URL")]
  url: String,
}

fn project_label(filter: &ApplicationFilter) -> String {
  match filter.project_key() {
    Some(key) => format!("project {}", format_key(key)),
    None => "all projects".to_string(),
  }
}

#[allow(clippy::print_stdout)]
fn display_issues(release: &str, filter: &ApplicationFilter, issues: Vec<Issue>) {
  if issues.is_empty() {
    print_info(&format!(
      "No issues found for release {} in {}",
      format_release(release),
      project_label(filter)
    ));
    return;
  }

  let rows: Vec<IssueRow> = issues
    .into_iter()
    .map(|issue| IssueRow {
      key: issue.key,
      summary: issue.title,
      status: issue.status,
      url: issue.url,
    })
    .collect();

  print_header(&format!("Issues in release {}", format_release(release)));
  println!("{}", Table::new(rows).with(Style::sharp()));
}

/// Handle the issues command
pub fn handle_issues(config_path: Option<PathBuf>, release: &str, filter_args: &FilterArgs) -> Result<()> {
  let config = load_config(config_path)?;
  let (rt, mut adapter) = create_runtime_and_adapter(&config)?;

  let result = rt.block_on(async {
    let filter = resolve_filter(&adapter, &config, filter_args).await?;
    let issues = adapter.enumerate_issues(release, &filter).await?;
    Ok::<_, anyhow::Error>((filter, issues))
  });
  rt.block_on(adapter.close());

  let (filter, issues) = result?;
  display_issues(release, &filter, issues);
  Ok(())
}

/// Handle the create-release command
pub fn handle_create_release(
  config_path: Option<PathBuf>,
  release: &str,
  filter_args: &FilterArgs,
) -> Result<()> {
  let config = load_config(config_path)?;
  let (rt, mut adapter) = create_runtime_and_adapter(&config)?;

  let result = rt.block_on(async {
    let filter = resolve_filter(&adapter, &config, filter_args).await?;
    let outcome = adapter.create_release(release, &filter).await?;
    Ok::<_, anyhow::Error>((filter, outcome))
  });
  rt.block_on(adapter.close());

  let (filter, outcome) = result?;
  let release = format_release(release.trim());
  let project = project_label(&filter);
  match outcome {
    ReleaseOutcome::AlreadyExists => print_info(&format!("Release {release} already exists in {project}")),
    _ => print_success(&format!("Created release {release} in {project}")),
  }
  Ok(())
}

/// Handle the deploy-release command
pub fn handle_deploy_release(
  config_path: Option<PathBuf>,
  release: &str,
  filter_args: &FilterArgs,
) -> Result<()> {
  let config = load_config(config_path)?;
  let (rt, mut adapter) = create_runtime_and_adapter(&config)?;

  let result = rt.block_on(async {
    let filter = resolve_filter(&adapter, &config, filter_args).await?;
    let outcome = adapter.deploy_release(release, &filter).await?;
    Ok::<_, anyhow::Error>((filter, outcome))
  });
  rt.block_on(adapter.close());

  let (filter, outcome) = result?;
  let release = format_release(release.trim());
  let project = project_label(&filter);
  match outcome {
    ReleaseOutcome::AlreadyReleased => print_info(&format!("Release {release} in {project} is already released")),
    _ => print_success(&format!("Released {release} in {project}")),
  }
  Ok(())
}

/// Handle the close-all command
pub fn handle_close_all(config_path: Option<PathBuf>, release: &str, filter_args: &FilterArgs) -> Result<()> {
  let config = load_config(config_path)?;
  let (rt, mut adapter) = create_runtime_and_adapter(&config)?;

  let result = rt.block_on(async {
    let filter = resolve_filter(&adapter, &config, filter_args).await?;
    Ok::<_, anyhow::Error>(adapter.close_all_issues(release, &filter).await?)
  });
  rt.block_on(adapter.close());

  let closed = result?;
  print_success(&format!("Closed {closed} issues in release {}", format_release(release)));
  Ok(())
}

/// Handle the status-all command
pub fn handle_status_all(
  config_path: Option<PathBuf>,
  release: &str,
  filter_args: &FilterArgs,
  from: &str,
  to: &str,
) -> Result<()> {
  let config = load_config(config_path)?;
  let (rt, mut adapter) = create_runtime_and_adapter(&config)?;

  let result = rt.block_on(async {
    let filter = resolve_filter(&adapter, &config, filter_args).await?;
    Ok::<_, anyhow::Error>(adapter.change_status_for_all_issues(release, &filter, from, to).await?)
  });
  rt.block_on(adapter.close());

  let changed = result?;
  print_success(&format!(
    "Moved {changed} issues in release {} from {} to {}",
    format_release(release),
    format_status(from.trim()),
    format_status(to.trim())
  ));
  Ok(())
}
