//! # Tracker Commands
//!
//! Connection checks and project discovery.

use std::path::PathBuf;

use anyhow::Result;
use relbridge_core::output::format_key;
use relbridge_core::{print_header, print_info, print_success};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::clients::{create_runtime_and_adapter, load_config};

#[derive(Tabled)]
struct ProjectRow {
  #[tabled(rename = "Key")]
  key: String,
  #[tabled(rename = "Name")]
  name: String,
}

#[allow(clippy::print_stdout)]
fn display_projects(rows: Vec<ProjectRow>) {
  print_header("Projects");
  println!("{}", Table::new(rows).with(Style::sharp()));
}

/// Handle the validate command
pub fn handle_validate(config_path: Option<PathBuf>) -> Result<()> {
  let config = load_config(config_path)?;
  let (rt, adapter) = create_runtime_and_adapter(&config)?;

  rt.block_on(adapter.validate_connection())?;
  print_success(&format!("Connected to {}", adapter.base_url()));
  Ok(())
}

/// Handle the projects command
pub fn handle_projects(config_path: Option<PathBuf>) -> Result<()> {
  let config = load_config(config_path)?;
  let (rt, mut adapter) = create_runtime_and_adapter(&config)?;

  let result = rt.block_on(adapter.list_projects());
  rt.block_on(adapter.close());
  let projects = result?;

  if projects.is_empty() {
    print_info("No projects are visible to this user");
    return Ok(());
  }

  let rows: Vec<ProjectRow> = projects
    .into_iter()
    .map(|project| ProjectRow {
      key: project.key,
      name: project.name,
    })
    .collect();

  display_projects(rows);
  Ok(())
}

/// Handle the default-filter command
pub fn handle_default_filter(config_path: Option<PathBuf>, application: &str) -> Result<()> {
  let config = load_config(config_path)?;
  let (rt, mut adapter) = create_runtime_and_adapter(&config)?;

  let result = rt.block_on(adapter.default_filter(application));
  rt.block_on(adapter.close());

  match result?.project_key() {
    Some(key) => print_success(&format!("Application '{application}' maps to project {}", format_key(key))),
    None => print_info(&format!("No project is named like application '{application}'")),
  }
  Ok(())
}
