//! # Issue Commands
//!
//! Single-issue operations: closing, commenting, and status changes.

use std::path::PathBuf;

use anyhow::Result;
use relbridge_adapter::StatusChange;
use relbridge_core::output::{format_key, format_status};
use relbridge_core::{print_info, print_success};

use crate::clients::{create_runtime_and_adapter, load_config};

/// Handle the close command
pub fn handle_close(config_path: Option<PathBuf>, issue_key: &str) -> Result<()> {
  let config = load_config(config_path)?;
  let (rt, mut adapter) = create_runtime_and_adapter(&config)?;

  let result = rt.block_on(adapter.close_issue(issue_key));
  rt.block_on(adapter.close());
  result?;

  print_success(&format!("Closed {}", format_key(issue_key)));
  Ok(())
}

/// Handle the comment command
pub fn handle_comment(config_path: Option<PathBuf>, issue_key: &str, text: &str) -> Result<()> {
  let config = load_config(config_path)?;
  let (rt, mut adapter) = create_runtime_and_adapter(&config)?;

  let result = rt.block_on(adapter.add_comment(issue_key, text));
  rt.block_on(adapter.close());
  result?;

  print_success(&format!("Commented on {}", format_key(issue_key)));
  Ok(())
}

/// Handle the status command
pub fn handle_status(config_path: Option<PathBuf>, issue_key: &str, status: &str) -> Result<()> {
  let config = load_config(config_path)?;
  let (rt, mut adapter) = create_runtime_and_adapter(&config)?;

  let result = rt.block_on(adapter.change_issue_status(issue_key, status));
  rt.block_on(adapter.close());

  let status = format_status(status.trim());
  match result? {
    StatusChange::AlreadyInStatus => print_info(&format!("{} is already {status}", format_key(issue_key))),
    StatusChange::Transitioned { action } => print_success(&format!(
      "Moved {} to {status} via '{}'",
      format_key(issue_key),
      action.name
    )),
  }
  Ok(())
}
