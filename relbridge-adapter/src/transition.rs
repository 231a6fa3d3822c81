//! # Workflow Transitions
//!
//! The tracker exposes a per-issue set of named workflow actions ("Resolve
//! Issue", "Close Issue", ...) and no fixed mapping from a status name to an
//! action. A target status is matched loosely: its last character is dropped
//! and the first action whose name contains the remainder wins, so
//! "Resolved" selects "Resolve Issue" and "Closed" selects "Close Issue".

use relbridge_rpc::RemoteAction;
use tracing::{debug, info};

use crate::error::{AdapterError, Result};
use crate::session::SessionManager;

/// Name of the action used to close issues
pub const CLOSE_ACTION_NAME: &str = "Close Issue";

/// Status requested when closing an issue, used in mismatch errors
const CLOSED_STATUS: &str = "Closed";

/// An operation that can be applied to an issue in its current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowAction {
  pub id: String,
  pub name: String,
}

impl From<RemoteAction> for WorkflowAction {
  fn from(action: RemoteAction) -> Self {
    Self {
      id: action.id,
      name: action.name,
    }
  }
}

/// The fragment of `status` that action names are matched against: the
/// status without its final character
pub fn action_fragment(status: &str) -> &str {
  match status.char_indices().next_back() {
    Some((last, _)) => &status[..last],
    None => status,
  }
}

/// First action, in the order given, whose name contains the fragment of
/// `status` (case-sensitive)
pub fn select_action<'a>(actions: &'a [WorkflowAction], status: &str) -> Option<&'a WorkflowAction> {
  let fragment = action_fragment(status);
  actions.iter().find(|action| action.name.contains(fragment))
}

/// Actions currently available on an issue, in the tracker's order
pub async fn available_actions(session: &SessionManager, issue_key: &str) -> Result<Vec<WorkflowAction>> {
  let token = session.token().await?;
  let actions = session.client().get_available_actions(token, issue_key).await?;
  debug!("Issue {issue_key} has {} available actions", actions.len());

  Ok(actions.into_iter().map(WorkflowAction::from).collect())
}

fn mismatch(issue_key: &str, requested: &str, actions: &[WorkflowAction]) -> AdapterError {
  AdapterError::WorkflowMismatch {
    issue: issue_key.to_string(),
    requested: requested.to_string(),
    available: actions.iter().map(|action| action.name.clone()).collect(),
  }
}

async fn run_action(session: &SessionManager, issue_key: &str, action: &WorkflowAction) -> Result<()> {
  let token = session.token().await?;
  session
    .client()
    .progress_workflow_action(token, issue_key, &action.id, &[])
    .await?;

  info!("Applied '{}' to issue {issue_key}", action.name);
  Ok(())
}

/// Move an issue towards `status` through the matching workflow action,
/// returning the action that was applied
pub async fn transition_issue(session: &SessionManager, issue_key: &str, status: &str) -> Result<WorkflowAction> {
  let actions = available_actions(session, issue_key).await?;
  let action = select_action(&actions, status)
    .cloned()
    .ok_or_else(|| mismatch(issue_key, status, &actions))?;

  run_action(session, issue_key, &action).await?;
  Ok(action)
}

/// Close an issue through the action named [`CLOSE_ACTION_NAME`]
/// (case-insensitive)
///
/// An issue without that action fails with a workflow mismatch; no
/// transition is attempted.
pub async fn close_issue(session: &SessionManager, issue_key: &str) -> Result<()> {
  let actions = available_actions(session, issue_key).await?;
  let action = actions
    .iter()
    .find(|action| action.name.eq_ignore_ascii_case(CLOSE_ACTION_NAME))
    .ok_or_else(|| mismatch(issue_key, CLOSED_STATUS, &actions))?;

  run_action(session, issue_key, action).await
}
