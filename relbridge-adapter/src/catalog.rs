//! # Status Catalog
//!
//! Issues carry a status identifier; the display name comes from the
//! tracker's status list, which is fetched once per adapter and cached.

use std::collections::HashMap;

use relbridge_rpc::RemoteStatus;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::{AdapterError, Result};
use crate::session::SessionManager;

/// Cache of status identifier to display name
#[derive(Default)]
pub struct StatusCatalog {
  names: OnceCell<HashMap<String, String>>,
}

impl StatusCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Resolve a status identifier to its display name
  ///
  /// Unknown identifiers resolve to themselves so issues with a status the
  /// tracker no longer lists are still reported.
  pub async fn status_name(&self, session: &SessionManager, status_id: Option<&str>) -> Result<String> {
    let names = self.names(session).await?;
    let key = status_id.unwrap_or_default();

    match names.get(key) {
      Some(name) => Ok(name.clone()),
      None => {
        debug!("Status '{key}' is not in the tracker's status list");
        Ok(key.to_string())
      }
    }
  }

  async fn names(&self, session: &SessionManager) -> Result<&HashMap<String, String>> {
    self
      .names
      .get_or_try_init(|| async {
        let token = session.token().await?;
        let statuses = session.client().get_statuses(token).await?;
        debug!("Loaded {} statuses", statuses.len());
        Ok::<_, AdapterError>(group_status_names(statuses))
      })
      .await
  }
}

/// Group statuses by identifier, keeping the first name seen for each.
/// A missing identifier groups under the empty string.
fn group_status_names(statuses: Vec<RemoteStatus>) -> HashMap<String, String> {
  let mut names = HashMap::with_capacity(statuses.len());
  for status in statuses {
    names.entry(status.id.unwrap_or_default()).or_insert(status.name);
  }
  names
}
