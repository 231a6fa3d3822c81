//! # Credential Management
//!
//! Lookup of stored tracker credentials. Passwords are read from the user's
//! `.netrc` file when the configuration file does not carry one.

pub mod netrc;

use std::path::Path;

use anyhow::Result;

use crate::url::host_of;

/// Represents credentials for a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// Look up stored credentials for the host of `base_url`.
///
/// Returns `Ok(None)` when the `.netrc` file is missing or has no complete
/// entry for the host.
pub fn find_stored_credentials(home: &Path, base_url: &str) -> Result<Option<Credentials>> {
  let Some(host) = host_of(base_url) else {
    return Ok(None);
  };

  let netrc_path = netrc::get_netrc_path(home);
  if !netrc_path.exists() {
    tracing::debug!("No .netrc file at {}", netrc_path.display());
    return Ok(None);
  }

  netrc::parse_netrc_file(&netrc_path, &host)
}
