//! URL helpers shared across crates.
//!
//! The tracker is addressed through a base URL plus a relative service path,
//! and issue links are derived from the same base URL. Both sides come from
//! user configuration, so slashes are normalized here rather than trusted.

use anyhow::Result;
use url::{Position, Url};

/// Join a base URL and a relative path with exactly one separating slash.
///
/// The result is the same whether or not `base` ends with a slash or `path`
/// starts with one.
pub fn combine_url(base: &str, path: &str) -> String {
  let base = base.trim_end_matches('/');
  let path = path.trim_start_matches('/');

  if path.is_empty() {
    return base.to_string();
  }

  format!("{base}/{path}")
}

/// Remove surrounding whitespace and any trailing slashes from a base URL.
pub fn trim_base_url(base: &str) -> &str {
  base.trim().trim_end_matches('/')
}

/// Ensure a URL has a proper scheme (http:// or https://).
///
/// If the input doesn't include a scheme, assumes https://. The result never
/// carries a lone trailing slash.
pub fn ensure_url_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Host cannot be empty"));
  }

  let url = match Url::parse(trimmed) {
    Ok(url) if url.host().is_some() => url,
    // "localhost:8080" parses with "localhost" as the scheme
    _ => Url::parse(&format!("https://{trimmed}"))
      .map_err(|_| anyhow::anyhow!("Failed to parse URL: '{input}'. Ensure it has a valid scheme."))?,
  };

  let mut result = url[..Position::BeforePath].to_string();
  let path = url.path().trim_end_matches('/');
  result.push_str(path);

  Ok(result)
}

/// Extract the host name from a URL, used to look up stored credentials.
pub fn host_of(input: &str) -> Option<String> {
  let normalized = ensure_url_scheme(input).ok()?;
  Url::parse(&normalized).ok()?.host_str().map(str::to_string)
}
