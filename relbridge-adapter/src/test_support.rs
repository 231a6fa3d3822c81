//! Shared setup for tests that run the adapter against a mock tracker.

use relbridge_test_utils::{SERVICE_PATH, mount_login};
use wiremock::MockServer;

use crate::session::{Credentials, SessionManager};

pub(crate) const USERNAME: &str = "release-bot";
pub(crate) const PASSWORD: &str = "s3cret";

pub(crate) fn credentials(server: &MockServer) -> Credentials {
  Credentials::new(&server.uri(), USERNAME, PASSWORD).with_service_path(SERVICE_PATH)
}

/// A session against `server` whose login is expected exactly once
pub(crate) async fn logged_in_session(server: &MockServer) -> SessionManager {
  mount_login(server, USERNAME, PASSWORD, 1).await;
  SessionManager::new(credentials(server)).expect("Failed to create session manager")
}
