//! Mock tracker endpoints for the remote procedure protocol.
//!
//! Every remote method is a `POST <service path>/<method>` whose body is the
//! JSON array of positional parameters, so mocks match on both.

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Service path used by tests, relative to the mock server root
pub const SERVICE_PATH: &str = "rpc/json-rpc/jirasoapservice-v2";

/// Token handed out by [`mount_login`]
pub const TEST_TOKEN: &str = "test-session-token";

/// Absolute request path of a remote method
pub fn rpc_path(remote_method: &str) -> String {
  format!("/{SERVICE_PATH}/{remote_method}")
}

/// Mount a response for `remote_method` called with exactly `params`,
/// expecting it to be called `times` times.
pub async fn mount_rpc(server: &MockServer, remote_method: &str, params: Value, response: Value, times: u64) {
  Mock::given(method("POST"))
    .and(path(rpc_path(remote_method)))
    .and(body_json(params))
    .respond_with(ResponseTemplate::new(200).set_body_json(response))
    .expect(times)
    .named(remote_method)
    .mount(server)
    .await;
}

/// Mount a login for `username`/`password` returning [`TEST_TOKEN`]
pub async fn mount_login(server: &MockServer, username: &str, password: &str, times: u64) {
  mount_rpc(server, "login", json!([username, password]), json!(TEST_TOKEN), times).await;
}

/// Mount a logout of [`TEST_TOKEN`]
pub async fn mount_logout(server: &MockServer, times: u64) {
  mount_rpc(server, "logout", json!([TEST_TOKEN]), json!(true), times).await;
}

/// Fail verification if `remote_method` is called with any parameters
pub async fn mount_unexpected(server: &MockServer, remote_method: &str) {
  Mock::given(method("POST"))
    .and(path(rpc_path(remote_method)))
    .respond_with(ResponseTemplate::new(500))
    .expect(0)
    .named(format!("unexpected {remote_method}"))
    .mount(server)
    .await;
}
