//! Constants shared across relbridge components.

/// Environment variable overriding the tracker base URL.
pub const ENV_TRACKER_URL: &str = "RELBRIDGE_URL";

/// Environment variable overriding the tracker username.
pub const ENV_TRACKER_USER: &str = "RELBRIDGE_USER";

/// Environment variable overriding the tracker password.
pub const ENV_TRACKER_PASSWORD: &str = "RELBRIDGE_PASSWORD";

/// Relative path of the tracker's remote procedure endpoint.
pub const DEFAULT_SERVICE_PATH: &str = "rpc/json-rpc/jirasoapservice-v2";

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "relbridge.toml";
