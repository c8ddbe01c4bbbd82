// Project-wide constants
//
// Default values shared by the config layer and the CLI. Import via
// `use crate::config::constants::*;`.

/// Default demo API base URL (the local development server).
pub const DEFAULT_API_URL: &str = "http://localhost:5001";

/// Chat requests are abandoned after this long.
pub const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 30;

/// Per-service health check timeout.
pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 10;

/// Health polling interval.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Persisted state is written this long after the last change.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Directory under the home directory holding config and state.
pub const APP_DIR: &str = ".habu-assistant";

pub const ENV_API_URL: &str = "HABU_API_URL";
pub const ENV_API_KEY: &str = "HABU_API_KEY";
pub const ENV_STATE_DIR: &str = "HABU_STATE_DIR";
