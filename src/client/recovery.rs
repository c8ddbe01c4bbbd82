// Error recovery panel state
//
// Holds the error currently shown to the user along with the manual retry
// counter and the demo-mode switch.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::{ClientError, ErrorKind};

/// Manual retries allowed per error
pub const MAX_RETRY_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_error: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub resolved: bool,
    pub retry_attempts: u32,
    pub max_retry_attempts: u32,
}

impl ErrorRecord {
    pub fn new(kind: ErrorKind, original_error: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: kind.message().to_string(),
            original_error,
            timestamp: Utc::now(),
            resolved: false,
            retry_attempts: 0,
            max_retry_attempts: MAX_RETRY_ATTEMPTS,
        }
    }

    pub fn from_client_error(err: &ClientError) -> Self {
        Self::new(err.kind(), Some(err.to_string()))
    }

    pub fn can_retry(&self) -> bool {
        self.retry_attempts < self.max_retry_attempts
    }
}

#[derive(Debug, Default)]
pub struct RecoveryState {
    current: Option<ErrorRecord>,
    demo_mode: bool,
    retrying: bool,
}

impl RecoveryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&ErrorRecord> {
        self.current.as_ref()
    }

    pub fn is_demo_mode(&self) -> bool {
        self.demo_mode
    }

    pub fn is_retrying(&self) -> bool {
        self.retrying
    }

    /// Record a new failure, replacing whatever was shown before
    pub fn handle_error(&mut self, err: &ClientError) -> &ErrorRecord {
        let record = ErrorRecord::from_client_error(err);
        warn!(kind = ?record.kind, "Request failed: {}", err);
        self.retrying = false;
        self.current.insert(record)
    }

    /// Begin a manual retry. Returns false when there is nothing to retry,
    /// a retry is already running, or the attempts are used up.
    pub fn begin_retry(&mut self) -> bool {
        match &self.current {
            Some(record) if record.can_retry() && !self.retrying => {
                self.retrying = true;
                true
            }
            _ => false,
        }
    }

    pub fn retry_succeeded(&mut self) {
        self.retrying = false;
        if let Some(mut record) = self.current.take() {
            record.resolved = true;
            info!(id = %record.id, "Recovered after {} retries", record.retry_attempts + 1);
        }
    }

    /// Count a failed retry against the current error, refreshing its
    /// classification from the latest failure.
    pub fn retry_failed(&mut self, err: &ClientError) {
        self.retrying = false;
        match self.current.as_mut() {
            Some(record) => {
                record.retry_attempts += 1;
                record.kind = err.kind();
                record.message = record.kind.message().to_string();
                record.original_error = Some(err.to_string());
                warn!(
                    "Retry {}/{} failed: {}",
                    record.retry_attempts, record.max_retry_attempts, err
                );
            }
            None => {
                self.handle_error(err);
            }
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
        self.retrying = false;
    }

    pub fn switch_to_demo(&mut self) {
        info!("Switching to demo mode");
        self.demo_mode = true;
        self.dismiss();
    }

    pub fn exit_demo(&mut self) {
        self.demo_mode = false;
    }
}

/// Plain-text rendering of the recovery panel
pub fn render_panel(record: &ErrorRecord) -> String {
    let mut out = format!(
        "{} {}\n{}\n",
        record.kind.icon(),
        record.kind.title(),
        record.message
    );
    if let Some(original) = &record.original_error {
        out.push_str(&format!("Technical details: {}\n", original));
    }

    out.push_str("\n💡 Suggested Actions:\n");
    for suggestion in record.kind.suggestions() {
        out.push_str(&format!("  • {}\n", suggestion));
    }

    let retry = if record.can_retry() {
        format!(
            "/retry 🔄 Retry ({}/{})",
            record.retry_attempts, record.max_retry_attempts
        )
    } else {
        format!(
            "🔄 Retries exhausted ({}/{})",
            record.retry_attempts, record.max_retry_attempts
        )
    };
    out.push_str(&format!(
        "\n{}   /demo 🎬 Switch to Demo Mode   /dismiss ✕ Dismiss\n",
        retry
    ));
    out.push_str(&format!(
        "Occurred at: {}",
        record
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error() -> ClientError {
        ClientError::Status {
            url: "http://localhost/api/enhanced-chat".to_string(),
            status: 502,
            body: "bad gateway".to_string(),
        }
    }

    fn timeout() -> ClientError {
        ClientError::Timeout {
            url: "http://localhost/api/enhanced-chat".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_handle_error_creates_record() {
        let mut state = RecoveryState::new();
        let record = state.handle_error(&server_error());
        assert_eq!(record.kind, ErrorKind::Server);
        assert_eq!(record.retry_attempts, 0);
        assert_eq!(record.max_retry_attempts, MAX_RETRY_ATTEMPTS);
        assert!(record.original_error.as_deref().unwrap().contains("502"));
    }

    #[test]
    fn test_retry_limit() {
        let mut state = RecoveryState::new();
        assert!(!state.begin_retry());

        state.handle_error(&server_error());
        for attempt in 1..=MAX_RETRY_ATTEMPTS {
            assert!(state.begin_retry());
            // A second retry cannot start while one is running
            assert!(!state.begin_retry());
            state.retry_failed(&timeout());
            assert_eq!(state.current().unwrap().retry_attempts, attempt);
        }

        assert!(!state.begin_retry());
        let record = state.current().unwrap();
        assert_eq!(record.kind, ErrorKind::Timeout);
        assert!(!record.can_retry());
    }

    #[test]
    fn test_retry_success_clears_error() {
        let mut state = RecoveryState::new();
        state.handle_error(&server_error());
        assert!(state.begin_retry());
        state.retry_succeeded();
        assert!(state.current().is_none());
        assert!(!state.is_retrying());
    }

    #[test]
    fn test_dismiss_and_demo_mode() {
        let mut state = RecoveryState::new();
        state.handle_error(&server_error());
        state.dismiss();
        assert!(state.current().is_none());
        assert!(!state.is_demo_mode());

        state.handle_error(&timeout());
        state.switch_to_demo();
        assert!(state.current().is_none());
        assert!(state.is_demo_mode());

        state.exit_demo();
        assert!(!state.is_demo_mode());
    }

    #[test]
    fn test_render_panel() {
        let mut record = ErrorRecord::from_client_error(&server_error());
        let text = render_panel(&record);
        assert!(text.starts_with("🖥️ Server Error\nThe demo server is experiencing issues."));
        assert!(text.contains("  • Check server logs for details\n"));
        assert!(text.contains("/retry 🔄 Retry (0/3)"));
        assert!(text.contains("Occurred at: "));

        record.retry_attempts = 3;
        assert!(render_panel(&record).contains("Retries exhausted (3/3)"));
    }
}
