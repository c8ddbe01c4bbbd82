// Service health
//
// One-shot checks across the configured services, the demo status
// indicators and a background poller that keeps the latest snapshot.

pub mod checks;
pub mod indicators;
pub mod monitor;

pub use checks::{
    check_all, default_services, HealthProbe, HealthSnapshot, HttpProbe, OverallHealth,
    ServiceCheck, ServiceEndpoint, ServiceStatus,
};
pub use indicators::{Readiness, StatusIndicators};
pub use monitor::{HealthMonitor, DEFAULT_POLL_INTERVAL};
