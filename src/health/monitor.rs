// Periodic health poller
//
// Checks every configured service on a fixed interval and keeps only the
// most recent snapshot.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::checks::{check_all, HealthProbe, HealthSnapshot, ServiceEndpoint};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct HealthMonitor {
    probe: Arc<dyn HealthProbe>,
    endpoints: Arc<Vec<ServiceEndpoint>>,
    interval: Duration,
    latest: Arc<RwLock<Option<HealthSnapshot>>>,
}

impl HealthMonitor {
    pub fn new(probe: Arc<dyn HealthProbe>, endpoints: Vec<ServiceEndpoint>) -> Self {
        Self {
            probe,
            endpoints: Arc::new(endpoints),
            interval: DEFAULT_POLL_INTERVAL,
            latest: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn endpoints(&self) -> &[ServiceEndpoint] {
        &self.endpoints
    }

    /// Most recent snapshot, if any check has finished
    pub async fn latest(&self) -> Option<HealthSnapshot> {
        self.latest.read().await.clone()
    }

    /// Run one round of checks and store the result
    pub async fn check_now(&self) -> HealthSnapshot {
        let snapshot = check_all(self.probe.as_ref(), &self.endpoints).await;
        tracing::debug!(
            overall = ?snapshot.overall,
            services = snapshot.services.len(),
            "Health snapshot updated"
        );
        *self.latest.write().await = Some(snapshot.clone());
        snapshot
    }

    /// Check immediately, then every interval until `cancel` fires
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Health monitor started");
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    // A round in flight is abandoned on cancel
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = self.check_now() => {}
                    }
                }
            }
        }
        tracing::info!("Health monitor stopped");
    }

    pub fn spawn(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let monitor = self.clone();
        tokio::spawn(async move { monitor.run(cancel).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::checks::{ServiceCheck, ServiceStatus};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProbe {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HealthProbe for CountingProbe {
        async fn check(&self, endpoint: &ServiceEndpoint) -> ServiceCheck {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            ServiceCheck {
                name: endpoint.name.clone(),
                status: if n == 0 {
                    ServiceStatus::Down
                } else {
                    ServiceStatus::Healthy
                },
                url: endpoint.url.clone(),
                response_time_ms: Some(1),
                last_check: Utc::now(),
                details: serde_json::json!({}),
            }
        }
    }

    fn monitor(probe: Arc<CountingProbe>) -> HealthMonitor {
        HealthMonitor::new(
            probe,
            vec![ServiceEndpoint::new("Demo API", "http://localhost", "/api/health")],
        )
        .with_interval(Duration::from_secs(30))
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_immediately_then_on_interval() {
        let probe = Arc::new(CountingProbe {
            calls: AtomicUsize::new(0),
        });
        let monitor = monitor(probe.clone());
        assert!(monitor.latest().await.is_none());

        let cancel = CancellationToken::new();
        let handle = monitor.spawn(cancel.clone());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
        let first = monitor.latest().await.unwrap();
        assert_eq!(first.services[0].status, ServiceStatus::Down);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(probe.calls.load(Ordering::SeqCst), 2);
        let second = monitor.latest().await.unwrap();
        assert_eq!(second.services[0].status, ServiceStatus::Healthy);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_on_cancel() {
        let probe = Arc::new(CountingProbe {
            calls: AtomicUsize::new(0),
        });
        let monitor = monitor(probe.clone());
        let cancel = CancellationToken::new();
        let handle = monitor.spawn(cancel.clone());

        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();
        handle.await.unwrap();

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }
}
