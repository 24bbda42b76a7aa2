//! Processor for application-level health indicators.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info};
use vigil_health::{HealthIndicator, HealthMap};

use super::health_or_error;

/// Runs registered indicators for the readiness phase.
///
/// Indicators have no liveness phase; they are evaluated exactly once,
/// during the readiness sequence.
pub struct IndicatorProcessor {
    indicators: Vec<Arc<dyn HealthIndicator>>,
    initialized: AtomicBool,
}

impl IndicatorProcessor {
    /// Creates a processor over an explicit indicator registry.
    #[must_use]
    pub fn new(indicators: Vec<Arc<dyn HealthIndicator>>) -> Self {
        Self {
            indicators,
            initialized: AtomicBool::new(false),
        }
    }

    /// Prepares the registry. Idempotent; an empty registry is not an error.
    pub fn init(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!(
            "indicator processor initialized with {} indicators",
            self.indicators.len()
        );
    }

    /// Runs every registered indicator for the readiness phase.
    ///
    /// Same isolation contract as the checker processor: one indicator's
    /// failure is recorded and never propagated.
    pub async fn readiness_health_check(&self, details: &mut HealthMap) -> bool {
        let mut all_up = true;

        for indicator in &self.indicators {
            let health = health_or_error(indicator.check().await);
            if health.is_up() {
                info!("readiness check of indicator {} passed", indicator.name());
            } else {
                error!(
                    "readiness check of indicator {} failed: {:?}",
                    indicator.name(),
                    health.details()
                );
                all_up = false;
            }
            details.insert(indicator.name().to_string(), health);
        }

        all_up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticIndicator;
    use vigil_health::Status;

    #[tokio::test]
    async fn test_down_indicator_fails_phase_but_records_all() {
        let processor = IndicatorProcessor::new(vec![
            Arc::new(StaticIndicator::up("disk-space")),
            Arc::new(StaticIndicator::down("thread-pool")),
        ]);
        let mut details = HealthMap::new();

        assert!(!processor.readiness_health_check(&mut details).await);
        assert_eq!(details.len(), 2);
        assert_eq!(details["disk-space"].status(), Status::Up);
        assert_eq!(details["thread-pool"].status(), Status::Down);
    }

    #[tokio::test]
    async fn test_failing_indicator_is_recorded_as_down() {
        let processor = IndicatorProcessor::new(vec![Arc::new(StaticIndicator::failing(
            "disk-space",
            "statfs failed",
        ))]);
        let mut details = HealthMap::new();

        assert!(!processor.readiness_health_check(&mut details).await);
        assert_eq!(
            details["disk-space"].details()["error"],
            serde_json::Value::from("statfs failed")
        );
    }

    #[tokio::test]
    async fn test_empty_registry_is_vacuous_success() {
        let processor = IndicatorProcessor::new(Vec::new());
        let mut details = HealthMap::new();

        assert!(processor.readiness_health_check(&mut details).await);
        assert!(details.is_empty());
    }
}
