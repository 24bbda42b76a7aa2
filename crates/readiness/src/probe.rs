//! Liveness probe boundary.

use std::sync::Arc;

use vigil_health::{Health, HealthMap};

use crate::error::{Error, Result};
use crate::listener::ReadinessListener;

/// Detail key under which the per-checker aggregate is nested.
pub const LIVENESS_DETAIL_KEY: &str = "middleware";

/// Repeatable liveness query over the liveness-eligible checkers.
///
/// Each query re-runs the checkers on the calling task and produces an
/// independent aggregate; nothing is cached between queries. Queries are
/// refused until the readiness sequence has finished.
pub struct LivenessProbe {
    listener: Arc<ReadinessListener>,
}

impl LivenessProbe {
    /// Creates a probe over the given listener.
    #[must_use]
    pub const fn new(listener: Arc<ReadinessListener>) -> Self {
        Self { listener }
    }

    /// Runs the liveness-eligible checkers and aggregates their results.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadinessNotFinished`] when invoked before the
    /// readiness sequence completed. This is a caller sequencing error,
    /// deliberately distinct from a down health result.
    pub async fn check(&self) -> Result<Health> {
        if !self.listener.is_readiness_check_finished() {
            return Err(Error::ReadinessNotFinished);
        }

        let mut details = HealthMap::new();
        let all_up = self
            .listener
            .checker_processor()
            .liveness_health_check(&mut details)
            .await;

        let builder = if all_up { Health::up() } else { Health::down() };
        Ok(builder
            .with_detail(LIVENESS_DETAIL_KEY, serde_json::to_value(&details)?)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::event::{ContextId, StartupEvent};
    use crate::test_support::StaticChecker;
    use vigil_health::Status;

    #[tokio::test]
    async fn test_probe_refuses_before_readiness_finishes() {
        let listener = Arc::new(
            ReadinessListener::builder(ContextId::new())
                .with_config(Arc::new(MapConfig::new()))
                .build(),
        );
        let probe = LivenessProbe::new(listener);

        assert!(matches!(probe.check().await, Err(Error::ReadinessNotFinished)));
    }

    #[tokio::test]
    async fn test_probe_aggregates_under_detail_key() {
        let context = ContextId::new();
        let listener = Arc::new(
            ReadinessListener::builder(context)
                .with_checker(Arc::new(StaticChecker::up("database")))
                .with_config(Arc::new(MapConfig::new()))
                .build(),
        );
        listener.on_startup_complete(&StartupEvent::new(context)).await;

        let probe = LivenessProbe::new(listener);
        let health = probe.check().await.unwrap();

        assert_eq!(health.status(), Status::Up);
        let nested = &health.details()[LIVENESS_DETAIL_KEY];
        assert_eq!(nested["database"]["status"], serde_json::json!("Up"));
    }

    #[tokio::test]
    async fn test_probe_reports_down_checker() {
        let context = ContextId::new();
        let listener = Arc::new(
            ReadinessListener::builder(context)
                .with_checker(Arc::new(StaticChecker::down("cache")))
                .with_config(Arc::new(MapConfig::new()))
                .build(),
        );
        listener.on_startup_complete(&StartupEvent::new(context)).await;

        let probe = LivenessProbe::new(listener);
        let health = probe.check().await.unwrap();

        assert_eq!(health.status(), Status::Down);
    }
}
