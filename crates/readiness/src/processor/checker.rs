//! Processor for infrastructure-level component checkers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info};
use vigil_health::{HealthChecker, HealthMap};

use super::health_or_error;

/// Runs registered component checkers for the readiness and liveness phases.
pub struct CheckerProcessor {
    checkers: Vec<Arc<dyn HealthChecker>>,
    initialized: AtomicBool,
}

impl CheckerProcessor {
    /// Creates a processor over an explicit checker registry.
    #[must_use]
    pub fn new(checkers: Vec<Arc<dyn HealthChecker>>) -> Self {
        Self {
            checkers,
            initialized: AtomicBool::new(false),
        }
    }

    /// Prepares the registry. Idempotent; an empty registry is not an error.
    pub fn init(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!("checker processor initialized with {} checkers", self.checkers.len());
    }

    /// Runs every registered checker for the readiness phase.
    ///
    /// All results are written into `details`; a failing checker never
    /// aborts the loop. Returns the AND of all individual statuses.
    pub async fn readiness_health_check(&self, details: &mut HealthMap) -> bool {
        let mut all_up = true;

        for checker in &self.checkers {
            let health = health_or_error(checker.check().await);
            if health.is_up() {
                info!("readiness check of {} passed", checker.name());
            } else {
                error!("readiness check of {} failed: {:?}", checker.name(), health.details());
                all_up = false;
            }
            details.insert(checker.name().to_string(), health);
        }

        all_up
    }

    /// Runs every liveness-eligible checker for the liveness phase.
    ///
    /// Safe to invoke concurrently and repeatedly; each invocation re-runs
    /// the checkers and produces an independent aggregate.
    pub async fn liveness_health_check(&self, details: &mut HealthMap) -> bool {
        let mut all_up = true;

        for checker in &self.checkers {
            if !checker.supports_liveness() {
                continue;
            }
            let health = health_or_error(checker.check_liveness().await);
            if !health.is_up() {
                error!("liveness check of {} failed: {:?}", checker.name(), health.details());
                all_up = false;
            }
            details.insert(checker.name().to_string(), health);
        }

        all_up
    }
}
