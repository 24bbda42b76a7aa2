//! Processor for post-readiness callbacks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error};
use vigil_health::{HealthMap, ReadinessCallback};

use super::health_or_error;

/// Runs registered callbacks after both readiness phases complete.
///
/// Callbacks run regardless of the readiness outcome so that
/// failure-handling hooks can react; each receives the combined
/// checker-and-indicator result.
pub struct CallbackProcessor {
    callbacks: Vec<Arc<dyn ReadinessCallback>>,
    initialized: AtomicBool,
}

impl CallbackProcessor {
    /// Creates a processor over an explicit callback registry.
    #[must_use]
    pub fn new(callbacks: Vec<Arc<dyn ReadinessCallback>>) -> Self {
        Self {
            callbacks,
            initialized: AtomicBool::new(false),
        }
    }

    /// Prepares the registry. Idempotent; an empty registry is not an error.
    pub fn init(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!(
            "callback processor initialized with {} callbacks",
            self.callbacks.len()
        );
    }

    /// Invokes every registered callback with the combined readiness outcome.
    ///
    /// Same isolation contract as the check phases: one callback's failure
    /// is recorded as down and never aborts the others.
    pub async fn after_readiness_check_callback(
        &self,
        readiness_ok: bool,
        details: &mut HealthMap,
    ) -> bool {
        let mut all_up = true;

        for callback in &self.callbacks {
            let health = health_or_error(callback.on_readiness_complete(readiness_ok).await);
            if !health.is_up() {
                error!(
                    "readiness callback {} failed: {:?}",
                    callback.name(),
                    health.details()
                );
                all_up = false;
            }
            details.insert(callback.name().to_string(), health);
        }

        all_up
    }
}
