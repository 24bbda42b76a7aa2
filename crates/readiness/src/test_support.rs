//! Fixed-outcome pluggable units for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use vigil_health::{CheckError, Health, HealthChecker, HealthIndicator, ReadinessCallback};

enum Outcome {
    Up,
    Down,
    Fail(String),
}

impl Outcome {
    fn evaluate(&self) -> Result<Health, CheckError> {
        match self {
            Self::Up => Ok(Health::up().build()),
            Self::Down => Ok(Health::down().build()),
            Self::Fail(message) => Err(message.clone().into()),
        }
    }
}

/// Checker with a fixed outcome.
pub struct StaticChecker {
    name: String,
    outcome: Outcome,
    liveness: bool,
}

impl StaticChecker {
    pub fn up(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Outcome::Up,
            liveness: true,
        }
    }

    pub fn down(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Outcome::Down,
            liveness: true,
        }
    }

    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Outcome::Fail(message.to_string()),
            liveness: true,
        }
    }

    pub fn without_liveness(mut self) -> Self {
        self.liveness = false;
        self
    }
}

#[async_trait]
impl HealthChecker for StaticChecker {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> Result<Health, CheckError> {
        self.outcome.evaluate()
    }

    fn supports_liveness(&self) -> bool {
        self.liveness
    }
}

/// Indicator with a fixed outcome.
pub struct StaticIndicator {
    name: String,
    outcome: Outcome,
}

impl StaticIndicator {
    pub fn up(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Outcome::Up,
        }
    }

    pub fn down(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Outcome::Down,
        }
    }

    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Outcome::Fail(message.to_string()),
        }
    }
}

#[async_trait]
impl HealthIndicator for StaticIndicator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> Result<Health, CheckError> {
        self.outcome.evaluate()
    }
}

/// Callback that records the outcome it observed.
pub struct RecordingCallback {
    name: String,
    failure: Option<String>,
    observed: Mutex<Option<bool>>,
}

impl RecordingCallback {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            failure: None,
            observed: Mutex::new(None),
        }
    }

    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            failure: Some(message.to_string()),
            observed: Mutex::new(None),
        }
    }

    pub fn observed(&self) -> Option<bool> {
        *self.observed.lock().unwrap()
    }
}

#[async_trait]
impl ReadinessCallback for RecordingCallback {
    fn name(&self) -> &str {
        &self.name
    }

    async fn on_readiness_complete(&self, readiness_ok: bool) -> Result<Health, CheckError> {
        *self.observed.lock().unwrap() = Some(readiness_ok);
        match &self.failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(Health::up().build()),
        }
    }
}
