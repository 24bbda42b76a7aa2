//! Abstract interfaces and data model for staged health checks.
//!
//! Three kinds of pluggable unit participate in a readiness sequence:
//! - [`HealthChecker`]: infrastructure-level probes, optionally eligible for
//!   repeated liveness evaluation after readiness completes.
//! - [`HealthIndicator`]: application-level probes, readiness-only.
//! - [`ReadinessCallback`]: side-effecting hooks that observe the combined
//!   readiness outcome after both probe phases complete.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod health;

pub use health::{Health, HealthBuilder, HealthMap, Status};

use async_trait::async_trait;

/// The error type pluggable units may surface from a check.
///
/// An `Err` is converted at the processor boundary into a down [`Health`]
/// carrying the error text; it never aborts evaluation of sibling units.
pub type CheckError = Box<dyn std::error::Error + Send + Sync>;

/// Trait for infrastructure-level health checkers.
///
/// Checkers run once during the readiness sequence and, when
/// [`supports_liveness`](Self::supports_liveness) is true, repeatedly
/// thereafter on every liveness query.
#[async_trait]
pub trait HealthChecker
where
    Self: Send + Sync + 'static,
{
    /// Unique name of the checker, used as the aggregate key.
    fn name(&self) -> &str;

    /// Run the readiness-phase probe.
    async fn check(&self) -> Result<Health, CheckError>;

    /// Whether this checker participates in the liveness phase.
    fn supports_liveness(&self) -> bool {
        true
    }

    /// Run the liveness-phase probe. Defaults to the readiness probe.
    async fn check_liveness(&self) -> Result<Health, CheckError> {
        self.check().await
    }
}

/// Trait for application-level health indicators. Readiness-only.
#[async_trait]
pub trait HealthIndicator
where
    Self: Send + Sync + 'static,
{
    /// Unique name of the indicator, used as the aggregate key.
    fn name(&self) -> &str;

    /// Run the readiness-phase probe.
    async fn check(&self) -> Result<Health, CheckError>;
}

/// Trait for post-readiness hooks.
///
/// Callbacks always run after both probe phases, even when readiness
/// failed, so that failure-handling hooks can react.
#[async_trait]
pub trait ReadinessCallback
where
    Self: Send + Sync + 'static,
{
    /// Unique name of the callback, used as the aggregate key.
    fn name(&self) -> &str;

    /// Observe the combined checker-and-indicator outcome.
    async fn on_readiness_complete(&self, readiness_ok: bool) -> Result<Health, CheckError>;
}
