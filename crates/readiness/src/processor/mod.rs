//! Phase processors for the readiness sequence.
//!
//! Each processor owns an explicit ordered registry of pluggable units and
//! evaluates them for one phase. A unit that fails is recorded as down with
//! the failure text and never aborts evaluation of its siblings; the phase
//! result is the logical AND of all individual statuses, vacuously true for
//! an empty registry.

mod callback;
mod checker;
mod indicator;

pub use callback::CallbackProcessor;
pub use checker::CheckerProcessor;
pub use indicator::IndicatorProcessor;

use vigil_health::{CheckError, Health};

/// Converts a unit's outcome into a recordable health entry.
///
/// An `Err` becomes a down entry carrying the error text, so callers of the
/// aggregate cannot distinguish a failed unit from one that reported down.
pub(crate) fn health_or_error(result: Result<Health, CheckError>) -> Health {
    match result {
        Ok(health) => health,
        Err(error) => Health::down().with_detail("error", error.to_string()).build(),
    }
}
