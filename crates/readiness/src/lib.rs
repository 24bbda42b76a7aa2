//! Staged readiness/liveness health-check orchestration.
//!
//! The readiness sequence runs exactly once, triggered by a
//! startup-complete event matching the listener's context:
//!
//! 1. Initialize the checker, indicator, and callback processors.
//! 2. Run the component-checker and indicator phases, each gated by its
//!    own skip flag (or all skipped at once); the phases never
//!    short-circuit each other, and one unit's failure never aborts its
//!    siblings.
//! 3. Run the post-readiness callbacks with the combined outcome.
//! 4. Publish the per-phase record and flip the terminal finished flag.
//!
//! Afterwards, [`LivenessProbe`] answers repeatable liveness queries over
//! the liveness-eligible checkers; querying earlier is a sequencing error.
//!
//! ```rust,ignore
//! let context = ContextId::new();
//! let listener = Arc::new(
//!     ReadinessListener::builder(context)
//!         .with_checker(Arc::new(DatabaseChecker::new(pool)))
//!         .build(),
//! );
//!
//! listener.on_startup_complete(&StartupEvent::new(context)).await;
//!
//! let probe = LivenessProbe::new(listener.clone());
//! let health = probe.check().await?;
//! ```
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod config;
mod error;
mod event;
mod listener;
mod probe;
mod processor;

#[cfg(test)]
mod test_support;

pub use config::{
    ConfigSource, EnvConfig, MapConfig, SKIP_ALL_KEY, SKIP_COMPONENT_KEY, SKIP_INDICATOR_KEY,
};
pub use error::{Error, Result};
pub use event::{ContextId, StartupEvent, listen};
pub use listener::{ListenerState, ReadinessListener, ReadinessListenerBuilder};
pub use probe::{LIVENESS_DETAIL_KEY, LivenessProbe};
pub use processor::{CallbackProcessor, CheckerProcessor, IndicatorProcessor};
