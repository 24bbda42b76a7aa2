//! The readiness listener: a startup-gated orchestration state machine.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};
use vigil_health::{HealthChecker, HealthIndicator, HealthMap, ReadinessCallback};

use crate::config::{
    ConfigSource, EnvConfig, SKIP_ALL_KEY, SKIP_COMPONENT_KEY, SKIP_INDICATOR_KEY,
};
use crate::event::{ContextId, StartupEvent};
use crate::processor::{CallbackProcessor, CheckerProcessor, IndicatorProcessor};

/// States of the readiness sequence. Terminal state is [`Finished`](Self::Finished).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ListenerState {
    /// No matching startup event has been observed yet.
    NotStarted = 0,
    /// Processors are being initialized.
    Initializing = 1,
    /// Checker and indicator phases are running.
    Checking = 2,
    /// Post-readiness callbacks are running.
    Callback = 3,
    /// The sequence completed; the record is immutable from here on.
    Finished = 4,
}

impl ListenerState {
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Initializing,
            2 => Self::Checking,
            3 => Self::Callback,
            4 => Self::Finished,
            _ => Self::NotStarted,
        }
    }
}

/// Per-phase outcome of the readiness sequence.
///
/// Defaults are vacuously healthy: skipped or not-yet-run phases report
/// `true` with empty details.
#[derive(Debug)]
struct ReadinessRecord {
    checker_status: bool,
    checker_details: HealthMap,
    indicator_status: bool,
    indicator_details: HealthMap,
    callback_status: bool,
    callback_details: HealthMap,
}

impl Default for ReadinessRecord {
    fn default() -> Self {
        Self {
            checker_status: true,
            checker_details: HealthMap::new(),
            indicator_status: true,
            indicator_details: HealthMap::new(),
            callback_status: true,
            callback_details: HealthMap::new(),
        }
    }
}

/// Orchestrates the one-shot readiness sequence and exposes its outcome.
///
/// The listener reacts to the startup-complete event of its own context,
/// initializes the three processors, runs the skip-flag-gated check phases
/// and the callbacks, then flips the terminal finished flag. The flag is
/// stored with `Release` ordering after the record's final write and loaded
/// with `Acquire`, so any reader observing `true` also observes the
/// completed record.
pub struct ReadinessListener {
    context: ContextId,
    checker_processor: CheckerProcessor,
    indicator_processor: IndicatorProcessor,
    callback_processor: CallbackProcessor,
    config: Arc<dyn ConfigSource>,
    state: AtomicU8,
    record: RwLock<ReadinessRecord>,
    finished: AtomicBool,
}

impl ReadinessListener {
    /// Starts building a listener for the given context.
    #[must_use]
    pub fn builder(context: ContextId) -> ReadinessListenerBuilder {
        ReadinessListenerBuilder::new(context)
    }

    /// Handles a startup-complete event.
    ///
    /// Events originating from an unrelated context are ignored, as is
    /// re-delivery once the sequence has left [`ListenerState::NotStarted`].
    /// A matching first delivery runs the whole readiness sequence to
    /// completion on the calling task.
    pub async fn on_startup_complete(&self, event: &StartupEvent) {
        if event.context() != self.context {
            debug!(
                "ignoring startup event for unrelated context {}",
                event.context()
            );
            return;
        }

        // Only the first matching delivery may start the sequence.
        if self
            .state
            .compare_exchange(
                ListenerState::NotStarted as u8,
                ListenerState::Initializing as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_err()
        {
            debug!("ignoring repeated startup event for context {}", self.context);
            return;
        }

        self.checker_processor.init();
        self.indicator_processor.init();
        self.callback_processor.init();

        self.readiness_health_check().await;
    }

    /// Runs the skip-flag-gated check phases and the callbacks, then
    /// publishes the record and the terminal flag.
    async fn readiness_health_check(&self) {
        self.state
            .store(ListenerState::Checking as u8, Ordering::SeqCst);

        let mut checker_status = true;
        let mut checker_details = HealthMap::new();
        let mut indicator_status = true;
        let mut indicator_details = HealthMap::new();

        if self.skip_all_check() {
            warn!("skipping all readiness health checks");
        } else {
            if self.skip_component_check() {
                warn!("skipping component checker health checks");
            } else {
                checker_status = self
                    .checker_processor
                    .readiness_health_check(&mut checker_details)
                    .await;
            }
            if self.skip_indicator_check() {
                warn!("skipping indicator health checks");
            } else {
                indicator_status = self
                    .indicator_processor
                    .readiness_health_check(&mut indicator_details)
                    .await;
            }
        }

        self.state
            .store(ListenerState::Callback as u8, Ordering::SeqCst);

        let mut callback_details = HealthMap::new();
        let callback_status = self
            .callback_processor
            .after_readiness_check_callback(checker_status && indicator_status, &mut callback_details)
            .await;

        {
            let mut record = self.record.write();
            record.checker_status = checker_status;
            record.checker_details = checker_details;
            record.indicator_status = indicator_status;
            record.indicator_details = indicator_details;
            record.callback_status = callback_status;
            record.callback_details = callback_details;
        }

        self.state
            .store(ListenerState::Finished as u8, Ordering::SeqCst);
        // Publish fence: readers observing the flag also observe the record.
        self.finished.store(true, Ordering::Release);

        if checker_status && indicator_status && callback_status {
            info!("readiness check result: success");
        } else {
            error!("readiness check result: fail");
        }
    }

    /// Whether the entire readiness evaluation is disabled by config.
    #[must_use]
    pub fn skip_all_check(&self) -> bool {
        self.config.flag(SKIP_ALL_KEY)
    }

    /// Whether the component-checker phase is disabled by config.
    #[must_use]
    pub fn skip_component_check(&self) -> bool {
        self.config.flag(SKIP_COMPONENT_KEY)
    }

    /// Whether the indicator phase is disabled by config.
    #[must_use]
    pub fn skip_indicator_check(&self) -> bool {
        self.config.flag(SKIP_INDICATOR_KEY)
    }

    /// Current state of the readiness sequence.
    #[must_use]
    pub fn state(&self) -> ListenerState {
        ListenerState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Whether the readiness sequence has finished. Monotonic.
    #[must_use]
    pub fn is_readiness_check_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Overall outcome of the checker phase.
    #[must_use]
    pub fn checker_status(&self) -> bool {
        self.record.read().checker_status
    }

    /// Per-checker results of the checker phase.
    #[must_use]
    pub fn checker_details(&self) -> HealthMap {
        self.record.read().checker_details.clone()
    }

    /// Overall outcome of the indicator phase.
    #[must_use]
    pub fn indicator_status(&self) -> bool {
        self.record.read().indicator_status
    }

    /// Per-indicator results of the indicator phase.
    #[must_use]
    pub fn indicator_details(&self) -> HealthMap {
        self.record.read().indicator_details.clone()
    }

    /// Overall outcome of the callback phase.
    #[must_use]
    pub fn callback_status(&self) -> bool {
        self.record.read().callback_status
    }

    /// Per-callback results of the callback phase.
    #[must_use]
    pub fn callback_details(&self) -> HealthMap {
        self.record.read().callback_details.clone()
    }

    pub(crate) const fn checker_processor(&self) -> &CheckerProcessor {
        &self.checker_processor
    }
}

/// Builder collecting the registries and collaborators of a listener.
pub struct ReadinessListenerBuilder {
    context: ContextId,
    checkers: Vec<Arc<dyn HealthChecker>>,
    indicators: Vec<Arc<dyn HealthIndicator>>,
    callbacks: Vec<Arc<dyn ReadinessCallback>>,
    config: Arc<dyn ConfigSource>,
}

impl ReadinessListenerBuilder {
    fn new(context: ContextId) -> Self {
        Self {
            context,
            checkers: Vec::new(),
            indicators: Vec::new(),
            callbacks: Vec::new(),
            config: Arc::new(EnvConfig::new()),
        }
    }

    /// Registers a component checker.
    #[must_use]
    pub fn with_checker(mut self, checker: Arc<dyn HealthChecker>) -> Self {
        self.checkers.push(checker);
        self
    }

    /// Registers an indicator.
    #[must_use]
    pub fn with_indicator(mut self, indicator: Arc<dyn HealthIndicator>) -> Self {
        self.indicators.push(indicator);
        self
    }

    /// Registers a post-readiness callback.
    #[must_use]
    pub fn with_callback(mut self, callback: Arc<dyn ReadinessCallback>) -> Self {
        self.callbacks.push(callback);
        self
    }

    /// Overrides the config source (defaults to process environment).
    #[must_use]
    pub fn with_config(mut self, config: Arc<dyn ConfigSource>) -> Self {
        self.config = config;
        self
    }

    /// Builds the listener.
    #[must_use]
    pub fn build(self) -> ReadinessListener {
        ReadinessListener {
            context: self.context,
            checker_processor: CheckerProcessor::new(self.checkers),
            indicator_processor: IndicatorProcessor::new(self.indicators),
            callback_processor: CallbackProcessor::new(self.callbacks),
            config: self.config,
            state: AtomicU8::new(ListenerState::NotStarted as u8),
            record: RwLock::new(ReadinessRecord::default()),
            finished: AtomicBool::new(false),
        }
    }
}
