//! Configuration lookup for skip flags.

use std::collections::HashMap;

/// Property key disabling the entire readiness evaluation.
pub const SKIP_ALL_KEY: &str = "health.check.skip.all";

/// Property key disabling the component-checker phase.
pub const SKIP_COMPONENT_KEY: &str = "health.check.skip.component";

/// Property key disabling the indicator phase.
pub const SKIP_INDICATOR_KEY: &str = "health.check.skip.indicator";

/// Source of configuration properties consumed by the readiness listener.
pub trait ConfigSource: Send + Sync {
    /// Look up a property by exact key.
    fn get(&self, key: &str) -> Option<String>;

    /// Resolve a boolean flag: present and case-insensitively `"true"`.
    fn flag(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }
}

/// Config source backed by process environment variables.
///
/// Dotted property keys are translated to `UPPER_SNAKE` variable names, so
/// `health.check.skip.all` resolves from `HEALTH_CHECK_SKIP_ALL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl EnvConfig {
    /// Creates a new environment-backed config source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn env_key(key: &str) -> String {
        key.chars()
            .map(|c| match c {
                '.' | '-' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect()
    }
}

impl ConfigSource for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(Self::env_key(key)).ok()
    }
}

/// Static in-memory config source.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    properties: HashMap<String, String>,
}

impl MapConfig {
    /// Creates an empty config source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing any previous value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl ConfigSource for MapConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }
}
