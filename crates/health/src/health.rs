//! Health status and detail types.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Binary health status. Anything not proven up is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The component is operational.
    Up,
    /// The component is not operational (or its state is unknown).
    Down,
}

/// A single check result: a status plus named diagnostic detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    status: Status,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    details: BTreeMap<String, Value>,
}

/// Aggregate of check results keyed by unit name.
///
/// Produced fresh per phase invocation; last write wins on a name
/// collision (names are expected unique per registration).
pub type HealthMap = HashMap<String, Health>;

impl Health {
    /// Start building an up result.
    #[must_use]
    pub fn up() -> HealthBuilder {
        HealthBuilder::new(Status::Up)
    }

    /// Start building a down result.
    #[must_use]
    pub fn down() -> HealthBuilder {
        HealthBuilder::new(Status::Down)
    }

    /// The status of this result.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Whether this result is up.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.status == Status::Up
    }

    /// The named diagnostic detail entries.
    #[must_use]
    pub const fn details(&self) -> &BTreeMap<String, Value> {
        &self.details
    }
}

/// Builder for [`Health`] values.
#[derive(Debug)]
pub struct HealthBuilder {
    status: Status,
    details: BTreeMap<String, Value>,
}

impl HealthBuilder {
    const fn new(status: Status) -> Self {
        Self {
            status,
            details: BTreeMap::new(),
        }
    }

    /// Attach a named detail entry. Last write wins on a duplicate key.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Health {
        Health {
            status: self.status,
            details: self.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_up_with_details() {
        let health = Health::up()
            .with_detail("version", "1.2.3")
            .with_detail("connections", 42)
            .build();

        assert!(health.is_up());
        assert_eq!(health.status(), Status::Up);
        assert_eq!(health.details().len(), 2);
        assert_eq!(health.details()["version"], Value::from("1.2.3"));
        assert_eq!(health.details()["connections"], Value::from(42));
    }

    #[test]
    fn test_builder_down_without_details() {
        let health = Health::down().build();

        assert!(!health.is_up());
        assert!(health.details().is_empty());
    }

    #[test]
    fn test_duplicate_detail_key_last_write_wins() {
        let health = Health::up()
            .with_detail("attempt", 1)
            .with_detail("attempt", 2)
            .build();

        assert_eq!(health.details()["attempt"], Value::from(2));
    }

    #[test]
    fn test_serialization_round_trip() {
        let health = Health::down().with_detail("error", "timed out").build();

        let json = serde_json::to_string(&health).unwrap();
        let parsed: Health = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, health);
    }
}
