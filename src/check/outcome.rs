//! Per-probe invocation results.

use serde::Serialize;
use serde_json::{Map, Value};

/// Status reported by a probe, or combined across probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DOWN")]
    Down,
}

impl Status {
    /// Combine two statuses: `Down` absorbs, `Up` is the identity.
    ///
    /// Commutative and associative, so folding a sequence of outcomes
    /// yields the same combined status in any order.
    pub fn combine(self, other: Status) -> Status {
        if self == Status::Down || other == Status::Down {
            Status::Down
        } else {
            Status::Up
        }
    }

    pub fn is_up(self) -> bool {
        self == Status::Up
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Up => write!(f, "UP"),
            Status::Down => write!(f, "DOWN"),
        }
    }
}

/// A value attached to an outcome's data map.
///
/// Restricted to the string/integer/boolean shapes the response contract
/// allows; conversion into JSON happens at insertion time.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    String(String),
    Int(i64),
    Bool(bool),
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::String(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::String(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Int(value)
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

impl From<DataValue> for Value {
    fn from(value: DataValue) -> Self {
        match value {
            DataValue::String(s) => Value::String(s),
            DataValue::Int(i) => Value::from(i),
            DataValue::Bool(b) => Value::Bool(b),
        }
    }
}

/// Result of invoking one probe. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// Probe name, as reported to the endpoint.
    pub name: String,

    /// Reported status.
    pub status: Status,

    /// Optional structured metadata, in insertion order.
    ///
    /// `None` unless the probe attached at least one entry; a present map
    /// is never empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl Outcome {
    /// Start building an outcome for the named probe.
    pub fn named(name: impl Into<String>) -> OutcomeBuilder {
        OutcomeBuilder {
            name: name.into(),
            status: Status::Up,
            data: None,
        }
    }

    /// Shorthand for an `Up` outcome with no data.
    pub fn up(name: impl Into<String>) -> Outcome {
        Outcome::named(name).build()
    }

    /// Shorthand for a `Down` outcome with no data.
    pub fn down(name: impl Into<String>) -> Outcome {
        Outcome::named(name).down().build()
    }
}

/// Fluent builder for [`Outcome`].
#[derive(Debug)]
pub struct OutcomeBuilder {
    name: String,
    status: Status,
    data: Option<Map<String, Value>>,
}

impl OutcomeBuilder {
    pub fn up(mut self) -> Self {
        self.status = Status::Up;
        self
    }

    pub fn down(mut self) -> Self {
        self.status = Status::Down;
        self
    }

    /// Set the status from a boolean: `true` is `Up`, `false` is `Down`.
    pub fn status(self, up: bool) -> Self {
        if up {
            self.up()
        } else {
            self.down()
        }
    }

    /// Attach one metadata entry. The data map is created on first use so
    /// an outcome without data serializes with the field omitted entirely.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into().into());
        self
    }

    pub fn build(self) -> Outcome {
        Outcome {
            name: self.name,
            status: self.status,
            data: self.data,
        }
    }
}
