//! Core types for the telemetry core library
//!
//! This module defines the raw values the host hands to the callbacks, the
//! small geometric structs they carry, and the error types of the library.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Game-clock timestamp type used throughout the library
pub type GameTime = NaiveDateTime;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Three component vector (positions, accelerations)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Orientation as reported by the host (fractions of a full turn)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,
}

/// Raw placement: a position struct plus an orientation struct
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vector3,
    pub orientation: Euler,
}

/// Flattened placement as it appears in the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl Placement {
    /// Every numeric component, in field order
    pub fn components(&self) -> [f64; 6] {
        [self.x, self.y, self.z, self.heading, self.pitch, self.roll]
    }
}

/// A single value as delivered by the host, or produced by a converter
///
/// Raw host values are numeric, boolean, string or small structs. Converters
/// additionally produce `Placement` (flattened transform) and `Time`
/// (absolute game-clock instant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Vector(Vector3),
    Euler(Euler),
    Transform(Transform),
    Placement(Placement),
    #[serde(skip)]
    Time(GameTime),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:.3}", v),
            Value::Text(v) => write!(f, "\"{}\"", v),
            Value::Vector(v) => write!(f, "({:.3}, {:.3}, {:.3})", v.x, v.y, v.z),
            Value::Euler(v) => write!(f, "(h {:.3}, p {:.3}, r {:.3})", v.heading, v.pitch, v.roll),
            Value::Transform(t) => write!(
                f,
                "({:.3}, {:.3}, {:.3}) h {:.3}",
                t.position.x, t.position.y, t.position.z, t.orientation.heading
            ),
            Value::Placement(p) => write!(f, "({:.3}, {:.3}, {:.3}) h {:.3}", p.x, p.y, p.z, p.heading),
            Value::Time(t) => write!(f, "{}", t),
        }
    }
}

impl Value {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Integer view of the value, if it has one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            Value::Float(v) if v.is_finite() => Some(*v as i64),
            Value::Bool(v) => Some(if *v { 1 } else { 0 }),
            _ => None,
        }
    }

    /// Truthiness of numeric and boolean values
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(v) => *v,
            Value::Integer(v) => *v != 0,
            Value::Float(v) => *v != 0.0,
            Value::Text(v) => !v.is_empty(),
            _ => false,
        }
    }

    /// True when the value carries something: not an empty string
    pub fn is_present(&self) -> bool {
        !matches!(self, Value::Text(s) if s.is_empty())
    }

    /// Short name of the variant, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Vector(_) => "vector",
            Value::Euler(_) => "euler",
            Value::Transform(_) => "transform",
            Value::Placement(_) => "placement",
            Value::Time(_) => "time",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// One `(attributeName, index, value)` tuple of a configuration or gameplay event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    /// Index for array-like attributes (wheels, gear ratios, shifter slots)
    #[serde(default)]
    pub index: Option<usize>,
    pub value: Value,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            index: None,
            value: value.into(),
        }
    }

    pub fn indexed(name: impl Into<String>, index: usize, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
            value: value.into(),
        }
    }
}

/// Category of a discrete host event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Configuration snapshot (truck, trailer.N, job, controls, hshifter)
    Configuration,
    /// One-shot gameplay event (job delivered, fined, ferry, ...)
    Gameplay,
    Started,
    Paused,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Configuration => write!(f, "configuration"),
            EventKind::Gameplay => write!(f, "gameplay"),
            EventKind::Started => write!(f, "started"),
            EventKind::Paused => write!(f, "paused"),
        }
    }
}

/// Errors raised when a write cannot be applied to the document
///
/// These never leave a callback: the dispatch engine logs them and drops the
/// offending write.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocumentError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Index {index} out of range for {field}")]
    IndexOutOfRange { field: String, index: usize },

    #[error("Field {field} expects an index")]
    MissingIndex { field: String },

    #[error("Cannot store a {found} value as {expected}")]
    TypeMismatch { expected: &'static str, found: &'static str },

    #[error("Non-finite float rejected")]
    NonFinite,
}

/// Errors of a publisher's start/stop lifecycle
#[derive(Debug, thiserror::Error)]
pub enum PublisherError {
    #[error("Publisher already running")]
    AlreadyRunning,

    #[error("Publisher is not running")]
    NotRunning,

    #[error("Publisher failed: {source}")]
    Failure {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl PublisherError {
    pub fn failure(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        PublisherError::Failure { source: source.into() }
    }
}

/// Errors surfaced to the host adapter (init/shutdown)
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Unsupported game: {0}")]
    UnsupportedGame(String),

    #[error(transparent)]
    Publisher(#[from] PublisherError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        let int_val = Value::Integer(42);
        assert_eq!(int_val.as_f64(), Some(42.0));
        assert_eq!(int_val.as_i64(), Some(42));
        assert!(int_val.as_bool());

        let float_val = Value::Float(3.75);
        assert_eq!(float_val.as_i64(), Some(3));
        assert_eq!(Value::Float(f64::NAN).as_i64(), None);

        assert_eq!(Value::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Value::from("abc").as_f64(), None);
    }

    #[test]
    fn test_value_presence() {
        assert!(!Value::from("").is_present());
        assert!(Value::from("scania.r").is_present());
        assert!(Value::Integer(0).is_present());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(format!("{}", Value::Integer(42)), "42");
        assert_eq!(format!("{}", Value::Float(3.14159)), "3.142");
        assert_eq!(format!("{}", Value::Bool(true)), "true");
    }

    #[test]
    fn test_error_display() {
        let err = TelemetryError::UnsupportedGame("fs22".to_string());
        assert_eq!(err.to_string(), "Unsupported game: fs22");

        let err: TelemetryError = PublisherError::failure("port in use").into();
        assert_eq!(err.to_string(), "Publisher failed: port in use");
    }

    #[test]
    fn test_value_wire_format() {
        let value: Value = serde_json::from_str(r#"{"float": 27.5}"#).unwrap();
        assert_eq!(value, Value::Float(27.5));

        let attr: Attribute =
            serde_json::from_str(r#"{"name": "wheel.radius", "index": 2, "value": {"float": 0.5}}"#).unwrap();
        assert_eq!(attr, Attribute::indexed("wheel.radius", 2, 0.5));
    }
}
