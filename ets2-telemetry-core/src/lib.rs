//! ETS2/ATS Telemetry Normalization Library
//!
//! Turns the raw callbacks of a truck-simulation host (continuous channel
//! updates and discrete configuration/gameplay events) into one normalized
//! telemetry document that dashboards read as JSON.
//!
//! # Architecture
//!
//! - A static registry maps every raw channel, event and attribute id to
//!   document paths and value converters
//! - The dispatcher applies each callback as one critical section on the
//!   shared document and recomputes derived values (gear names, shifter
//!   tables, trailer count, remaining job time)
//! - A monitor (mutex + condition variable) lets an external publisher wait
//!   for new data and read the document under the lock
//!
//! The library does NOT:
//! - Talk to the host's native plugin API
//! - Serve the document over the network
//! - Configure logging (it only emits through the `log` facade)
//!
//! The replay driver and snapshot publisher live in the application layer
//! (ets2-telemetry-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use ets2_telemetry_core::{Attribute, EventKind, HostInfo, Telemetry, TelemetryConfig, Value};
//!
//! let host = HostInfo::new("eut2", "Euro Truck Simulator 2 1.49");
//! let mut telemetry = Telemetry::init(&host, TelemetryConfig::default(), None).unwrap();
//!
//! telemetry.event(
//!     EventKind::Configuration,
//!     "truck",
//!     &[Attribute::new("brand", "Scania"), Attribute::new("fuel.capacity", 1200.0)],
//! );
//! telemetry.channel_update("truck.speed", None, Value::Float(22.0));
//!
//! let doc = telemetry.snapshot();
//! println!("{} km/h", doc.truck.speed);
//!
//! telemetry.shutdown().unwrap();
//! ```

// Public modules
pub mod config;
pub mod convert;
pub mod derived;
pub mod dispatch;
pub mod document;
pub mod job;
pub mod monitor;
pub mod registry;
pub mod telemetry;
pub mod types;

// Re-export main types for convenience
pub use config::{GameVariant, GearTarget, TelemetryConfig};
pub use dispatch::Dispatcher;
pub use document::{Document, Indexed, TRAILER_COUNT, WHEEL_COUNT};
pub use job::JobState;
pub use monitor::{Consumed, SharedDocument};
pub use registry::{ChannelRegistration, Registry};
pub use telemetry::{HostInfo, Publisher, Telemetry};
pub use types::{
    Attribute, DocumentError, EventKind, GameTime, Placement, PublisherError, Result,
    TelemetryError, Value, Vector3,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: a fresh document serializes with its top-level sections
        let json = serde_json::to_value(Document::new()).unwrap();
        for section in ["game", "truck", "shifter", "trailers", "job", "cargo", "navigation"] {
            assert!(json.get(section).is_some(), "missing section {}", section);
        }
        assert!(!VERSION.is_empty());
    }
}
