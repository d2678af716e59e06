//! Recorded host call streams
//!
//! A replay file holds one JSON object per line, each one host callback:
//!
//! ```text
//! {"call":"event","kind":"configuration","id":"job","attributes":[{"name":"cargo","value":{"text":"Apples"}}]}
//! {"call":"channel","channel":"truck.speed","value":{"float":22.5}}
//! {"call":"channel","channel":"truck.wheel.lift","index":3,"value":{"float":0.1}}
//! {"call":"event","kind":"started"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use ets2_telemetry_core::{Attribute, EventKind, Telemetry, Value};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One recorded host callback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum HostCall {
    Channel {
        channel: String,
        #[serde(default)]
        index: Option<usize>,
        value: Value,
    },
    Event {
        kind: EventKind,
        #[serde(default)]
        id: String,
        #[serde(default)]
        attributes: Vec<Attribute>,
    },
}

impl HostCall {
    pub fn apply(&self, telemetry: &mut Telemetry) {
        match self {
            HostCall::Channel { channel, index, value } => {
                telemetry.channel_update(channel, *index, value.clone())
            }
            HostCall::Event { kind, id, attributes } => telemetry.event(*kind, id, attributes),
        }
    }
}

/// Counts of what a replay fed into the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub channel_updates: usize,
    pub configuration_events: usize,
    pub gameplay_events: usize,
    pub state_events: usize,
}

impl ReplayStats {
    pub fn total(&self) -> usize {
        self.channel_updates + self.configuration_events + self.gameplay_events + self.state_events
    }
}

pub fn parse_replay<R: BufRead>(reader: R) -> Result<Vec<HostCall>, ReplayError> {
    let mut calls = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let call = serde_json::from_str(trimmed).map_err(|source| ReplayError::Parse { line: i + 1, source })?;
        calls.push(call);
    }
    Ok(calls)
}

pub fn read_replay(path: &Path) -> Result<Vec<HostCall>, ReplayError> {
    let file = File::open(path)?;
    parse_replay(BufReader::new(file))
}

/// Feed every call to the engine in order
pub fn run(calls: &[HostCall], telemetry: &mut Telemetry) -> ReplayStats {
    let mut stats = ReplayStats::default();
    for call in calls {
        match call {
            HostCall::Channel { .. } => stats.channel_updates += 1,
            HostCall::Event { kind, .. } => match kind {
                EventKind::Configuration => stats.configuration_events += 1,
                EventKind::Gameplay => stats.gameplay_events += 1,
                EventKind::Started | EventKind::Paused => stats.state_events += 1,
            },
        }
        call.apply(telemetry);
    }
    log::debug!("Replayed {} host calls", stats.total());
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use ets2_telemetry_core::{HostInfo, TelemetryConfig};
    use std::io::{Cursor, Write};

    const SESSION: &str = r#"
# recorded session
{"call":"event","kind":"configuration","id":"job","attributes":[{"name":"cargo","value":{"text":"Apples"}},{"name":"income","value":{"integer":5000}}]}
{"call":"event","kind":"started"}
{"call":"channel","channel":"truck.speed","value":{"float":27.78}}
{"call":"channel","channel":"truck.wheel.lift","index":3,"value":{"float":0.1}}

{"call":"event","kind":"gameplay","id":"job.delivered","attributes":[{"name":"revenue","value":{"float":5100.0}}]}
"#;

    #[test]
    fn test_parse_replay() {
        let calls = parse_replay(Cursor::new(SESSION)).unwrap();
        assert_eq!(calls.len(), 5);
        assert_eq!(
            calls[3],
            HostCall::Channel {
                channel: "truck.wheel.lift".to_string(),
                index: Some(3),
                value: Value::Float(0.1),
            }
        );
        match &calls[1] {
            HostCall::Event { kind, id, attributes } => {
                assert_eq!(*kind, EventKind::Started);
                assert!(id.is_empty());
                assert!(attributes.is_empty());
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_reports_line() {
        let input = "{\"call\":\"channel\",\"channel\":\"truck.speed\",\"value\":{\"float\":1.0}}\n{\"call\":\"teleport\"}\n";
        let err = parse_replay(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, ReplayError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_read_replay_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SESSION.as_bytes()).unwrap();

        let calls = read_replay(file.path()).unwrap();
        assert_eq!(calls.len(), 5);
        assert!(matches!(read_replay(Path::new("/nonexistent.jsonl")), Err(ReplayError::Io(_))));
    }

    #[test]
    fn test_run_drives_engine() {
        let calls = parse_replay(Cursor::new(SESSION)).unwrap();
        let host = HostInfo::new("eut2", "Euro Truck Simulator 2 1.49");
        let mut telemetry = Telemetry::init(&host, TelemetryConfig::default(), None).unwrap();

        let stats = run(&calls, &mut telemetry);
        assert_eq!(stats.channel_updates, 2);
        assert_eq!(stats.configuration_events, 1);
        assert_eq!(stats.gameplay_events, 1);
        assert_eq!(stats.state_events, 1);

        let doc = telemetry.snapshot();
        assert!(!doc.game.paused);
        assert_eq!(doc.truck.speed, 100);
        assert!(doc.truck.wheels[&3].lifted);
        assert!(doc.job_event.job_delivered);
        assert_eq!(doc.job_event.revenue, 5100.0);
    }
}
