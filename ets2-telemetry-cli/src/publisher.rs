//! Snapshot publisher
//!
//! Stands in for the dashboard server: a worker thread waits on the monitor
//! and writes the whole document as one JSON line per observed update.
//! Several producer updates between two wake-ups collapse into one snapshot.

use crate::config::OutputConfig;
use ets2_telemetry_core::{Consumed, Document, Publisher, PublisherError, SharedDocument};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Where snapshots go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSink {
    Stdout,
    File(PathBuf),
}

impl SnapshotSink {
    fn open(&self) -> io::Result<Box<dyn Write + Send>> {
        Ok(match self {
            SnapshotSink::Stdout => Box::new(io::stdout()),
            SnapshotSink::File(path) => Box::new(BufWriter::new(File::create(path)?)),
        })
    }
}

#[derive(Debug)]
pub struct SnapshotPublisher {
    sink: SnapshotSink,
    pretty: bool,
    max_snapshots: Option<usize>,
    written: Arc<AtomicUsize>,
    worker: Option<JoinHandle<io::Result<()>>>,
}

impl SnapshotPublisher {
    pub fn new(sink: SnapshotSink) -> Self {
        Self {
            sink,
            pretty: false,
            max_snapshots: None,
            written: Arc::new(AtomicUsize::new(0)),
            worker: None,
        }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        let sink = match &output.path {
            Some(path) => SnapshotSink::File(path.clone()),
            None => SnapshotSink::Stdout,
        };
        let mut publisher = Self::new(sink).with_pretty(output.pretty);
        publisher.max_snapshots = output.max_snapshots;
        publisher
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_max_snapshots(mut self, max: usize) -> Self {
        self.max_snapshots = Some(max);
        self
    }

    /// Shared counter of written snapshots, readable after the publisher is handed off
    pub fn written(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.written)
    }
}

fn serialize(doc: &Document, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    }
}

struct Worker {
    shared: Arc<SharedDocument>,
    out: Box<dyn Write + Send>,
    pretty: bool,
    max_snapshots: Option<usize>,
    written: Arc<AtomicUsize>,
}

impl Worker {
    fn limit_reached(&self) -> bool {
        self.max_snapshots
            .map_or(false, |max| self.written.load(Ordering::SeqCst) >= max)
    }

    fn write(&mut self, snapshot: serde_json::Result<String>, version: u64) -> io::Result<()> {
        match snapshot {
            Ok(json) => {
                writeln!(self.out, "{}", json)?;
                self.written.fetch_add(1, Ordering::SeqCst);
                log::trace!("Wrote snapshot of version {}", version);
            }
            Err(e) => log::warn!("Skipping snapshot {}: {}", version, e),
        }
        Ok(())
    }

    fn run(mut self) -> io::Result<()> {
        let pretty = self.pretty;
        loop {
            if self.limit_reached() {
                log::debug!("Snapshot limit reached");
                break;
            }
            match self.shared.consume(|doc, version| (serialize(doc, pretty), version)) {
                Consumed::Data((snapshot, version)) => self.write(snapshot, version)?,
                Consumed::TimedOut => log::trace!("No new data"),
                Consumed::Shutdown => {
                    // Updates that raced the shutdown still get their snapshot
                    if self.shared.has_new_data() && !self.limit_reached() {
                        let version = self.shared.version();
                        let snapshot = self.shared.read(|doc| serialize(doc, pretty));
                        self.write(snapshot, version)?;
                    }
                    break;
                }
            }
        }
        self.out.flush()
    }
}

impl Publisher for SnapshotPublisher {
    fn name(&self) -> &str {
        "snapshot writer"
    }

    fn start(&mut self, shared: Arc<SharedDocument>) -> Result<(), PublisherError> {
        if self.worker.is_some() {
            return Err(PublisherError::AlreadyRunning);
        }

        let worker = Worker {
            shared,
            out: self.sink.open().map_err(PublisherError::failure)?,
            pretty: self.pretty,
            max_snapshots: self.max_snapshots,
            written: Arc::clone(&self.written),
        };
        let handle = thread::Builder::new()
            .name("snapshot writer".to_string())
            .spawn(move || worker.run())
            .map_err(PublisherError::failure)?;

        self.worker = Some(handle);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PublisherError> {
        let handle = self.worker.take().ok_or(PublisherError::NotRunning)?;
        handle
            .join()
            .map_err(|_| PublisherError::failure("snapshot writer panicked"))?
            .map_err(PublisherError::failure)?;
        log::debug!("Wrote {} snapshots", self.written.load(Ordering::SeqCst));
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.worker.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ets2_telemetry_core::{HostInfo, Telemetry, TelemetryConfig, Value};
    use std::fs;
    use std::time::Duration;

    fn config() -> TelemetryConfig {
        TelemetryConfig::new().with_wait_timeout(Duration::from_millis(20))
    }

    fn host() -> HostInfo {
        HostInfo::new("eut2", "Euro Truck Simulator 2 1.49")
    }

    #[test]
    fn test_snapshots_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshots.jsonl");
        let publisher = SnapshotPublisher::new(SnapshotSink::File(path.clone()));
        let written = publisher.written();

        let mut telemetry = Telemetry::init(&host(), config(), Some(Box::new(publisher))).unwrap();
        telemetry.channel_update("truck.speed", None, Value::Float(27.78));
        telemetry.shutdown().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), written.load(Ordering::SeqCst));
        assert!(!lines.is_empty());

        // The last snapshot carries the final state
        let last: serde_json::Value = serde_json::from_str(lines[lines.len() - 1]).unwrap();
        assert_eq!(last["truck"]["speed"], 100);
        assert_eq!(last["game"]["gameName"], "ETS2");
    }

    #[test]
    fn test_snapshot_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limited.jsonl");
        let publisher = SnapshotPublisher::new(SnapshotSink::File(path.clone())).with_max_snapshots(1);

        let mut telemetry = Telemetry::init(&host(), config(), Some(Box::new(publisher))).unwrap();
        for fuel in 0..20 {
            telemetry.channel_update("truck.fuel.amount", None, Value::Float(fuel as f64));
            thread::sleep(Duration::from_millis(2));
        }
        telemetry.shutdown().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_lifecycle_errors() {
        let mut publisher = SnapshotPublisher::new(SnapshotSink::Stdout);
        assert!(matches!(publisher.stop(), Err(PublisherError::NotRunning)));
        assert!(!publisher.is_running());
    }

    #[test]
    fn test_unwritable_sink_fails_start() {
        let publisher = SnapshotPublisher::new(SnapshotSink::File(PathBuf::from("/nonexistent/dir/out.jsonl")));
        let err = Telemetry::init(&host(), config(), Some(Box::new(publisher))).unwrap_err();
        assert!(err.to_string().starts_with("Publisher failed"));
    }

    #[test]
    fn test_pretty_output() {
        let doc = Document::new();
        assert!(serialize(&doc, true).unwrap().contains('\n'));
        assert!(!serialize(&doc, false).unwrap().contains('\n'));
    }
}
