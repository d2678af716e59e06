//! Host-facing facade
//!
//! [`Telemetry`] is what a host adapter holds between its init and shutdown
//! calls. It builds the registry and the shared document, owns the
//! dispatcher, and starts the external publisher once the document is ready.

use crate::config::{GameVariant, TelemetryConfig};
use crate::dispatch::Dispatcher;
use crate::document::Document;
use crate::job::JobState;
use crate::monitor::SharedDocument;
use crate::registry::{ChannelRegistration, Registry};
use crate::types::{Attribute, EventKind, PublisherError, Result, TelemetryError, Value};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identity of the host game, as reported at init
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    /// Short game id, e.g. `eut2` or `ats`
    pub game_id: String,
    /// Human-readable game name, ending in the game version
    pub game_name: String,
}

impl HostInfo {
    pub fn new(game_id: impl Into<String>, game_name: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            game_name: game_name.into(),
        }
    }

    /// Dashboard game name: upper-cased id, `EUT2` shown as `ETS2`
    pub fn display_name(&self) -> String {
        self.game_id.to_uppercase().replace("EUT2", "ETS2")
    }

    /// Last word of the game name, `None` when the name is blank
    pub fn version(&self) -> Option<&str> {
        self.game_name.split_whitespace().last()
    }
}

/// External consumer of the shared document
///
/// Started once the document is initialized, stopped before the host
/// unloads. Implementations read the document only through the monitor.
pub trait Publisher: Send {
    /// Name used in lifecycle log lines
    fn name(&self) -> &str;

    fn start(&mut self, shared: Arc<SharedDocument>) -> std::result::Result<(), PublisherError>;

    fn stop(&mut self) -> std::result::Result<(), PublisherError>;

    fn is_running(&self) -> bool;
}

/// The normalization engine between host init and shutdown
pub struct Telemetry {
    host: HostInfo,
    variant: GameVariant,
    dispatcher: Dispatcher,
    publisher: Option<Box<dyn Publisher>>,
}

impl Telemetry {
    /// Build a fresh document for `host` and start `publisher`
    ///
    /// Fails for games without a gear-naming variant (unless the config
    /// forces one) and when the publisher refuses to start.
    pub fn init(
        host: &HostInfo,
        config: TelemetryConfig,
        publisher: Option<Box<dyn Publisher>>,
    ) -> Result<Self> {
        info!("Version {}", crate::VERSION);

        let variant = config
            .variant
            .or_else(|| GameVariant::from_game_id(&host.game_id))
            .ok_or_else(|| TelemetryError::UnsupportedGame(host.game_id.clone()))?;

        let mut document = Document::new();
        document.game.game_name = host.display_name();
        if let Some(version) = host.version() {
            document.game.version = version.to_string();
        }
        info!(
            "Initialized for {} {} ({:?} gear names)",
            document.game.game_name, document.game.version, variant
        );

        let registry = Arc::new(Registry::standard());
        let shared = Arc::new(SharedDocument::new(document, config.wait_timeout()));
        let mut dispatcher = Dispatcher::new(registry, Arc::clone(&shared), variant, &config);
        dispatcher.refresh_derived();

        let mut telemetry = Self {
            host: host.clone(),
            variant,
            dispatcher,
            publisher: None,
        };

        if let Some(mut publisher) = publisher {
            publisher.start(shared)?;
            info!("Started publisher {}", publisher.name());
            telemetry.publisher = Some(publisher);
        }

        Ok(telemetry)
    }

    pub fn host(&self) -> &HostInfo {
        &self.host
    }

    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    /// Handle given to consumers
    pub fn shared(&self) -> Arc<SharedDocument> {
        Arc::clone(self.dispatcher.shared())
    }

    pub fn snapshot(&self) -> Document {
        self.dispatcher.shared().snapshot()
    }

    pub fn job_state(&self) -> JobState {
        self.dispatcher.job_state()
    }

    /// Channels the host adapter must subscribe to
    pub fn channel_registrations(&self) -> Vec<ChannelRegistration> {
        self.dispatcher.registry().channel_registrations()
    }

    /// Event ids with attribute tables
    pub fn event_names(&self) -> Vec<&str> {
        self.dispatcher.registry().event_names()
    }

    /// Continuous channel callback
    pub fn channel_update(&mut self, channel: &str, index: Option<usize>, value: Value) {
        self.dispatcher.apply_channel_update(channel, index, value);
    }

    /// Discrete event callback
    pub fn event(&mut self, kind: EventKind, id: &str, attributes: &[Attribute]) {
        self.dispatcher.apply_event(kind, id, attributes);
    }

    /// Release waiting consumers and stop the publisher
    pub fn shutdown(mut self) -> Result<()> {
        info!("Shutting down");
        self.stop_publisher()?;
        info!("bye");
        Ok(())
    }

    fn stop_publisher(&mut self) -> Result<()> {
        self.dispatcher.shared().shutdown();
        if let Some(mut publisher) = self.publisher.take() {
            if publisher.is_running() {
                publisher.stop()?;
                info!("Stopped publisher {}", publisher.name());
            }
        }
        Ok(())
    }
}

impl Drop for Telemetry {
    fn drop(&mut self) {
        if let Err(e) = self.stop_publisher() {
            warn!("Failed to stop publisher: {}", e);
        }
    }
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry")
            .field("host", &self.host)
            .field("variant", &self.variant)
            .field("publisher", &self.publisher.as_ref().map(|p| p.name().to_string()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::Consumed;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::thread::{self, JoinHandle};
    use std::time::Duration;

    /// Publisher that counts the updates it consumed on its own thread
    #[derive(Default)]
    struct CountingPublisher {
        seen: Arc<AtomicUsize>,
        stopped: Arc<AtomicBool>,
        worker: Option<JoinHandle<()>>,
    }

    impl Publisher for CountingPublisher {
        fn name(&self) -> &str {
            "counting"
        }

        fn start(&mut self, shared: Arc<SharedDocument>) -> std::result::Result<(), PublisherError> {
            if self.worker.is_some() {
                return Err(PublisherError::AlreadyRunning);
            }
            let seen = Arc::clone(&self.seen);
            self.worker = Some(thread::spawn(move || loop {
                match shared.consume(|_, _| ()) {
                    Consumed::Data(()) => {
                        seen.fetch_add(1, Ordering::SeqCst);
                    }
                    Consumed::TimedOut => {}
                    Consumed::Shutdown => break,
                }
            }));
            Ok(())
        }

        fn stop(&mut self) -> std::result::Result<(), PublisherError> {
            let worker = self.worker.take().ok_or(PublisherError::NotRunning)?;
            worker
                .join()
                .map_err(|_| PublisherError::failure("worker panicked"))?;
            self.stopped.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn is_running(&self) -> bool {
            self.worker.is_some()
        }
    }

    struct FailingPublisher;

    impl Publisher for FailingPublisher {
        fn name(&self) -> &str {
            "failing"
        }

        fn start(&mut self, _: Arc<SharedDocument>) -> std::result::Result<(), PublisherError> {
            Err(PublisherError::failure("address in use"))
        }

        fn stop(&mut self) -> std::result::Result<(), PublisherError> {
            Err(PublisherError::NotRunning)
        }

        fn is_running(&self) -> bool {
            false
        }
    }

    fn ets2() -> HostInfo {
        HostInfo::new("eut2", "Euro Truck Simulator 2 1.49")
    }

    #[test]
    fn test_host_identity() {
        let telemetry = Telemetry::init(&ets2(), TelemetryConfig::default(), None).unwrap();
        let doc = telemetry.snapshot();
        assert_eq!(doc.game.game_name, "ETS2");
        assert_eq!(doc.game.version, "1.49");
        assert_eq!(telemetry.variant(), GameVariant::Ets2);

        let host = HostInfo::new("ats", "American Truck Simulator 1.50");
        let telemetry = Telemetry::init(&host, TelemetryConfig::default(), None).unwrap();
        assert_eq!(telemetry.snapshot().game.game_name, "ATS");
        assert_eq!(telemetry.variant(), GameVariant::Ats);
    }

    #[test]
    fn test_blank_game_name_keeps_default_version() {
        let host = HostInfo::new("eut2", "");
        let telemetry = Telemetry::init(&host, TelemetryConfig::default(), None).unwrap();
        assert_eq!(telemetry.snapshot().game.version, "0.0");
    }

    #[test]
    fn test_unsupported_game() {
        let host = HostInfo::new("fs22", "Farming Simulator 22");
        let err = Telemetry::init(&host, TelemetryConfig::default(), None).unwrap_err();
        assert!(matches!(err, TelemetryError::UnsupportedGame(id) if id == "fs22"));

        // A forced variant lets unknown hosts through
        let config = TelemetryConfig::new().with_variant(GameVariant::Ets2);
        assert!(Telemetry::init(&host, config, None).is_ok());
    }

    #[test]
    fn test_init_document_is_consistent() {
        let telemetry = Telemetry::init(&ets2(), TelemetryConfig::default(), None).unwrap();
        let doc = telemetry.snapshot();
        assert_eq!(doc.trailer_count, 0);
        assert_eq!(doc.shifter.best_gear, 0);
        assert_eq!(doc.shifter.forward_speed_at_1500_rpm.get(&0), Some(&0));
    }

    #[test]
    fn test_publisher_lifecycle() {
        let publisher = CountingPublisher::default();
        let seen = Arc::clone(&publisher.seen);
        let stopped = Arc::clone(&publisher.stopped);

        let config = TelemetryConfig::new().with_wait_timeout(Duration::from_millis(50));
        let mut telemetry = Telemetry::init(&ets2(), config, Some(Box::new(publisher))).unwrap();

        telemetry.channel_update("truck.fuel.amount", None, Value::Float(300.0));
        let shared = telemetry.shared();
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while shared.has_new_data() && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }

        telemetry.shutdown().unwrap();
        assert!(stopped.load(Ordering::SeqCst));
        assert!(seen.load(Ordering::SeqCst) >= 1);
        assert!(shared.is_shut_down());
    }

    #[test]
    fn test_publisher_start_failure() {
        let err = Telemetry::init(&ets2(), TelemetryConfig::default(), Some(Box::new(FailingPublisher)))
            .unwrap_err();
        assert_eq!(err.to_string(), "Publisher failed: address in use");
    }

    #[test]
    fn test_drop_stops_publisher() {
        let publisher = CountingPublisher::default();
        let stopped = Arc::clone(&publisher.stopped);
        let config = TelemetryConfig::new().with_wait_timeout(Duration::from_millis(50));

        let telemetry = Telemetry::init(&ets2(), config, Some(Box::new(publisher))).unwrap();
        drop(telemetry);
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[test]
    fn test_registrations_exposed() {
        let telemetry = Telemetry::init(&ets2(), TelemetryConfig::default(), None).unwrap();
        let channels = telemetry.channel_registrations();
        assert!(channels.iter().any(|c| c.name == "trailer.9.connected"));
        assert!(telemetry.event_names().contains(&"job"));
    }
}
