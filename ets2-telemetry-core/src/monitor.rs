//! Shared document and notification monitor
//!
//! One mutex guards the document, the "new data" flag, a version counter and
//! a shutdown flag; one condition variable signals consumers. Producers
//! mutate through [`SharedDocument::update`], which raises the flag and
//! signals exactly once per call. Consumers read through closures so the
//! flag is cleared before the lock is released.
//!
//! The flag has no consumer identity: with several consumers one of them
//! clearing it hides the update from the others. Consumers that need
//! independent change detection use [`SharedDocument::wait_for_version`]
//! instead, which compares against the monotonic version counter.

use crate::document::Document;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug)]
struct State {
    document: Document,
    new_data: bool,
    version: u64,
    shutdown: bool,
}

/// Result of a bounded consumer wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Consumed<R> {
    /// New data was read; carries the reader's result
    Data(R),
    /// Nothing changed within the wait timeout
    TimedOut,
    /// The monitor was shut down; the consumer must exit
    Shutdown,
}

impl<R> Consumed<R> {
    pub fn into_data(self) -> Option<R> {
        match self {
            Consumed::Data(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct SharedDocument {
    state: Mutex<State>,
    signal: Condvar,
    wait_timeout: Duration,
}

impl SharedDocument {
    pub fn new(document: Document, wait_timeout: Duration) -> Self {
        Self {
            state: Mutex::new(State {
                document,
                new_data: false,
                version: 0,
                shutdown: false,
            }),
            signal: Condvar::new(),
            wait_timeout,
        }
    }

    // Poisoning is ignored: the document stays readable after a panicking writer
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one producer critical section
    ///
    /// `apply` returns whether it wrote anything; if so the flag is raised,
    /// the version advances and waiting consumers are signaled once.
    pub fn update<F>(&self, apply: F) -> bool
    where
        F: FnOnce(&mut Document) -> bool,
    {
        let mut state = self.lock();
        let changed = apply(&mut state.document);
        if changed {
            state.new_data = true;
            state.version += 1;
            self.signal.notify_all();
        }
        changed
    }

    /// Read the document under the lock without touching the flag
    pub fn read<R>(&self, reader: impl FnOnce(&Document) -> R) -> R {
        let state = self.lock();
        reader(&state.document)
    }

    pub fn snapshot(&self) -> Document {
        self.read(Document::clone)
    }

    pub fn has_new_data(&self) -> bool {
        self.lock().new_data
    }

    pub fn version(&self) -> u64 {
        self.lock().version
    }

    pub fn is_shut_down(&self) -> bool {
        self.lock().shutdown
    }

    pub fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }

    /// Single-consumer read: wait for the flag, read, clear it
    ///
    /// Returns immediately if the flag is already raised. The reader gets
    /// the document and its version.
    pub fn consume<R>(&self, reader: impl FnOnce(&Document, u64) -> R) -> Consumed<R> {
        let state = self.lock();
        let (mut state, _) = self
            .signal
            .wait_timeout_while(state, self.wait_timeout, |s| !s.new_data && !s.shutdown)
            .unwrap_or_else(PoisonError::into_inner);

        if state.shutdown {
            return Consumed::Shutdown;
        }
        if !state.new_data {
            return Consumed::TimedOut;
        }

        let result = reader(&state.document, state.version);
        state.new_data = false;
        Consumed::Data(result)
    }

    /// Multi-consumer read: wait until the version moves past `seen`
    ///
    /// Leaves the shared flag alone, so it can run next to a [`consume`]
    /// consumer without stealing its updates.
    ///
    /// [`consume`]: SharedDocument::consume
    pub fn wait_for_version<R>(&self, seen: u64, reader: impl FnOnce(&Document, u64) -> R) -> Consumed<R> {
        let state = self.lock();
        let (state, _) = self
            .signal
            .wait_timeout_while(state, self.wait_timeout, |s| s.version <= seen && !s.shutdown)
            .unwrap_or_else(PoisonError::into_inner);

        if state.shutdown {
            Consumed::Shutdown
        } else if state.version > seen {
            Consumed::Data(reader(&state.document, state.version))
        } else {
            Consumed::TimedOut
        }
    }

    /// Release every waiting consumer; later waits return immediately
    pub fn shutdown(&self) {
        let mut state = self.lock();
        state.shutdown = true;
        self.signal.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn shared(timeout_ms: u64) -> SharedDocument {
        SharedDocument::new(Document::new(), Duration::from_millis(timeout_ms))
    }

    #[test]
    fn test_update_sets_flag_and_version() {
        let shared = shared(10);
        assert!(!shared.has_new_data());

        assert!(shared.update(|doc| {
            doc.truck.fuel = 100.0;
            doc.truck.odometer = 5.0;
            true
        }));
        assert!(shared.has_new_data());
        assert_eq!(shared.version(), 1);
        assert_eq!(shared.read(|doc| doc.truck.fuel), 100.0);
    }

    #[test]
    fn test_update_without_write_does_not_signal() {
        let shared = shared(10);
        assert!(!shared.update(|_| false));
        assert!(!shared.has_new_data());
        assert_eq!(shared.version(), 0);
    }

    #[test]
    fn test_consume_clears_flag() {
        let shared = shared(10);
        shared.update(|doc| {
            doc.game.paused = false;
            true
        });

        assert_eq!(shared.consume(|doc, _| doc.game.paused), Consumed::Data(false));
        assert!(!shared.has_new_data());
        assert_eq!(shared.consume(|_, _| ()), Consumed::TimedOut);
    }

    #[test]
    fn test_consumer_released_by_producer() {
        let shared = Arc::new(shared(5_000));

        let consumer = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || shared.consume(|doc, version| (doc.truck.speed, version)))
        };

        thread::sleep(Duration::from_millis(20));
        for speed in 1..=3 {
            shared.update(|doc| {
                doc.truck.speed = speed;
                true
            });
        }

        match consumer.join().unwrap() {
            Consumed::Data((speed, version)) => {
                assert!((1..=3).contains(&speed));
                assert!(version >= 1);
            }
            other => panic!("consumer not released: {:?}", other),
        }
    }

    #[test]
    fn test_shutdown_releases_waiters() {
        let shared = Arc::new(shared(60_000));

        let waiters: Vec<_> = (0..2)
            .map(|i| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    if i == 0 {
                        shared.consume(|_, _| ())
                    } else {
                        shared.wait_for_version(0, |_, _| ())
                    }
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        shared.shutdown();

        for waiter in waiters {
            assert_eq!(waiter.join().unwrap(), Consumed::Shutdown);
        }
        assert_eq!(shared.consume(|_, _| ()), Consumed::Shutdown);
        assert!(shared.is_shut_down());
    }

    #[test]
    fn test_versions_are_independent_of_flag() {
        let shared = shared(10);
        shared.update(|_| true);
        shared.update(|_| true);

        assert_eq!(shared.consume(|_, version| version), Consumed::Data(2));

        // A second consumer still sees the update the first one cleared
        assert_eq!(shared.wait_for_version(1, |_, version| version), Consumed::Data(2));
        assert_eq!(shared.wait_for_version(2, |_, version| version), Consumed::TimedOut);
    }
}
