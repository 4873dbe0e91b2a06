// src/clock/mod.rs

//! Tick sources for time-driven scheduling.
//!
//! Code that needs to do something "every so often" reads ticks from a
//! [`Clock`] instead of owning a timer, so tests can drive it by hand:
//!
//! - [`ManualClock`] emits a tick each time [`ManualClock::tick`] is called.
//! - [`WallClock`] forwards the firings of a real timer ([`TickSource`]).
//!
//! Both share one lifecycle: running, then stopped for good. A stopped clock
//! never blocks a reader; [`Clock::next_tick`] returns `None` from then on.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::{Mutex, mpsc, watch};
use tokio::time::Instant;

pub mod manual;
pub mod wall;

pub use manual::ManualClock;
pub use wall::{OneShot, TickSource, WallClock};

/// A single clock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub at: Instant,
}

impl Tick {
    pub fn now() -> Self {
        Self { at: Instant::now() }
    }
}

/// Common interface of every clock.
pub trait Clock: Send + Sync {
    /// Next tick, or `None` once the clock has stopped and nothing is left
    /// to deliver.
    fn next_tick(&self) -> Pin<Box<dyn Future<Output = Option<Tick>> + Send + '_>>;

    /// Stop the clock. Idempotent.
    fn stop(&self);

    fn is_stopped(&self) -> bool;
}

/// Receiving end plus stop flag, shared by both clock kinds.
#[derive(Debug)]
pub(crate) struct TickStream {
    rx: Mutex<mpsc::Receiver<Tick>>,
    stopped: watch::Sender<bool>,
}

impl TickStream {
    pub(crate) fn new(rx: mpsc::Receiver<Tick>) -> Self {
        let (stopped, _) = watch::channel(false);
        Self {
            rx: Mutex::new(rx),
            stopped,
        }
    }

    /// Buffered ticks are still handed out after a stop; once they are gone
    /// this returns `None` without waiting.
    pub(crate) async fn recv(&self) -> Option<Tick> {
        let stop_rx = self.stopped.subscribe();
        let mut rx = self.rx.lock().await;

        tokio::select! {
            biased;
            tick = rx.recv() => tick,
            _ = wait_stopped(stop_rx) => rx.try_recv().ok(),
        }
    }

    pub(crate) fn stop(&self) -> bool {
        let was_stopped = self.stopped.send_replace(true);
        !was_stopped
    }

    pub(crate) fn is_stopped(&self) -> bool {
        *self.stopped.borrow()
    }

    pub(crate) fn subscribe_stop(&self) -> watch::Receiver<bool> {
        self.stopped.subscribe()
    }
}

/// Resolves once the stop flag is set.
pub(crate) async fn wait_stopped(mut stop_rx: watch::Receiver<bool>) {
    while !*stop_rx.borrow_and_update() {
        if stop_rx.changed().await.is_err() {
            return;
        }
    }
}
