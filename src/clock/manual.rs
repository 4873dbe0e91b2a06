// src/clock/manual.rs

use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::debug;

use crate::errors::ClockStopped;

use super::{Clock, Tick, TickStream, wait_stopped};

/// A clock that only ticks when told to. Meant for tests.
///
/// Ticks are delivered in call order, one per [`tick`](Self::tick). With the
/// default capacity of 1, `tick` waits while a previous tick is still unread.
#[derive(Debug)]
pub struct ManualClock {
    tx: Mutex<Option<mpsc::Sender<Tick>>>,
    stream: TickStream,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// A clock that buffers up to `capacity` unread ticks (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        Self {
            tx: Mutex::new(Some(tx)),
            stream: TickStream::new(rx),
        }
    }

    /// Emit one tick.
    ///
    /// Fails if the clock is stopped before the tick could be handed over.
    pub async fn tick(&self) -> Result<(), ClockStopped> {
        let tx = self
            .tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ClockStopped)?;

        tokio::select! {
            biased;
            _ = wait_stopped(self.stream.subscribe_stop()) => Err(ClockStopped),
            sent = tx.send(Tick::now()) => sent.map_err(|_| ClockStopped),
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn next_tick(&self) -> Pin<Box<dyn Future<Output = Option<Tick>> + Send + '_>> {
        Box::pin(self.stream.recv())
    }

    fn stop(&self) {
        if self.stream.stop() {
            debug!("manual clock stopped");
        }
        // Dropping the last sender closes the channel once in-flight ticks
        // have given up.
        self.tx.lock().unwrap_or_else(PoisonError::into_inner).take();
    }

    fn is_stopped(&self) -> bool {
        self.stream.is_stopped()
    }
}
