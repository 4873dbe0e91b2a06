// src/clock/wall.rs

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, Interval, Sleep};
use tracing::debug;

use crate::errors::NoRuntime;

use super::{Clock, Tick, TickStream, wait_stopped};

/// Something that fires over time, e.g. a Tokio [`Interval`].
///
/// `fire` resolves with the firing time, or `None` once the source will never
/// fire again.
pub trait TickSource: Send + 'static {
    fn fire(&mut self) -> Pin<Box<dyn Future<Output = Option<Instant>> + Send + '_>>;
}

impl TickSource for Interval {
    fn fire(&mut self) -> Pin<Box<dyn Future<Output = Option<Instant>> + Send + '_>> {
        Box::pin(async move { Some(self.tick().await) })
    }
}

/// Timer driven from the outside: each value sent on the channel is a firing.
impl TickSource for mpsc::Receiver<Instant> {
    fn fire(&mut self) -> Pin<Box<dyn Future<Output = Option<Instant>> + Send + '_>> {
        Box::pin(self.recv())
    }
}

/// Fires exactly once, at a deadline.
#[derive(Debug)]
pub struct OneShot {
    sleep: Option<Pin<Box<Sleep>>>,
}

impl OneShot {
    pub fn after(delay: Duration) -> Self {
        Self::at(Instant::now() + delay)
    }

    pub fn at(deadline: Instant) -> Self {
        Self {
            sleep: Some(Box::pin(tokio::time::sleep_until(deadline))),
        }
    }
}

impl TickSource for OneShot {
    fn fire(&mut self) -> Pin<Box<dyn Future<Output = Option<Instant>> + Send + '_>> {
        Box::pin(async move {
            let sleep = self.sleep.as_mut()?;
            sleep.await;
            self.sleep = None;
            Some(Instant::now())
        })
    }
}

/// A clock that forwards the firings of a real timer.
///
/// Stopping the clock stops forwarding; the wrapped source is dropped when the
/// forwarding task notices. When the source runs dry the tick stream ends too.
#[derive(Debug)]
pub struct WallClock {
    stream: TickStream,
}

impl WallClock {
    /// Wrap `source` and start forwarding its firings on the current Tokio
    /// runtime.
    pub fn new<S: TickSource>(source: S) -> Result<Self, NoRuntime> {
        let runtime = Handle::try_current().map_err(|_| NoRuntime)?;

        let (tx, rx) = mpsc::channel(1);
        let stream = TickStream::new(rx);
        runtime.spawn(forward(source, tx, stream.subscribe_stop()));
        Ok(Self { stream })
    }

    /// Convenience for a periodic wall clock.
    pub fn every(period: Duration) -> Result<Self, NoRuntime> {
        // `interval` itself needs the runtime's timer.
        Handle::try_current().map_err(|_| NoRuntime)?;
        Self::new(tokio::time::interval(period))
    }
}

impl Clock for WallClock {
    fn next_tick(&self) -> Pin<Box<dyn Future<Output = Option<Tick>> + Send + '_>> {
        Box::pin(self.stream.recv())
    }

    fn stop(&self) {
        if self.stream.stop() {
            debug!("wall clock stopped");
        }
    }

    fn is_stopped(&self) -> bool {
        self.stream.is_stopped()
    }
}

async fn forward<S: TickSource>(
    mut source: S,
    tx: mpsc::Sender<Tick>,
    stop_rx: watch::Receiver<bool>,
) {
    loop {
        let fired = tokio::select! {
            biased;
            _ = wait_stopped(stop_rx.clone()) => break,
            at = source.fire() => at,
        };

        let Some(at) = fired else {
            debug!("tick source exhausted");
            break;
        };

        tokio::select! {
            biased;
            _ = wait_stopped(stop_rx.clone()) => break,
            sent = tx.send(Tick { at }) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }

    debug!("wall clock forwarding ended");
}
