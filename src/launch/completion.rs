// src/launch/completion.rs

//! One-shot completion signal shared by every caller that launched (or joined)
//! the same plugin.
//!
//! Built on `tokio::sync::watch`: the single writer publishes at most one
//! outcome and is then dropped, which closes the channel. Readers treat
//! "closed without a value" the same as success.

use tokio::sync::watch;

use crate::errors::ProcessFailure;

/// Final result of a launched plugin process.
pub type Outcome = std::result::Result<(), ProcessFailure>;

/// Create a connected writer/reader pair.
pub fn completion_channel() -> (CompletionSender, Completion) {
    let (tx, rx) = watch::channel(None);
    (CompletionSender { tx }, Completion { rx })
}

/// Write half. Owned exclusively by the task running the process.
#[derive(Debug)]
pub struct CompletionSender {
    tx: watch::Sender<Option<Outcome>>,
}

impl CompletionSender {
    /// Publish the outcome and close the signal.
    pub fn complete(self, outcome: Outcome) {
        // send_replace never fails, even when every reader is gone.
        self.tx.send_replace(Some(outcome));
    }
}

/// Read half, returned by `Launcher::launch`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Completion {
    rx: watch::Receiver<Option<Outcome>>,
}

impl Completion {
    /// Wait for the final outcome.
    ///
    /// Returns immediately if it has already been delivered.
    pub async fn wait(&self) -> Outcome {
        let mut rx = self.rx.clone();
        loop {
            if let Some(outcome) = rx.borrow_and_update().clone() {
                return outcome;
            }
            if rx.changed().await.is_err() {
                // Writer dropped without publishing.
                return rx.borrow().clone().unwrap_or(Ok(()));
            }
        }
    }

    /// The outcome if the process has finished, without waiting.
    pub fn try_outcome(&self) -> Option<Outcome> {
        if let Some(outcome) = self.rx.borrow().clone() {
            return Some(outcome);
        }
        if self.rx.has_changed().is_err() {
            return Some(Ok(()));
        }
        None
    }

    pub fn is_finished(&self) -> bool {
        self.try_outcome().is_some()
    }

    /// True if both handles observe the same launch.
    pub fn same_signal(&self, other: &Completion) -> bool {
        self.rx.same_channel(&other.rx)
    }
}
