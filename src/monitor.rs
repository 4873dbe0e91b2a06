// src/monitor.rs

//! Waits for a set of launched plugins, reporting the ones still running on
//! every clock tick.

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::launch::{Completion, Outcome, PluginName};

/// Final outcome of one plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOutcome {
    pub plugin: PluginName,
    pub outcome: Outcome,
}

/// Wait until every completion in `pending` has resolved.
///
/// Each tick of `clock` logs the plugins that are still running. The clock is
/// stopped before returning. If the clock stops on its own, the remaining
/// plugins are waited for without further status reports.
pub async fn monitor_until_done(
    clock: &dyn Clock,
    pending: &[(PluginName, Completion)],
) -> Vec<PluginOutcome> {
    let all_done = wait_all(pending);
    tokio::pin!(all_done);

    let mut ticking = true;
    let outcomes = loop {
        tokio::select! {
            outcomes = &mut all_done => break outcomes,
            tick = clock.next_tick(), if ticking => match tick {
                Some(_) => report_running(pending),
                None => {
                    debug!("status clock ended; waiting without status reports");
                    ticking = false;
                }
            },
        }
    };

    clock.stop();
    outcomes
}

/// Names of the plugins in `pending` whose process has not finished yet.
pub fn still_running(pending: &[(PluginName, Completion)]) -> Vec<&str> {
    pending
        .iter()
        .filter(|(_, completion)| !completion.is_finished())
        .map(|(name, _)| name.as_str())
        .collect()
}

fn report_running(pending: &[(PluginName, Completion)]) {
    let running = still_running(pending);
    if running.is_empty() {
        return;
    }
    info!(?running, "plugins still running");
}

async fn wait_all(pending: &[(PluginName, Completion)]) -> Vec<PluginOutcome> {
    let mut outcomes = Vec::with_capacity(pending.len());
    for (plugin, completion) in pending {
        let outcome = completion.wait().await;
        if let Err(err) = &outcome {
            warn!(plugin = %plugin, error = %err, "plugin finished with failure");
        }
        outcomes.push(PluginOutcome {
            plugin: plugin.clone(),
            outcome,
        });
    }
    outcomes
}
