// src/launch/os.rs

//! Launcher backend that runs each plugin as an OS process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::config::{Config, LaunchConfig};
use crate::errors::{LaunchError, Result};
use crate::paths::log_file_for;

use super::completion::{Completion, completion_channel};
use super::process::{ProcessSpec, run_plugin};
use super::{Launcher, PluginName};

/// State kept for every plugin that has been launched.
#[derive(Debug, Clone)]
pub struct LaunchRecord {
    /// File receiving the process' stdout and stderr.
    pub log: PathBuf,
    /// Signal for this launch. Every later caller gets a clone of it.
    pub completion: Completion,
}

/// Launches plugins as OS processes, at most once per name.
///
/// Records are never removed: once a plugin has been launched, later calls
/// for the same name join the original signal, even after it has resolved.
#[derive(Debug)]
pub struct OsLauncher {
    log_dir: PathBuf,
    plugins: Mutex<HashMap<PluginName, LaunchRecord>>,
}

impl OsLauncher {
    pub const NAME: &'static str = "os";

    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            plugins: Mutex::new(HashMap::new()),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Snapshot of the record for `plugin`, if it was launched.
    pub fn record(&self, plugin: &str) -> Option<LaunchRecord> {
        self.table().get(plugin).cloned()
    }

    /// Names of every launched plugin, sorted.
    pub fn plugins(&self) -> Vec<PluginName> {
        let mut names: Vec<_> = self.table().keys().cloned().collect();
        names.sort();
        names
    }

    fn table(&self) -> MutexGuard<'_, HashMap<PluginName, LaunchRecord>> {
        // The table is only ever inserted into, so a poisoned guard still
        // holds consistent data.
        self.plugins.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Launcher for OsLauncher {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn launch(&self, plugin: &str, config: &Config) -> Result<Completion> {
        let launch_config: LaunchConfig =
            config.decode().map_err(|source| LaunchError::ConfigDecode {
                plugin: plugin.to_string(),
                source,
            })?;

        // Held until return: the lookup, the PATH check and the insert form
        // one decision, serialized across all plugin names.
        let mut plugins = self.table();

        if let Some(existing) = plugins.get(plugin) {
            debug!(plugin, "plugin already launched; joining existing completion");
            return Ok(existing.completion.clone());
        }

        let program = which::which(&launch_config.cmd).map_err(|source| {
            warn!(plugin, cmd = %launch_config.cmd, "command not found on PATH");
            LaunchError::CommandNotFound {
                command: launch_config.cmd.clone(),
                source,
            }
        })?;

        let runtime = Handle::try_current().map_err(|_| LaunchError::NoRuntime)?;

        let (done, completion) = completion_channel();
        let record = LaunchRecord {
            log: log_file_for(&self.log_dir, plugin),
            completion: completion.clone(),
        };

        let spec = ProcessSpec {
            plugin: plugin.to_string(),
            program,
            args: launch_config.args,
            log_file: record.log.clone(),
        };

        info!(
            plugin,
            cmd = %launch_config.cmd,
            log = %record.log.display(),
            "launching plugin"
        );

        plugins.insert(plugin.to_string(), record);
        runtime.spawn(run_plugin(spec, done));

        Ok(completion)
    }
}
