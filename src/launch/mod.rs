// src/launch/mod.rs

//! Plugin launching.
//!
//! A [`Launcher`] turns "start plugin X with this config" into at most one
//! running process per plugin name and hands back a [`Completion`] that
//! resolves when that process ends.
//!
//! - [`os`] is the backend that starts plugins as OS processes.
//! - [`process`] runs a single process and publishes its outcome.
//! - [`completion`] is the one-shot signal shared by every caller of the
//!   same plugin.

pub mod completion;
pub mod os;
pub mod process;

pub use crate::config::{Config, LaunchConfig};
pub use completion::{Completion, CompletionSender, Outcome, completion_channel};
pub use os::{LaunchRecord, OsLauncher};

use crate::errors::Result;

/// Plugin name, the key of a launcher's state table.
pub type PluginName = String;

/// A launcher backend.
///
/// Hosts may hold several backends and pick one by [`Launcher::name`].
pub trait Launcher: Send + Sync {
    /// Identifier of this backend (e.g. `"os"`).
    fn name(&self) -> &str;

    /// Launch `plugin` unless it has been launched already.
    ///
    /// Errors detectable before spawning are returned here and leave no
    /// state behind. Anything that goes wrong later is reported through the
    /// returned [`Completion`]. Never waits for the process.
    ///
    /// `plugin` is used as given to name the log file, so callers own name
    /// hygiene: a name such as `"../x"` logs outside the log directory. Names
    /// from untrusted input should go through
    /// [`validate_plugin_name`](crate::config::validate_plugin_name) first.
    fn launch(&self, plugin: &str, config: &Config) -> Result<Completion>;
}
