// src/errors.rs

//! Crate-wide error types.
//!
//! - [`LaunchError`] covers everything that is reported synchronously, before
//!   a process is committed to (bad config, unknown command, glue failures).
//! - [`ProcessFailure`] is the asynchronous failure delivered through a
//!   [`Completion`](crate::launch::Completion) once a spawn was attempted.
//! - [`ClockStopped`] is returned when ticking a clock that has been stopped.
//! - [`NoRuntime`] is returned when a wall clock is built outside Tokio.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("invalid launch config for plugin '{plugin}': {source}")]
    ConfigDecode {
        plugin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("command '{command}' not found on PATH: {source}")]
    CommandNotFound {
        command: String,
        #[source]
        source: which::Error,
    },

    #[error("launch requires a running Tokio runtime")]
    NoRuntime,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why a spawned plugin did not complete successfully.
///
/// Cloneable so every holder of the same completion signal observes an
/// identical value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessFailure {
    #[error("cannot open log file {path}: {message}")]
    LogFile { path: String, message: String },

    #[error("failed to start '{command}': {message}")]
    Spawn { command: String, message: String },

    #[error("failed waiting on '{command}': {message}")]
    Wait { command: String, message: String },

    #[error("process exited with {}", exit_label(.code))]
    Exited { code: Option<i32> },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("clock stopped")]
pub struct ClockStopped;

/// Returned by constructors that spawn onto the current Tokio runtime when
/// there is none.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("a running Tokio runtime is required")]
pub struct NoRuntime;

pub type Result<T> = std::result::Result<T, LaunchError>;
