// src/paths.rs

//! Where plugin logs go.
//!
//! The log directory is, in order of preference:
//!   - `INFRAKIT_LOG_DIR`, if set and non-empty
//!   - `<home>/.infrakit/logs`
use std::path::{Path, PathBuf};

pub const LOG_DIR_ENV_VAR: &str = "INFRAKIT_LOG_DIR";
const DEFAULT_LOG_SUBDIR: &str = ".infrakit/logs";

/// Returns the log directory derived from the environment.
pub fn default_log_dir() -> PathBuf {
    log_dir_from(std::env::var(LOG_DIR_ENV_VAR).ok())
}

/// Resolution logic behind [`default_log_dir`], with the env value injected.
pub fn log_dir_from(env_value: Option<String>) -> PathBuf {
    if let Some(dir) = env_value.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    let home = dirs::home_dir()
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(DEFAULT_LOG_SUBDIR)
}

/// The log file for `plugin` under `log_dir`: `<log_dir>/<plugin>.log`.
pub fn log_file_for(log_dir: &Path, plugin: &str) -> PathBuf {
    log_dir.join(format!("{plugin}.log"))
}
