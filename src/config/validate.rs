// src/config/validate.rs

use crate::config::model::{PluginsFile, RawPluginsFile};
use crate::errors::{LaunchError, Result};

impl TryFrom<RawPluginsFile> for PluginsFile {
    type Error = crate::errors::LaunchError;

    fn try_from(raw: RawPluginsFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_plugins(&raw)?;
        Ok(PluginsFile::new_unchecked(raw.launcher, raw.plugin))
    }
}

fn validate_raw_plugins(cfg: &RawPluginsFile) -> Result<()> {
    ensure_has_plugins(cfg)?;
    validate_launcher_section(cfg)?;
    for name in cfg.plugin.keys() {
        validate_plugin_name(name)?;
    }
    Ok(())
}

fn ensure_has_plugins(cfg: &RawPluginsFile) -> Result<()> {
    if cfg.plugin.is_empty() {
        return Err(LaunchError::ConfigError(
            "plugins file must contain at least one [plugin.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_launcher_section(cfg: &RawPluginsFile) -> Result<()> {
    if let Some(dir) = cfg.launcher.log_dir.as_deref() {
        if dir.trim().is_empty() {
            return Err(LaunchError::ConfigError(
                "[launcher].log_dir must not be empty when set".to_string(),
            ));
        }
    }
    Ok(())
}

/// A plugin name becomes a log file name, so it must be a single path
/// component.
pub fn validate_plugin_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(LaunchError::ConfigError(
            "plugin name must not be empty".to_string(),
        ));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(LaunchError::ConfigError(format!(
            "plugin name '{}' must not contain path separators",
            name
        )));
    }
    Ok(())
}
