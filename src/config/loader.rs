// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{PluginsFile, RawPluginsFile};
use crate::errors::Result;

/// Load a plugins file from a given path and return the raw `RawPluginsFile`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] for the
/// checked version.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawPluginsFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawPluginsFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a plugins file from path and validate it.
///
/// Checks that there is at least one plugin and that every plugin name is
/// usable as a log file name. The plugin bodies themselves are left opaque.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<PluginsFile> {
    let raw = load_from_path(&path)?;
    let config = PluginsFile::try_from(raw)?;
    Ok(config)
}
