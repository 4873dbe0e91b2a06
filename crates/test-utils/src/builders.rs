#![allow(dead_code)]

use std::collections::BTreeMap;

use pluglaunch::config::{Config, LaunchConfig, LauncherSection, PluginsFile, RawPluginsFile};

/// Launch config running `script` through `sh -c`.
pub fn sh(script: &str) -> Config {
    LaunchConfig::new("sh").arg("-c").arg(script).into()
}

/// Launch config for a command that is not on any `PATH`.
pub fn missing_command() -> Config {
    LaunchConfig::new("pluglaunch-test-no-such-command-4f1c").into()
}

/// Builder for `PluginsFile` to simplify test setup.
pub struct PluginsFileBuilder {
    config: RawPluginsFile,
}

impl PluginsFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawPluginsFile {
                launcher: LauncherSection::default(),
                plugin: BTreeMap::new(),
            },
        }
    }

    pub fn with_plugin(mut self, name: &str, config: Config) -> Self {
        self.config
            .plugin
            .insert(name.to_string(), config.as_value().clone());
        self
    }

    pub fn with_log_dir(mut self, dir: &str) -> Self {
        self.config.launcher.log_dir = Some(dir.to_string());
        self
    }

    pub fn build_raw(self) -> RawPluginsFile {
        self.config
    }

    pub fn build(self) -> PluginsFile {
        PluginsFile::try_from(self.config).expect("Failed to build valid plugins file from builder")
    }
}

impl Default for PluginsFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
