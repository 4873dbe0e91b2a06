// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Opaque launch configuration for a single plugin.
///
/// The launcher does not know the shape up front; each backend decodes it into
/// whatever it needs (the OS backend wants a [`LaunchConfig`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Config(toml::Value);

impl Config {
    pub fn new(value: toml::Value) -> Self {
        Self(value)
    }

    /// Parse a TOML document into an opaque config.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        let table: toml::Table = toml::from_str(s)?;
        Ok(Self(toml::Value::Table(table)))
    }

    /// Decode the blob into a concrete type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, toml::de::Error> {
        self.0.clone().try_into()
    }

    pub fn as_value(&self) -> &toml::Value {
        &self.0
    }
}

impl From<toml::Value> for Config {
    fn from(value: toml::Value) -> Self {
        Self(value)
    }
}

impl From<LaunchConfig> for Config {
    fn from(cfg: LaunchConfig) -> Self {
        let mut table = toml::Table::new();
        table.insert("cmd".to_string(), toml::Value::String(cfg.cmd));
        table.insert(
            "args".to_string(),
            toml::Value::Array(cfg.args.into_iter().map(toml::Value::String).collect()),
        );
        Self(toml::Value::Table(table))
    }
}

/// How to start an OS process. `cmd` must be resolvable on `PATH`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LaunchConfig {
    #[serde(alias = "Cmd")]
    pub cmd: String,

    #[serde(default, alias = "Args")]
    pub args: Vec<String>,
}

impl LaunchConfig {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// `[launcher]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LauncherSection {
    /// Overrides `INFRAKIT_LOG_DIR` and the home-based default.
    #[serde(default)]
    pub log_dir: Option<String>,
}

/// Raw plugins file as deserialized from TOML, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPluginsFile {
    #[serde(default)]
    pub launcher: LauncherSection,

    #[serde(default)]
    pub plugin: BTreeMap<String, toml::Value>,
}

/// Validated plugins file.
///
/// Plugin bodies stay opaque here; they are only decoded when launched, so a
/// malformed entry surfaces as a launch error for that plugin alone.
#[derive(Debug, Clone, Default)]
pub struct PluginsFile {
    pub launcher: LauncherSection,
    pub plugin: BTreeMap<String, Config>,
}

impl PluginsFile {
    pub(crate) fn new_unchecked(
        launcher: LauncherSection,
        plugin: BTreeMap<String, toml::Value>,
    ) -> Self {
        Self {
            launcher,
            plugin: plugin
                .into_iter()
                .map(|(name, value)| (name, Config::new(value)))
                .collect(),
        }
    }
}
