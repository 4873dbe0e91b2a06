// src/config/mod.rs

//! Configuration for pluglaunch.
//!
//! - The opaque per-plugin launch blob and its OS decoding (`model.rs`).
//! - Loading a plugins file from disk (`loader.rs`).
//! - Name checks applied before anything is launched (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{Config, LaunchConfig, LauncherSection, PluginsFile, RawPluginsFile};
pub use validate::validate_plugin_name;
