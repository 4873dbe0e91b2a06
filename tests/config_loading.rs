mod common;
use crate::common::{init_tracing, sh};

use std::io::Write;

use tempfile::NamedTempFile;

use pluglaunch::config::{LaunchConfig, PluginsFile, load_and_validate};
use pluglaunch::errors::LaunchError;
use pluglaunch_test_utils::builders::PluginsFileBuilder;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn plugins_file_is_loaded_with_opaque_bodies() {
    init_tracing();

    let file = write_config(
        r#"
[launcher]
log_dir = "/var/log/plugins"

[plugin.group]
cmd = "infrakit-group"
args = ["--name", "group"]

[plugin.broken]
command = "typo"
"#,
    );

    let cfg = load_and_validate(file.path()).expect("valid plugins file");
    assert_eq!(cfg.launcher.log_dir.as_deref(), Some("/var/log/plugins"));
    assert_eq!(cfg.plugin.len(), 2);

    let group: LaunchConfig = cfg.plugin["group"].decode().expect("group decodes");
    assert_eq!(group.cmd, "infrakit-group");
    assert_eq!(group.args, vec!["--name", "group"]);

    // Bodies are only checked when launched.
    assert!(cfg.plugin["broken"].decode::<LaunchConfig>().is_err());
}

#[test]
fn empty_plugins_file_is_rejected() {
    let file = write_config("[launcher]\n");

    match load_and_validate(file.path()) {
        Err(LaunchError::ConfigError(msg)) => assert!(msg.contains("at least one")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn plugin_names_must_be_single_path_components() {
    let file = write_config(
        r#"
[plugin."../escape"]
cmd = "true"
"#,
    );

    match load_and_validate(file.path()) {
        Err(LaunchError::ConfigError(msg)) => assert!(msg.contains("../escape")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn blank_log_dir_is_rejected() {
    let file = write_config(
        r#"
[launcher]
log_dir = "  "

[plugin.a]
cmd = "true"
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(LaunchError::ConfigError(_))
    ));
}

#[test]
fn invalid_toml_is_a_toml_error() {
    let file = write_config("[plugin.a\ncmd = ");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(LaunchError::TomlError(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        load_and_validate("/definitely/not/here/Plugins.toml"),
        Err(LaunchError::IoError(_))
    ));
}

#[test]
fn builder_produces_validated_file() {
    let cfg = PluginsFileBuilder::new()
        .with_log_dir("/tmp/logs")
        .with_plugin("echo", sh("echo hi"))
        .build();

    let echo: LaunchConfig = cfg.plugin["echo"].decode().unwrap();
    assert_eq!(echo, LaunchConfig::new("sh").arg("-c").arg("echo hi"));
    assert_eq!(cfg.launcher.log_dir.as_deref(), Some("/tmp/logs"));
}

#[test]
fn raw_file_with_bad_name_fails_conversion() {
    let mut raw = PluginsFileBuilder::new()
        .with_plugin("good", sh("true"))
        .build_raw();
    raw.plugin
        .insert("bad/name".to_string(), toml::Value::String("ignored".to_string()));

    match PluginsFile::try_from(raw) {
        Err(LaunchError::ConfigError(msg)) => assert!(msg.contains("bad/name")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}
