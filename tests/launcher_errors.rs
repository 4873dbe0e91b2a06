mod common;
use crate::common::{init_tracing, missing_command, sh, with_timeout};

use std::error::Error;

use pluglaunch::config::validate_plugin_name;
use pluglaunch::errors::{LaunchError, ProcessFailure};
use pluglaunch::launch::{Config, LaunchConfig, Launcher, OsLauncher};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn unknown_command_fails_synchronously_and_can_be_retried() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let marker = dir.path().join("started.txt");
    let launcher = OsLauncher::new(dir.path().join("logs"));

    match launcher.launch("retry", &missing_command()) {
        Err(LaunchError::CommandNotFound { command, .. }) => {
            assert_eq!(command, "pluglaunch-test-no-such-command-4f1c");
        }
        Err(e) => panic!("Expected CommandNotFound, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }

    assert!(launcher.record("retry").is_none());
    assert!(launcher.plugins().is_empty());

    let completion = launcher.launch("retry", &sh(&format!("touch '{}'", marker.display())))?;
    assert_eq!(with_timeout(completion.wait()).await, Ok(()));
    assert!(marker.exists(), "corrected launch must spawn the process");
    Ok(())
}

#[tokio::test]
async fn malformed_config_fails_synchronously_without_state() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let launcher = OsLauncher::new(dir.path());

    let missing_cmd = Config::from_toml_str(r#"args = ["-c", "true"]"#)?;
    let wrong_type = Config::from_toml_str(r#"cmd = 5"#)?;
    let not_a_table = Config::from(toml::Value::String("sh".to_string()));

    for config in [missing_cmd, wrong_type, not_a_table] {
        match launcher.launch("broken", &config) {
            Err(LaunchError::ConfigDecode { plugin, .. }) => assert_eq!(plugin, "broken"),
            Err(e) => panic!("Expected ConfigDecode, got: {:?}", e),
            Ok(_) => panic!("Expected error, got Ok"),
        }
    }

    assert!(launcher.record("broken").is_none());
    Ok(())
}

#[test]
fn config_accepts_capitalised_keys_and_ignores_unknown_ones() -> TestResult {
    let config = Config::from_toml_str(
        r#"
Cmd = "infrakit-group"
Args = ["--name", "group"]
restart = "never"
"#,
    )?;

    let decoded: LaunchConfig = config.decode()?;
    assert_eq!(decoded, LaunchConfig::new("infrakit-group").arg("--name").arg("group"));

    let bare: LaunchConfig = Config::from_toml_str(r#"cmd = "true""#)?.decode()?;
    assert!(bare.args.is_empty());
    Ok(())
}

#[tokio::test]
async fn non_zero_exit_is_delivered_through_completion() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let launcher = OsLauncher::new(dir.path());

    let completion = launcher.launch("failing", &sh("exit 7"))?;
    let outcome = with_timeout(completion.wait()).await;

    assert_eq!(outcome, Err(ProcessFailure::Exited { code: Some(7) }));
    assert_eq!(
        outcome.unwrap_err().to_string(),
        "process exited with status 7"
    );
    Ok(())
}

#[tokio::test]
async fn output_is_written_to_per_plugin_log_file() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let log_dir = dir.path().join("nested").join("logs");
    let launcher = OsLauncher::new(&log_dir);

    let completion = launcher.launch("chatty", &sh("echo to-stdout; echo to-stderr >&2"))?;
    assert_eq!(with_timeout(completion.wait()).await, Ok(()));

    let record = launcher.record("chatty").expect("record must exist");
    assert_eq!(record.log, log_dir.join("chatty.log"));

    let contents = std::fs::read_to_string(&record.log)?;
    assert!(contents.contains("to-stdout"), "log was: {contents}");
    assert!(contents.contains("to-stderr"), "log was: {contents}");
    Ok(())
}

#[tokio::test]
async fn unusable_log_dir_is_reported_asynchronously() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file")?;

    let launcher = OsLauncher::new(blocker.join("logs"));

    // Launch itself succeeds; the failure only shows up once spawning starts.
    let completion = launcher.launch("nolog", &sh("true"))?;
    match with_timeout(completion.wait()).await {
        Err(ProcessFailure::LogFile { path, .. }) => assert!(path.ends_with("nolog.log")),
        other => panic!("Expected LogFile failure, got: {:?}", other),
    }
    assert!(launcher.record("nolog").is_some());
    Ok(())
}

#[test]
fn launch_outside_runtime_is_rejected_without_state() {
    let launcher = OsLauncher::new("/tmp/pluglaunch-unused");

    match launcher.launch("no-runtime", &sh("true")) {
        Err(LaunchError::NoRuntime) => {}
        Err(e) => panic!("Expected NoRuntime, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
    assert!(launcher.record("no-runtime").is_none());
}

#[tokio::test]
async fn launch_uses_plugin_name_verbatim_for_log_path() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let log_dir = dir.path().join("logs");
    let launcher = OsLauncher::new(&log_dir);

    // Name hygiene is the caller's job; the loader-side check catches this.
    assert!(validate_plugin_name("../outside").is_err());

    let completion = launcher.launch("../outside", &sh("true"))?;
    assert_eq!(with_timeout(completion.wait()).await, Ok(()));

    let record = launcher.record("../outside").expect("record must exist");
    assert_eq!(record.log, log_dir.join("../outside.log"));
    assert!(dir.path().join("outside.log").exists());
    Ok(())
}
