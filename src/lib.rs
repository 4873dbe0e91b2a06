// src/lib.rs

pub mod cli;
pub mod clock;
pub mod config;
pub mod errors;
pub mod launch;
pub mod logging;
pub mod monitor;
pub mod paths;

use std::path::PathBuf;

use anyhow::{Result, bail};
use tracing::{error, info, warn};

use crate::cli::CliArgs;
use crate::clock::WallClock;
use crate::config::loader::load_and_validate;
use crate::config::{Config, LaunchConfig, PluginsFile};
use crate::launch::{Completion, Launcher, OsLauncher, PluginName};
use crate::monitor::monitor_until_done;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - plugins file loading
/// - the OS launcher
/// - a wall clock driving periodic status reports
/// - Ctrl-C handling (stops waiting; plugins keep running)
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;
    let selected = select_plugins(&cfg, &args.plugins)?;

    if args.dry_run {
        print_dry_run(&cfg, &selected);
        return Ok(());
    }

    let log_dir = resolve_log_dir(args.log_dir.as_deref(), &cfg);
    let launcher = OsLauncher::new(log_dir);
    info!(
        launcher = launcher.name(),
        log_dir = %launcher.log_dir().display(),
        "launcher ready"
    );

    let (pending, launch_failures) = launch_all(&launcher, &selected);

    let clock = WallClock::every(args.status_interval)?;
    let outcomes = tokio::select! {
        outcomes = monitor_until_done(&clock, &pending) => outcomes,
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                warn!(error = %e, "failed to listen for Ctrl+C");
            }
            info!("interrupted; leaving launched plugins running");
            return Ok(());
        }
    };

    let failed: Vec<_> = outcomes
        .iter()
        .filter(|o| o.outcome.is_err())
        .map(|o| o.plugin.as_str())
        .collect();

    info!(
        launched = pending.len(),
        failed = failed.len(),
        "all launched plugins finished"
    );

    if launch_failures > 0 || !failed.is_empty() {
        bail!(
            "{} plugin(s) could not be launched, {} failed: {:?}",
            launch_failures,
            failed.len(),
            failed
        );
    }
    Ok(())
}

/// Pick the plugins to launch. An empty selection means all of them.
fn select_plugins<'a>(
    cfg: &'a PluginsFile,
    requested: &[String],
) -> Result<Vec<(&'a String, &'a Config)>> {
    if requested.is_empty() {
        return Ok(cfg.plugin.iter().collect());
    }

    requested
        .iter()
        .map(|name| match cfg.plugin.get_key_value(name) {
            Some(entry) => Ok(entry),
            None => bail!("plugin '{}' is not defined in the plugins file", name),
        })
        .collect()
}

/// `--log-dir`, then `[launcher].log_dir`, then `INFRAKIT_LOG_DIR` / home.
fn resolve_log_dir(cli_dir: Option<&str>, cfg: &PluginsFile) -> PathBuf {
    cli_dir
        .or(cfg.launcher.log_dir.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(paths::default_log_dir)
}

/// Launch every selected plugin, returning the completions of those that
/// started and the number that failed synchronously.
fn launch_all(
    launcher: &dyn Launcher,
    selected: &[(&String, &Config)],
) -> (Vec<(PluginName, Completion)>, usize) {
    let mut pending = Vec::with_capacity(selected.len());
    let mut failures = 0;

    for (name, config) in selected {
        match launcher.launch(name, config) {
            Ok(completion) => pending.push(((*name).clone(), completion)),
            Err(err) => {
                error!(plugin = %name, error = %err, "plugin launch failed");
                failures += 1;
            }
        }
    }

    (pending, failures)
}

fn print_dry_run(cfg: &PluginsFile, selected: &[(&String, &Config)]) {
    println!("pluglaunch dry-run");
    if let Some(ref dir) = cfg.launcher.log_dir {
        println!("  launcher.log_dir = {dir}");
    }
    println!();

    println!("plugins ({}):", selected.len());
    for (name, config) in selected {
        println!("  - {name}");
        match config.decode::<LaunchConfig>() {
            Ok(launch) => {
                println!("      cmd: {}", launch.cmd);
                if !launch.args.is_empty() {
                    println!("      args: {:?}", launch.args);
                }
            }
            Err(e) => println!("      invalid: {e}"),
        }
    }
}
