// src/launch/process.rs

//! Runs a single plugin process to completion.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, error, info};

use crate::errors::ProcessFailure;

use super::completion::{CompletionSender, Outcome};

/// Everything needed to start one plugin, resolved up front by the launcher.
#[derive(Debug, Clone)]
pub struct ProcessSpec {
    pub plugin: String,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub log_file: PathBuf,
}

/// Run the process described by `spec` and publish exactly one outcome on
/// `done`, which is then closed.
///
/// stdout and stderr are both appended to `spec.log_file`.
pub async fn run_plugin(spec: ProcessSpec, done: CompletionSender) {
    let outcome = run_plugin_inner(&spec).await;

    match &outcome {
        Ok(()) => info!(plugin = %spec.plugin, "plugin process completed"),
        Err(err) => error!(plugin = %spec.plugin, error = %err, "plugin process failed"),
    }

    done.complete(outcome);
}

async fn run_plugin_inner(spec: &ProcessSpec) -> Outcome {
    let (stdout, stderr) = open_log(&spec.log_file)?;
    let command = spec.program.display().to_string();

    info!(
        plugin = %spec.plugin,
        cmd = %command,
        args = ?spec.args,
        log = %spec.log_file.display(),
        "starting plugin process"
    );

    let mut child = Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(stderr)
        .spawn()
        .map_err(|e| ProcessFailure::Spawn {
            command: command.clone(),
            message: e.to_string(),
        })?;

    debug!(plugin = %spec.plugin, pid = ?child.id(), "plugin process spawned");

    let status = child.wait().await.map_err(|e| ProcessFailure::Wait {
        command: command.clone(),
        message: e.to_string(),
    })?;

    info!(
        plugin = %spec.plugin,
        exit_code = ?status.code(),
        success = status.success(),
        "plugin process exited"
    );

    if status.success() {
        Ok(())
    } else {
        Err(ProcessFailure::Exited {
            code: status.code(),
        })
    }
}

/// Open (creating parents as needed) the log file in append mode and return
/// one handle for stdout and one for stderr.
fn open_log(path: &Path) -> Result<(Stdio, Stdio), ProcessFailure> {
    let to_failure = |e: std::io::Error| ProcessFailure::LogFile {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_failure)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_failure)?;
    let err_file = file.try_clone().map_err(to_failure)?;

    Ok((Stdio::from(file), Stdio::from(err_file)))
}
