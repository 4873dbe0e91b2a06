// src/cli.rs

//! CLI argument parsing using `clap`.

use std::time::Duration;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `pluglaunch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pluglaunch",
    version,
    about = "Launch plugin processes once each and wait for them to finish.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the plugins file (TOML).
    #[arg(long, value_name = "PATH", default_value = "Plugins.toml")]
    pub config: String,

    /// Plugins to launch. Launches every plugin in the file if omitted.
    #[arg(value_name = "PLUGIN")]
    pub plugins: Vec<String>,

    /// Directory for plugin log files.
    ///
    /// Overrides `[launcher].log_dir`, `INFRAKIT_LOG_DIR` and the default
    /// `~/.infrakit/logs`.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<String>,

    /// How often to report plugins that are still running (e.g. `5s`, `250ms`).
    #[arg(long, value_name = "DURATION", default_value = "5s", value_parser = parse_duration)]
    pub status_interval: Duration,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PLUGLAUNCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate the plugins file and print what would be launched.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// Parse a simple duration string like `"3s"`, `"250ms"`, `"1m"`, `"2h"`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;

    let secs_per_unit = |factor: u64| {
        value
            .checked_mul(factor)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("duration '{}' too large", s))
    };

    let duration = match unit_part.trim().to_lowercase().as_str() {
        "ms" => Duration::from_millis(value),
        "s" => Duration::from_secs(value),
        "m" => secs_per_unit(60)?,
        "h" => secs_per_unit(60 * 60)?,
        unit => {
            return Err(format!(
                "unsupported duration unit '{}'; expected ms, s, m, or h",
                unit
            ));
        }
    };

    if duration.is_zero() {
        return Err("duration must be greater than zero".to_string());
    }
    Ok(duration)
}
