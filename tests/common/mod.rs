#![allow(dead_code)]

use std::path::Path;

pub use pluglaunch_test_utils::builders::{missing_command, sh};
pub use pluglaunch_test_utils::{init_tracing, with_timeout};

/// Number of lines in `path`, or 0 if it does not exist.
pub fn count_lines(path: &Path) -> usize {
    std::fs::read_to_string(path)
        .map(|s| s.lines().count())
        .unwrap_or(0)
}
