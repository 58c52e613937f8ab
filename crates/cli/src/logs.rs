// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Log-file housekeeping: `event_log_<n>.txt` numbering and the
//! `latest_log.txt` pointer.
//!
//! Log files are whole-file writes; the pointer holds the file name of the
//! most recently saved log, resolved against the log directory on read.

use std::io;
use std::path::{Path, PathBuf};

pub const LOG_PREFIX: &str = "event_log_";
pub const LOG_SUFFIX: &str = ".txt";
pub const LATEST_POINTER: &str = "latest_log.txt";

/// Path of log number `index` inside `dir`.
pub fn log_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("{}{}{}", LOG_PREFIX, index, LOG_SUFFIX))
}

/// Path of the latest-log pointer file inside `dir`.
pub fn latest_pointer_path(dir: &Path) -> PathBuf {
    dir.join(LATEST_POINTER)
}

/// Highest `event_log_<n>.txt` number already present in `dir`, 0 when none.
///
/// Used at startup so new sessions continue numbering after existing logs.
/// Unreadable directories and oddly named files count as "none".
pub fn scan_log_index(dir: &Path) -> u32 {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name();
            let name = name.to_str()?;
            name.strip_prefix(LOG_PREFIX)?
                .strip_suffix(LOG_SUFFIX)?
                .parse::<u32>()
                .ok()
        })
        .max()
        .unwrap_or(0)
}

/// Point `latest_log.txt` at `log` (stored as a bare file name).
pub fn write_latest(dir: &Path, log: &Path) -> io::Result<()> {
    let name = log
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log path has no file name"))?;
    std::fs::write(latest_pointer_path(dir), name.to_string_lossy().as_bytes())
}

/// Resolve the latest-log pointer, `None` when missing or blank.
pub fn read_latest(dir: &Path) -> Option<PathBuf> {
    let text = std::fs::read_to_string(latest_pointer_path(dir)).ok()?;
    let name = text.trim();
    if name.is_empty() {
        return None;
    }
    Some(dir.join(name))
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
