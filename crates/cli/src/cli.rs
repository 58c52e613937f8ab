// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing.

use crate::session::SPEED_STEPS;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Keyboard/mouse event recorder and replayer
#[derive(Parser, Debug, Clone)]
#[command(name = "keyrec", version, about = "Keyboard/mouse event recorder and replayer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Interactive session driven from stdin (hotkeys arrive as key presses)
    Console {
        /// Directory holding event logs and the latest-log pointer
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Replay a log file through the dry-run injector
    Replay {
        /// Log file to replay
        file: PathBuf,

        /// Speed multiplier (0.5 to 10.0 in 0.5 steps)
        #[arg(long, default_value_t = 1.0, value_parser = parse_speed)]
        speed: f64,
    },

    /// Replay the most recently saved log
    Latest {
        /// Directory holding event logs and the latest-log pointer
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Speed multiplier (0.5 to 10.0 in 0.5 steps)
        #[arg(long, default_value_t = 1.0, value_parser = parse_speed)]
        speed: f64,
    },

    /// Decode a log file and print its events
    Inspect {
        /// Log file to decode
        file: PathBuf,

        /// Emit JSON instead of the text listing
        #[arg(long)]
        json: bool,
    },
}

/// Validate a speed argument against the allowed multiplier table.
pub fn parse_speed(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("invalid speed '{}'", s))?;
    if SPEED_STEPS.iter().any(|step| (step - value).abs() < 1e-9) {
        Ok(value)
    } else {
        Err(format!(
            "speed must be one of 0.5, 1.0, ... 10.0 (got '{}')",
            s
        ))
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
