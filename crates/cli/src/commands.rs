// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot command implementations for the non-interactive subcommands.

use crate::diag::{print_info, print_warning};
use crate::engine::{ReplayError, ReplayOutcome, Replayer};
use crate::inject::TraceInjector;
use crate::logs;
use crate::session::CancelFlag;
use crate::time::SystemClock;
use keyrec_capture::{read_log, CodecError, Decoded, Event};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Failures from the one-shot subcommands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("no latest-log pointer in '{}'", .0.display())]
    PointerMissing(PathBuf),

    #[error(transparent)]
    Replay(#[from] ReplayError),

    #[error("could not serialize events: {0}")]
    Json(#[from] serde_json::Error),
}

/// `keyrec replay FILE --speed X`
pub async fn replay_file(file: &Path, speed: f64) -> Result<(), CommandError> {
    let decoded = read_log(file)?;
    warn_skipped(&decoded);
    replay_events(&decoded.events, speed).await
}

/// `keyrec latest --dir DIR --speed X`
pub async fn replay_latest(dir: &Path, speed: f64) -> Result<(), CommandError> {
    let path = logs::read_latest(dir).ok_or_else(|| CommandError::PointerMissing(dir.into()))?;
    let decoded = read_log(&path)?;
    warn_skipped(&decoded);
    print_info(format_args!("replaying '{}'", path.display()));
    replay_events(&decoded.events, speed).await
}

async fn replay_events(events: &[Event], speed: f64) -> Result<(), CommandError> {
    let engine = Replayer::new(
        Arc::new(TraceInjector::new()),
        Arc::new(SystemClock::new()),
        CancelFlag::new(),
    );
    match engine.run(events, speed).await? {
        ReplayOutcome::Empty => print_info("no events to replay"),
        ReplayOutcome::Completed { executed } => {
            print_info(format_args!("replay finished ({} events)", executed));
        }
        ReplayOutcome::Cancelled { executed } => {
            print_info(format_args!("replay stopped after {} events", executed));
        }
    }
    Ok(())
}

/// `keyrec inspect FILE [--json]`
pub fn inspect(file: &Path, json: bool) -> Result<(), CommandError> {
    let decoded = read_log(file)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&decoded.events)?);
    } else {
        for event in &decoded.events {
            match event.position {
                Some((x, y)) => println!(
                    "{:>9.4}  {:<8}  {:<7}  {}  @ {} {}",
                    event.offset,
                    event.device.tag(),
                    event.action.tag(),
                    event.control,
                    x,
                    y
                ),
                None => println!(
                    "{:>9.4}  {:<8}  {:<7}  {}",
                    event.offset,
                    event.device.tag(),
                    event.action.tag(),
                    event.control
                ),
            }
        }
        print_info(format_args!("decoded {} events", decoded.events.len()));
    }
    warn_skipped(&decoded);
    Ok(())
}

fn warn_skipped(decoded: &Decoded) {
    if decoded.skipped > 0 {
        print_warning(format_args!(
            "{} malformed lines skipped",
            decoded.skipped
        ));
    }
}
