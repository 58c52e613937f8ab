// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tab-delimited text codec for event logs.
//!
//! One event per line:
//! `<offset:%.4f>\t<device>\t<action>\t<control-token>\t<x-or-empty>\t<y-or-empty>`
//!
//! Decoding is tolerant: malformed lines are skipped and counted, malformed
//! position fields degrade to "no position," and unknown control tokens are
//! preserved as opaque values. A single bad line never fails a load.

use crate::event::{Action, Control, Device, Event};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from reading or writing log files.
///
/// Note that an existing file decoding to zero events is not a codec error;
/// callers distinguish "not found" from "empty" themselves.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("log file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("log file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a tolerant decode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Decoded {
    /// Events recovered, in file order.
    pub events: Vec<Event>,
    /// Non-blank lines that could not be decoded.
    pub skipped: usize,
}

/// Encode events into the on-disk text form.
///
/// Offsets carry exactly four decimal digits so replay timing survives the
/// text round-trip at sub-millisecond granularity.
pub fn encode(events: &[Event]) -> String {
    let mut out = String::new();
    for event in events {
        let (x, y) = match event.position {
            Some((x, y)) => (x.to_string(), y.to_string()),
            None => (String::new(), String::new()),
        };
        out.push_str(&format!(
            "{:.4}\t{}\t{}\t{}\t{}\t{}\n",
            event.offset,
            event.device.tag(),
            event.action.tag(),
            event.control.token(),
            x,
            y,
        ));
    }
    out
}

/// Decode log text, accumulating valid events and counting skipped lines.
pub fn decode(text: &str) -> Decoded {
    let mut decoded = Decoded::default();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match decode_line(line) {
            Some(event) => decoded.events.push(event),
            None => decoded.skipped += 1,
        }
    }
    decoded
}

fn decode_line(line: &str) -> Option<Event> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 4 {
        return None;
    }

    // inf/NaN offsets cannot be scheduled; the line counts as malformed.
    let offset: f64 = parts[0].trim().parse().ok().filter(|o: &f64| o.is_finite())?;
    let device = Device::from_tag(parts[1].trim())?;
    let action = Action::from_tag(parts[2].trim())?;
    let control = Control::parse(device, parts[3]);

    let x_str = parts.get(4).map(|s| s.trim()).unwrap_or("");
    let y_str = parts.get(5).map(|s| s.trim()).unwrap_or("");
    let position = if !x_str.is_empty() && !y_str.is_empty() {
        match (x_str.parse::<f64>(), y_str.parse::<f64>()) {
            (Ok(x), Ok(y)) => Some((x, y)),
            _ => None,
        }
    } else {
        None
    };

    Some(Event {
        offset,
        device,
        action,
        control,
        position,
    })
}

/// Read and decode a log file.
///
/// A missing file is reported as [`CodecError::NotFound`], distinct from
/// both I/O failures and an empty decode.
pub fn read_log(path: &Path) -> Result<Decoded, CodecError> {
    if !path.exists() {
        return Err(CodecError::NotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    Ok(decode(&text))
}

/// Write a complete log file from the full event sequence (never appends).
pub fn write_log(path: &Path, events: &[Event]) -> Result<(), CodecError> {
    std::fs::write(path, encode(events))?;
    Ok(())
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
