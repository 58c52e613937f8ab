// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Synthetic-input injection capability.
//!
//! The real OS-level primitive is an external collaborator; this module
//! defines the seam the replay engine and macro runner drive, plus a dry-run
//! implementation that prints each injected action to stdout.

use keyrec_capture::Control;
use std::io::{self, Write};
use thiserror::Error;

/// A single injection call that could not be delivered.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("failed to {op} {control}: {reason}")]
pub struct InjectError {
    /// The operation that failed, e.g. `"press key"`.
    pub op: &'static str,
    /// Token of the control involved.
    pub control: String,
    pub reason: String,
}

impl InjectError {
    pub fn new(op: &'static str, control: &Control, reason: impl Into<String>) -> Self {
        Self {
            op,
            control: control.token(),
            reason: reason.into(),
        }
    }
}

/// Synthetic-input injection seam.
///
/// Failures during normal replay propagate as a run failure; failures during
/// stuck-input cleanup are swallowed per-item by the caller.
pub trait Injector: Send + Sync {
    fn press_key(&self, control: &Control) -> Result<(), InjectError>;
    fn release_key(&self, control: &Control) -> Result<(), InjectError>;
    fn move_cursor(&self, x: f64, y: f64) -> Result<(), InjectError>;
    fn press_button(&self, control: &Control) -> Result<(), InjectError>;
    fn release_button(&self, control: &Control) -> Result<(), InjectError>;
    fn click_button(&self, control: &Control) -> Result<(), InjectError>;
}

/// Dry-run injector: prints each action to stdout, one per line.
///
/// This is the binary's shipped target; wiring a real OS injector means
/// implementing [`Injector`] over the platform primitive instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceInjector;

impl TraceInjector {
    pub fn new() -> Self {
        Self
    }

    fn trace(line: std::fmt::Arguments<'_>) -> Result<(), InjectError> {
        // Stdout being gone (closed pipe) is not an injection failure worth
        // aborting a dry run for.
        let _ = writeln!(io::stdout(), "{}", line);
        Ok(())
    }
}


impl Injector for TraceInjector {
    fn press_key(&self, control: &Control) -> Result<(), InjectError> {
        Self::trace(format_args!("key down {}", control))
    }

    fn release_key(&self, control: &Control) -> Result<(), InjectError> {
        Self::trace(format_args!("key up {}", control))
    }

    fn move_cursor(&self, x: f64, y: f64) -> Result<(), InjectError> {
        Self::trace(format_args!("cursor {} {}", x, y))
    }

    fn press_button(&self, control: &Control) -> Result<(), InjectError> {
        Self::trace(format_args!("button down {}", control))
    }

    fn release_button(&self, control: &Control) -> Result<(), InjectError> {
        Self::trace(format_args!("button up {}", control))
    }

    fn click_button(&self, control: &Control) -> Result<(), InjectError> {
        Self::trace(format_args!("button click {}", control))
    }
}
