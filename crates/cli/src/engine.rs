// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Replay engine: drives recorded events back through the injection seam at
//! a scaled rate, with cooperative cancellation and stuck-input cleanup.
//!
//! Each event's wall-clock instant is computed against the run start
//! (`(offset - first_offset) / speed`), so sleep error never accumulates
//! across events. The shared cancel flag is consulted once per event, before
//! its wait; a cancelled run executes no partial event.

use crate::diag::print_warning;
use crate::inject::{InjectError, Injector};
use crate::session::CancelFlag;
use crate::time::Clock;
use keyrec_capture::{Action, Control, Device, Event};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// How a replay run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// Nothing to replay: the input sequence was empty.
    Empty,
    /// All events executed.
    Completed { executed: usize },
    /// Halted by the shared cancellation flag.
    Cancelled { executed: usize },
}

/// A replay run that failed mid-flight.
///
/// Held-input cleanup has already run by the time this is returned.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("injection failed during replay: {0}")]
    Injection(#[from] InjectError),
}

/// Replays event sequences through an injector on a clock.
///
/// Callers supply events sorted by ascending offset. Multiple runs may be in
/// flight at once; they all observe the same cancel flag, so a single abort
/// stops every one of them.
pub struct Replayer {
    injector: Arc<dyn Injector>,
    clock: Arc<dyn Clock>,
    cancel: CancelFlag,
}

/// Keys and buttons currently pressed by one run, released on the way out.
/// Local to the run, never shared.
struct HeldInput {
    keys: HashSet<Control>,
    buttons: HashSet<Control>,
}

impl Replayer {
    pub fn new(injector: Arc<dyn Injector>, clock: Arc<dyn Clock>, cancel: CancelFlag) -> Self {
        Self {
            injector,
            clock,
            cancel,
        }
    }

    /// Replay `events` at `speed` (multiplier > 1.0 plays faster).
    ///
    /// Resets the cancel flag at the very start (a stale abort cannot block
    /// a fresh run) and again on the way out (a consumed abort does not leak
    /// into future runs). On cancellation, injection failure, or normal
    /// completion, anything still held is forcibly released; a release that
    /// itself fails is warned about and skipped so the rest still go out.
    pub async fn run(&self, events: &[Event], speed: f64) -> Result<ReplayOutcome, ReplayError> {
        self.cancel.reset();
        if events.is_empty() {
            return Ok(ReplayOutcome::Empty);
        }

        let mut held = HeldInput {
            keys: HashSet::new(),
            buttons: HashSet::new(),
        };
        let start = self.clock.now();
        let first_offset = events[0].offset;
        let mut executed = 0usize;
        let mut cancelled = false;
        let mut failure: Option<InjectError> = None;

        for event in events {
            if self.cancel.is_set() {
                cancelled = true;
                break;
            }

            // An offset too extreme for a Duration degrades to no wait
            // rather than failing the run.
            let scaled = (event.offset - first_offset).max(0.0) / speed;
            let scheduled = Duration::try_from_secs_f64(scaled).unwrap_or(Duration::ZERO);
            let elapsed = self.clock.now().saturating_sub(start);
            if scheduled > elapsed {
                self.clock.sleep(scheduled - elapsed).await;
            }

            if let Err(err) = self.execute(event, &mut held) {
                failure = Some(err);
                break;
            }
            executed += 1;
        }

        self.release_held(&held);
        self.cancel.reset();

        match failure {
            Some(err) => Err(err.into()),
            None if cancelled => Ok(ReplayOutcome::Cancelled { executed }),
            None => Ok(ReplayOutcome::Completed { executed }),
        }
    }

    fn execute(&self, event: &Event, held: &mut HeldInput) -> Result<(), InjectError> {
        match event.device {
            Device::Keyboard => match event.action {
                Action::Press => {
                    self.injector.press_key(&event.control)?;
                    held.keys.insert(event.control.clone());
                }
                Action::Release => {
                    self.injector.release_key(&event.control)?;
                    held.keys.remove(&event.control);
                }
                // Click is mouse-only; a hand-edited log claiming otherwise
                // is ignored, matching decode tolerance elsewhere.
                Action::Click => {}
            },
            Device::Mouse => {
                if let Some((x, y)) = event.position {
                    self.injector.move_cursor(x, y)?;
                }
                match event.action {
                    Action::Press => {
                        self.injector.press_button(&event.control)?;
                        held.buttons.insert(event.control.clone());
                    }
                    Action::Release => {
                        self.injector.release_button(&event.control)?;
                        held.buttons.remove(&event.control);
                    }
                    Action::Click => {
                        self.injector.click_button(&event.control)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Release anything still pressed, swallowing per-item failures so one
    /// stuck key cannot block the cleanup of the rest.
    fn release_held(&self, held: &HeldInput) {
        for key in &held.keys {
            if let Err(err) = self.injector.release_key(key) {
                print_warning(format_args!("could not release stuck key: {}", err));
            }
        }
        for button in &held.buttons {
            if let Err(err) = self.injector.release_button(button) {
                print_warning(format_args!("could not release stuck button: {}", err));
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
