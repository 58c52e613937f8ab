// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide session state: replay speed, log numbering, cancellation.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

/// Allowed replay speed multipliers, 0.5x through 10.0x in 0.5 steps.
pub const SPEED_STEPS: [f64; 20] = [
    0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 5.5, 6.0, 6.5, 7.0, 7.5, 8.0, 8.5, 9.0,
    9.5, 10.0,
];

/// Default speed index: 1.0x.
pub const DEFAULT_SPEED_INDEX: usize = 1;

/// Cooperative cancellation signal shared by every replay and macro run.
///
/// One flag stops all concurrently running tasks; per-run tokens are
/// deliberately not provided.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that in-flight replay/macro runs halt at their next checkpoint.
    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Shared session state: speed setting, log index, cancellation flag.
///
/// Handed to components by `Arc`; all fields are internally synchronized.
#[derive(Debug)]
pub struct SessionState {
    speed_index: AtomicUsize,
    /// Last used log number; the next save gets `log_index + 1`.
    log_index: AtomicU32,
    cancel: CancelFlag,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            speed_index: AtomicUsize::new(DEFAULT_SPEED_INDEX),
            log_index: AtomicU32::new(0),
            cancel: CancelFlag::new(),
        }
    }

    /// Start log numbering after existing files.
    pub fn with_log_index(self, index: u32) -> Self {
        self.log_index.store(index, Ordering::SeqCst);
        self
    }

    /// Current speed multiplier.
    pub fn speed(&self) -> f64 {
        SPEED_STEPS[self.speed_index.load(Ordering::SeqCst).min(SPEED_STEPS.len() - 1)]
    }

    /// Move one step faster. Returns the new multiplier, or `None` when
    /// already at the top of the scale (clamped, never wraps).
    pub fn speed_up(&self) -> Option<f64> {
        self.step_speed(1)
    }

    /// Move one step slower. Returns the new multiplier, or `None` when
    /// already at the bottom of the scale.
    pub fn speed_down(&self) -> Option<f64> {
        self.step_speed(-1)
    }

    fn step_speed(&self, delta: isize) -> Option<f64> {
        let updated = self
            .speed_index
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |index| {
                let next = index as isize + delta;
                if (0..SPEED_STEPS.len() as isize).contains(&next) {
                    Some(next as usize)
                } else {
                    None
                }
            });
        match updated {
            Ok(previous) => {
                let next = (previous as isize + delta) as usize;
                Some(SPEED_STEPS[next])
            }
            Err(_) => None,
        }
    }

    /// Last used log number.
    pub fn log_index(&self) -> u32 {
        self.log_index.load(Ordering::SeqCst)
    }

    /// Allocate the next log number.
    pub fn next_log_index(&self) -> u32 {
        self.log_index.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Restart log numbering from zero.
    pub fn reset_log_index(&self) {
        self.log_index.store(0, Ordering::SeqCst);
    }

    /// Handle to the shared cancellation flag.
    pub fn cancel(&self) -> CancelFlag {
        self.cancel.clone()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
