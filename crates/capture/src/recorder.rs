// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Timeline recorder: accumulates events with monotonic relative timestamps.

use crate::event::{Action, Control, Device, Event};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Recorder for a single capture session.
///
/// Internally synchronized and cheaply clonable; clones share the same
/// buffer and zero point. There is one conceptual writer (the input dispatch
/// path); readers take snapshot copies via [`Recorder::events`].
pub struct Recorder {
    zero: Arc<Mutex<Option<Instant>>>,
    events: Arc<Mutex<Vec<Event>>>,
    /// Controls that drive the session itself and must never be recorded.
    /// Supplied by the controller so both sides agree on one list.
    excluded: Arc<HashSet<Control>>,
}

impl Recorder {
    /// Create a recorder with a collaborator-supplied exclusion set.
    pub fn new(excluded: HashSet<Control>) -> Self {
        Self {
            zero: Arc::new(Mutex::new(None)),
            events: Arc::new(Mutex::new(Vec::new())),
            excluded: Arc::new(excluded),
        }
    }

    /// Start recording: clear the buffer and stamp the zero point.
    pub fn start(&self) {
        self.events.lock().clear();
        *self.zero.lock() = Some(Instant::now());
    }

    /// Stop recording. The buffer stays intact for replay or save.
    pub fn stop(&self) {
        *self.zero.lock() = None;
    }

    /// Whether a recording is in progress.
    pub fn is_recording(&self) -> bool {
        self.zero.lock().is_some()
    }

    /// Seconds elapsed since recording started, or 0.0 when idle.
    pub fn current_offset(&self) -> f64 {
        self.zero
            .lock()
            .map(|zero| zero.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Record one occurrence.
    ///
    /// No-op unless recording is active and the control is not excluded.
    /// Returns whether the event was appended.
    pub fn record(
        &self,
        device: Device,
        action: Action,
        control: Control,
        position: Option<(f64, f64)>,
    ) -> bool {
        if self.excluded.contains(&control) {
            return false;
        }
        let offset = {
            let zero = self.zero.lock();
            match *zero {
                Some(zero) => zero.elapsed().as_secs_f64(),
                None => return false,
            }
        };
        self.events.lock().push(Event {
            offset,
            device,
            action,
            control,
            position,
        });
        true
    }

    /// Snapshot copy of the buffer for save or replay-from-buffer.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Number of buffered events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl Clone for Recorder {
    fn clone(&self) -> Self {
        Self {
            zero: Arc::clone(&self.zero),
            events: Arc::clone(&self.events),
            excluded: Arc::clone(&self.excluded),
        }
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(HashSet::new())
    }
}

#[cfg(test)]
#[path = "recorder_tests.rs"]
mod tests;
