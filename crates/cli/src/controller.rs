// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session controller: maps hotkeys and the middle-button gesture to
//! actions, owns the shared session state, and spawns replay/macro tasks.
//!
//! The dispatch path never blocks and never propagates an error: every
//! outcome, including failures inside spawned tasks, surfaces as a [`Notice`]
//! through the controller's notice sink.

use crate::click_macro::{MacroOutcome, MacroRunner};
use crate::engine::{ReplayOutcome, Replayer};
use crate::inject::Injector;
use crate::logs;
use crate::session::SessionState;
use crate::time::Clock;
use keyrec_capture::{write_log, Action, Button, CodecError, Control, Device, Event, NamedKey, Recorder};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Consecutive abort-key presses required to set the cancel flag.
pub const ABORT_SPAM_THRESHOLD: u32 = 1;

/// Session actions reachable from hotkeys or gestures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    ToggleRecord,
    ReplayBuffer,
    Save,
    LoadLatest,
    RunMacro,
    ResetIndex,
    SpeedUp,
    SpeedDown,
    Abort,
}

/// Hotkey bindings: the single source of truth for which controls drive the
/// session. The recorder's exclusion set is derived from this same table, so
/// a control can never be both a hotkey and a recordable event.
pub struct TriggerMap {
    bindings: Vec<(Control, Trigger)>,
}

impl TriggerMap {
    /// The standard binding table.
    pub fn standard() -> Self {
        Self {
            bindings: vec![
                (Control::Key(NamedKey::Delete), Trigger::ToggleRecord),
                (Control::Key(NamedKey::End), Trigger::ReplayBuffer),
                (Control::Key(NamedKey::PageDown), Trigger::Save),
                (Control::Key(NamedKey::Home), Trigger::LoadLatest),
                (Control::Key(NamedKey::Insert), Trigger::RunMacro),
                (Control::Key(NamedKey::F11), Trigger::ResetIndex),
                (Control::Char('='), Trigger::SpeedUp),
                (Control::Char('-'), Trigger::SpeedDown),
                (Control::Key(NamedKey::F2), Trigger::Abort),
            ],
        }
    }

    /// Trigger bound to a control, if any.
    pub fn trigger_for(&self, control: &Control) -> Option<Trigger> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == control)
            .map(|(_, trigger)| *trigger)
    }

    /// Every bound control; handed to the recorder as its exclusion set.
    pub fn excluded_controls(&self) -> HashSet<Control> {
        self.bindings.iter().map(|(c, _)| c.clone()).collect()
    }
}

impl Default for TriggerMap {
    fn default() -> Self {
        Self::standard()
    }
}

/// User-visible condition reported by the controller or a spawned task.
///
/// Notices are values rather than printed strings so the console can choose
/// levels and tests can assert on exact conditions.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    RecordingStarted,
    RecordingStopped { events: usize },
    NothingToReplay,
    ReplayStarted { events: usize, speed: f64 },
    ReplayFinished { executed: usize },
    ReplayAborted { executed: usize },
    ReplayFailed { reason: String },
    Saved { path: PathBuf, events: usize },
    SaveSkipped,
    SaveFailed { reason: String },
    PointerMissing,
    LatestLogMissing { path: PathBuf },
    LogEmpty { path: PathBuf },
    LogLoaded { path: PathBuf, events: usize, skipped: usize },
    LoadFailed { reason: String },
    MacroStarted,
    MacroFinished { clicks: usize },
    MacroAborted { clicks: usize },
    MacroFailed { reason: String },
    LogIndexReset,
    SpeedChanged { multiplier: f64 },
    SpeedAtMax { multiplier: f64 },
    SpeedAtMin { multiplier: f64 },
    AbortRequested,
}

impl Notice {
    /// Whether the console should print this at warning level.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Notice::SaveSkipped
                | Notice::SaveFailed { .. }
                | Notice::PointerMissing
                | Notice::LatestLogMissing { .. }
                | Notice::LogEmpty { .. }
                | Notice::LoadFailed { .. }
                | Notice::ReplayFailed { .. }
                | Notice::MacroFailed { .. }
        )
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::RecordingStarted => write!(f, "recording started"),
            Notice::RecordingStopped { events } => {
                write!(f, "recording stopped ({} events buffered)", events)
            }
            Notice::NothingToReplay => write!(f, "no events to replay"),
            Notice::ReplayStarted { events, speed } => {
                write!(f, "replaying {} events at {}x speed", events, speed)
            }
            Notice::ReplayFinished { executed } => {
                write!(f, "replay finished ({} events)", executed)
            }
            Notice::ReplayAborted { executed } => {
                write!(f, "replay stopped after {} events", executed)
            }
            Notice::ReplayFailed { reason } => write!(f, "replay failed: {}", reason),
            Notice::Saved { path, events } => {
                write!(f, "saved {} events to '{}'", events, path.display())
            }
            Notice::SaveSkipped => write!(f, "not recording, nothing to save"),
            Notice::SaveFailed { reason } => write!(f, "could not save event log: {}", reason),
            Notice::PointerMissing => write!(f, "latest_log.txt not found, no logs yet"),
            Notice::LatestLogMissing { path } => {
                write!(f, "latest log '{}' is missing", path.display())
            }
            Notice::LogEmpty { path } => {
                write!(f, "no valid events found in '{}'", path.display())
            }
            Notice::LogLoaded {
                path,
                events,
                skipped,
            } => {
                write!(f, "loaded {} events from '{}'", events, path.display())?;
                if *skipped > 0 {
                    write!(f, " ({} lines skipped)", skipped)?;
                }
                Ok(())
            }
            Notice::LoadFailed { reason } => write!(f, "could not load event log: {}", reason),
            Notice::MacroStarted => {
                write!(f, "holding ctrl and clicking left mouse 30 times")
            }
            Notice::MacroFinished { clicks } => write!(f, "macro completed ({} clicks)", clicks),
            Notice::MacroAborted { clicks } => {
                write!(f, "macro stopped after {} clicks", clicks)
            }
            Notice::MacroFailed { reason } => write!(f, "macro failed: {}", reason),
            Notice::LogIndexReset => write!(f, "log index reset to 0"),
            Notice::SpeedChanged { multiplier } => {
                write!(f, "replay speed set to {}x", multiplier)
            }
            Notice::SpeedAtMax { multiplier } => {
                write!(f, "already at max speed ({}x)", multiplier)
            }
            Notice::SpeedAtMin { multiplier } => {
                write!(f, "already at min speed ({}x)", multiplier)
            }
            Notice::AbortRequested => write!(f, "stopping any active replay or macro"),
        }
    }
}

/// Sink the controller reports notices through.
pub type NoticeSink = Arc<dyn Fn(Notice) + Send + Sync>;

/// Owns global session state and maps raw input to actions.
///
/// One logical input-dispatch path calls [`SessionController::handle_input`];
/// anything that could block runs as a spawned task so dispatch stays
/// responsive to the abort hotkey.
pub struct SessionController {
    state: Arc<SessionState>,
    recorder: Recorder,
    injector: Arc<dyn Injector>,
    clock: Arc<dyn Clock>,
    trigger_map: TriggerMap,
    log_dir: PathBuf,
    abort_presses: AtomicU32,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    on_notice: NoticeSink,
}

impl SessionController {
    /// Build a controller over a log directory.
    ///
    /// Log numbering continues after any `event_log_<n>.txt` files already
    /// in the directory.
    pub fn new(
        log_dir: PathBuf,
        injector: Arc<dyn Injector>,
        clock: Arc<dyn Clock>,
        on_notice: NoticeSink,
    ) -> Self {
        let trigger_map = TriggerMap::standard();
        let recorder = Recorder::new(trigger_map.excluded_controls());
        let state = Arc::new(SessionState::new().with_log_index(logs::scan_log_index(&log_dir)));
        Self {
            state,
            recorder,
            injector,
            clock,
            trigger_map,
            log_dir,
            abort_presses: AtomicU32::new(0),
            tasks: Mutex::new(Vec::new()),
            on_notice,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Handle one raw input occurrence from the input stream.
    ///
    /// Mapped keyboard presses dispatch their trigger and are never
    /// recorded; everything else is offered to the recorder (which applies
    /// its own exclusion and recording gate). The middle-button release
    /// gesture fires the macro after the release itself is captured.
    pub fn handle_input(
        &self,
        device: Device,
        action: Action,
        control: Control,
        position: Option<(f64, f64)>,
    ) {
        match device {
            Device::Keyboard => {
                if action == Action::Press {
                    if let Some(trigger) = self.trigger_map.trigger_for(&control) {
                        if trigger == Trigger::Abort {
                            let presses = self.abort_presses.fetch_add(1, Ordering::SeqCst) + 1;
                            if presses >= ABORT_SPAM_THRESHOLD {
                                self.abort_presses.store(0, Ordering::SeqCst);
                                self.dispatch(Trigger::Abort);
                            }
                        } else {
                            self.abort_presses.store(0, Ordering::SeqCst);
                            self.dispatch(trigger);
                        }
                        return;
                    }
                    self.abort_presses.store(0, Ordering::SeqCst);
                }
                self.recorder.record(device, action, control, None);
            }
            Device::Mouse => {
                // Click never arrives from live input; presses and releases do.
                self.recorder
                    .record(device, action, control.clone(), position);
                if action == Action::Release && control == Control::Button(Button::Middle) {
                    self.dispatch(Trigger::RunMacro);
                }
            }
        }
    }

    /// Execute one trigger. Safe to call directly (the console does).
    pub fn dispatch(&self, trigger: Trigger) {
        match trigger {
            Trigger::ToggleRecord => self.toggle_record(),
            Trigger::ReplayBuffer => self.replay_buffer(),
            Trigger::Save => self.save(),
            Trigger::LoadLatest => self.load_latest(),
            Trigger::RunMacro => self.run_macro(),
            Trigger::ResetIndex => {
                self.state.reset_log_index();
                self.notify(Notice::LogIndexReset);
            }
            Trigger::SpeedUp => match self.state.speed_up() {
                Some(multiplier) => self.notify(Notice::SpeedChanged { multiplier }),
                None => self.notify(Notice::SpeedAtMax {
                    multiplier: self.state.speed(),
                }),
            },
            Trigger::SpeedDown => match self.state.speed_down() {
                Some(multiplier) => self.notify(Notice::SpeedChanged { multiplier }),
                None => self.notify(Notice::SpeedAtMin {
                    multiplier: self.state.speed(),
                }),
            },
            Trigger::Abort => {
                self.state.cancel().set();
                self.notify(Notice::AbortRequested);
            }
        }
    }

    /// Wait for every spawned replay/macro task to finish.
    pub async fn drain(&self) {
        let handles: Vec<JoinHandle<()>> = self.tasks.lock().drain(..).collect();
        for handle in handles {
            let _ = handle.await;
        }
    }

    fn toggle_record(&self) {
        if self.recorder.is_recording() {
            self.recorder.stop();
            self.notify(Notice::RecordingStopped {
                events: self.recorder.len(),
            });
        } else {
            self.recorder.start();
            self.notify(Notice::RecordingStarted);
        }
    }

    fn replay_buffer(&self) {
        let events = self.recorder.events();
        if events.is_empty() {
            self.notify(Notice::NothingToReplay);
            return;
        }
        self.spawn_replay(events);
    }

    fn save(&self) {
        if !self.recorder.is_recording() {
            self.notify(Notice::SaveSkipped);
            return;
        }
        let events = self.recorder.events();
        let path = logs::log_path(&self.log_dir, self.state.next_log_index());
        if let Err(err) = write_log(&path, &events) {
            self.notify(Notice::SaveFailed {
                reason: err.to_string(),
            });
            return;
        }
        if let Err(err) = logs::write_latest(&self.log_dir, &path) {
            self.notify(Notice::SaveFailed {
                reason: err.to_string(),
            });
            return;
        }
        self.notify(Notice::Saved {
            path,
            events: events.len(),
        });
    }

    fn load_latest(&self) {
        let Some(path) = logs::read_latest(&self.log_dir) else {
            self.notify(Notice::PointerMissing);
            return;
        };
        let decoded = match keyrec_capture::read_log(&path) {
            Ok(decoded) => decoded,
            Err(CodecError::NotFound(path)) => {
                self.notify(Notice::LatestLogMissing { path });
                return;
            }
            Err(err) => {
                self.notify(Notice::LoadFailed {
                    reason: err.to_string(),
                });
                return;
            }
        };
        if decoded.events.is_empty() {
            self.notify(Notice::LogEmpty { path });
            return;
        }
        self.notify(Notice::LogLoaded {
            path,
            events: decoded.events.len(),
            skipped: decoded.skipped,
        });
        self.spawn_replay(decoded.events);
    }

    fn spawn_replay(&self, events: Vec<Event>) {
        let speed = self.state.speed();
        self.notify(Notice::ReplayStarted {
            events: events.len(),
            speed,
        });
        let engine = Replayer::new(
            Arc::clone(&self.injector),
            Arc::clone(&self.clock),
            self.state.cancel(),
        );
        let on_notice = Arc::clone(&self.on_notice);
        self.track(tokio::spawn(async move {
            let notice = match engine.run(&events, speed).await {
                Ok(ReplayOutcome::Empty) => Notice::NothingToReplay,
                Ok(ReplayOutcome::Completed { executed }) => Notice::ReplayFinished { executed },
                Ok(ReplayOutcome::Cancelled { executed }) => Notice::ReplayAborted { executed },
                Err(err) => Notice::ReplayFailed {
                    reason: err.to_string(),
                },
            };
            on_notice(notice);
        }));
    }

    fn run_macro(&self) {
        self.notify(Notice::MacroStarted);
        let runner = MacroRunner::new(
            Arc::clone(&self.injector),
            Arc::clone(&self.clock),
            self.state.cancel(),
        );
        let on_notice = Arc::clone(&self.on_notice);
        self.track(tokio::spawn(async move {
            let notice = match runner.run().await {
                Ok(MacroOutcome::Completed { clicks }) => Notice::MacroFinished { clicks },
                Ok(MacroOutcome::Cancelled { clicks }) => Notice::MacroAborted { clicks },
                Err(err) => Notice::MacroFailed {
                    reason: err.to_string(),
                },
            };
            on_notice(notice);
        }));
    }

    fn track(&self, handle: JoinHandle<()>) {
        let mut tasks = self.tasks.lock();
        tasks.retain(|h| !h.is_finished());
        tasks.push(handle);
    }

    fn notify(&self, notice: Notice) {
        (self.on_notice)(notice);
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
