#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::inject::fake::ScriptedInjector;
use crate::time::FakeClock;
use std::path::Path;

struct Harness {
    controller: SessionController,
    injector: Arc<ScriptedInjector>,
    notices: Arc<Mutex<Vec<Notice>>>,
}

fn harness(dir: &Path) -> Harness {
    let clock: Arc<dyn Clock> = Arc::new(FakeClock::at_origin());
    let injector = Arc::new(ScriptedInjector::new(Arc::clone(&clock)));
    let notices: Arc<Mutex<Vec<Notice>>> = Arc::new(Mutex::new(Vec::new()));
    let sink_notices = Arc::clone(&notices);
    let controller = SessionController::new(
        dir.to_path_buf(),
        injector.clone(),
        clock,
        Arc::new(move |notice| sink_notices.lock().push(notice)),
    );
    Harness {
        controller,
        injector,
        notices,
    }
}

impl Harness {
    fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    fn press(&self, control: Control) {
        self.controller
            .handle_input(Device::Keyboard, Action::Press, control, None);
    }

    fn tap(&self, control: Control) {
        self.press(control.clone());
        self.controller
            .handle_input(Device::Keyboard, Action::Release, control, None);
    }
}

#[test]
fn test_trigger_map_matches_exclusion_set() {
    let map = TriggerMap::standard();
    let excluded = map.excluded_controls();
    assert_eq!(excluded.len(), 9);
    for control in &excluded {
        assert!(map.trigger_for(control).is_some());
    }
    // Speed keys are part of the same single source of truth
    assert!(excluded.contains(&Control::Char('=')));
    assert!(excluded.contains(&Control::Char('-')));
}

#[tokio::test]
async fn test_toggle_record_starts_and_stops() {
    let dir = tempfile::tempdir().unwrap();
    let h = harness(dir.path());

    h.press(Control::Key(NamedKey::Delete));
    assert!(h.controller.recorder().is_recording());
    h.tap(Control::Char('a'));

    h.press(Control::Key(NamedKey::Delete));
    assert!(!h.controller.recorder().is_recording());
    assert_eq!(
        h.notices(),
        vec![
            Notice::RecordingStarted,
            Notice::RecordingStopped { events: 2 }
        ]
    );
}

#[tokio::test]
async fn test_hotkeys_are_never_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let h = harness(dir.path());

    h.press(Control::Key(NamedKey::Delete));
    h.tap(Control::Char('a'));
    h.press(Control::Key(NamedKey::F11)); // dispatches, must not be recorded
    h.tap(Control::Char('='));            // speed key, must not be recorded

    let events = h.controller.recorder().events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.control == Control::Char('a')));
    assert!(h.notices().contains(&Notice::LogIndexReset));
}

#[tokio::test]
async fn test_speed_triggers_step_and_clamp() {
    let dir = tempfile::tempdir().unwrap();
    let h = harness(dir.path());

    h.press(Control::Char('='));
    assert!(h.notices().contains(&Notice::SpeedChanged { multiplier: 1.5 }));

    for _ in 0..40 {
        h.press(Control::Char('='));
    }
    assert_eq!(h.controller.state().speed(), 10.0);
    assert!(h
        .notices()
        .contains(&Notice::SpeedAtMax { multiplier: 10.0 }));

    for _ in 0..40 {
        h.press(Control::Char('-'));
    }
    assert_eq!(h.controller.state().speed(), 0.5);
    assert!(h
        .notices()
        .contains(&Notice::SpeedAtMin { multiplier: 0.5 }));
}

#[tokio::test]
async fn test_save_skipped_when_not_recording() {
    let dir = tempfile::tempdir().unwrap();
    let h = harness(dir.path());

    h.press(Control::Key(NamedKey::PageDown));
    assert_eq!(h.notices(), vec![Notice::SaveSkipped]);
    assert!(Notice::SaveSkipped.is_warning());
}

#[tokio::test]
async fn test_save_writes_log_and_pointer() {
    let dir = tempfile::tempdir().unwrap();
    let h = harness(dir.path());

    h.press(Control::Key(NamedKey::Delete));
    h.tap(Control::Char('a'));
    h.press(Control::Key(NamedKey::PageDown));

    let log = crate::logs::log_path(dir.path(), 1);
    assert!(log.exists());
    assert_eq!(crate::logs::read_latest(dir.path()), Some(log.clone()));

    let decoded = keyrec_capture::read_log(&log).unwrap();
    assert_eq!(decoded.events.len(), 2);
    assert!(h.notices().contains(&Notice::Saved {
        path: log,
        events: 2
    }));
}

#[tokio::test]
async fn test_log_numbering_continues_after_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("event_log_6.txt"), "").unwrap();
    let h = harness(dir.path());

    h.press(Control::Key(NamedKey::Delete));
    h.tap(Control::Char('a'));
    h.press(Control::Key(NamedKey::PageDown));

    assert!(crate::logs::log_path(dir.path(), 7).exists());
}

#[tokio::test]
async fn test_load_latest_distinct_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let h = harness(dir.path());

    // No pointer at all
    h.press(Control::Key(NamedKey::Home));
    assert_eq!(h.notices().last(), Some(&Notice::PointerMissing));

    // Pointer to a file that is gone
    std::fs::write(dir.path().join("latest_log.txt"), "event_log_9.txt").unwrap();
    h.press(Control::Key(NamedKey::Home));
    assert_eq!(
        h.notices().last(),
        Some(&Notice::LatestLogMissing {
            path: dir.path().join("event_log_9.txt")
        })
    );

    // Pointer to a file with no valid events
    std::fs::write(dir.path().join("event_log_9.txt"), "not\ta\tlog\n").unwrap();
    h.press(Control::Key(NamedKey::Home));
    assert_eq!(
        h.notices().last(),
        Some(&Notice::LogEmpty {
            path: dir.path().join("event_log_9.txt")
        })
    );
}

#[tokio::test]
async fn test_load_latest_replays_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let h = harness(dir.path());
    let log = dir.path().join("event_log_1.txt");
    std::fs::write(&log, "0.0000\tkeyboard\tpress\ta\t\t\n0.2000\tkeyboard\trelease\ta\t\t\n")
        .unwrap();
    std::fs::write(dir.path().join("latest_log.txt"), "event_log_1.txt").unwrap();

    h.press(Control::Key(NamedKey::Home));
    h.controller.drain().await;

    assert_eq!(h.injector.count_of("press key", "a"), 1);
    assert_eq!(h.injector.count_of("release key", "a"), 1);
    let notices = h.notices();
    assert!(notices.contains(&Notice::LogLoaded {
        path: log,
        events: 2,
        skipped: 0
    }));
    assert!(notices.contains(&Notice::ReplayFinished { executed: 2 }));
}

#[tokio::test]
async fn test_replay_buffer_empty_reports_nothing_to_replay() {
    let dir = tempfile::tempdir().unwrap();
    let h = harness(dir.path());

    h.press(Control::Key(NamedKey::End));
    assert_eq!(h.notices(), vec![Notice::NothingToReplay]);
}

#[tokio::test]
async fn test_replay_buffer_replays_recorded_events() {
    let dir = tempfile::tempdir().unwrap();
    let h = harness(dir.path());

    h.press(Control::Key(NamedKey::Delete));
    h.tap(Control::Char('x'));
    h.press(Control::Key(NamedKey::Delete)); // stop; buffer survives
    h.press(Control::Key(NamedKey::End));
    h.controller.drain().await;

    assert_eq!(h.injector.count_of("press key", "x"), 1);
    assert!(h.notices().contains(&Notice::ReplayFinished { executed: 2 }));
}

#[tokio::test]
async fn test_abort_hotkey_sets_shared_flag_and_is_not_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let h = harness(dir.path());

    h.press(Control::Key(NamedKey::Delete));
    h.press(Control::Key(NamedKey::F2));

    assert!(h.controller.state().cancel().is_set());
    assert!(h.notices().contains(&Notice::AbortRequested));
    assert!(h.controller.recorder().is_empty());
}

#[tokio::test]
async fn test_middle_button_release_fires_macro_and_is_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let h = harness(dir.path());

    h.press(Control::Key(NamedKey::Delete));
    h.controller.handle_input(
        Device::Mouse,
        Action::Press,
        Control::Button(Button::Middle),
        Some((50.0, 60.0)),
    );
    h.controller.handle_input(
        Device::Mouse,
        Action::Release,
        Control::Button(Button::Middle),
        Some((50.0, 60.0)),
    );
    h.controller.drain().await;

    // The gesture is a normal mouse event as far as the recorder is concerned
    assert_eq!(h.controller.recorder().len(), 2);
    assert!(h.notices().contains(&Notice::MacroStarted));
    assert!(h.notices().contains(&Notice::MacroFinished { clicks: 30 }));
    assert_eq!(h.injector.count_of("press button", "Button.left"), 30);
}

#[tokio::test]
async fn test_insert_hotkey_fires_macro() {
    let dir = tempfile::tempdir().unwrap();
    let h = harness(dir.path());

    h.press(Control::Key(NamedKey::Insert));
    h.controller.drain().await;

    assert!(h.notices().contains(&Notice::MacroFinished { clicks: 30 }));
}

#[test]
fn test_notice_display_texts_are_distinct() {
    let notices = [
        Notice::SaveSkipped,
        Notice::PointerMissing,
        Notice::LatestLogMissing {
            path: PathBuf::from("event_log_1.txt"),
        },
        Notice::LogEmpty {
            path: PathBuf::from("event_log_1.txt"),
        },
        Notice::NothingToReplay,
        Notice::ReplayAborted { executed: 3 },
    ];
    let texts: Vec<String> = notices.iter().map(|n| n.to_string()).collect();
    let unique: std::collections::HashSet<&String> = texts.iter().collect();
    assert_eq!(unique.len(), notices.len());
}

#[test]
fn test_notice_display_wording() {
    assert_eq!(
        Notice::SaveSkipped.to_string(),
        "not recording, nothing to save"
    );
    assert_eq!(
        Notice::SpeedChanged { multiplier: 2.5 }.to_string(),
        "replay speed set to 2.5x"
    );
    assert_eq!(
        Notice::ReplayStarted {
            events: 4,
            speed: 1.0
        }
        .to_string(),
        "replaying 4 events at 1x speed"
    );
}
