use super::event_loop::{Flow, handle_signal, handle_wakeup, sync_playback};
use super::resolve_root;
use crate::app::App;
use crate::audio::{AudioCmd, AudioError, PlaybackEngine, PlaybackInfo};
use crate::bus::{
    ControlSignal, Dispatcher, SelectionHandle, Wakeup, control_bus, passthrough_channel,
};
use crate::config::{LibrarySettings, PlaybackSettings};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Engine fake: records every command and replays a scripted snapshot.
#[derive(Default)]
struct RecordingEngine {
    sent: RefCell<Vec<AudioCmd>>,
    info: RefCell<PlaybackInfo>,
    disconnected: bool,
}

impl RecordingEngine {
    fn commands(&self) -> Vec<AudioCmd> {
        self.sent.borrow().clone()
    }

    fn set_info(&self, info: PlaybackInfo) {
        *self.info.borrow_mut() = info;
    }
}

impl PlaybackEngine for RecordingEngine {
    fn send(&self, cmd: AudioCmd) -> Result<(), AudioError> {
        if self.disconnected {
            return Err(AudioError::Disconnected);
        }
        self.sent.borrow_mut().push(cmd);
        Ok(())
    }

    fn snapshot(&self) -> PlaybackInfo {
        self.info.borrow().clone()
    }
}

fn library(names: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in names {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"not really audio").unwrap();
    }
    dir
}

fn app_for(dir: &tempfile::TempDir) -> App {
    let handle: SelectionHandle = Arc::new(Mutex::new(None));
    let mut app = App::new(handle);
    app.populate(dir.path(), &LibrarySettings::default());
    app
}

fn finished(path: PathBuf, generation: u64) -> PlaybackInfo {
    PlaybackInfo {
        path: Some(path),
        generation,
        finished: true,
        ..PlaybackInfo::default()
    }
}

#[test]
fn track_selected_plays_and_moves_cursor() {
    let dir = library(&["a.mp3", "b.mp3"]);
    let mut app = app_for(&dir);
    let engine = RecordingEngine::default();
    let target = dir.path().join("b.mp3");

    let flow = handle_signal(ControlSignal::TrackSelected(target.clone()), &mut app, &engine);

    assert_eq!(flow, Flow::Continue);
    assert_eq!(engine.commands(), vec![AudioCmd::Play(target)]);
    assert_eq!(app.current_track_name(), "b.mp3");
}

#[test]
fn control_signals_map_to_engine_commands() {
    let dir = library(&["a.mp3"]);
    let mut app = app_for(&dir);
    let engine = RecordingEngine::default();

    for signal in [
        ControlSignal::Paused,
        ControlSignal::Muted,
        ControlSignal::VolumeUp,
        ControlSignal::VolumeDown,
    ] {
        assert_eq!(handle_signal(signal, &mut app, &engine), Flow::Continue);
    }

    assert_eq!(
        engine.commands(),
        vec![
            AudioCmd::TogglePause,
            AudioCmd::ToggleMute,
            AudioCmd::VolumeUp,
            AudioCmd::VolumeDown,
        ]
    );
}

#[test]
fn quit_stops_the_loop_without_engine_traffic() {
    let dir = library(&["a.mp3"]);
    let mut app = app_for(&dir);
    let engine = RecordingEngine::default();

    assert_eq!(handle_signal(ControlSignal::Quit, &mut app, &engine), Flow::Quit);
    assert!(engine.commands().is_empty());
}

#[test]
fn engine_failures_do_not_stop_the_loop() {
    let dir = library(&["a.mp3"]);
    let mut app = app_for(&dir);
    let engine = RecordingEngine {
        disconnected: true,
        ..RecordingEngine::default()
    };

    assert_eq!(handle_signal(ControlSignal::Paused, &mut app, &engine), Flow::Continue);
    let target = dir.path().join("a.mp3");
    assert_eq!(
        handle_signal(ControlSignal::TrackSelected(target), &mut app, &engine),
        Flow::Continue
    );
}

#[test]
fn passthrough_keys_navigate() {
    let dir = library(&["a.mp3", "b.mp3"]);
    let mut app = app_for(&dir);
    let engine = RecordingEngine::default();

    let (_keys, passthrough) = passthrough_channel();

    let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
    assert_eq!(
        handle_wakeup(Wakeup::Key(down), &mut app, &engine, &passthrough),
        Flow::Continue
    );
    assert_eq!(app.current_track_name(), "b.mp3");
    assert!(engine.commands().is_empty());
}

#[test]
fn tick_continues_and_closed_quits() {
    let dir = library(&[]);
    let mut app = app_for(&dir);
    let engine = RecordingEngine::default();
    let (_keys, passthrough) = passthrough_channel();

    assert_eq!(
        handle_wakeup(Wakeup::Tick, &mut app, &engine, &passthrough),
        Flow::Continue
    );
    assert_eq!(
        handle_wakeup(Wakeup::Closed, &mut app, &engine, &passthrough),
        Flow::Quit
    );
}

#[test]
fn natural_end_advances_exactly_once() {
    let dir = library(&["a.mp3", "b.mp3"]);
    let mut app = app_for(&dir);
    let engine = RecordingEngine::default();
    let settings = PlaybackSettings::default();

    engine.set_info(finished(dir.path().join("a.mp3"), 1));
    sync_playback(&mut app, &engine, &settings);
    assert_eq!(app.current_track_name(), "b.mp3");
    assert_eq!(engine.commands(), vec![AudioCmd::Play(dir.path().join("b.mp3"))]);

    // The engine has not picked up the new track yet: same snapshot again.
    sync_playback(&mut app, &engine, &settings);
    assert_eq!(engine.commands().len(), 1);

    // Second track ends too: wraps back to the first.
    engine.set_info(finished(dir.path().join("b.mp3"), 2));
    sync_playback(&mut app, &engine, &settings);
    assert_eq!(app.current_track_name(), "a.mp3");
    assert_eq!(
        engine.commands().last(),
        Some(&AudioCmd::Play(dir.path().join("a.mp3")))
    );
}

#[test]
fn natural_end_without_auto_advance_stays_put() {
    let dir = library(&["a.mp3", "b.mp3"]);
    let mut app = app_for(&dir);
    let engine = RecordingEngine::default();
    let settings = PlaybackSettings {
        auto_advance: false,
    };

    engine.set_info(finished(dir.path().join("a.mp3"), 1));
    sync_playback(&mut app, &engine, &settings);
    assert_eq!(app.current_track_name(), "a.mp3");
    assert!(engine.commands().is_empty());
}

#[test]
fn manual_selection_cancels_a_pending_natural_end() {
    let dir = library(&["a.mp3", "b.mp3", "c.mp3"]);
    let mut app = app_for(&dir);
    let engine = RecordingEngine::default();

    engine.set_info(PlaybackInfo {
        path: Some(dir.path().join("a.mp3")),
        generation: 1,
        ..PlaybackInfo::default()
    });
    sync_playback(&mut app, &engine, &PlaybackSettings::default());

    let chosen = dir.path().join("c.mp3");
    handle_signal(ControlSignal::TrackSelected(chosen.clone()), &mut app, &engine);

    // The old track's end shows up before the engine reports the new one.
    engine.set_info(finished(dir.path().join("a.mp3"), 1));
    sync_playback(&mut app, &engine, &PlaybackSettings::default());

    assert_eq!(engine.commands(), vec![AudioCmd::Play(chosen)]);
    assert_eq!(app.current_track_name(), "c.mp3");
}

#[test]
fn sync_playback_refreshes_display() {
    let dir = library(&["a.mp3"]);
    let mut app = app_for(&dir);
    let engine = RecordingEngine::default();

    engine.set_info(PlaybackInfo {
        path: Some(dir.path().join("a.mp3")),
        elapsed: Duration::from_secs(61),
        duration: Some(Duration::from_secs(122)),
        generation: 1,
        ..PlaybackInfo::default()
    });
    sync_playback(&mut app, &engine, &PlaybackSettings::default());

    assert_eq!(app.display.progress, "00:01:01/00:02:02");
    assert_eq!(app.display.percentage, 50);
}

#[test]
fn resolve_root_prefers_argument_then_config() {
    let configured = LibrarySettings {
        root: Some(PathBuf::from("/srv/music")),
        ..LibrarySettings::default()
    };

    assert_eq!(
        resolve_root(Some(PathBuf::from("/tmp/x")), &configured),
        PathBuf::from("/tmp/x")
    );
    assert_eq!(resolve_root(None, &configured), PathBuf::from("/srv/music"));
    assert_eq!(
        resolve_root(None, &LibrarySettings::default()),
        std::env::current_dir().unwrap()
    );
}

#[test]
fn enter_right_after_navigation_plays_the_new_selection() {
    let dir = library(&["a.mp3", "b.mp3", "c.mp3"]);
    let handle: SelectionHandle = Arc::new(Mutex::new(None));
    let mut app = App::new(handle.clone());
    app.populate(dir.path(), &LibrarySettings::default());
    let engine = RecordingEngine::default();

    let (senders, receivers) = control_bus();
    let (keys, passthrough) = passthrough_channel();
    let dispatcher = Dispatcher::new(senders, handle);

    let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
    let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
    // Queued back to back, as when keys pile up during a redraw.
    let producer = thread::spawn(move || {
        for key in [down, enter, down, enter] {
            dispatcher.route(key, &keys).unwrap();
        }
    });

    for _ in 0..4 {
        let wakeup = receivers.wait(&passthrough, Duration::from_secs(5));
        assert_ne!(wakeup, Wakeup::Tick);
        handle_wakeup(wakeup, &mut app, &engine, &passthrough);
    }
    producer.join().unwrap();

    assert_eq!(
        engine.commands(),
        vec![
            AudioCmd::Play(dir.path().join("b.mp3")),
            AudioCmd::Play(dir.path().join("c.mp3")),
        ]
    );
}
