//! Integration tests for the session host and its runner.
//!
//! Drives whole Pomodoro cycles through `run` with an instant clock, checking
//! phase order, round numbering, stats persistence and notifications.

use std::cell::RefCell;
use std::rc::Rc;

use tokio::sync::mpsc;
use tomato_core::notify::{Cue, Notifier, SilentNotifier};
use tomato_core::session::run;
use tomato_core::{
    Command, Database, Event, InstantClock, KvStore, MemoryStore, Mode, RunOptions, Session,
    Settings, Stats, TaskList,
};

#[derive(Clone, Default)]
struct Recorder {
    cues: Rc<RefCell<Vec<Cue>>>,
    completions: Rc<RefCell<Vec<(Mode, Mode)>>>,
}

impl Notifier for Recorder {
    fn cue(&self, cue: Cue) {
        self.cues.borrow_mut().push(cue);
    }

    fn phase_completed(&self, completed: Mode, next: Mode) {
        self.completions.borrow_mut().push((completed, next));
    }
}

fn quick() -> Settings {
    Settings::new(1, 1, 2, 4)
}

#[tokio::test]
async fn full_cycle_with_auto_advance() {
    let recorder = Recorder::default();
    let mut session = Session::open(quick(), MemoryStore::new(), recorder.clone());
    let (tx, mut rx) = mpsc::channel(8);
    tx.send(Command::Start).await.unwrap();

    let mut completions = Vec::new();
    let options = RunOptions {
        auto_advance: true,
        stop_after: Some(8),
    };
    let summary = run(&mut session, &mut InstantClock, &mut rx, options, |s, event| {
        if let Some(Event::PhaseCompleted { completed, next, round, .. }) = event {
            completions.push((*completed, *next, *round));
            assert_eq!(s.controller().mode(), *next);
        }
    })
    .await
    .unwrap();

    assert_eq!(summary.phases_completed, 8);
    assert_eq!(summary.work_completed, 4);
    assert_eq!(
        completions,
        vec![
            (Mode::Work, Mode::ShortBreak, 2),
            (Mode::ShortBreak, Mode::Work, 2),
            (Mode::Work, Mode::ShortBreak, 3),
            (Mode::ShortBreak, Mode::Work, 3),
            (Mode::Work, Mode::ShortBreak, 4),
            (Mode::ShortBreak, Mode::Work, 4),
            (Mode::Work, Mode::LongBreak, 1),
            (Mode::LongBreak, Mode::Work, 1),
        ]
    );

    // Stopped at the limit without starting the ninth phase.
    assert!(!session.is_running());
    assert_eq!(session.controller().mode(), Mode::Work);
    assert_eq!(session.controller().seconds_remaining(), 0);
    assert!(session.controller().is_pending_transition());

    let stats = Stats::load(session.store());
    assert_eq!(stats.completed_pomodoros, 4);
    assert_eq!(stats.total_work_time, 4);

    assert_eq!(recorder.completions.borrow().len(), 8);
    let cues = recorder.cues.borrow();
    assert_eq!(cues.iter().filter(|c| **c == Cue::Complete).count(), 8);
    // The manual start plus seven automatic ones.
    assert_eq!(cues.iter().filter(|c| **c == Cue::Start).count(), 8);
    drop(tx);
}

#[tokio::test]
async fn without_auto_advance_the_timer_stops_after_expiry() {
    let mut session = Session::open(quick(), MemoryStore::new(), SilentNotifier);
    let (tx, mut rx) = mpsc::channel(8);
    tx.send(Command::Start).await.unwrap();

    let options = RunOptions {
        auto_advance: false,
        stop_after: Some(1),
    };
    let summary = run(&mut session, &mut InstantClock, &mut rx, options, |_, _| {})
        .await
        .unwrap();

    assert_eq!(summary.phases_completed, 1);
    assert!(!session.is_running());
    assert_eq!(session.controller().mode(), Mode::ShortBreak);
    assert_eq!(session.controller().current_round(), 2);
    assert_eq!(session.controller().seconds_remaining(), 0);
    drop(tx);
}

#[tokio::test]
async fn toggle_after_expiry_starts_the_next_phase() {
    let mut session = Session::open(Settings::new(1, 2, 3, 4), MemoryStore::new(), SilentNotifier);
    session.start();
    while session.tick().unwrap().is_none() {}
    assert_eq!(session.controller().seconds_remaining(), 0);

    let (tx, mut rx) = mpsc::channel(8);
    tx.send(Command::Toggle).await.unwrap();
    tx.send(Command::Quit).await.unwrap();
    run(&mut session, &mut InstantClock, &mut rx, RunOptions::default(), |_, _| {})
        .await
        .unwrap();

    assert!(session.is_running());
    assert_eq!(session.controller().mode(), Mode::ShortBreak);
    assert_eq!(session.controller().seconds_remaining(), 120);
}

#[tokio::test]
async fn applying_settings_mid_phase_stops_and_reloads() {
    let mut session = Session::open(quick(), MemoryStore::new(), SilentNotifier);
    let (tx, mut rx) = mpsc::channel(8);
    tx.send(Command::Start).await.unwrap();
    tx.send(Command::Apply(Settings::new(3, 1, 2, 2))).await.unwrap();
    tx.send(Command::Quit).await.unwrap();

    let mut applied = None;
    run(&mut session, &mut InstantClock, &mut rx, RunOptions::default(), |_, event| {
        if let Some(Event::SettingsApplied { seconds_remaining, .. }) = event {
            applied = Some(*seconds_remaining);
        }
    })
    .await
    .unwrap();

    assert_eq!(applied, Some(180));
    assert!(!session.is_running());
    assert_eq!(session.controller().mode(), Mode::Work);
    assert_eq!(session.controller().seconds_remaining(), 180);
    assert_eq!(session.controller().settings().rounds_per_cycle, 2);
}

#[tokio::test]
async fn queued_commands_apply_before_ticks() {
    let mut session = Session::open(quick(), MemoryStore::new(), SilentNotifier);
    let (tx, mut rx) = mpsc::channel(8);
    tx.send(Command::Switch(Mode::LongBreak)).await.unwrap();
    tx.send(Command::Start).await.unwrap();

    let mut ticks_seen = 0;
    let options = RunOptions {
        auto_advance: false,
        stop_after: Some(1),
    };
    run(&mut session, &mut InstantClock, &mut rx, options, |s, event| {
        if event.is_none() && s.is_running() {
            ticks_seen += 1;
        }
    })
    .await
    .unwrap();

    // Long break is two minutes; the last tick is the expiry itself.
    assert_eq!(ticks_seen, 119);
    assert_eq!(session.controller().mode(), Mode::Work);
    assert_eq!(session.controller().current_round(), 1);
    assert_eq!(session.stats(), &Stats::default());
    drop(tx);
}

#[tokio::test]
async fn quit_and_closed_channel_end_the_loop() {
    let mut session = Session::open(quick(), MemoryStore::new(), SilentNotifier);

    let (tx, mut rx) = mpsc::channel(8);
    tx.send(Command::Start).await.unwrap();
    tx.send(Command::Quit).await.unwrap();
    let summary = run(&mut session, &mut InstantClock, &mut rx, RunOptions::default(), |_, _| {})
        .await
        .unwrap();
    assert_eq!(summary.phases_completed, 0);
    // Start was applied, then Quit won over the pending tick.
    assert!(session.is_running());
    assert_eq!(session.controller().seconds_remaining(), 60);

    let (tx, mut rx) = mpsc::channel::<Command>(1);
    drop(tx);
    let summary = run(&mut session, &mut InstantClock, &mut rx, RunOptions::default(), |_, _| {})
        .await
        .unwrap();
    assert_eq!(summary.phases_completed, 0);
}

#[tokio::test]
async fn pause_mid_phase_preserves_remaining() {
    let mut session = Session::open(quick(), MemoryStore::new(), SilentNotifier);
    session.start();
    for _ in 0..20 {
        session.tick().unwrap();
    }
    let (tx, mut rx) = mpsc::channel(8);
    tx.send(Command::Pause).await.unwrap();
    tx.send(Command::Quit).await.unwrap();
    run(&mut session, &mut InstantClock, &mut rx, RunOptions::default(), |_, _| {})
        .await
        .unwrap();
    assert!(!session.is_running());
    assert_eq!(session.controller().seconds_remaining(), 40);
}

#[test]
fn sqlite_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tomato.db");

    {
        let db = Database::open_at(&path).unwrap();
        let mut session = Session::open(quick(), db, SilentNotifier);
        session.add_task("write docs").unwrap();
        session.start();
        while session.tick().unwrap().is_none() {}
    }

    let db = Database::open_at(&path).unwrap();
    let session = Session::open(quick(), db, SilentNotifier);
    assert_eq!(session.stats().completed_pomodoros, 1);
    assert_eq!(session.stats().today_pomodoros, 1);
    let texts: Vec<_> = session.tasks().iter().map(|t| t.text.clone()).collect();
    assert_eq!(texts, vec!["write docs"]);
    assert_eq!(session.controller().mode(), Mode::Work);
}

#[test]
fn malformed_records_fall_back_to_empty() {
    let store = MemoryStore::new();
    store.set("stats", "42").unwrap();
    store.set("tasks", "not even json").unwrap();
    let session = Session::open(Settings::default(), &store, SilentNotifier);
    assert_eq!(session.stats(), &Stats::default());
    assert_eq!(session.tasks(), &TaskList::default());
}
