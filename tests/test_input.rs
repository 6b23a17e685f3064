use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use qship::input::*;

fn key(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

fn press(code: KeyCode) -> Event {
    key(code, KeyEventKind::Press)
}

fn feed(tracker: &mut KeyTracker, events: &[Event], frame: u64) -> InputSnapshot {
    let mut snapshot = InputSnapshot::default();
    for e in events {
        tracker.handle(e, frame, &mut snapshot);
    }
    snapshot
}

// ── Held keys ─────────────────────────────────────────────────────────────────

#[test]
fn pressed_keys_are_held_together() {
    let mut t = KeyTracker::new(false);
    feed(&mut t, &[press(KeyCode::Left), press(KeyCode::Char(' '))], 10);

    let held = t.held(10);
    assert!(held.left);
    assert!(held.fire);
    assert!(!held.right);
}

#[test]
fn letter_keys_steer_too() {
    let mut t = KeyTracker::new(false);
    feed(&mut t, &[press(KeyCode::Char('d'))], 0);
    assert!(t.held(0).right);
    feed(&mut t, &[press(KeyCode::Char('A'))], 1);
    assert!(t.held(1).left);
}

#[test]
fn held_key_expires_after_window() {
    let mut t = KeyTracker::new(false);
    feed(&mut t, &[press(KeyCode::Right)], 100);

    assert!(t.held(100 + HOLD_WINDOW).right);
    assert!(!t.held(100 + HOLD_WINDOW + 1).right);
}

#[test]
fn repeat_refreshes_the_window() {
    let mut t = KeyTracker::new(true);
    feed(&mut t, &[press(KeyCode::Char(' '))], 0);
    feed(&mut t, &[key(KeyCode::Char(' '), KeyEventKind::Repeat)], 6);

    assert!(t.held(6 + HOLD_WINDOW).fire);
}

#[test]
fn release_drops_the_key_immediately() {
    let mut t = KeyTracker::new(true);
    feed(&mut t, &[press(KeyCode::Left)], 5);
    feed(&mut t, &[key(KeyCode::Left, KeyEventKind::Release)], 6);

    assert!(!t.held(6).left);
}

// ── One-shot flags ────────────────────────────────────────────────────────────

#[test]
fn quit_keys() {
    for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
        let mut t = KeyTracker::new(false);
        assert!(feed(&mut t, &[press(code)], 0).quit_requested, "{code:?}");
    }

    let mut t = KeyTracker::new(false);
    let ctrl_c = Event::Key(KeyEvent::new_with_kind(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
        KeyEventKind::Press,
    ));
    assert!(feed(&mut t, &[ctrl_c], 0).quit_requested);
    assert!(!feed(&mut t, &[press(KeyCode::Char('c'))], 1).quit_requested);
}

#[test]
fn enhanced_terminal_reports_key_up_on_release() {
    let mut t = KeyTracker::new(true);
    assert!(!feed(&mut t, &[press(KeyCode::Enter)], 0).any_key_up);
    assert!(feed(&mut t, &[key(KeyCode::Enter, KeyEventKind::Release)], 1).any_key_up);
}

#[test]
fn classic_terminal_treats_press_as_key_up() {
    let mut t = KeyTracker::new(false);
    assert!(feed(&mut t, &[press(KeyCode::Enter)], 0).any_key_up);
}

#[test]
fn non_key_events_are_ignored() {
    let mut t = KeyTracker::new(false);
    let snapshot = feed(&mut t, &[Event::Resize(80, 24), Event::FocusLost], 0);
    assert_eq!(snapshot, InputSnapshot::default());
}

// ── Polling ───────────────────────────────────────────────────────────────────

#[test]
fn poll_drains_the_channel() {
    let (tx, rx) = mpsc::channel();
    let mut t = KeyTracker::new(false);
    tx.send(press(KeyCode::Left)).unwrap();
    tx.send(press(KeyCode::Char(' '))).unwrap();

    let snapshot = t.poll(&rx, 3);
    assert!(snapshot.left);
    assert!(snapshot.fire);
    assert!(snapshot.any_key_up);
    assert!(rx.try_recv().is_err());

    // Nothing new: still held, but no one-shot flags
    let next = t.poll(&rx, 4);
    assert!(next.left);
    assert!(!next.any_key_up);
}

#[test]
fn poll_survives_a_closed_channel() {
    let (tx, rx) = mpsc::channel::<Event>();
    drop(tx);
    let mut t = KeyTracker::new(false);
    assert_eq!(t.poll(&rx, 0), InputSnapshot::default());
}
