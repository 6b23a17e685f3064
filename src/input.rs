/// Keyboard input → per-frame [`InputSnapshot`].
///
/// Instead of acting on each key event individually, [`KeyTracker`] records
/// the frame number of the last press/repeat event for every key.  Each
/// frame we check which keys are still "fresh" (within [`HOLD_WINDOW`]
/// frames), so Space + ←/→ can be held at the same time.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper
///   `Press` / `Repeat` / `Release` events, keys are dropped on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` frames of silence.

use std::collections::HashMap;
use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  At 60 FPS that is ~133 ms, shorter than the OS repeat gap.
pub const HOLD_WINDOW: u64 = 8;

/// What the player is doing this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub quit_requested: bool,
    /// A key was let go this frame (title screen "press any key").
    pub any_key_up: bool,
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
    /// Terminal reports release events.
    enhanced: bool,
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl KeyTracker {
    pub fn new(enhanced: bool) -> Self {
        Self {
            key_frame: HashMap::new(),
            enhanced,
        }
    }

    /// Drain every pending event without blocking and build the snapshot.
    pub fn poll(&mut self, rx: &mpsc::Receiver<Event>, frame: u64) -> InputSnapshot {
        let mut snapshot = InputSnapshot::default();
        while let Ok(event) = rx.try_recv() {
            self.handle(&event, frame, &mut snapshot);
        }
        self.fill_held(frame, &mut snapshot);
        snapshot
    }

    /// Fold one event into the tracker; one-shot flags land in `snapshot`.
    pub fn handle(&mut self, event: &Event, frame: u64, snapshot: &mut InputSnapshot) {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
            return;
        };
        let (code, modifiers) = (*code, *modifiers);
        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(code, frame);
                if is_quit(code, modifiers) {
                    snapshot.quit_requested = true;
                }
                if !self.enhanced {
                    snapshot.any_key_up = true;
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
                snapshot.any_key_up = true;
            }
        }
    }

    fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|&k| self.is_held(k, frame))
    }

    fn fill_held(&self, frame: u64, snapshot: &mut InputSnapshot) {
        snapshot.left = self.any_held(
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        );
        snapshot.right = self.any_held(
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        );
        snapshot.fire = self.is_held(KeyCode::Char(' '), frame);
    }

    /// Snapshot of held keys only, without consuming events.
    pub fn held(&self, frame: u64) -> InputSnapshot {
        let mut snapshot = InputSnapshot::default();
        self.fill_held(frame, &mut snapshot);
        snapshot
    }
}
