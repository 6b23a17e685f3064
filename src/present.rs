/// Presentation and audio seams.
///
/// The core never touches a terminal or a mixer directly.  It draws through
/// [`Surface`] and plays sounds through [`Audio`]; `display` provides the
/// crossterm surface used by the binary.

use std::io;

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Snapshot, World};
use crate::events::GameEvent;
use crate::session::{Phase, Session};

/// A drawing target.  Coordinates are viewport pixels.
pub trait Surface {
    fn clear(&mut self) -> io::Result<()>;
    /// Text whose top edge is centered on `(x, y)`.
    fn draw_text(&mut self, text: &str, size: u32, x: f32, y: f32) -> io::Result<()>;
    fn draw_sprite(&mut self, sprite: &Snapshot) -> io::Result<()>;
    /// `pct` below zero draws an empty bar.
    fn draw_shield_bar(&mut self, x: f32, y: f32, pct: i32) -> io::Result<()>;
    fn draw_lives(&mut self, x: f32, y: f32, count: u32) -> io::Result<()>;
    fn present_frame(&mut self) -> io::Result<()>;
}

pub trait Audio {
    fn play(&mut self, event: GameEvent);
    fn start_music(&mut self);
}

/// Audio adapter for targets without a mixer: every cue goes to the log.
#[derive(Debug, Default)]
pub struct LogAudio {
    played: u64,
}

impl LogAudio {
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl Audio for LogAudio {
    fn play(&mut self, event: GameEvent) {
        self.played += 1;
        log::trace!("sound: {event:?}");
    }

    fn start_music(&mut self) {
        log::debug!("background loop started");
    }
}

// ── Screens ───────────────────────────────────────────────────────────────────

pub const TITLE: &str = "QShip";

/// Static instructions shown while waiting for a key.
pub fn render_title<S: Surface>(surface: &mut S, config: &GameConfig) -> io::Result<()> {
    let cx = config.width / 2.0;
    let h = config.height;
    surface.clear()?;
    surface.draw_text(TITLE, 64, cx, h / 7.0)?;
    surface.draw_text("Use left & right arrows to move and space to fire!", 32, cx, h * 5.0 / 12.0)?;
    surface.draw_text("Press any key to begin!", 30, cx, h * 6.0 / 12.0)?;
    surface.draw_text("Q or Esc quits.", 24, cx, h * 8.0 / 12.0)?;
    surface.present_frame()
}

/// Entities back to front, then the HUD: score, shield bar, lives.
pub fn render_world<S: Surface>(surface: &mut S, world: &World, config: &GameConfig) -> io::Result<()> {
    surface.clear()?;
    for snapshot in world.snapshots() {
        surface.draw_sprite(&snapshot)?;
    }
    surface.draw_text(&world.score.to_string(), 40, config.width / 2.0, 10.0)?;
    surface.draw_shield_bar(5.0, 5.0, world.player.shield)?;
    surface.draw_lives(config.width - 100.0, 5.0, world.player.lives)?;
    surface.present_frame()
}

/// Draw whatever the current phase shows.
pub fn render<S: Surface, R: Rng>(surface: &mut S, session: &Session<R>) -> io::Result<()> {
    match session.phase() {
        Phase::TitleScreen => render_title(surface, session.config()),
        Phase::Playing | Phase::GameOver => render_world(surface, session.world(), session.config()),
    }
}
