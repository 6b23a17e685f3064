/// Rendering layer.  All terminal I/O lives here.
///
/// [`TerminalSurface`] implements [`Surface`] on top of crossterm.  The
/// viewport is measured in pixels; every draw call scales its position down
/// to a terminal cell.  No game logic is performed here.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::config::GameConfig;
use crate::entities::{ExplosionSize, PowerUpKind, Snapshot, Sprite};
use crate::present::Surface;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TEXT: Color = Color::White;
const C_TEXT_LARGE: Color = Color::Yellow;
const C_SHIELD_FILL: Color = Color::Green;
const C_SHIELD_FRAME: Color = Color::White;
const C_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_DEVICE: Color = Color::Magenta;
const C_ROCK: Color = Color::DarkYellow;
const C_ROCK_LARGE: Color = Color::Red;
const C_PROJECTILE: Color = Color::Cyan;
const C_POWER_SHIELD: Color = Color::Green;
const C_POWER_WEAPON: Color = Color::Yellow;
const C_EXPLOSION: Color = Color::Yellow;
const C_EXPLOSION_PLAYER: Color = Color::Red;

const SHIELD_CELLS: usize = 10;

/// Rock faces by rotation quadrant.
const ROCK_FACES: [&str; 4] = ["◐", "◓", "◑", "◒"];

const BLAST_SMALL: [&str; 5] = ["·", "∗", "✶", "✷", "·"];
const BLAST_LARGE: [&str; 5] = ["✶", "✹", "❂", "✹", "·"];
const BLAST_PLAYER: [&str; 5] = ["✹", "❂", "✺", "❂", "∗"];

pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    view_w: f32,
    view_h: f32,
    /// Re-query the terminal size every frame.
    track_size: bool,
    /// Letter stamped on the cosmetic device obstacle.
    device_mark: char,
}

impl<W: Write> TerminalSurface<W> {
    /// Surface sized to the current terminal.
    pub fn new(out: W, config: &GameConfig, cosmetic_id: &str) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut surface = Self::with_size(out, cols, rows, config, cosmetic_id);
        surface.track_size = true;
        Ok(surface)
    }

    /// Surface with a fixed cell grid (used when no terminal is attached).
    pub fn with_size(out: W, cols: u16, rows: u16, config: &GameConfig, cosmetic_id: &str) -> Self {
        let device_mark = cosmetic_id
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?');
        Self {
            out,
            cols: cols.max(1),
            rows: rows.max(1),
            view_w: config.width,
            view_h: config.height,
            track_size: false,
            device_mark,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Map a viewport point to a terminal cell, `None` when off-screen.
    pub fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x >= self.view_w || y >= self.view_h {
            return None;
        }
        let col = (x / self.view_w * self.cols as f32) as u16;
        let row = (y / self.view_h * self.rows as f32) as u16;
        Some((col.min(self.cols - 1), row.min(self.rows - 1)))
    }

    /// Width of `px` viewport pixels in cells, at least one.
    fn cells_wide(&self, px: f32) -> usize {
        ((px / self.view_w * self.cols as f32).round() as usize).max(1)
    }

    /// Print `text` centered on column `col`, clipped to the grid.
    fn print_centered(&mut self, text: &str, col: u16, row: u16, color: Color) -> io::Result<()> {
        let len = text.chars().count() as u16;
        let start = col.saturating_sub(len / 2);
        self.print_at(text, start, row, color)
    }

    fn print_at(&mut self, text: &str, col: u16, row: u16, color: Color) -> io::Result<()> {
        if row >= self.rows || col >= self.cols {
            return Ok(());
        }
        let room = (self.cols - col) as usize;
        let clipped: String = text.chars().take(room).collect();
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(clipped))?;
        Ok(())
    }

    fn sprite_glyph(&self, snapshot: &Snapshot) -> (String, Color) {
        match snapshot.sprite {
            Sprite::Player => {
                let glyph = if self.cells_wide(snapshot.rect.w) >= 3 { "/▲\\" } else { "▲" };
                (glyph.to_string(), C_PLAYER)
            }
            Sprite::Obstacle { variant: 0 } => (format!("[{}]", self.device_mark), C_DEVICE),
            Sprite::Obstacle { .. } => {
                let quadrant = (snapshot.rotation.rem_euclid(360.0) / 90.0) as usize % 4;
                let face = ROCK_FACES[quadrant];
                if self.cells_wide(snapshot.rect.w) >= 3 {
                    (format!("({face})"), C_ROCK_LARGE)
                } else {
                    (face.to_string(), C_ROCK)
                }
            }
            Sprite::Projectile => ("│".to_string(), C_PROJECTILE),
            Sprite::PowerUp(PowerUpKind::Shield) => ("♦".to_string(), C_POWER_SHIELD),
            Sprite::PowerUp(PowerUpKind::Weapon) => ("ϟ".to_string(), C_POWER_WEAPON),
            Sprite::Explosion { size, frame } => {
                let (frames, color) = match size {
                    ExplosionSize::Small => (&BLAST_SMALL, C_EXPLOSION),
                    ExplosionSize::Large => (&BLAST_LARGE, C_EXPLOSION),
                    ExplosionSize::Player => (&BLAST_PLAYER, C_EXPLOSION_PLAYER),
                };
                let i = (frame as usize).min(frames.len() - 1);
                (frames[i].to_string(), color)
            }
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self) -> io::Result<()> {
        if self.track_size {
            let (cols, rows) = terminal::size()?;
            self.cols = cols.max(1);
            self.rows = rows.max(1);
        }
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, size: u32, x: f32, y: f32) -> io::Result<()> {
        let Some((col, row)) = self.to_cell(x, y) else {
            return Ok(());
        };
        let large = size >= 40;
        if large {
            self.out.queue(style::SetAttribute(Attribute::Bold))?;
        }
        self.print_centered(text, col, row, if large { C_TEXT_LARGE } else { C_TEXT })?;
        if large {
            self.out.queue(style::SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }

    fn draw_sprite(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        let center = snapshot.rect.center();
        let Some((col, row)) = self.to_cell(center.x, center.y) else {
            return Ok(());
        };
        let (glyph, color) = self.sprite_glyph(snapshot);
        self.print_centered(&glyph, col, row, color)
    }

    fn draw_shield_bar(&mut self, x: f32, y: f32, pct: i32) -> io::Result<()> {
        let Some((col, row)) = self.to_cell(x, y) else {
            return Ok(());
        };
        let pct = pct.clamp(0, 100) as usize;
        let filled = pct * SHIELD_CELLS / 100;
        self.print_at("[", col, row, C_SHIELD_FRAME)?;
        self.print_at(&"■".repeat(filled), col + 1, row, C_SHIELD_FILL)?;
        self.print_at(
            &"□".repeat(SHIELD_CELLS - filled),
            col + 1 + filled as u16,
            row,
            C_SHIELD_FRAME,
        )?;
        self.print_at("]", col + 1 + SHIELD_CELLS as u16, row, C_SHIELD_FRAME)
    }

    fn draw_lives(&mut self, x: f32, y: f32, count: u32) -> io::Result<()> {
        let Some((col, row)) = self.to_cell(x, y) else {
            return Ok(());
        };
        self.print_at(&"♥".repeat(count as usize), col, row, C_LIVES)
    }

    fn present_frame(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
