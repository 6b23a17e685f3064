/// Immutable game configuration.
///
/// Every tuning constant lives in [`GameConfig`], which is built once at
/// startup and handed to the session by reference.  Defaults are the values
/// in [`defaults`]; a TOML file may override any subset of them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "QSHIP_CONFIG";

/// Config file picked up from the working directory when present.
pub const CONFIG_FILE: &str = "qship.toml";

pub mod defaults {
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;
    pub const FPS: u32 = 60;

    pub const PLAYER_WIDTH: f32 = 100.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Gap between the hull bottom and the viewport bottom.
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;
    /// Vertical offset below the viewport where a hidden hull is parked.
    pub const HIDDEN_OFFSET: f32 = 200.0;
    pub const STARTING_LIVES: u32 = 3;
    pub const MAX_SHIELD: i32 = 100;

    pub const SHOOT_DELAY_MS: u64 = 200;
    pub const POWERUP_DURATION_MS: u64 = 2500;
    pub const RESPAWN_MS: u64 = 1000;

    pub const PROJECTILE_SPEED: f32 = 20.0;
    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 40.0;

    pub const POWERUP_SPEED: f32 = 5.0;
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_DROP_CHANCE: f64 = 0.10;

    pub const OBSTACLE_COUNT: usize = 8;
    /// Sprite widths; index 0 is the cosmetic device sprite.
    pub const OBSTACLE_WIDTHS: [f32; 5] = [60.0, 90.0, 50.0, 40.0, 28.0];
    pub const OBSTACLE_ROTATE_MS: u64 = 50;
    pub const OBSTACLE_MAX_ROT_SPEED: i32 = 8;
    pub const EXIT_MARGIN_BOTTOM: f32 = 10.0;
    pub const EXIT_MARGIN_SIDE: f32 = 100.0;

    pub const EXPLOSION_FRAME_MS: u64 = 75;
    pub const EXPLOSION_FRAMES: u32 = 5;

    pub const LOG_FILE: &str = "qship.log";
    pub const LOG_FILTER: &str = "info";
}

/// Runtime-tunable configuration.  All fields fall back to [`defaults`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Viewport ─────────────────────────────────────────────────────────────
    pub width: f32,
    pub height: f32,
    pub fps: u32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_width: f32,
    pub player_height: f32,
    pub player_radius: f32,
    pub player_speed: f32,
    pub player_bottom_margin: f32,
    pub hidden_offset: f32,
    pub starting_lives: u32,
    pub max_shield: i32,
    pub shoot_delay_ms: u64,
    pub powerup_duration_ms: u64,
    pub respawn_ms: u64,

    // ── Projectiles & power-ups ──────────────────────────────────────────────
    pub projectile_speed: f32,
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub powerup_speed: f32,
    pub powerup_size: f32,
    pub powerup_drop_chance: f64,

    // ── Obstacles ────────────────────────────────────────────────────────────
    pub obstacle_count: usize,
    pub obstacle_widths: Vec<f32>,
    pub obstacle_rotate_ms: u64,
    pub obstacle_max_rot_speed: i32,
    pub exit_margin_bottom: f32,
    pub exit_margin_side: f32,

    // ── Explosions ───────────────────────────────────────────────────────────
    pub explosion_frame_ms: u64,
    pub explosion_frames: u32,

    // ── Logging ──────────────────────────────────────────────────────────────
    pub log_file: PathBuf,
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        use defaults::*;
        Self {
            width: WIDTH,
            height: HEIGHT,
            fps: FPS,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            hidden_offset: HIDDEN_OFFSET,
            starting_lives: STARTING_LIVES,
            max_shield: MAX_SHIELD,
            shoot_delay_ms: SHOOT_DELAY_MS,
            powerup_duration_ms: POWERUP_DURATION_MS,
            respawn_ms: RESPAWN_MS,
            projectile_speed: PROJECTILE_SPEED,
            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            powerup_speed: POWERUP_SPEED,
            powerup_size: POWERUP_SIZE,
            powerup_drop_chance: POWERUP_DROP_CHANCE,
            obstacle_count: OBSTACLE_COUNT,
            obstacle_widths: OBSTACLE_WIDTHS.to_vec(),
            obstacle_rotate_ms: OBSTACLE_ROTATE_MS,
            obstacle_max_rot_speed: OBSTACLE_MAX_ROT_SPEED,
            exit_margin_bottom: EXIT_MARGIN_BOTTOM,
            exit_margin_side: EXIT_MARGIN_SIDE,
            explosion_frame_ms: EXPLOSION_FRAME_MS,
            explosion_frames: EXPLOSION_FRAMES,
            log_file: PathBuf::from(LOG_FILE),
            log_filter: LOG_FILTER.to_string(),
        }
    }
}

impl GameConfig {
    /// Resolve the config for this process: `$QSHIP_CONFIG`, then
    /// `./qship.toml`, then built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate.  Keys absent from `text` keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(invalid("width/height", format!("{}x{}", self.width, self.height), "must be positive"));
        }
        if self.fps == 0 {
            return Err(invalid("fps", self.fps, "must be at least 1"));
        }
        if self.player_width >= self.width {
            return Err(invalid("player_width", self.player_width, "must be narrower than the viewport"));
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", self.starting_lives, "must be at least 1"));
        }
        if self.max_shield <= 0 {
            return Err(invalid("max_shield", self.max_shield, "must be positive"));
        }
        if self.obstacle_widths.is_empty() {
            return Err(invalid("obstacle_widths", "[]", "needs at least one sprite"));
        }
        if let Some(w) = self
            .obstacle_widths
            .iter()
            .find(|&&w| w <= 0.0 || w >= self.width)
        {
            return Err(invalid("obstacle_widths", w, "each width must lie in (0, width)"));
        }
        if !(0.0..=1.0).contains(&self.powerup_drop_chance) {
            return Err(invalid("powerup_drop_chance", self.powerup_drop_chance, "must lie in [0, 1]"));
        }
        if self.explosion_frames == 0 {
            return Err(invalid("explosion_frames", self.explosion_frames, "must be at least 1"));
        }
        if self.obstacle_max_rot_speed < 0 {
            return Err(invalid("obstacle_max_rot_speed", self.obstacle_max_rot_speed, "must not be negative"));
        }
        Ok(())
    }

    /// Target duration of one frame.
    pub fn frame_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.fps as f64)
    }
}

fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason,
    }
}
