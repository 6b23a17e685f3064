/// Game entities and the world that owns them.
///
/// Each kind carries its own `advance` (movement, timers, self-destruction
/// via the `alive` flag) and a read-only [`Snapshot`] for drawing.  Removal
/// is deferred: nothing leaves a collection until [`World::compact`].

use glam::Vec2;
use rand::Rng;

use crate::clock::elapsed_past;
use crate::config::GameConfig;
use crate::input::InputSnapshot;
use crate::seed::SessionSeed;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle, top-left anchored, in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }
    pub fn right(&self) -> f32 {
        self.x + self.w
    }
    pub fn top(&self) -> f32 {
        self.y
    }
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    /// Edges touching do not count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

// ── Per-tick context ──────────────────────────────────────────────────────────

/// Everything an entity may read while advancing.
#[derive(Clone, Copy, Debug)]
pub struct TickContext<'a> {
    pub config: &'a GameConfig,
    pub seed: &'a SessionSeed,
    pub now_ms: u64,
}

// ── Render view ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    Shield,
    Weapon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionSize {
    Small,
    Large,
    /// The player's own ship going down.
    Player,
}

impl ExplosionSize {
    /// Edge length of the square the animation covers.
    pub fn extent(&self) -> f32 {
        match self {
            ExplosionSize::Small => 32.0,
            ExplosionSize::Large => 75.0,
            ExplosionSize::Player => 150.0,
        }
    }
}

/// Which picture to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Player,
    /// Index into the obstacle sprite table; 0 is the cosmetic device.
    Obstacle { variant: usize },
    Projectile,
    PowerUp(PowerUpKind),
    Explosion { size: ExplosionSize, frame: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pub sprite: Sprite,
    pub rect: Rect,
    /// Degrees, counter-clockwise.
    pub rotation: f32,
}

/// Shared read-only contract of every entity kind.
pub trait Entity {
    fn snapshot(&self) -> Snapshot;
    fn is_alive(&self) -> bool;
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub radius: f32,
    pub speed_x: f32,
    /// 0..=max_shield after every collision pass.
    pub shield: i32,
    pub lives: u32,
    /// Weapon tier, never below 1.
    pub power: u32,
    pub last_shot_ms: u64,
    pub power_time_ms: u64,
    pub hidden: bool,
    pub hide_time_ms: u64,
}

impl Player {
    pub fn new(config: &GameConfig, now_ms: u64) -> Self {
        Self {
            rect: Self::spawn_rect(config),
            radius: config.player_radius,
            speed_x: 0.0,
            shield: config.max_shield,
            lives: config.starting_lives,
            power: 1,
            last_shot_ms: now_ms,
            power_time_ms: now_ms,
            hidden: false,
            hide_time_ms: now_ms,
        }
    }

    fn spawn_rect(config: &GameConfig) -> Rect {
        let mut rect = Rect::new(
            (config.width - config.player_width) / 2.0,
            0.0,
            config.player_width,
            config.player_height,
        );
        rect.set_bottom(config.height - config.player_bottom_margin);
        rect
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Advance one frame.  Returns the projectiles fired this frame (empty
    /// when the gun is cooling down or fire isn't held).
    pub fn advance(&mut self, ctx: &TickContext, input: &InputSnapshot) -> Vec<Projectile> {
        let config = ctx.config;

        if self.power >= 2 && elapsed_past(ctx.now_ms, self.power_time_ms, config.powerup_duration_ms) {
            self.power -= 1;
            self.power_time_ms = ctx.now_ms;
        }

        // Input still applies while parked below the viewport
        if self.hidden && elapsed_past(ctx.now_ms, self.hide_time_ms, config.respawn_ms) {
            self.hidden = false;
            self.rect = Self::spawn_rect(config);
        }

        self.speed_x = 0.0;
        if input.left {
            self.speed_x = -config.player_speed;
        }
        if input.right {
            self.speed_x = config.player_speed;
        }
        self.rect.x = (self.rect.x + self.speed_x).clamp(0.0, config.width - self.rect.w);

        if input.fire {
            self.shoot(ctx)
        } else {
            Vec::new()
        }
    }

    fn shoot(&mut self, ctx: &TickContext) -> Vec<Projectile> {
        if !elapsed_past(ctx.now_ms, self.last_shot_ms, ctx.config.shoot_delay_ms) {
            return Vec::new();
        }
        self.last_shot_ms = ctx.now_ms;
        if self.power == 1 {
            vec![Projectile::new(self.rect.center().x, self.rect.top(), ctx.config)]
        } else {
            let mid = self.rect.center().y;
            vec![
                Projectile::new(self.rect.left(), mid, ctx.config),
                Projectile::new(self.rect.right(), mid, ctx.config),
            ]
        }
    }

    pub fn power_up(&mut self, now_ms: u64) {
        self.power += 1;
        self.power_time_ms = now_ms;
    }

    /// Park the hull below the viewport until the respawn window passes.
    pub fn hide(&mut self, config: &GameConfig, now_ms: u64) {
        self.hidden = true;
        self.hide_time_ms = now_ms;
        self.rect.set_center(Vec2::new(
            config.width / 2.0,
            config.height + config.hidden_offset,
        ));
    }
}

impl Entity for Player {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            sprite: Sprite::Player,
            rect: self.rect,
            rotation: 0.0,
        }
    }

    /// The player is never removed; a hidden ship is simply not drawn.
    fn is_alive(&self) -> bool {
        true
    }
}

// ── Obstacle ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Obstacle {
    pub id: u32,
    pub variant: usize,
    pub rect: Rect,
    pub radius: f32,
    /// Pixels per tick.
    pub velocity: Vec2,
    pub rotation: f32,
    pub rot_speed: f32,
    pub last_rotate_ms: u64,
    pub alive: bool,
}

/// Collision radius for a sprite of the given width.
pub fn obstacle_radius(width: f32) -> f32 {
    (width * 0.85 / 2.0).floor()
}

impl Obstacle {
    /// Rotate, move, and wrap back above the viewport once it drifts out.
    /// Never clears `alive`: only collisions destroy obstacles.
    pub fn advance(&mut self, ctx: &TickContext, rng: &mut impl Rng) {
        let config = ctx.config;

        if elapsed_past(ctx.now_ms, self.last_rotate_ms, config.obstacle_rotate_ms) {
            self.last_rotate_ms = ctx.now_ms;
            self.rotation = (self.rotation + self.rot_speed).rem_euclid(360.0);
        }

        self.rect.x += self.velocity.x;
        self.rect.y += self.velocity.y;

        if self.is_out_of_bounds(config) {
            self.reenter(ctx, rng);
        }
    }

    pub fn is_out_of_bounds(&self, config: &GameConfig) -> bool {
        self.rect.top() > config.height + config.exit_margin_bottom
            || self.rect.left() < -config.exit_margin_side
            || self.rect.right() > config.width + config.exit_margin_side
    }

    fn reenter(&mut self, ctx: &TickContext, rng: &mut impl Rng) {
        let span = (ctx.config.width - self.rect.w).max(1.0) as i32;
        self.rect.x = rng.gen_range(0..span) as f32;
        self.rect.y = rng.gen_range(ctx.seed.respawn_top()) as f32;
        self.velocity.y = rng.gen_range(ctx.seed.respawn_speed_y()) as f32;
    }
}

impl Entity for Obstacle {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            sprite: Sprite::Obstacle { variant: self.variant },
            rect: self.rect,
            rotation: self.rotation,
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub id: u32,
    pub rect: Rect,
    pub speed_y: f32,
    pub alive: bool,
}

impl Projectile {
    /// A projectile whose bottom edge sits at `bottom`, centered on `center_x`.
    /// The id is assigned when the world takes ownership.
    pub fn new(center_x: f32, bottom: f32, config: &GameConfig) -> Self {
        let mut rect = Rect::new(
            center_x - config.projectile_width / 2.0,
            0.0,
            config.projectile_width,
            config.projectile_height,
        );
        rect.set_bottom(bottom);
        Self {
            id: 0,
            rect,
            speed_y: -config.projectile_speed,
            alive: true,
        }
    }

    pub fn advance(&mut self) {
        self.rect.y += self.speed_y;
        if self.rect.bottom() < 0.0 {
            self.alive = false;
        }
    }
}

impl Entity for Projectile {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            sprite: Sprite::Projectile,
            rect: self.rect,
            rotation: 0.0,
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

// ── Power-up ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub rect: Rect,
    pub speed_y: f32,
    pub alive: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, center: Vec2, config: &GameConfig) -> Self {
        Self {
            id: 0,
            kind,
            rect: Rect::from_center(center, config.powerup_size, config.powerup_size),
            speed_y: config.powerup_speed,
            alive: true,
        }
    }

    pub fn advance(&mut self, ctx: &TickContext) {
        self.rect.y += self.speed_y;
        if self.rect.top() > ctx.config.height {
            self.alive = false;
        }
    }
}

impl Entity for PowerUp {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            sprite: Sprite::PowerUp(self.kind),
            rect: self.rect,
            rotation: 0.0,
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

// ── Explosion ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Explosion {
    pub id: u32,
    pub center: Vec2,
    pub size: ExplosionSize,
    pub frame: u32,
    pub last_update_ms: u64,
    pub alive: bool,
}

impl Explosion {
    pub fn new(center: Vec2, size: ExplosionSize, now_ms: u64) -> Self {
        Self {
            id: 0,
            center,
            size,
            frame: 0,
            last_update_ms: now_ms,
            alive: true,
        }
    }

    pub fn advance(&mut self, ctx: &TickContext) {
        if !elapsed_past(ctx.now_ms, self.last_update_ms, ctx.config.explosion_frame_ms) {
            return;
        }
        self.last_update_ms = ctx.now_ms;
        self.frame += 1;
        if self.frame >= ctx.config.explosion_frames {
            self.alive = false;
        }
    }
}

impl Entity for Explosion {
    fn snapshot(&self) -> Snapshot {
        let extent = self.size.extent();
        Snapshot {
            sprite: Sprite::Explosion {
                size: self.size,
                frame: self.frame,
            },
            rect: Rect::from_center(self.center, extent, extent),
            rotation: 0.0,
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// All live entities of one play session.  The session owns exactly one
/// world and is the only thing that inserts into or compacts it.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    pub powerups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    /// Signed: large obstacles are worth negative points.
    pub score: i64,
    /// Id of the explosion from the player's most recent death.
    pub death_explosion: Option<u32>,
    next_id: u32,
}

impl World {
    /// Empty collections and a fresh player at the spawn point.
    pub fn new(config: &GameConfig, now_ms: u64) -> Self {
        Self {
            player: Player::new(config, now_ms),
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            powerups: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            death_explosion: None,
            next_id: 1,
        }
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_obstacle(&mut self, mut obstacle: Obstacle) -> u32 {
        obstacle.id = self.next_entity_id();
        let id = obstacle.id;
        self.obstacles.push(obstacle);
        id
    }

    pub fn add_projectile(&mut self, mut projectile: Projectile) -> u32 {
        projectile.id = self.next_entity_id();
        let id = projectile.id;
        self.projectiles.push(projectile);
        id
    }

    pub fn add_powerup(&mut self, mut powerup: PowerUp) -> u32 {
        powerup.id = self.next_entity_id();
        let id = powerup.id;
        self.powerups.push(powerup);
        id
    }

    pub fn add_explosion(&mut self, center: Vec2, size: ExplosionSize, now_ms: u64) -> u32 {
        let mut explosion = Explosion::new(center, size, now_ms);
        explosion.id = self.next_entity_id();
        let id = explosion.id;
        self.explosions.push(explosion);
        id
    }

    /// Drop every entity whose liveness flag was cleared this frame.
    pub fn compact(&mut self) {
        self.obstacles.retain(|e| e.alive);
        self.projectiles.retain(|e| e.alive);
        self.powerups.retain(|e| e.alive);
        self.explosions.retain(|e| e.alive);
    }

    /// The player's death animation has played out (or never started).
    pub fn death_explosion_finished(&self) -> bool {
        match self.death_explosion {
            Some(id) => !self.explosions.iter().any(|e| e.id == id && e.alive),
            None => true,
        }
    }

    /// Every live entity in draw order, back to front.
    pub fn snapshots(&self) -> Vec<Snapshot> {
        let mut out: Vec<Snapshot> = Vec::with_capacity(self.entity_count() + 1);
        out.extend(self.obstacles.iter().filter(|e| e.alive).map(Entity::snapshot));
        out.extend(self.powerups.iter().filter(|e| e.alive).map(Entity::snapshot));
        out.extend(self.projectiles.iter().filter(|e| e.alive).map(Entity::snapshot));
        if !self.player.hidden {
            out.push(self.player.snapshot());
        }
        out.extend(self.explosions.iter().filter(|e| e.alive).map(Entity::snapshot));
        out
    }

    /// Entities other than the player.
    pub fn entity_count(&self) -> usize {
        self.obstacles.len() + self.projectiles.len() + self.powerups.len() + self.explosions.len()
    }
}
