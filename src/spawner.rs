/// Obstacle and power-up creation from the seeded ranges.

use glam::Vec2;
use rand::Rng;

use crate::entities::{obstacle_radius, Obstacle, PowerUp, PowerUpKind, Rect, TickContext, World};

/// Bottom edge of a freshly spawned obstacle, above the viewport.
const SPAWN_BOTTOM: std::ops::Range<i32> = -80..-20;

/// Build a new obstacle at a random spot above the viewport.
pub fn make_obstacle(ctx: &TickContext, rng: &mut impl Rng) -> Obstacle {
    let config = ctx.config;
    let variant = rng.gen_range(0..config.obstacle_widths.len());
    let width = config.obstacle_widths[variant];

    let span = (config.width - width).max(1.0) as i32;
    let mut rect = Rect::new(rng.gen_range(0..span) as f32, 0.0, width, width);
    rect.set_bottom(rng.gen_range(SPAWN_BOTTOM) as f32);

    let max_rot = config.obstacle_max_rot_speed;
    Obstacle {
        id: 0,
        variant,
        rect,
        radius: obstacle_radius(width),
        velocity: Vec2::new(
            rng.gen_range(ctx.seed.speed_x()) as f32,
            rng.gen_range(ctx.seed.spawn_speed_y()) as f32,
        ),
        rotation: 0.0,
        rot_speed: rng.gen_range(-max_rot..=max_rot) as f32,
        last_rotate_ms: ctx.now_ms,
        alive: true,
    }
}

/// Add one obstacle to the world; keeps the live count constant when called
/// once per destroyed obstacle.
pub fn spawn_obstacle(world: &mut World, ctx: &TickContext, rng: &mut impl Rng) -> u32 {
    let obstacle = make_obstacle(ctx, rng);
    world.add_obstacle(obstacle)
}

/// Unconditionally drop a power-up of random kind at `at`.
pub fn spawn_powerup(world: &mut World, ctx: &TickContext, at: Vec2, rng: &mut impl Rng) -> u32 {
    let kind = if rng.gen_bool(0.5) {
        PowerUpKind::Shield
    } else {
        PowerUpKind::Weapon
    };
    world.add_powerup(PowerUp::new(kind, at, ctx.config))
}

/// Roll the drop chance for a destroyed obstacle.
pub fn maybe_spawn_powerup(
    world: &mut World,
    ctx: &TickContext,
    at: Vec2,
    rng: &mut impl Rng,
) -> Option<u32> {
    if rng.gen_bool(ctx.config.powerup_drop_chance) {
        Some(spawn_powerup(world, ctx, at, rng))
    } else {
        None
    }
}

/// Start-of-session fill.
pub fn populate(world: &mut World, ctx: &TickContext, rng: &mut impl Rng) {
    for _ in 0..ctx.config.obstacle_count {
        spawn_obstacle(world, ctx, rng);
    }
}
