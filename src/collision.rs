/// Collision resolution between entity groups.
///
/// Runs once per frame in a fixed order: obstacle × projectile, then
/// player × obstacle, then player × power-up.  Detection only clears
/// liveness flags; the caller compacts the world afterwards.  An obstacle
/// killed by a projectile is already dead when the player check runs, so a
/// projectile kill always wins over a ram on the same frame.

use rand::Rng;

use crate::entities::{circles_overlap, ExplosionSize, PowerUpKind, TickContext, World};
use crate::events::GameEvent;
use crate::spawner;

/// Points for destroying an obstacle.  Bigger rocks are worth less and
/// anything wider than 50 costs points.
pub fn kill_score(radius: f32) -> i64 {
    50 - radius as i64
}

pub fn resolve(world: &mut World, ctx: &TickContext, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    projectiles_vs_obstacles(world, ctx, rng, events);
    player_vs_obstacles(world, ctx, rng, events);
    player_vs_powerups(world, ctx, rng, events);
}

// ── 1. Obstacle × Projectile ─────────────────────────────────────────────────

fn projectiles_vs_obstacles(
    world: &mut World,
    ctx: &TickContext,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let mut killed: Vec<usize> = Vec::new();

    for (oi, obstacle) in world.obstacles.iter_mut().enumerate() {
        if !obstacle.alive {
            continue;
        }
        let mut hit = false;
        for projectile in world.projectiles.iter_mut() {
            if projectile.alive && projectile.rect.overlaps(&obstacle.rect) {
                projectile.alive = false;
                hit = true;
            }
        }
        if hit {
            obstacle.alive = false;
            killed.push(oi);
        }
    }

    for oi in killed {
        let radius = world.obstacles[oi].radius;
        let center = world.obstacles[oi].rect.center();

        world.score += kill_score(radius);
        events.push(GameEvent::Explosion);
        world.add_explosion(center, ExplosionSize::Large, ctx.now_ms);
        spawner::maybe_spawn_powerup(world, ctx, center, rng);
        spawner::spawn_obstacle(world, ctx, rng);
    }
}

// ── 2. Player × Obstacle ─────────────────────────────────────────────────────

fn player_vs_obstacles(
    world: &mut World,
    ctx: &TickContext,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    if world.player.hidden {
        return;
    }
    let player_center = world.player.center();
    let player_radius = world.player.radius;

    let hits: Vec<usize> = world
        .obstacles
        .iter()
        .enumerate()
        .filter(|(_, o)| o.alive && circles_overlap(player_center, player_radius, o.rect.center(), o.radius))
        .map(|(i, _)| i)
        .collect();

    // Every obstacle detected above is consumed, even after a death resets
    // the shield part way through the list
    for oi in hits {
        let radius = world.obstacles[oi].radius;
        let center = world.obstacles[oi].rect.center();
        world.obstacles[oi].alive = false;

        world.player.shield -= 2 * radius as i32;
        world.add_explosion(center, ExplosionSize::Small, ctx.now_ms);
        spawner::spawn_obstacle(world, ctx, rng);

        if world.player.shield <= 0 {
            player_death(world, ctx, events);
        }
    }
}

fn player_death(world: &mut World, ctx: &TickContext, events: &mut Vec<GameEvent>) {
    events.push(GameEvent::PlayerDeath);
    let center = world.player.center();
    let id = world.add_explosion(center, ExplosionSize::Player, ctx.now_ms);
    world.death_explosion = Some(id);

    world.player.hide(ctx.config, ctx.now_ms);
    world.player.lives = world.player.lives.saturating_sub(1);
    world.player.shield = ctx.config.max_shield;
    log::debug!("player destroyed, {} lives left", world.player.lives);
}

// ── 3. Player × Power-up ─────────────────────────────────────────────────────

fn player_vs_powerups(
    world: &mut World,
    ctx: &TickContext,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    if world.player.hidden {
        return;
    }
    let player_rect = world.player.rect;
    let max_shield = ctx.config.max_shield;

    for powerup in world.powerups.iter_mut() {
        if !powerup.alive || !powerup.rect.overlaps(&player_rect) {
            continue;
        }
        powerup.alive = false;
        match powerup.kind {
            PowerUpKind::Shield => {
                let heal = rng.gen_range(ctx.seed.shield_heal());
                world.player.shield = (world.player.shield + heal).clamp(0, max_shield);
                events.push(GameEvent::ShieldPickup);
                log::debug!("shield +{heal} -> {}", world.player.shield);
            }
            PowerUpKind::Weapon => {
                world.player.power_up(ctx.now_ms);
                events.push(GameEvent::WeaponPickup);
                log::debug!("weapon power -> {}", world.player.power);
            }
        }
    }
}
