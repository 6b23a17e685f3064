/// Per-frame simulation step.
///
/// `tick` mutates the world in place.  All randomness comes through `rng`
/// so callers control determinism (tests pass a seeded RNG).

use rand::Rng;

use crate::collision;
use crate::entities::{TickContext, World};
use crate::events::GameEvent;
use crate::input::InputSnapshot;

/// Advance the world by one frame and return what the audio side should hear.
pub fn tick(
    world: &mut World,
    ctx: &TickContext,
    input: &InputSnapshot,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // ── 1. Advance everything that already exists ────────────────────────────
    let volley = world.player.advance(ctx, input);
    for obstacle in world.obstacles.iter_mut() {
        obstacle.advance(ctx, rng);
    }
    for projectile in world.projectiles.iter_mut() {
        projectile.advance();
    }
    for powerup in world.powerups.iter_mut() {
        powerup.advance(ctx);
    }
    for explosion in world.explosions.iter_mut() {
        explosion.advance(ctx);
    }

    // Projectiles fired this frame start moving on the next one
    if !volley.is_empty() {
        events.push(GameEvent::Fire);
        for projectile in volley {
            world.add_projectile(projectile);
        }
    }

    // ── 2. Collisions ─────────────────────────────────────────────────────────
    collision::resolve(world, ctx, rng, &mut events);

    // ── 3. Deferred removal ──────────────────────────────────────────────────
    world.compact();

    events
}

/// Lives are gone and the final death animation has finished.
pub fn is_game_over(world: &World) -> bool {
    world.player.lives == 0 && world.death_explosion_finished()
}
