use glam::Vec2;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use qship::collision::resolve;
use qship::config::GameConfig;
use qship::entities::*;
use qship::input::InputSnapshot;
use qship::seed::SessionSeed;

fn obstacle_at(center: Vec2, radius: f32) -> Obstacle {
    Obstacle {
        id: 0,
        variant: 1,
        rect: Rect::from_center(center, 40.0, 40.0),
        radius,
        velocity: Vec2::ZERO,
        rotation: 0.0,
        rot_speed: 0.0,
        last_rotate_ms: 0,
        alive: true,
    }
}

#[derive(Clone, Debug)]
enum Hit {
    Ram(u8),
    Shield,
}

fn hit_strategy() -> impl Strategy<Value = Hit> {
    prop_oneof![(0u8..60).prop_map(Hit::Ram), Just(Hit::Shield)]
}

proptest! {
    #[test]
    fn score_is_sum_of_fifty_minus_radius(radii in prop::collection::vec(0u8..80, 0..20), rng_seed in any::<u64>()) {
        let config = GameConfig::default();
        let seed = SessionSeed::default();
        let mut rng = StdRng::seed_from_u64(rng_seed);
        let mut world = World::new(&config, 0);
        let target = Vec2::new(200.0, 250.0);

        for (i, &r) in radii.iter().enumerate() {
            let ctx = TickContext { config: &config, seed: &seed, now_ms: i as u64 };
            world.add_obstacle(obstacle_at(target, r as f32));
            world.add_projectile(Projectile::new(target.x, target.y + 20.0, &config));
            let mut events = Vec::new();
            resolve(&mut world, &ctx, &mut rng, &mut events);
            world.compact();
        }

        let expected: i64 = radii.iter().map(|&r| 50 - r as i64).sum();
        prop_assert_eq!(world.score, expected);
    }

    #[test]
    fn shield_stays_in_range(hits in prop::collection::vec(hit_strategy(), 1..40), n11 in 1i64..200, rng_seed in any::<u64>()) {
        let config = GameConfig::default();
        let seed = SessionSeed::from_counts("vigo", None, Some(n11), None, None);
        let mut rng = StdRng::seed_from_u64(rng_seed);
        let mut world = World::new(&config, 0);
        let mut lives = world.player.lives;

        for (i, hit) in hits.iter().enumerate() {
            // Bring the ship back so every hit lands
            world.player.hidden = false;
            let at = world.player.center();
            match hit {
                Hit::Ram(r) => { world.add_obstacle(obstacle_at(at, *r as f32)); }
                Hit::Shield => { world.add_powerup(PowerUp::new(PowerUpKind::Shield, at, &config)); }
            }
            let ctx = TickContext { config: &config, seed: &seed, now_ms: i as u64 };
            let mut events = Vec::new();
            resolve(&mut world, &ctx, &mut rng, &mut events);
            world.compact();

            prop_assert!((0..=100).contains(&world.player.shield), "shield {}", world.player.shield);
            let lost = lives - world.player.lives;
            prop_assert!(lost <= 1);
            prop_assert_eq!(lost == 1, world.player.hidden && lives > 0);
            lives = world.player.lives;
        }
    }

    #[test]
    fn power_moves_one_step_at_a_time(pickups in 1u32..6) {
        let config = GameConfig::default();
        let seed = SessionSeed::default();
        let mut player = Player::new(&config, 0);
        for _ in 0..pickups {
            let before = player.power;
            player.power_up(0);
            prop_assert_eq!(player.power, before + 1);
        }

        let mut now = 0;
        let mut expected = 1 + pickups;
        for _ in 0..pickups + 3 {
            now += config.powerup_duration_ms + 1;
            let ctx = TickContext { config: &config, seed: &seed, now_ms: now };
            player.advance(&ctx, &InputSnapshot::default());
            expected = (expected - 1).max(1);
            prop_assert_eq!(player.power, expected);
        }
    }
}
