use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use qship::config::GameConfig;
use qship::entities::{Obstacle, Rect};
use qship::events::GameEvent;
use qship::input::InputSnapshot;
use qship::seed::SessionSeed;
use qship::{Flow, Phase, Session};

fn new_session() -> Session<StdRng> {
    Session::new(
        GameConfig::default(),
        SessionSeed::default(),
        StdRng::seed_from_u64(7),
    )
}

fn key_up() -> InputSnapshot {
    InputSnapshot {
        any_key_up: true,
        ..InputSnapshot::default()
    }
}

fn quit() -> InputSnapshot {
    InputSnapshot {
        quit_requested: true,
        ..InputSnapshot::default()
    }
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

/// A parked obstacle sitting right on the player.
fn ram(center: Vec2, radius: f32) -> Obstacle {
    Obstacle {
        id: 0,
        variant: 2,
        rect: Rect::from_center(center, 50.0, 50.0),
        radius,
        velocity: Vec2::ZERO,
        rotation: 0.0,
        rot_speed: 0.0,
        last_rotate_ms: 0,
        alive: true,
    }
}

// ── Title screen ──────────────────────────────────────────────────────────────

#[test]
fn starts_on_title_screen() {
    let s = new_session();
    assert_eq!(s.phase(), Phase::TitleScreen);
}

#[test]
fn title_waits_for_a_key() {
    let mut s = new_session();
    for now in 0..10 {
        assert_eq!(s.step(&idle(), now * 16), Flow::Continue);
    }
    assert_eq!(s.phase(), Phase::TitleScreen);
}

#[test]
fn title_quit_ends_the_loop() {
    let mut s = new_session();
    assert_eq!(s.step(&quit(), 0), Flow::Quit);
    assert_eq!(s.phase(), Phase::TitleScreen);
}

#[test]
fn key_up_starts_a_fresh_session() {
    let mut s = new_session();
    assert_eq!(s.step(&key_up(), 500), Flow::Continue);

    assert_eq!(s.phase(), Phase::Playing);
    let w = s.world();
    assert_eq!(w.obstacles.len(), 8);
    assert!(w.projectiles.is_empty());
    assert!(w.powerups.is_empty());
    assert!(w.explosions.is_empty());
    assert_eq!(w.score, 0);
    assert_eq!(w.player.lives, 3);
    assert_eq!(w.player.shield, 100);
    assert_eq!(w.player.last_shot_ms, 500);
}

// ── Playing ───────────────────────────────────────────────────────────────────

#[test]
fn playing_advances_obstacles() {
    let mut s = new_session();
    s.step(&key_up(), 0);
    let before: Vec<f32> = s.world().obstacles.iter().map(|o| o.rect.y).collect();

    s.step(&idle(), 16);

    let after: Vec<f32> = s.world().obstacles.iter().map(|o| o.rect.y).collect();
    assert_eq!(before.len(), after.len());
    assert!(before.iter().zip(&after).all(|(b, a)| a > b));
}

#[test]
fn quit_while_playing_finishes_the_frame() {
    let mut s = new_session();
    s.step(&key_up(), 0);
    let y0 = s.world().obstacles[0].rect.y;

    assert_eq!(s.step(&quit(), 16), Flow::Quit);
    assert!(s.world().obstacles[0].rect.y > y0);
}

#[test]
fn fire_event_is_queued_until_drained() {
    let mut s = new_session();
    s.step(&key_up(), 0);
    let fire = InputSnapshot {
        fire: true,
        ..InputSnapshot::default()
    };
    s.step(&fire, 300);

    assert!(s.drain_events().contains(&GameEvent::Fire));
    assert!(s.drain_events().is_empty());
}

#[test]
fn last_life_leads_to_game_over_then_title() {
    let mut s = new_session();
    s.step(&key_up(), 0);

    let center = s.world().player.center();
    {
        let w = s.world_mut();
        w.player.lives = 1;
        w.player.shield = 1;
        w.add_obstacle(ram(center, 25.0));
    }

    let mut now = 100;
    s.step(&idle(), now);
    assert_eq!(s.world().player.lives, 0);
    assert!(s.drain_events().contains(&GameEvent::PlayerDeath));
    // The death animation is still running
    assert_eq!(s.phase(), Phase::Playing);

    let mut frames = 0;
    while s.phase() == Phase::Playing && frames < 50 {
        now += 16;
        s.step(&idle(), now);
        frames += 1;
    }
    assert_eq!(s.phase(), Phase::GameOver);
    assert!(s.world().death_explosion_finished());
    // Five frames at >75 ms each take more than 375 ms
    assert!(now - 100 > 375);

    assert_eq!(s.step(&idle(), now + 16), Flow::Continue);
    assert_eq!(s.phase(), Phase::TitleScreen);
}

#[test]
fn restart_resets_score_and_lives() {
    let mut s = new_session();
    s.step(&key_up(), 0);
    {
        let w = s.world_mut();
        w.score = 1234;
        w.player.lives = 0;
    }
    // No death explosion pending, so the next tick ends the run
    s.step(&idle(), 16);
    assert_eq!(s.phase(), Phase::GameOver);
    s.step(&idle(), 32);
    assert_eq!(s.phase(), Phase::TitleScreen);

    s.step(&key_up(), 48);
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.world().score, 0);
    assert_eq!(s.world().player.lives, 3);
    assert_eq!(s.world().obstacles.len(), 8);
}

#[test]
fn music_starts_once() {
    let mut s = new_session();
    assert!(s.take_music_start());
    assert!(!s.take_music_start());
}
