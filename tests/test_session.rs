use pixel_shooter::compute::store::new_bullet;
use pixel_shooter::compute::{MoveIntent, Session, TickInput};
use pixel_shooter::config::GameConfig;
use pixel_shooter::entities::*;
use pixel_shooter::error::ConfigError;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// No spawns, no adversary fire, no drops: only what a test stages happens.
fn quiet_config() -> GameConfig {
    let mut cfg = GameConfig::default();
    cfg.spawn.base_interval = 1_000_000;
    cfg.spawn.min_interval = 1_000_000;
    cfg.enemy_fire.chance = 0.0;
    cfg.power_ups.drop_chance = 0.0;
    cfg
}

fn make_session() -> Session {
    Session::new(quiet_config()).expect("quiet config is valid")
}

fn idle() -> TickInput {
    TickInput::default()
}

fn hold_fire() -> TickInput {
    TickInput { fire_held: true, ..TickInput::default() }
}

/// One basic adversary at `(x, y)` with a bullet already on top of it.
fn stage_kill(session: &mut Session, x: f32, y: f32) {
    let cfg = session.config().clone();
    let store = session.store_mut();
    store.spawn_adversary(AdversaryKind::Basic, x, y, &cfg.adversaries);
    let id = store.ids.next_id();
    store
        .projectiles
        .push(new_bullet(id, (x, y), (0.0, 0.0), 4.0, 20, Owner::Player, Rgb::WHITE));
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn new_session_starts_running_on_wave_one() {
    let session = make_session();
    assert_eq!(session.status(), GameStatus::Running);
    assert_eq!(session.wave(), 1);
    assert_eq!(session.wave_kills(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.frame(), 0);
    assert_eq!(session.store().player.health, 100);
    assert!(session.store().adversaries.is_empty());
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = GameConfig::default();
    cfg.arena.fps = 0;
    match Session::new(cfg) {
        Err(ConfigError::InvalidParameter { field, .. }) => assert_eq!(field, "arena.fps"),
        other => panic!("expected InvalidParameter, got {:?}", other.map(|s| s.frame())),
    }
}

// ── Frame sequence ────────────────────────────────────────────────────────────

#[test]
fn movement_is_applied_each_frame() {
    let mut session = make_session();
    let input = TickInput {
        movement: MoveIntent { right: true, ..MoveIntent::default() },
        ..TickInput::default()
    };
    let mut rng = seeded_rng();
    session.update(&input, &mut rng);
    session.update(&input, &mut rng);
    assert_eq!(session.store().player.x, 410.0);
    assert_eq!(session.frame(), 2);
}

#[test]
fn holding_fire_respects_the_pistol_cooldown() {
    let mut session = make_session();
    let mut rng = seeded_rng();

    let fired: usize = (0..120).filter(|_| session.update(&hold_fire(), &mut rng).fired).count();
    assert_eq!(fired, 1);

    let fired_later: usize = (0..5).filter(|_| session.update(&hold_fire(), &mut rng).fired).count();
    assert_eq!(fired_later, 1);
}

#[test]
fn no_shot_without_fire_input() {
    let mut session = make_session();
    let report = session.update(&idle(), &mut seeded_rng());
    assert!(!report.fired);
    assert!(session.store().projectiles.is_empty());
}

#[test]
fn bullets_leave_through_the_top() {
    let mut session = make_session();
    let mut rng = seeded_rng();
    session.update(&hold_fire(), &mut rng);
    assert_eq!(session.store().projectiles.len(), 1);

    // Muzzle at y=480 and already moved once: y=470, then 10 px per frame
    for _ in 0..47 {
        session.update(&idle(), &mut rng);
    }
    assert_eq!(session.store().projectiles.len(), 1);
    session.update(&idle(), &mut rng);
    assert!(session.store().projectiles.is_empty());
}

#[test]
fn adversary_that_falls_past_the_floor_is_removed() {
    let mut session = make_session();
    let cfg = session.config().clone();
    session
        .store_mut()
        .spawn_adversary(AdversaryKind::Basic, 100.0, 627.0, &cfg.adversaries);
    let mut rng = seeded_rng();

    session.update(&idle(), &mut rng); // 629
    assert_eq!(session.store().adversaries.len(), 1);
    session.update(&idle(), &mut rng); // 631 > 600 + 30
    assert!(session.store().adversaries.is_empty());
    assert_eq!(session.score(), 0);
}

#[test]
fn spawns_follow_the_wave_one_interval() {
    let mut cfg = GameConfig::default();
    cfg.enemy_fire.chance = 0.0;
    let mut session = Session::new(cfg).expect("valid");
    let mut rng = seeded_rng();

    for _ in 0..55 {
        assert_eq!(session.update(&idle(), &mut rng).spawned, None);
    }
    let id = session.update(&idle(), &mut rng).spawned.expect("spawn on frame 56");
    let adversary = &session.store().adversaries[0];
    assert_eq!(adversary.id, id);
    assert_eq!(adversary.kind, AdversaryKind::Basic);
    assert_eq!(adversary.y, -50.0);
}

// ── Laser ─────────────────────────────────────────────────────────────────────

#[test]
fn laser_destroys_tank_in_three_frames() {
    let mut session = make_session();
    let cfg = session.config().clone();
    session.store_mut().player.weapon = WeaponKind::Laser;
    session
        .store_mut()
        .spawn_adversary(AdversaryKind::Tank, 400.0, 560.0, &cfg.adversaries);
    let mut rng = seeded_rng();

    assert!(session.update(&hold_fire(), &mut rng).fired);
    assert_eq!(session.store().adversaries[0].health, 40);

    session.update(&idle(), &mut rng);
    assert_eq!(session.store().adversaries[0].health, 20);

    let report = session.update(&idle(), &mut rng);
    assert_eq!(report.collisions.kills, 1);
    assert!(session.store().adversaries.is_empty());
    assert_eq!(session.score(), 30);
    assert_eq!(session.wave_kills(), 1);
}

#[test]
fn beam_lasts_ten_frames() {
    let mut session = make_session();
    session.store_mut().player.weapon = WeaponKind::Laser;
    let mut rng = seeded_rng();

    session.update(&hold_fire(), &mut rng);
    for _ in 0..8 {
        session.update(&idle(), &mut rng);
    }
    assert_eq!(session.store().projectiles.len(), 1);
    session.update(&idle(), &mut rng);
    assert!(session.store().projectiles.is_empty());
}

// ── Waves & score ─────────────────────────────────────────────────────────────

#[test]
fn ten_kills_in_one_frame_start_wave_two() {
    let mut session = make_session();
    for i in 0..10 {
        stage_kill(&mut session, 60.0 + i as f32 * 70.0, 200.0);
    }

    let report = session.update(&idle(), &mut seeded_rng());

    assert_eq!(report.collisions.kills, 10);
    assert_eq!(report.verdict.waves_advanced, 1);
    assert_eq!(session.score(), 100);
    assert_eq!(session.wave(), 2);
    assert_eq!(session.wave_kills(), 0);
}

#[test]
fn twenty_five_kills_reach_wave_three() {
    let mut session = make_session();
    let mut rng = seeded_rng();
    for i in 0..10 {
        stage_kill(&mut session, 60.0 + i as f32 * 70.0, 200.0);
    }
    session.update(&idle(), &mut rng);
    for i in 0..15 {
        stage_kill(&mut session, 30.0 + i as f32 * 50.0, 200.0);
    }
    session.update(&idle(), &mut rng);

    assert_eq!(session.wave(), 3);
    assert_eq!(session.wave_kills(), 5);
    assert_eq!(session.score(), 250);
}

// ── Power-up lifetime ─────────────────────────────────────────────────────────

#[test]
fn shotgun_pickup_reverts_to_pistol_after_300_frames() {
    let mut session = make_session();
    let cfg = session.config().clone();
    session
        .store_mut()
        .spawn_power_up(PowerUpKind::Shotgun, 400.0, 500.0, &cfg.power_ups);
    let mut rng = seeded_rng();

    // Picked up during frame 1, after that frame's timer tick
    session.update(&idle(), &mut rng);
    assert_eq!(session.store().player.weapon, WeaponKind::Shotgun);

    for _ in 0..299 {
        session.update(&idle(), &mut rng);
    }
    assert_eq!(session.store().player.weapon, WeaponKind::Shotgun);

    session.update(&idle(), &mut rng);
    assert_eq!(session.store().player.weapon, WeaponKind::Pistol);
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[test]
fn game_over_freezes_the_session() {
    let mut session = make_session();
    let cfg = session.config().clone();
    session.store_mut().player.health = 10;
    session
        .store_mut()
        .spawn_adversary(AdversaryKind::Basic, 400.0, 495.0, &cfg.adversaries);
    let mut rng = seeded_rng();

    let report = session.update(&idle(), &mut rng);
    assert!(report.verdict.game_over);
    assert_eq!(session.status(), GameStatus::GameOver);
    assert_eq!(session.store().player.health, 0);
    assert_eq!(session.score(), 10);

    let before = serde_json::to_string(&session.snapshot()).expect("serialize");
    let frozen = session.update(&hold_fire(), &mut rng);
    assert!(!frozen.fired);
    assert_eq!(session.frame(), 1);
    assert_eq!(serde_json::to_string(&session.snapshot()).expect("serialize"), before);
}

// ── Snapshot & determinism ────────────────────────────────────────────────────

#[test]
fn snapshot_serializes_to_json() {
    let session = make_session();
    let value = serde_json::to_value(session.snapshot()).expect("serialize");
    assert_eq!(value["wave"], 1);
    assert_eq!(value["score"], 0);
    assert_eq!(value["player"]["health"], 100);
    assert_eq!(value["player"]["weapon"], "pistol");
    assert_eq!(value["arena"]["width"], 800.0);
}

#[test]
fn same_seed_same_game() {
    let script = |frame: u64| TickInput {
        movement: MoveIntent {
            left: frame % 120 < 60,
            right: frame % 120 >= 60,
            ..MoveIntent::default()
        },
        fire_pressed: false,
        fire_held: true,
    };
    let run = || {
        let mut session = Session::new(GameConfig::default()).expect("valid");
        let mut rng = StdRng::seed_from_u64(7);
        for frame in 0..900 {
            session.update(&script(frame), &mut rng);
        }
        serde_json::to_string(&session.snapshot()).expect("serialize")
    };
    assert_eq!(run(), run());
}
