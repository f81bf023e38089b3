use pixel_shooter::compute::store::{new_adversary, new_player, EntityStore};
use pixel_shooter::config::GameConfig;
use pixel_shooter::entities::*;
use pixel_shooter::error::ConfigError;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(AdversaryKind::Basic, AdversaryKind::Basic);
    assert_ne!(AdversaryKind::Basic, AdversaryKind::Tank);
    assert_eq!(GameStatus::Running, GameStatus::Running);
    assert_ne!(GameStatus::Running, GameStatus::GameOver);
    assert_eq!(Owner::Player, Owner::Player);
    assert_ne!(Owner::Player, Owner::Adversary);

    let kind = WeaponKind::Shotgun;
    assert_eq!(kind.clone(), WeaponKind::Shotgun);
}

#[test]
fn default_weapon_is_pistol() {
    assert_eq!(WeaponKind::default(), WeaponKind::Pistol);
}

// ── Identifier parsing ────────────────────────────────────────────────────────

#[test]
fn kinds_parse_case_insensitively() {
    assert_eq!("Laser".parse::<WeaponKind>(), Ok(WeaponKind::Laser));
    assert_eq!("TANK".parse::<AdversaryKind>(), Ok(AdversaryKind::Tank));
    assert_eq!("health".parse::<PowerUpKind>(), Ok(PowerUpKind::Health));
}

#[test]
fn unknown_identifiers_fail_fast() {
    assert_eq!(
        "railgun".parse::<WeaponKind>(),
        Err(ConfigError::UnknownWeapon("railgun".to_string()))
    );
    assert_eq!(
        "boss".parse::<AdversaryKind>(),
        Err(ConfigError::UnknownAdversary("boss".to_string()))
    );
    assert_eq!(
        "shield".parse::<PowerUpKind>(),
        Err(ConfigError::UnknownPowerUp("shield".to_string()))
    );
}

// ── Power-up kinds ────────────────────────────────────────────────────────────

#[test]
fn power_up_weapon_mapping() {
    assert_eq!(PowerUpKind::Health.weapon(), None);
    assert_eq!(PowerUpKind::Shotgun.weapon(), Some(WeaponKind::Shotgun));
    assert_eq!(PowerUpKind::Laser.weapon(), Some(WeaponKind::Laser));
}

#[test]
fn power_up_colours() {
    assert_eq!(PowerUpKind::Health.color(), Rgb::GREEN);
    assert_eq!(PowerUpKind::Shotgun.color(), Rgb::YELLOW);
    assert_eq!(PowerUpKind::Laser.color(), Rgb::RED);
}

// ── Weapon cooldowns ──────────────────────────────────────────────────────────

#[test]
fn cooldowns_are_tracked_per_weapon() {
    let mut cooldowns = WeaponCooldowns::default();
    assert_eq!(cooldowns.last_shot(WeaponKind::Pistol), None);

    cooldowns.record_shot(WeaponKind::Pistol, 1500.0);
    assert_eq!(cooldowns.last_shot(WeaponKind::Pistol), Some(1500.0));
    assert_eq!(cooldowns.last_shot(WeaponKind::Shotgun), None);
    assert_eq!(cooldowns.last_shot(WeaponKind::Laser), None);
}

// ── Store ─────────────────────────────────────────────────────────────────────

#[test]
fn adversary_attributes_come_from_the_variant_table() {
    let cfg = GameConfig::default();
    let tank = new_adversary(EntityId(7), AdversaryKind::Tank, 100.0, 50.0, &cfg.adversaries);
    assert_eq!(tank.id, EntityId(7));
    assert_eq!(tank.health, 60);
    assert_eq!(tank.max_health, 60);
    assert_eq!(tank.score_value, 30);
    assert_eq!(tank.width, 50.0);
    assert_eq!(tank.speed, 1.0);
    assert_eq!(tank.color, Rgb::PURPLE);
    assert!(tank.projectiles.is_empty());
}

#[test]
fn store_ids_are_unique_and_increasing() {
    let cfg = GameConfig::default();
    let mut store = EntityStore::new(new_player(&cfg.player, &cfg.arena));
    let a = store.spawn_adversary(AdversaryKind::Basic, 100.0, 10.0, &cfg.adversaries);
    let b = store.spawn_power_up(PowerUpKind::Health, 100.0, 10.0, &cfg.power_ups);
    let c = store.spawn_adversary(AdversaryKind::Fast, 200.0, 10.0, &cfg.adversaries);
    assert!(a < b && b < c);
    assert_eq!(store.adversaries.len(), 2);
    assert_eq!(store.power_ups.len(), 1);
}

#[test]
fn store_clone_is_independent() {
    let cfg = GameConfig::default();
    let original = EntityStore::new(new_player(&cfg.player, &cfg.arena));
    let mut cloned = original.clone();

    cloned.player.x = 99.0;
    cloned.player.health = 1;
    cloned.spawn_adversary(AdversaryKind::Basic, 5.0, 5.0, &cfg.adversaries);

    assert_eq!(original.player.x, 400.0);
    assert_eq!(original.player.health, 100);
    assert!(original.adversaries.is_empty());
}
