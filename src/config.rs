//! Tuning tables and arena geometry.
//!
//! Every number the simulation uses comes from here. Defaults reproduce the
//! classic 800×600 / 60 FPS balance; a JSON file may override any subset.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::{AdversaryKind, Rgb, WeaponKind};
use crate::error::ConfigError;

// ── Arena ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    /// Simulation frames per second; converts frames to milliseconds.
    pub fps: u32,
}

impl ArenaConfig {
    /// Length of one frame in milliseconds.
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.fps as f64
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            fps: 60,
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub max_health: i32,
    /// Distance of the spawn point above the arena floor.
    pub spawn_offset_y: f32,
    /// Shots leave this far above the ship's centre.
    pub muzzle_offset: f32,
    pub default_weapon: WeaponKind,
    pub invincibility_frames: u32,
    pub power_up_frames: u32,
    pub heal_amount: i32,
    /// Damage from touching an adversary.
    pub contact_damage: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
            speed: 5.0,
            max_health: 100,
            spawn_offset_y: 100.0,
            muzzle_offset: 20.0,
            default_weapon: WeaponKind::Pistol,
            invincibility_frames: 30,
            power_up_frames: 300,
            heal_amount: 30,
            contact_damage: 10,
        }
    }
}

// ── Weapons ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage: i32,
    /// Shots per second.
    pub fire_rate: f32,
    pub bullet_speed: f32,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTable {
    pub pistol: WeaponStats,
    pub shotgun: WeaponStats,
    pub laser: WeaponStats,
    pub bullet_radius: f32,
    /// Trail positions kept per bullet.
    pub trail_length: usize,
    /// Shotgun fan, degrees from vertical.
    pub spread_degrees: Vec<f32>,
    pub beam_width: f32,
    pub beam_frames: u32,
}

impl WeaponTable {
    pub fn get(&self, kind: WeaponKind) -> &WeaponStats {
        match kind {
            WeaponKind::Pistol => &self.pistol,
            WeaponKind::Shotgun => &self.shotgun,
            WeaponKind::Laser => &self.laser,
        }
    }
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            pistol: WeaponStats {
                damage: 10,
                fire_rate: 0.5,
                bullet_speed: 10.0,
                color: Rgb::WHITE,
            },
            shotgun: WeaponStats {
                damage: 5,
                fire_rate: 1.0,
                bullet_speed: 12.0,
                color: Rgb::YELLOW,
            },
            laser: WeaponStats {
                damage: 20,
                fire_rate: 0.2,
                bullet_speed: 15.0,
                color: Rgb::RED,
            },
            bullet_radius: 4.0,
            trail_length: 5,
            spread_degrees: vec![-10.0, 0.0, 10.0],
            beam_width: 6.0,
            beam_frames: 10,
        }
    }
}

// ── Adversaries ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdversaryStats {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: i32,
    pub score_value: u32,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdversaryTable {
    pub basic: AdversaryStats,
    pub fast: AdversaryStats,
    pub tank: AdversaryStats,
}

impl AdversaryTable {
    pub fn get(&self, kind: AdversaryKind) -> &AdversaryStats {
        match kind {
            AdversaryKind::Basic => &self.basic,
            AdversaryKind::Fast => &self.fast,
            AdversaryKind::Tank => &self.tank,
        }
    }
}

impl Default for AdversaryTable {
    fn default() -> Self {
        Self {
            basic: AdversaryStats {
                width: 30.0,
                height: 30.0,
                speed: 2.0,
                health: 20,
                score_value: 10,
                color: Rgb::RED,
            },
            fast: AdversaryStats {
                width: 20.0,
                height: 20.0,
                speed: 4.0,
                health: 10,
                score_value: 15,
                color: Rgb::ORANGE,
            },
            tank: AdversaryStats {
                width: 50.0,
                height: 50.0,
                speed: 1.0,
                health: 60,
                score_value: 30,
                color: Rgb::PURPLE,
            },
        }
    }
}

/// Adversary fire: once `shoot_timer` exceeds `min_interval`, each frame fires
/// with probability `chance`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyFireConfig {
    pub min_interval: u32,
    pub chance: f64,
    pub damage: i32,
    pub speed: f32,
    pub color: Rgb,
}

impl Default for EnemyFireConfig {
    fn default() -> Self {
        Self {
            min_interval: 60,
            chance: 0.02,
            damage: 5,
            speed: 5.0,
            color: Rgb::RED,
        }
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariantWeight {
    pub kind: AdversaryKind,
    pub weight: f64,
}

fn weights(entries: &[(AdversaryKind, f64)]) -> Vec<VariantWeight> {
    entries
        .iter()
        .map(|&(kind, weight)| VariantWeight { kind, weight })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Frames between spawns before any wave reduction.
    pub base_interval: u32,
    pub per_wave_decrement: u32,
    pub min_interval: u32,
    /// Spawn x stays this far from both side walls.
    pub edge_margin: f32,
    /// Spawn y, above the visible top edge.
    pub spawn_y: f32,
    /// Waves below this use `early_band`.
    pub first_cutoff: u32,
    /// Waves below this (and at least `first_cutoff`) use `middle_band`.
    pub second_cutoff: u32,
    pub early_band: Vec<VariantWeight>,
    pub middle_band: Vec<VariantWeight>,
    pub late_band: Vec<VariantWeight>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            base_interval: 60,
            per_wave_decrement: 5,
            min_interval: 20,
            edge_margin: 50.0,
            spawn_y: -50.0,
            first_cutoff: 3,
            second_cutoff: 5,
            early_band: weights(&[(AdversaryKind::Basic, 1.0)]),
            middle_band: weights(&[(AdversaryKind::Basic, 0.7), (AdversaryKind::Fast, 0.3)]),
            late_band: weights(&[
                (AdversaryKind::Basic, 0.5),
                (AdversaryKind::Fast, 0.3),
                (AdversaryKind::Tank, 0.2),
            ]),
        }
    }
}

// ── Power-ups, effects, waves ─────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    /// Chance that a shot-down adversary drops a power-up.
    pub drop_chance: f64,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            drop_chance: 0.2,
            width: 20.0,
            height: 20.0,
            speed: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub destruction_burst: usize,
    pub projectile_hit_burst: usize,
    pub contact_hit_burst: usize,
    pub collection_burst: usize,
    pub min_size: u32,
    pub max_size: u32,
    /// Per-axis velocity is drawn from `-max_speed..=max_speed`.
    pub max_speed: f32,
    pub min_life: u32,
    pub max_life: u32,
    pub shrink_per_frame: f32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            destruction_burst: 20,
            projectile_hit_burst: 10,
            contact_hit_burst: 15,
            collection_burst: 15,
            min_size: 2,
            max_size: 6,
            max_speed: 3.0,
            min_life: 20,
            max_life: 40,
            shrink_per_frame: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Wave `w` is left once the session's cumulative kills reach `w * kills_per_wave`.
    pub kills_per_wave: u32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self { kills_per_wave: 10 }
    }
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    pub player: PlayerConfig,
    pub weapons: WeaponTable,
    pub adversaries: AdversaryTable,
    pub enemy_fire: EnemyFireConfig,
    pub spawn: SpawnConfig,
    pub power_ups: PowerUpConfig,
    pub effects: EffectsConfig,
    pub waves: WaveConfig,
}

impl GameConfig {
    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// Reject tables the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;
        if self.arena.fps == 0 {
            return Err(ConfigError::invalid("arena.fps", "must be at least 1"));
        }

        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        positive("player.speed", self.player.speed)?;
        if self.player.max_health <= 0 {
            return Err(ConfigError::invalid("player.max_health", "must be positive"));
        }
        let max_health = self.player.max_health;
        for (field, value) in [
            ("player.heal_amount", self.player.heal_amount),
            ("player.contact_damage", self.player.contact_damage),
        ] {
            if !(0..=max_health).contains(&value) {
                return Err(ConfigError::invalid(field, format!("expected 0..={max_health}, got {value}")));
            }
        }
        if self.player.power_up_frames == 0 {
            return Err(ConfigError::invalid("player.power_up_frames", "must be at least 1"));
        }

        for kind in WeaponKind::ALL {
            let stats = self.weapons.get(kind);
            let field = format!("weapons.{}", kind.name().to_ascii_lowercase());
            positive(&format!("{field}.fire_rate"), stats.fire_rate)?;
            if stats.damage <= 0 {
                return Err(ConfigError::invalid(&format!("{field}.damage"), "must be positive"));
            }
        }
        positive("weapons.bullet_radius", self.weapons.bullet_radius)?;
        positive("weapons.beam_width", self.weapons.beam_width)?;
        if self.weapons.beam_frames == 0 {
            return Err(ConfigError::invalid("weapons.beam_frames", "must be at least 1"));
        }
        if self.weapons.spread_degrees.is_empty() {
            return Err(ConfigError::invalid("weapons.spread_degrees", "needs at least one angle"));
        }

        for kind in AdversaryKind::ALL {
            let stats = self.adversaries.get(kind);
            let field = format!("adversaries.{}", kind.name());
            positive(&format!("{field}.width"), stats.width)?;
            positive(&format!("{field}.height"), stats.height)?;
            positive(&format!("{field}.speed"), stats.speed)?;
            if stats.health <= 0 {
                return Err(ConfigError::invalid(&format!("{field}.health"), "must be positive"));
            }
        }

        probability("enemy_fire.chance", self.enemy_fire.chance)?;
        if self.enemy_fire.damage <= 0 {
            return Err(ConfigError::invalid("enemy_fire.damage", "must be positive"));
        }
        probability("power_ups.drop_chance", self.power_ups.drop_chance)?;
        positive("power_ups.width", self.power_ups.width)?;
        positive("power_ups.height", self.power_ups.height)?;
        positive("power_ups.speed", self.power_ups.speed)?;

        if self.arena.width <= 2.0 * self.spawn.edge_margin {
            return Err(ConfigError::invalid(
                "spawn.edge_margin",
                "leaves no room to spawn inside the arena",
            ));
        }
        if self.spawn.first_cutoff > self.spawn.second_cutoff {
            return Err(ConfigError::invalid("spawn.first_cutoff", "must not exceed second_cutoff"));
        }
        band("spawn.early_band", &self.spawn.early_band)?;
        band("spawn.middle_band", &self.spawn.middle_band)?;
        band("spawn.late_band", &self.spawn.late_band)?;

        let fx = &self.effects;
        if fx.min_size > fx.max_size || fx.min_life > fx.max_life {
            return Err(ConfigError::invalid("effects", "min must not exceed max"));
        }
        if !(fx.max_speed.is_finite() && fx.max_speed >= 0.0) {
            return Err(ConfigError::invalid("effects.max_speed", "must be finite and non-negative"));
        }
        if !(fx.shrink_per_frame.is_finite() && fx.shrink_per_frame >= 0.0) {
            return Err(ConfigError::invalid("effects.shrink_per_frame", "must be finite and non-negative"));
        }

        if self.waves.kills_per_wave == 0 {
            return Err(ConfigError::invalid("waves.kills_per_wave", "must be at least 1"));
        }
        Ok(())
    }
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("expected a positive number, got {value}")))
    }
}

fn probability(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("expected 0..=1, got {value}")))
    }
}

fn band(field: &str, entries: &[VariantWeight]) -> Result<(), ConfigError> {
    if entries.iter().any(|w| !(w.weight.is_finite() && w.weight >= 0.0)) {
        return Err(ConfigError::invalid(field, "weights must be finite and non-negative"));
    }
    if entries.iter().map(|w| w.weight).sum::<f64>() <= 0.0 {
        return Err(ConfigError::invalid(field, "needs at least one positive weight"));
    }
    Ok(())
}
