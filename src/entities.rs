//! All game entity types. Pure data, no gameplay rules.
//!
//! Behaviour lives in `compute`; this module only describes what a frame of the
//! simulation is made of.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ── Colours ───────────────────────────────────────────────────────────────────

/// An sRGB colour handed to the renderer untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 50, 50);
    pub const GREEN: Rgb = Rgb(50, 255, 50);
    pub const BLUE: Rgb = Rgb(50, 100, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 50);
    pub const PURPLE: Rgb = Rgb(180, 50, 230);
    pub const CYAN: Rgb = Rgb(0, 200, 200);
    pub const ORANGE: Rgb = Rgb(255, 150, 0);
}

// ── Identity ──────────────────────────────────────────────────────────────────

/// Session-unique handle for projectiles, adversaries and power-ups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ── Kinds ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    /// Single shot straight up.
    #[default]
    Pistol,
    /// Three-way fan.
    Shotgun,
    /// Short-lived beam down to the bottom edge of the arena.
    Laser,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Pistol, WeaponKind::Shotgun, WeaponKind::Laser];

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Pistol => "Pistol",
            WeaponKind::Shotgun => "Shotgun",
            WeaponKind::Laser => "Laser",
        }
    }

    fn slot(self) -> usize {
        match self {
            WeaponKind::Pistol => 0,
            WeaponKind::Shotgun => 1,
            WeaponKind::Laser => 2,
        }
    }
}

impl FromStr for WeaponKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pistol" => Ok(WeaponKind::Pistol),
            "shotgun" => Ok(WeaponKind::Shotgun),
            "laser" => Ok(WeaponKind::Laser),
            _ => Err(ConfigError::UnknownWeapon(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdversaryKind {
    Basic,
    Fast,
    Tank,
}

impl AdversaryKind {
    pub const ALL: [AdversaryKind; 3] = [AdversaryKind::Basic, AdversaryKind::Fast, AdversaryKind::Tank];

    pub fn name(self) -> &'static str {
        match self {
            AdversaryKind::Basic => "basic",
            AdversaryKind::Fast => "fast",
            AdversaryKind::Tank => "tank",
        }
    }
}

impl FromStr for AdversaryKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(AdversaryKind::Basic),
            "fast" => Ok(AdversaryKind::Fast),
            "tank" => Ok(AdversaryKind::Tank),
            _ => Err(ConfigError::UnknownAdversary(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    /// Instant heal, clamped to max health.
    Health,
    /// Temporary Shotgun.
    Shotgun,
    /// Temporary Laser.
    Laser,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Health, PowerUpKind::Shotgun, PowerUpKind::Laser];

    /// The weapon this pickup swaps in, if any.
    pub fn weapon(self) -> Option<WeaponKind> {
        match self {
            PowerUpKind::Health => None,
            PowerUpKind::Shotgun => Some(WeaponKind::Shotgun),
            PowerUpKind::Laser => Some(WeaponKind::Laser),
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            PowerUpKind::Health => Rgb::GREEN,
            PowerUpKind::Shotgun => Rgb::YELLOW,
            PowerUpKind::Laser => Rgb::RED,
        }
    }
}

impl FromStr for PowerUpKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "health" => Ok(PowerUpKind::Health),
            "shotgun" => Ok(PowerUpKind::Shotgun),
            "laser" => Ok(PowerUpKind::Laser),
            _ => Err(ConfigError::UnknownPowerUp(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Running,
    GameOver,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Last-fired timestamps (milliseconds of session time), one per weapon.
/// `None` means the weapon has not fired yet this session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponCooldowns {
    last_shot_ms: [Option<f64>; 3],
}

impl WeaponCooldowns {
    pub fn last_shot(&self, weapon: WeaponKind) -> Option<f64> {
        self.last_shot_ms[weapon.slot()]
    }

    pub fn record_shot(&mut self, weapon: WeaponKind, now_ms: f64) {
        self.last_shot_ms[weapon.slot()] = Some(now_ms);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per frame along each held axis.
    pub speed: f32,
    /// Always within `0..=max_health`.
    pub health: i32,
    pub max_health: i32,
    pub weapon: WeaponKind,
    pub cooldowns: WeaponCooldowns,
    /// Frames of damage immunity left.
    pub invincible: u32,
    /// Frames until `weapon` reverts to the default weapon.
    pub power_up_timer: u32,
    /// Most recent weapon power-up, kept for the HUD.
    pub power_up: Option<PowerUpKind>,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Adversary,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ProjectileBody {
    /// A moving round shot.
    Bullet {
        vx: f32,
        vy: f32,
        radius: f32,
        /// Recent positions, oldest first. Rendering only.
        trail: VecDeque<(f32, f32)>,
    },
    /// A stationary column from the origin down to the arena floor.
    Beam {
        width: f32,
        height: f32,
        /// Frames the beam still deals damage on, including the current one.
        frames_left: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub damage: i32,
    pub owner: Owner,
    pub color: Rgb,
    pub body: ProjectileBody,
}

impl Projectile {
    pub fn is_beam(&self) -> bool {
        matches!(self.body, ProjectileBody::Beam { .. })
    }
}

// ── Adversaries ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Adversary {
    pub id: EntityId,
    pub kind: AdversaryKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Downward pixels per frame.
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub color: Rgb,
    pub score_value: u32,
    /// Frames since this adversary last fired.
    pub shoot_timer: u32,
    /// Shots fired by this adversary that are still in flight.
    pub projectiles: Vec<Projectile>,
}

// ── Collectibles & cosmetics ─────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: EntityId,
    pub kind: PowerUpKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub color: Rgb,
}

/// Explosion debris. No collision, no gameplay effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    /// Remaining frames.
    pub life: u32,
    pub color: Rgb,
}
