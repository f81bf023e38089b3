//! Ownership of every live entity in a session.
//!
//! Insertion goes through the constructors here so each entity gets a fresh
//! id and a complete attribute record from the tuning tables. Removal is always
//! a single `retain` pass per collection, never a delete during a scan.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::{AdversaryTable, ArenaConfig, PlayerConfig, PowerUpConfig};
use crate::entities::{
    Adversary, AdversaryKind, EntityId, Owner, Particle, Player, PowerUp, PowerUpKind, Projectile,
    ProjectileBody, Rgb, WeaponCooldowns,
};

use super::kinematics;

// ── Ids ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

// ── Constructors ──────────────────────────────────────────────────────────────

/// The player at the spawn point, full health, default weapon.
pub fn new_player(cfg: &PlayerConfig, arena: &ArenaConfig) -> Player {
    Player {
        x: arena.width / 2.0,
        y: arena.height - cfg.spawn_offset_y,
        width: cfg.width,
        height: cfg.height,
        speed: cfg.speed,
        health: cfg.max_health,
        max_health: cfg.max_health,
        weapon: cfg.default_weapon,
        cooldowns: WeaponCooldowns::default(),
        invincible: 0,
        power_up_timer: 0,
        power_up: None,
    }
}

pub fn new_adversary(id: EntityId, kind: AdversaryKind, x: f32, y: f32, table: &AdversaryTable) -> Adversary {
    let stats = table.get(kind);
    Adversary {
        id,
        kind,
        x,
        y,
        width: stats.width,
        height: stats.height,
        speed: stats.speed,
        health: stats.health,
        max_health: stats.health,
        color: stats.color,
        score_value: stats.score_value,
        shoot_timer: 0,
        projectiles: Vec::new(),
    }
}

pub fn new_power_up(id: EntityId, kind: PowerUpKind, x: f32, y: f32, cfg: &PowerUpConfig) -> PowerUp {
    PowerUp {
        id,
        kind,
        x,
        y,
        width: cfg.width,
        height: cfg.height,
        speed: cfg.speed,
        color: kind.color(),
    }
}

/// A round shot at `pos` travelling `vel` pixels per frame.
pub fn new_bullet(
    id: EntityId,
    pos: (f32, f32),
    vel: (f32, f32),
    radius: f32,
    damage: i32,
    owner: Owner,
    color: Rgb,
) -> Projectile {
    Projectile {
        id,
        x: pos.0,
        y: pos.1,
        damage,
        owner,
        color,
        body: ProjectileBody::Bullet {
            vx: vel.0,
            vy: vel.1,
            radius,
            trail: VecDeque::new(),
        },
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntityStore {
    pub player: Player,
    /// Player-fired bullets and beams, in firing order.
    pub projectiles: Vec<Projectile>,
    /// In spawn order. Each adversary owns its own fired projectiles.
    pub adversaries: Vec<Adversary>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub ids: IdAllocator,
}

impl EntityStore {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            projectiles: Vec::new(),
            adversaries: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            ids: IdAllocator::default(),
        }
    }

    pub fn spawn_adversary(&mut self, kind: AdversaryKind, x: f32, y: f32, table: &AdversaryTable) -> EntityId {
        let id = self.ids.next_id();
        self.adversaries.push(new_adversary(id, kind, x, y, table));
        id
    }

    pub fn spawn_power_up(&mut self, kind: PowerUpKind, x: f32, y: f32, cfg: &PowerUpConfig) -> EntityId {
        let id = self.ids.next_id();
        self.power_ups.push(new_power_up(id, kind, x, y, cfg));
        id
    }

    /// Drop everything that has left the arena or run out of life.
    /// Beams are not position-bound and are left alone.
    pub fn purge_expired(&mut self, arena: &ArenaConfig) {
        self.projectiles
            .retain(|p| p.is_beam() || !kinematics::is_off_arena(p.x, p.y, arena));
        for adversary in &mut self.adversaries {
            adversary
                .projectiles
                .retain(|p| !kinematics::is_off_arena(p.x, p.y, arena));
        }
        self.adversaries
            .retain(|a| !kinematics::has_fallen_out(a.y, a.height, arena));
        self.power_ups
            .retain(|p| !kinematics::has_fallen_out(p.y, p.height, arena));
        self.particles.retain(|p| p.life > 0);
    }

    /// Drop beams whose active frames are used up.
    pub fn purge_spent_beams(&mut self) {
        self.projectiles.retain(|p| match p.body {
            ProjectileBody::Beam { frames_left, .. } => frames_left > 0,
            ProjectileBody::Bullet { .. } => true,
        });
    }

    pub fn adversary_projectile_count(&self) -> usize {
        self.adversaries.iter().map(|a| a.projectiles.len()).sum()
    }
}
