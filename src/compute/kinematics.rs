//! Per-frame movement rules.
//!
//! Each function advances one entity by exactly one frame. Nothing here removes
//! entities; `EntityStore::purge_expired` does that afterwards using the
//! bounds tests below.

use rand::Rng;

use crate::config::{ArenaConfig, EnemyFireConfig, GameConfig};
use crate::entities::{Adversary, Owner, Particle, Player, PowerUp, Projectile, ProjectileBody};

use super::store::{new_bullet, EntityStore, IdAllocator};

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Strictly outside the arena rectangle (no margin).
pub fn is_off_arena(x: f32, y: f32, arena: &ArenaConfig) -> bool {
    x < 0.0 || x > arena.width || y < 0.0 || y > arena.height
}

/// Adversaries and power-ups enter from above and only ever leave downward.
pub fn has_fallen_out(y: f32, height: f32, arena: &ArenaConfig) -> bool {
    y > arena.height + height
}

// ── Player movement ───────────────────────────────────────────────────────────

/// Boolean movement intent sampled by the input collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Step the player along every held axis. A step is only taken while the
/// leading edge is still inside the arena.
pub fn move_player(player: &mut Player, intent: MoveIntent, arena: &ArenaConfig) {
    let half_w = player.width / 2.0;
    let half_h = player.height / 2.0;
    if intent.left && player.x - half_w > 0.0 {
        player.x -= player.speed;
    }
    if intent.right && player.x + half_w < arena.width {
        player.x += player.speed;
    }
    if intent.up && player.y - half_h > 0.0 {
        player.y -= player.speed;
    }
    if intent.down && player.y + half_h < arena.height {
        player.y += player.speed;
    }
}

// ── Entity steps ──────────────────────────────────────────────────────────────

/// Move a bullet along its velocity, remembering where it was.
/// Beams do not move; their ageing is `age_beam`.
pub fn step_projectile(projectile: &mut Projectile, trail_length: usize) {
    if let ProjectileBody::Bullet { vx, vy, trail, .. } = &mut projectile.body {
        trail.push_back((projectile.x, projectile.y));
        while trail.len() > trail_length {
            trail.pop_front();
        }
        projectile.x += *vx;
        projectile.y += *vy;
    }
}

/// Consume one active frame of a beam.
pub fn age_beam(projectile: &mut Projectile) {
    if let ProjectileBody::Beam { frames_left, .. } = &mut projectile.body {
        *frames_left = frames_left.saturating_sub(1);
    }
}

/// Descend, then maybe fire a shot straight down.
pub fn step_adversary(
    adversary: &mut Adversary,
    fire: &EnemyFireConfig,
    bullet_radius: f32,
    ids: &mut IdAllocator,
    rng: &mut impl Rng,
) {
    adversary.y += adversary.speed;

    adversary.shoot_timer += 1;
    if adversary.shoot_timer > fire.min_interval && rng.gen_bool(fire.chance) {
        adversary.shoot_timer = 0;
        adversary.projectiles.push(new_bullet(
            ids.next_id(),
            (adversary.x, adversary.y + adversary.height / 2.0),
            (0.0, fire.speed),
            bullet_radius,
            fire.damage,
            Owner::Adversary,
            fire.color,
        ));
    }
}

pub fn step_power_up(power_up: &mut PowerUp) {
    power_up.y += power_up.speed;
}

pub fn step_particle(particle: &mut Particle, shrink_per_frame: f32) {
    particle.x += particle.vx;
    particle.y += particle.vy;
    particle.life = particle.life.saturating_sub(1);
    particle.size = (particle.size - shrink_per_frame).max(0.0);
}

// ── Whole-store pass ──────────────────────────────────────────────────────────

/// Advance every non-player entity one frame, then purge whatever left the
/// arena or expired. RNG drives adversary fire only.
pub fn advance(store: &mut EntityStore, cfg: &GameConfig, rng: &mut impl Rng) {
    let trail_length = cfg.weapons.trail_length;

    for projectile in &mut store.projectiles {
        step_projectile(projectile, trail_length);
    }

    for adversary in &mut store.adversaries {
        step_adversary(adversary, &cfg.enemy_fire, cfg.weapons.bullet_radius, &mut store.ids, rng);
        for projectile in &mut adversary.projectiles {
            step_projectile(projectile, trail_length);
        }
    }

    for power_up in &mut store.power_ups {
        step_power_up(power_up);
    }

    for particle in &mut store.particles {
        step_particle(particle, cfg.effects.shrink_per_frame);
    }

    store.purge_expired(&cfg.arena);
}
