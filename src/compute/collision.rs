//! Collision detection and resolution.
//!
//! All tests are axis-aligned: two shapes touch when the distance between their
//! centres is strictly less than the sum of their half-extents on both axes.
//!
//! Resolution marks what it consumes and destroys, and only filters the store
//! once every rule has run, so nothing is removed while it is being scanned and
//! an adversary that died earlier in the pass cannot be hit, scored or
//! collided with again.

use rand::Rng;

use crate::config::{EffectsConfig, GameConfig, PlayerConfig, PowerUpConfig};
use crate::entities::{Adversary, EntityId, Player, PowerUpKind, ProjectileBody, Rgb};

use super::player::{apply_power_up, take_damage};
use super::store::EntityStore;

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Request for a particle burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Burst {
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
    pub count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerUpDrop {
    pub kind: PowerUpKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageTarget {
    Player,
    Adversary(EntityId),
}

/// Damage that actually landed (blocked hits are not reported).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageEvent {
    pub target: DamageTarget,
    pub amount: i32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionOutcome {
    pub score_delta: u32,
    pub kills: u32,
    pub damage: Vec<DamageEvent>,
    pub destroyed_adversaries: Vec<EntityId>,
    /// Player and adversary projectiles used up by a hit.
    pub consumed_projectiles: Vec<EntityId>,
    pub collected_power_ups: Vec<EntityId>,
    pub power_up_drops: Vec<PowerUpDrop>,
    pub bursts: Vec<Burst>,
}

impl CollisionOutcome {
    fn is_destroyed(&self, id: EntityId) -> bool {
        self.destroyed_adversaries.contains(&id)
    }

    fn is_consumed(&self, id: EntityId) -> bool {
        self.consumed_projectiles.contains(&id)
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Centre-distance test against summed half-extents.
pub fn overlaps(a: (f32, f32), a_half: (f32, f32), b: (f32, f32), b_half: (f32, f32)) -> bool {
    (a.0 - b.0).abs() < a_half.0 + b_half.0 && (a.1 - b.1).abs() < a_half.1 + b_half.1
}

fn half(width: f32, height: f32) -> (f32, f32) {
    (width / 2.0, height / 2.0)
}

fn player_box(player: &Player) -> ((f32, f32), (f32, f32)) {
    ((player.x, player.y), half(player.width, player.height))
}

fn adversary_box(adversary: &Adversary) -> ((f32, f32), (f32, f32)) {
    ((adversary.x, adversary.y), half(adversary.width, adversary.height))
}

// ── System ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct CollisionSystem {
    player: PlayerConfig,
    power_ups: PowerUpConfig,
    effects: EffectsConfig,
}

impl CollisionSystem {
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            player: cfg.player.clone(),
            power_ups: cfg.power_ups.clone(),
            effects: cfg.effects.clone(),
        }
    }

    /// Run every collision rule once, in priority order, and apply the
    /// results to `store`. Score and kill totals are returned for the caller
    /// to bank; power-up drops and particle bursts are returned as requests.
    pub fn resolve(&self, store: &mut EntityStore, rng: &mut impl Rng) -> CollisionOutcome {
        let mut out = CollisionOutcome::default();

        self.player_shots_vs_adversaries(store, &mut out, rng);
        self.beams_vs_adversaries(store, &mut out, rng);
        self.adversary_shots_vs_player(store, &mut out);
        self.adversaries_vs_player(store, &mut out);
        self.power_ups_vs_player(store, &mut out);

        store
            .projectiles
            .retain(|p| !out.is_consumed(p.id));
        store
            .adversaries
            .retain(|a| !out.is_destroyed(a.id));
        for adversary in &mut store.adversaries {
            adversary
                .projectiles
                .retain(|p| !out.is_consumed(p.id));
        }
        store
            .power_ups
            .retain(|p| !out.collected_power_ups.contains(&p.id));

        out
    }

    /// Rule 1: each bullet hits the first live adversary it overlaps and is consumed.
    fn player_shots_vs_adversaries(&self, store: &mut EntityStore, out: &mut CollisionOutcome, rng: &mut impl Rng) {
        for projectile in &store.projectiles {
            let radius = match projectile.body {
                ProjectileBody::Bullet { radius, .. } => radius,
                ProjectileBody::Beam { .. } => continue,
            };
            for adversary in store.adversaries.iter_mut() {
                if out.is_destroyed(adversary.id) {
                    continue;
                }
                let (pos, extent) = adversary_box(adversary);
                if overlaps((projectile.x, projectile.y), (radius, radius), pos, extent) {
                    self.hit_adversary(adversary, projectile.damage, out, rng);
                    out.consumed_projectiles.push(projectile.id);
                    break;
                }
            }
        }
    }

    /// Rule 2: an active beam damages every live adversary in its column,
    /// below its origin, every frame. Beams are never consumed.
    fn beams_vs_adversaries(&self, store: &mut EntityStore, out: &mut CollisionOutcome, rng: &mut impl Rng) {
        for beam in &store.projectiles {
            let width = match beam.body {
                ProjectileBody::Beam { width, frames_left, .. } if frames_left > 0 => width,
                _ => continue,
            };
            for adversary in store.adversaries.iter_mut() {
                if out.is_destroyed(adversary.id) {
                    continue;
                }
                let in_column = (beam.x - adversary.x).abs() < width / 2.0 + adversary.width / 2.0;
                if in_column && adversary.y > beam.y {
                    self.hit_adversary(adversary, beam.damage, out, rng);
                }
            }
        }
    }

    /// Rule 3: adversary shots are consumed on contact even when invincibility
    /// blocks the damage.
    fn adversary_shots_vs_player(&self, store: &mut EntityStore, out: &mut CollisionOutcome) {
        let EntityStore { player, adversaries, .. } = store;
        for adversary in adversaries.iter() {
            if out.is_destroyed(adversary.id) {
                continue;
            }
            for projectile in &adversary.projectiles {
                let radius = match projectile.body {
                    ProjectileBody::Bullet { radius, .. } => radius,
                    ProjectileBody::Beam { .. } => continue,
                };
                let (pos, extent) = player_box(player);
                if !overlaps((projectile.x, projectile.y), (radius, radius), pos, extent) {
                    continue;
                }
                if take_damage(player, projectile.damage, self.player.invincibility_frames) {
                    out.damage.push(DamageEvent {
                        target: DamageTarget::Player,
                        amount: projectile.damage,
                    });
                    out.bursts.push(Burst {
                        x: player.x,
                        y: player.y,
                        color: Rgb::RED,
                        count: self.effects.projectile_hit_burst,
                    });
                }
                out.consumed_projectiles.push(projectile.id);
            }
        }
    }

    /// Rule 4: touching the player always destroys the adversary, with full
    /// credit, whether or not the contact damage landed.
    fn adversaries_vs_player(&self, store: &mut EntityStore, out: &mut CollisionOutcome) {
        let EntityStore { player, adversaries, .. } = store;
        for adversary in adversaries.iter() {
            if out.is_destroyed(adversary.id) {
                continue;
            }
            let (a_pos, a_half) = adversary_box(adversary);
            let (p_pos, p_half) = player_box(player);
            if !overlaps(a_pos, a_half, p_pos, p_half) {
                continue;
            }
            let damage = self.player.contact_damage;
            if take_damage(player, damage, self.player.invincibility_frames) {
                out.damage.push(DamageEvent {
                    target: DamageTarget::Player,
                    amount: damage,
                });
                out.bursts.push(Burst {
                    x: player.x,
                    y: player.y,
                    color: Rgb::RED,
                    count: self.effects.contact_hit_burst,
                });
            }
            self.destroy(adversary, out);
        }
    }

    /// Rule 5: power-ups apply on contact and are removed.
    fn power_ups_vs_player(&self, store: &mut EntityStore, out: &mut CollisionOutcome) {
        let EntityStore { player, power_ups, .. } = store;
        for power_up in power_ups.iter() {
            let (p_pos, p_half) = player_box(player);
            if !overlaps((power_up.x, power_up.y), half(power_up.width, power_up.height), p_pos, p_half) {
                continue;
            }
            apply_power_up(player, power_up.kind, &self.player);
            log::debug!("Collected {:?} power-up {}", power_up.kind, power_up.id);
            out.bursts.push(Burst {
                x: power_up.x,
                y: power_up.y,
                color: power_up.color,
                count: self.effects.collection_burst,
            });
            out.collected_power_ups.push(power_up.id);
        }
    }

    /// Damage from a player bullet or beam. A kill may drop a power-up.
    fn hit_adversary(&self, adversary: &mut Adversary, damage: i32, out: &mut CollisionOutcome, rng: &mut impl Rng) {
        adversary.health -= damage;
        out.damage.push(DamageEvent {
            target: DamageTarget::Adversary(adversary.id),
            amount: damage,
        });
        if adversary.health > 0 {
            return;
        }
        self.destroy(adversary, out);
        if rng.gen_bool(self.power_ups.drop_chance) {
            let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
            out.power_up_drops.push(PowerUpDrop {
                kind,
                x: adversary.x,
                y: adversary.y,
            });
        }
    }

    /// The single place score and kill credit are granted.
    fn destroy(&self, adversary: &Adversary, out: &mut CollisionOutcome) {
        debug_assert!(!out.is_destroyed(adversary.id));
        out.destroyed_adversaries.push(adversary.id);
        out.score_delta += adversary.score_value;
        out.kills += 1;
        out.bursts.push(Burst {
            x: adversary.x,
            y: adversary.y,
            color: adversary.color,
            count: self.effects.destruction_burst,
        });
        log::debug!("Destroyed {} adversary {}", adversary.kind.name(), adversary.id);
    }
}
