//! Turning a fire request into projectiles.

use crate::config::{GameConfig, WeaponTable};
use crate::entities::{Owner, Player, Projectile, ProjectileBody, WeaponKind};

use super::store::{new_bullet, IdAllocator};

#[derive(Clone, Debug)]
pub struct WeaponSystem {
    table: WeaponTable,
    muzzle_offset: f32,
    arena_height: f32,
}

impl WeaponSystem {
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            table: cfg.weapons.clone(),
            muzzle_offset: cfg.player.muzzle_offset,
            arena_height: cfg.arena.height,
        }
    }

    /// Minimum milliseconds between two shots of `weapon`.
    pub fn cooldown_ms(&self, weapon: WeaponKind) -> f64 {
        1000.0 / self.table.get(weapon).fire_rate as f64
    }

    /// Fire the player's current weapon if its cooldown has elapsed.
    ///
    /// A weapon that has never fired is always ready. On success the weapon's
    /// timestamp is set to `now_ms` and the new projectiles are appended to
    /// `out`; on failure nothing changes.
    pub fn try_fire(
        &self,
        player: &mut Player,
        now_ms: f64,
        ids: &mut IdAllocator,
        out: &mut Vec<Projectile>,
    ) -> bool {
        let weapon = player.weapon;
        if let Some(last) = player.cooldowns.last_shot(weapon) {
            if now_ms - last <= self.cooldown_ms(weapon) {
                return false;
            }
        }
        player.cooldowns.record_shot(weapon, now_ms);

        let stats = self.table.get(weapon);
        let origin = (player.x, player.y - self.muzzle_offset);
        match weapon {
            WeaponKind::Pistol => {
                out.push(new_bullet(
                    ids.next_id(),
                    origin,
                    (0.0, -stats.bullet_speed),
                    self.table.bullet_radius,
                    stats.damage,
                    Owner::Player,
                    stats.color,
                ));
            }
            WeaponKind::Shotgun => {
                for degrees in &self.table.spread_degrees {
                    let theta = degrees.to_radians();
                    out.push(new_bullet(
                        ids.next_id(),
                        origin,
                        (theta.sin() * stats.bullet_speed, -theta.cos() * stats.bullet_speed),
                        self.table.bullet_radius,
                        stats.damage,
                        Owner::Player,
                        stats.color,
                    ));
                }
            }
            WeaponKind::Laser => {
                out.push(Projectile {
                    id: ids.next_id(),
                    x: origin.0,
                    y: origin.1,
                    damage: stats.damage,
                    owner: Owner::Player,
                    color: stats.color,
                    body: ProjectileBody::Beam {
                        width: self.table.beam_width,
                        height: (self.arena_height - origin.1).max(0.0),
                        frames_left: self.table.beam_frames,
                    },
                });
            }
        }
        log::trace!("{} fired at {:.0} ms", weapon.name(), now_ms);
        true
    }
}
