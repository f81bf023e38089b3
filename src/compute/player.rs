//! Player-only rules: damage, timers, power-up effects.

use crate::config::PlayerConfig;
use crate::entities::{Player, PowerUpKind, WeaponKind};

/// Apply `amount` unless the player is invincible. Health is clamped to
/// `0..=max_health`; a successful hit starts a fresh invincibility window.
/// Returns whether the damage landed.
pub fn take_damage(player: &mut Player, amount: i32, invincibility_frames: u32) -> bool {
    if player.invincible > 0 {
        return false;
    }
    player.health = player.health.saturating_sub(amount).clamp(0, player.max_health);
    player.invincible = invincibility_frames;
    true
}

/// Count down invincibility and the power-up timer. When the timer reaches
/// zero the weapon reverts to `default_weapon`.
pub fn tick_timers(player: &mut Player, default_weapon: WeaponKind) {
    player.invincible = player.invincible.saturating_sub(1);

    if player.power_up_timer > 0 {
        player.power_up_timer -= 1;
        if player.power_up_timer == 0 {
            player.weapon = default_weapon;
            player.power_up = None;
        }
    }
}

pub fn apply_power_up(player: &mut Player, kind: PowerUpKind, cfg: &PlayerConfig) {
    match kind.weapon() {
        None => {
            player.health = player.health.saturating_add(cfg.heal_amount).min(player.max_health);
        }
        Some(weapon) => {
            player.weapon = weapon;
            player.power_up = Some(kind);
            player.power_up_timer = cfg.power_up_frames;
        }
    }
}
