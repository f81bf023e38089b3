//! Cosmetic particle bursts.

use rand::Rng;

use crate::config::{EffectsConfig, GameConfig};
use crate::entities::Particle;

use super::collision::Burst;

#[derive(Clone, Debug)]
pub struct EffectsSystem {
    cfg: EffectsConfig,
}

impl EffectsSystem {
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            cfg: cfg.effects.clone(),
        }
    }

    /// Append `burst.count` particles at the burst position, each with its own
    /// random size, direction, speed and lifetime.
    pub fn emit(&self, burst: &Burst, out: &mut Vec<Particle>, rng: &mut impl Rng) {
        let speed = self.cfg.max_speed;
        out.reserve(burst.count);
        for _ in 0..burst.count {
            out.push(Particle {
                x: burst.x,
                y: burst.y,
                vx: rng.gen_range(-speed..=speed),
                vy: rng.gen_range(-speed..=speed),
                size: rng.gen_range(self.cfg.min_size..=self.cfg.max_size) as f32,
                life: rng.gen_range(self.cfg.min_life..=self.cfg.max_life),
                color: burst.color,
            });
        }
    }

    pub fn emit_all(&self, bursts: &[Burst], out: &mut Vec<Particle>, rng: &mut impl Rng) {
        for burst in bursts {
            self.emit(burst, out, rng);
        }
    }
}
