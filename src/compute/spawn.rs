//! Wave-paced adversary spawning.

use rand::Rng;

use crate::config::{GameConfig, SpawnConfig, VariantWeight};
use crate::entities::AdversaryKind;

/// Where and what to spawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRequest {
    pub kind: AdversaryKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug)]
pub struct SpawnDirector {
    cfg: SpawnConfig,
    arena_width: f32,
    /// Frames since the last spawn.
    counter: u32,
}

impl SpawnDirector {
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            cfg: cfg.spawn.clone(),
            arena_width: cfg.arena.width,
            counter: 0,
        }
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Frames that must pass before the next spawn:
    /// `max(min_interval, base_interval - wave * per_wave_decrement)`.
    pub fn threshold(&self, wave: u32) -> u32 {
        let reduction = wave.saturating_mul(self.cfg.per_wave_decrement);
        self.cfg
            .base_interval
            .saturating_sub(reduction)
            .max(self.cfg.min_interval)
    }

    /// Advance the spawn clock one frame.
    pub fn tick(&mut self, wave: u32, rng: &mut impl Rng) -> Option<SpawnRequest> {
        self.counter += 1;
        if self.counter <= self.threshold(wave) {
            return None;
        }
        self.counter = 0;

        let kind = self.choose_variant(wave, rng);
        let margin = self.cfg.edge_margin as i32;
        let x = rng.gen_range(margin..=(self.arena_width as i32 - margin)) as f32;
        log::debug!("Spawning {} adversary at x={x} (wave {wave})", kind.name());
        Some(SpawnRequest {
            kind,
            x,
            y: self.cfg.spawn_y,
        })
    }

    /// Weighted pick from the band the wave falls into.
    pub fn choose_variant(&self, wave: u32, rng: &mut impl Rng) -> AdversaryKind {
        let band = if wave < self.cfg.first_cutoff {
            &self.cfg.early_band
        } else if wave < self.cfg.second_cutoff {
            &self.cfg.middle_band
        } else {
            &self.cfg.late_band
        };
        pick_weighted(band, rng.gen::<f64>())
    }
}

/// `roll` is uniform in `[0, 1)`; bands are validated non-empty with a positive sum.
fn pick_weighted(band: &[VariantWeight], roll: f64) -> AdversaryKind {
    let total: f64 = band.iter().map(|w| w.weight).sum();
    let mut target = roll * total;
    for entry in band {
        if target < entry.weight {
            return entry.kind;
        }
        target -= entry.weight;
    }
    // Rounding can leave `target` just past the final cumulative weight.
    band[band.len() - 1].kind
}
