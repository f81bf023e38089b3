//! One play-through: owns every system and runs the frame sequence.
//!
//! Restarting is not an operation here; the front-end drops the session and
//! builds a new one.

use rand::Rng;
use serde::Serialize;

use crate::config::{ArenaConfig, GameConfig};
use crate::entities::{Adversary, EntityId, GameStatus, Particle, Player, PowerUp, Projectile};
use crate::error::ConfigError;

use super::collision::{CollisionOutcome, CollisionSystem};
use super::effects::EffectsSystem;
use super::kinematics::{self, MoveIntent};
use super::player::tick_timers;
use super::spawn::SpawnDirector;
use super::state_machine::{GameStateMachine, Verdict};
use super::store::{new_player, EntityStore};
use super::weapon::WeaponSystem;

/// Input for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub movement: MoveIntent,
    /// Fire went down this frame.
    pub fire_pressed: bool,
    /// Fire is being held.
    pub fire_held: bool,
}

/// Everything a frame produced besides the new state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub fired: bool,
    pub spawned: Option<EntityId>,
    pub collisions: CollisionOutcome,
    pub verdict: Verdict,
}

/// Read-only copy of the world for renderers.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub arena: ArenaConfig,
    pub status: GameStatus,
    pub score: u64,
    pub wave: u32,
    pub wave_kills: u32,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    /// Each adversary carries its own in-flight shots.
    pub adversaries: Vec<Adversary>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
}

pub struct Session {
    config: GameConfig,
    store: EntityStore,
    weapons: WeaponSystem,
    spawner: SpawnDirector,
    collisions: CollisionSystem,
    effects: EffectsSystem,
    machine: GameStateMachine,
    score: u64,
    frame: u64,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let player = new_player(&config.player, &config.arena);
        Ok(Self {
            store: EntityStore::new(player),
            weapons: WeaponSystem::new(&config),
            spawner: SpawnDirector::new(&config),
            collisions: CollisionSystem::new(&config),
            effects: EffectsSystem::new(&config),
            machine: GameStateMachine::new(config.waves.kills_per_wave),
            score: 0,
            frame: 0,
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.machine.status()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn wave(&self) -> u32 {
        self.machine.wave()
    }

    pub fn wave_kills(&self) -> u32 {
        self.machine.wave_kills()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Session clock used for weapon cooldowns.
    pub fn now_ms(&self) -> f64 {
        self.frame as f64 * self.config.arena.frame_ms()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Direct access for drivers that stage scenarios between frames.
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    /// Advance one frame. Does nothing once the game is over.
    pub fn update(&mut self, input: &TickInput, rng: &mut impl Rng) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.machine.is_running() {
            return report;
        }
        self.frame += 1;
        let now_ms = self.now_ms();
        let cfg = &self.config;
        let store = &mut self.store;

        kinematics::move_player(&mut store.player, input.movement, &cfg.arena);
        if input.fire_pressed || input.fire_held {
            report.fired = self
                .weapons
                .try_fire(&mut store.player, now_ms, &mut store.ids, &mut store.projectiles);
        }
        tick_timers(&mut store.player, cfg.player.default_weapon);

        kinematics::advance(store, cfg, rng);

        if let Some(request) = self.spawner.tick(self.machine.wave(), rng) {
            report.spawned = Some(store.spawn_adversary(request.kind, request.x, request.y, &cfg.adversaries));
        }

        let outcome = self.collisions.resolve(store, rng);
        self.score += u64::from(outcome.score_delta);
        self.machine.record_kills(outcome.kills);
        for drop in &outcome.power_up_drops {
            store.spawn_power_up(drop.kind, drop.x, drop.y, &cfg.power_ups);
        }
        self.effects.emit_all(&outcome.bursts, &mut store.particles, rng);

        report.verdict = self.machine.evaluate(store.player.health);

        for projectile in &mut store.projectiles {
            kinematics::age_beam(projectile);
        }
        store.purge_spent_beams();

        report.collisions = outcome;
        report
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            arena: self.config.arena.clone(),
            status: self.machine.status(),
            score: self.score,
            wave: self.machine.wave(),
            wave_kills: self.machine.wave_kills(),
            player: self.store.player.clone(),
            projectiles: self.store.projectiles.clone(),
            adversaries: self.store.adversaries.clone(),
            power_ups: self.store.power_ups.clone(),
            particles: self.store.particles.clone(),
        }
    }
}
