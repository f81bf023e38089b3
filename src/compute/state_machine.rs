//! RUNNING / GAME_OVER and wave progression.

use serde::{Deserialize, Serialize};

use crate::entities::GameStatus;

/// What changed during one evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Verdict {
    pub game_over: bool,
    pub waves_advanced: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameStateMachine {
    status: GameStatus,
    /// Starts at 1, never decreases.
    wave: u32,
    /// Kills over the whole session.
    total_kills: u32,
    kills_per_wave: u32,
}

impl GameStateMachine {
    pub fn new(kills_per_wave: u32) -> Self {
        Self {
            status: GameStatus::Running,
            wave: 1,
            total_kills: 0,
            kills_per_wave,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn total_kills(&self) -> u32 {
        self.total_kills
    }

    /// Kills counted toward the current wave's quota.
    pub fn wave_kills(&self) -> u32 {
        self.total_kills - (self.wave - 1) * self.kills_per_wave
    }

    pub fn record_kills(&mut self, kills: u32) {
        self.total_kills += kills;
    }

    /// Run once per frame after collisions. Health at or below zero ends the
    /// game for good; otherwise the wave advances for as long as cumulative
    /// kills reach `wave * kills_per_wave`.
    pub fn evaluate(&mut self, player_health: i32) -> Verdict {
        let mut verdict = Verdict::default();
        if !self.is_running() {
            return verdict;
        }

        if player_health <= 0 {
            self.status = GameStatus::GameOver;
            verdict.game_over = true;
            log::info!(
                "Game over on wave {} after {} kills",
                self.wave,
                self.total_kills
            );
            return verdict;
        }

        while self.total_kills >= self.wave * self.kills_per_wave {
            self.wave += 1;
            verdict.waves_advanced += 1;
            log::info!("Wave {} begins", self.wave);
        }
        verdict
    }
}
