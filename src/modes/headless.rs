//! Runs a game to completion without touching the terminal.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::game::{GameConfig, GameEngine, GameState, Outcome};
use crate::player::MoveSource;

/// Summary of a finished (or cut short) game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameReport {
    pub board: GameConfig,
    pub outcome: Outcome,
    pub score: usize,
    pub ticks: u64,
    pub length: usize,
}

impl GameReport {
    fn from_state(state: &GameState, ticks: u64) -> Self {
        Self {
            board: state.config().clone(),
            outcome: state.outcome(),
            score: state.score(),
            ticks,
            length: state.len(),
        }
    }

    /// Pretty-printed JSON, for scripts driving the headless mode
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize game report")
    }
}

pub struct HeadlessMode<S: MoveSource> {
    engine: GameEngine,
    player: S,
    max_ticks: Option<u64>,
}

impl<S: MoveSource> HeadlessMode<S> {
    pub fn new(engine: GameEngine, player: S) -> Self {
        Self {
            engine,
            player,
            max_ticks: None,
        }
    }

    /// Stop after this many ticks even if the game is still running
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn run(&mut self) -> Result<GameReport> {
        let mut state = self.engine.reset()?;
        self.player.reset();
        let mut ticks = 0u64;

        info!(
            player = self.player.name(),
            dim_x = state.dim_x(),
            dim_y = state.dim_y(),
            "headless game started"
        );

        loop {
            if self.max_ticks.is_some_and(|limit| ticks >= limit) {
                debug!(ticks, "tick limit reached");
                break;
            }

            let action = self.player.next_action(&state);
            let outcome = self.engine.step(&mut state, action);
            ticks += 1;

            if outcome.is_terminal() {
                break;
            }
        }

        let report = GameReport::from_state(&state, ticks);
        info!(
            outcome = %report.outcome,
            score = report.score,
            ticks = report.ticks,
            "headless game finished"
        );
        Ok(report)
    }
}
