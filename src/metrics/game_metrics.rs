use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::game::{GameState, LossReason, Outcome};

/// Stats kept across the games of one terminal session
#[derive(Debug)]
pub struct GameMetrics {
    round_started: Instant,
    round_time: Duration,
    best_score: usize,
    best_length: usize,
    games_played: u32,
    wins: u32,
    losses: HashMap<LossReason, u32>,
    last_outcome: Option<Outcome>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_started: Instant::now(),
            round_time: Duration::ZERO,
            best_score: 0,
            best_length: 0,
            games_played: 0,
            wins: 0,
            losses: HashMap::new(),
            last_outcome: None,
        }
    }

    /// Advance the round clock while moves are being applied
    pub fn update(&mut self, running: bool) {
        if running {
            self.round_time = self.round_started.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.round_started = Instant::now();
        self.round_time = Duration::ZERO;
    }

    /// Fold a finished game into the session; unfinished games are ignored
    pub fn on_game_over(&mut self, state: &GameState) {
        let outcome = state.outcome();
        match outcome {
            Outcome::Continuing => return,
            Outcome::Won => self.wins += 1,
            Outcome::Lost(reason) => *self.losses.entry(reason).or_default() += 1,
        }

        self.games_played += 1;
        self.best_score = self.best_score.max(state.score());
        self.best_length = self.best_length.max(state.len());
        self.last_outcome = Some(outcome);
    }

    pub fn best_score(&self) -> usize {
        self.best_score
    }

    pub fn best_length(&self) -> usize {
        self.best_length
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self, reason: LossReason) -> u32 {
        self.losses.get(&reason).copied().unwrap_or(0)
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Round clock as `mm:ss`
    pub fn round_clock(&self) -> String {
        let secs = self.round_time.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, Position};
    use rand::{rngs::StdRng, SeedableRng};

    fn finished(body: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GameState {
        let body: Vec<Position> = body.iter().map(|&(r, c)| Position::new(r, c)).collect();
        let mut state = GameState::with_snake(
            GameConfig::default(),
            &body,
            direction,
            Position::new(food.0, food.1),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        while !state.is_finished() {
            state.apply_move(Direction::Left.into(), &mut rng);
        }
        state
    }

    #[test]
    fn test_session_tracks_bests_and_reasons() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.last_outcome(), None);

        // Three long, then straight into the left wall
        let long = finished(&[(4, 5), (4, 4), (4, 3)], Direction::Left, (7, 7));
        metrics.on_game_over(&long);
        // Eats next to the wall, then hits it
        let fed = finished(&[(2, 2)], Direction::Left, (2, 1));
        metrics.on_game_over(&fed);
        // Turning back onto the neck
        let bitten = finished(&[(5, 5), (5, 6)], Direction::Right, (2, 2));
        metrics.on_game_over(&bitten);

        assert_eq!(metrics.games_played(), 3);
        assert_eq!(metrics.best_length(), 3);
        assert_eq!(metrics.best_score(), 1);
        assert_eq!(metrics.losses(LossReason::Wall), 2);
        assert_eq!(metrics.losses(LossReason::SelfCollision), 1);
        assert_eq!(metrics.losses(LossReason::Starved), 0);
        assert_eq!(metrics.wins(), 0);
        assert_eq!(
            metrics.last_outcome(),
            Some(Outcome::Lost(LossReason::SelfCollision))
        );
    }

    #[test]
    fn test_running_game_is_not_counted() {
        let mut metrics = GameMetrics::new();
        let mut rng = StdRng::seed_from_u64(5);
        let state = GameState::new(GameConfig::default(), &mut rng).unwrap();

        metrics.on_game_over(&state);

        assert_eq!(metrics.games_played(), 0);
        assert_eq!(metrics.last_outcome(), None);
    }

    #[test]
    fn test_round_clock_freezes_between_rounds() {
        let mut metrics = GameMetrics::new();
        metrics.round_time = Duration::from_secs(61 * 60 + 1);
        assert_eq!(metrics.round_clock(), "61:01");

        metrics.update(false);
        assert_eq!(metrics.round_clock(), "61:01");

        metrics.on_game_start();
        metrics.update(true);
        assert_eq!(metrics.round_clock(), "00:00");
    }
}
