use super::{
    action::Action,
    config::GameConfig,
    state::{GameState, LossReason, Outcome, Position},
};
use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

/// Pick a food cell uniformly from `candidates`; `None` when there is no room
pub(crate) fn pick_food<R: Rng>(candidates: &[Position], rng: &mut R) -> Option<Position> {
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.gen_range(0..candidates.len())])
}

impl GameState {
    /// Advance the game by exactly one tick.
    ///
    /// `Action::Continue` keeps the current heading. A reversal is not
    /// filtered out: turning back onto the neck is a self collision.
    ///
    /// The body check runs against the snake as it was before the move, so
    /// stepping onto the cell the tail is about to leave still counts as a
    /// collision. On a collision the body is left untouched.
    ///
    /// Once a terminal outcome has been returned the state is frozen and
    /// every further call returns that same outcome.
    pub fn apply_move<R: Rng>(&mut self, action: Action, rng: &mut R) -> Outcome {
        if self.outcome.is_terminal() {
            return self.outcome;
        }

        self.current_steps += 1;

        if let Action::Move(direction) = action {
            self.direction = direction;
        }

        let new_head = self.head().moved_in_direction(self.direction);

        if let Some(reason) = self.check_collision(new_head) {
            return self.finish(Outcome::Lost(reason));
        }

        if new_head == self.food {
            self.snake_max += 1;
            self.current_steps = 0;

            let free = self.free_cells(Some(new_head));
            match pick_food(&free, rng) {
                Some(food) => {
                    debug!(
                        head = ?new_head,
                        next_food = ?food,
                        score = self.score(),
                        "food eaten"
                    );
                    self.food = food;
                }
                None => {
                    self.push_head(new_head);
                    return self.finish(Outcome::Won);
                }
            }
        }

        self.push_head(new_head);

        if self.current_steps > self.max_steps_without_eating {
            return self.finish(Outcome::Lost(LossReason::Starved));
        }

        Outcome::Continuing
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<LossReason> {
        if self.is_border(pos) {
            return Some(LossReason::Wall);
        }

        if self.is_occupied_by_snake(pos) {
            return Some(LossReason::SelfCollision);
        }

        None
    }

    fn push_head(&mut self, head: Position) {
        self.snake.push_back(head);
        if self.snake.len() > self.snake_max {
            self.snake.pop_front();
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        info!(
            %outcome,
            score = self.score(),
            length = self.snake.len(),
            "game over"
        );
        self.outcome = outcome;
        outcome
    }
}

/// Owns the configuration and the random source food placement draws from
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from the operating system
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> Result<GameState> {
        GameState::new(self.config.clone(), &mut self.rng)
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> Outcome {
        state.apply_move(action, &mut self.rng)
    }
}
