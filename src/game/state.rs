use std::collections::{HashSet, VecDeque};
use std::fmt;

use anyhow::{bail, ensure, Result};
use rand::Rng;
use serde::Serialize;

use super::{action::Direction, config::GameConfig, engine::pick_food};

/// A cell on the board, addressed as (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }

    pub fn manhattan_distance(&self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Why a game was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LossReason {
    /// The head ran into the border ring
    Wall,
    /// The head ran into the snake's own body
    SelfCollision,
    /// Too many ticks went by without eating
    Starved,
}

impl fmt::Display for LossReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LossReason::Wall => "hit the wall",
            LossReason::SelfCollision => "bit itself",
            LossReason::Starved => "starved",
        };
        f.write_str(text)
    }
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Continuing,
    Lost(LossReason),
    /// The snake fills every interior cell, so no food can be placed
    Won,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Continuing)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Continuing => f.write_str("running"),
            Outcome::Lost(reason) => write!(f, "lost: {reason}"),
            Outcome::Won => f.write_str("won: board filled"),
        }
    }
}

/// Complete game state
///
/// The body is kept oldest-first: the tail sits at the front of the deque and
/// the head at the back. Fields are only mutated through
/// [`GameState::apply_move`], so move sources and renderers get a read-only
/// view through the accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) direction: Direction,
    pub(crate) snake: VecDeque<Position>,
    pub(crate) snake_max: usize,
    pub(crate) food: Position,
    pub(crate) current_steps: u64,
    pub(crate) max_steps_without_eating: u64,
    pub(crate) outcome: Outcome,
}

impl GameState {
    /// Create the opening position: a one-cell snake heading up from the
    /// second-to-last row, with the first food at (5, 5).
    ///
    /// Boards too small to hold (5, 5) in their interior get a random first
    /// food cell instead.
    pub fn new<R: Rng>(config: GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let start = config.start_position();
        let preferred_food = Position::new(5, 5);
        let max_steps_without_eating = config.max_steps_without_eating();

        let mut state = Self {
            config,
            direction: Direction::Up,
            snake: VecDeque::from([start]),
            snake_max: 1,
            food: preferred_food,
            current_steps: 0,
            max_steps_without_eating,
            outcome: Outcome::Continuing,
        };

        if state.config.is_border(preferred_food) || preferred_food == start {
            let free = state.free_cells(None);
            match pick_food(&free, rng) {
                Some(food) => state.food = food,
                None => bail!("no free cell for the first food"),
            }
        }

        Ok(state)
    }

    /// Build a state from an explicit body (tail first, head last).
    ///
    /// The target length starts at the body length. Every board invariant is
    /// checked: cells strictly inside the border, distinct, edge-adjacent, and
    /// food on a free interior cell.
    pub fn with_snake(
        config: GameConfig,
        body: &[Position],
        direction: Direction,
        food: Position,
    ) -> Result<Self> {
        config.validate()?;
        ensure!(!body.is_empty(), "snake must have at least one cell");

        let mut seen = HashSet::with_capacity(body.len());
        for (idx, &cell) in body.iter().enumerate() {
            ensure!(!config.is_border(cell), "snake cell {cell:?} is not inside the border");
            ensure!(seen.insert(cell), "snake cell {cell:?} appears twice");
            if idx > 0 {
                ensure!(
                    body[idx - 1].manhattan_distance(cell) == 1,
                    "snake cells {:?} and {cell:?} are not adjacent",
                    body[idx - 1]
                );
            }
        }
        ensure!(!config.is_border(food), "food {food:?} is not inside the border");
        ensure!(!seen.contains(&food), "food {food:?} is on the snake");

        let max_steps_without_eating = config.max_steps_without_eating();
        Ok(Self {
            config,
            direction,
            snake: body.iter().copied().collect(),
            snake_max: body.len(),
            food,
            current_steps: 0,
            max_steps_without_eating,
            outcome: Outcome::Continuing,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn dim_x(&self) -> usize {
        self.config.dim_x
    }

    pub fn dim_y(&self) -> usize {
        self.config.dim_y
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Body cells, tail first
    pub fn snake(&self) -> &VecDeque<Position> {
        &self.snake
    }

    pub fn head(&self) -> Position {
        // The body is never empty: construction requires a cell and a tick
        // pushes before it pops.
        self.snake[self.snake.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    /// Target length; grows by one per meal
    pub fn snake_max(&self) -> usize {
        self.snake_max
    }

    pub fn food(&self) -> Position {
        self.food
    }

    /// Ticks since the last meal
    pub fn current_steps(&self) -> u64 {
        self.current_steps
    }

    pub fn max_steps_without_eating(&self) -> u64 {
        self.max_steps_without_eating
    }

    /// Points scored so far: one per meal
    pub fn score(&self) -> usize {
        self.snake_max - 1
    }

    /// Outcome of the latest tick
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn is_border(&self, pos: Position) -> bool {
        self.config.is_border(pos)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }

    /// Interior cells not covered by the snake (nor by `extra`), row-major
    pub(crate) fn free_cells(&self, extra: Option<Position>) -> Vec<Position> {
        let occupied: HashSet<Position> = self.snake.iter().copied().chain(extra).collect();
        let max_row = self.config.dim_y as i32 - 1;
        let max_col = self.config.dim_x as i32 - 1;
        (1..max_row)
            .flat_map(|row| (1..max_col).map(move |col| Position::new(row, col)))
            .filter(|cell| !occupied.contains(cell))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Right), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(6, 5));
        assert_eq!(pos.manhattan_distance(Position::new(2, 7)), 5);
    }

    #[test]
    fn test_initial_state() {
        let mut rng = StdRng::seed_from_u64(0);
        let state = GameState::new(GameConfig::default(), &mut rng).unwrap();

        assert_eq!(state.snake().iter().copied().collect::<Vec<_>>(), vec![Position::new(8, 10)]);
        assert_eq!(state.direction(), Direction::Up);
        assert_eq!(state.food(), Position::new(5, 5));
        assert_eq!(state.snake_max(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.current_steps(), 0);
        assert_eq!(state.max_steps_without_eating(), 200);
        assert_eq!(state.outcome(), Outcome::Continuing);
    }

    #[test]
    fn test_small_board_gets_interior_food() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = GameState::new(GameConfig::small(), &mut rng).unwrap();

        assert_eq!(state.head(), Position::new(3, 2));
        assert!(!state.is_border(state.food()));
        assert!(!state.is_occupied_by_snake(state.food()));
    }

    #[test]
    fn test_new_rejects_tiny_board() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(GameState::new(GameConfig::new(3, 3), &mut rng).is_err());
    }

    #[test]
    fn test_with_snake_validation() {
        let config = GameConfig::default();
        let food = Position::new(5, 5);

        let ok = GameState::with_snake(
            config.clone(),
            &[Position::new(2, 2), Position::new(2, 3)],
            Direction::Right,
            food,
        )
        .unwrap();
        assert_eq!(ok.head(), Position::new(2, 3));
        assert_eq!(ok.snake_max(), 2);

        // empty
        assert!(GameState::with_snake(config.clone(), &[], Direction::Up, food).is_err());
        // on the border
        assert!(
            GameState::with_snake(config.clone(), &[Position::new(0, 3)], Direction::Up, food)
                .is_err()
        );
        // gap between cells
        assert!(GameState::with_snake(
            config.clone(),
            &[Position::new(2, 2), Position::new(2, 4)],
            Direction::Up,
            food
        )
        .is_err());
        // repeated cell
        assert!(GameState::with_snake(
            config.clone(),
            &[Position::new(2, 2), Position::new(2, 3), Position::new(2, 2)],
            Direction::Up,
            food
        )
        .is_err());
        // food under the snake
        assert!(
            GameState::with_snake(config, &[Position::new(5, 5)], Direction::Up, food).is_err()
        );
    }

    #[test]
    fn test_free_cells_excludes_snake_and_extra() {
        let state = GameState::with_snake(
            GameConfig::small(),
            &[Position::new(1, 1), Position::new(1, 2)],
            Direction::Right,
            Position::new(3, 3),
        )
        .unwrap();

        let free = state.free_cells(Some(Position::new(1, 3)));
        assert_eq!(free.len(), 9 - 3);
        assert_eq!(free[0], Position::new(2, 1));
        assert!(free.iter().all(|cell| !state.is_border(*cell)));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Lost(LossReason::Wall).to_string(), "lost: hit the wall");
        assert!(Outcome::Won.is_terminal());
        assert!(!Outcome::Continuing.is_terminal());
    }
}
