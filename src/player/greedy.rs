use super::MoveSource;
use crate::game::{Action, Direction, GameState};

/// Heads straight for the food while avoiding the border and its own body.
///
/// Only looks one cell ahead, so it happily walks into dead ends.
#[derive(Debug, Default)]
pub struct GreedyPlayer;

impl GreedyPlayer {
    pub fn new() -> Self {
        Self
    }

    /// Safe direction closest to the food; ties go to the earlier entry of
    /// [`Direction::ALL`]
    pub fn choose(state: &GameState) -> Option<Direction> {
        let head = state.head();
        let food = state.food();

        Direction::ALL
            .into_iter()
            .filter(|&direction| {
                let next = head.moved_in_direction(direction);
                !state.is_border(next) && !state.is_occupied_by_snake(next)
            })
            .min_by_key(|&direction| head.moved_in_direction(direction).manhattan_distance(food))
    }
}

impl MoveSource for GreedyPlayer {
    fn name(&self) -> &str {
        "greedy"
    }

    fn next_action(&mut self, state: &GameState) -> Action {
        Self::choose(state).into()
    }
}
