use super::MoveSource;
use crate::game::{Action, Direction, GameState};

/// Plays whatever direction was pressed last since the previous tick
#[derive(Debug, Default)]
pub struct KeyboardPlayer {
    pending_direction: Option<Direction>,
}

impl KeyboardPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MoveSource for KeyboardPlayer {
    fn name(&self) -> &str {
        "human"
    }

    fn next_action(&mut self, _state: &GameState) -> Action {
        self.pending_direction.take().into()
    }

    fn on_direction(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    fn reset(&mut self) {
        self.pending_direction = None;
    }
}
