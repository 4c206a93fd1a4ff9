//! Move sources: anything that decides the next [`Action`] from a read-only
//! view of the game.

pub mod greedy;
pub mod keyboard;

pub use greedy::GreedyPlayer;
pub use keyboard::KeyboardPlayer;

use crate::game::{Action, Direction, GameState};

pub trait MoveSource {
    /// Short label shown by the renderer
    fn name(&self) -> &str;

    /// Decide the action for the coming tick
    fn next_action(&mut self, state: &GameState) -> Action;

    /// A direction key was pressed; sources that do not listen ignore it
    fn on_direction(&mut self, _direction: Direction) {}

    /// A new game has started
    fn reset(&mut self) {}
}
