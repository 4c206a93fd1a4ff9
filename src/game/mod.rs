//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drivers own a [`GameState`] and advance it one tick at a time with
//! [`GameState::apply_move`] (or [`GameEngine::step`], which supplies the random source).

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::GameEngine;
pub use state::{GameState, LossReason, Outcome, Position};
