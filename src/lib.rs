//! Grid Snake - a turn-based snake game on a bordered grid
//!
//! This library provides:
//! - Core game logic (game module): board, snake, food, one-tick transitions
//! - Move sources (player module): keyboard and greedy autopilot
//! - TUI rendering (render module) and key mapping (input module)
//! - Drivers (modes module): interactive terminal play and headless runs

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod player;
pub mod render;
