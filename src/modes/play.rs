//! Interactive terminal driver.
//!
//! Owns the only [`GameState`], applies one move per tick, and redraws at a
//! fixed frame rate. The move source decides the direction; the keyboard is
//! still read for pause, restart and quit (and forwarded to the move source,
//! which a human player listens to).

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use crate::game::{GameEngine, GameState, Outcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::player::MoveSource;
use crate::render::{Renderer, ViewStatus};

/// Time shown on the countdown before the first move
const COUNTDOWN: Duration = Duration::from_millis(2500);
const COUNTDOWN_STEP: Duration = Duration::from_millis(500);

pub struct PlayMode<S: MoveSource> {
    engine: GameEngine,
    state: GameState,
    player: S,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
    countdown: Duration,
    paused: bool,
    should_quit: bool,
}

impl<S: MoveSource> PlayMode<S> {
    pub fn new(mut engine: GameEngine, player: S, tick_interval: Duration) -> Result<Self> {
        let state = engine.reset().context("Failed to set up the board")?;

        Ok(Self {
            engine,
            state,
            player,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
            countdown: COUNTDOWN,
            paused: false,
            should_quit: false,
        })
    }

    /// Current game, read-only
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run until the user quits; returns the score of the last game
    pub async fn run(&mut self) -> Result<usize> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result.map(|()| self.state.score())
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_interval);
        let mut countdown_timer = interval(COUNTDOWN_STEP);
        countdown_timer.reset();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        info!(player = self.player.name(), "game started");

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                _ = countdown_timer.tick(), if !self.countdown.is_zero() => {
                    self.countdown = self.countdown.saturating_sub(COUNTDOWN_STEP);
                    if self.countdown.is_zero() {
                        self.metrics.on_game_start();
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.accepts_moves() {
                        self.update_game();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    let running = self.accepts_moves();
                    self.metrics.update(running);
                    let status = self.view_status();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.state,
                            &self.metrics,
                            self.player.name(),
                            status,
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn accepts_moves(&self) -> bool {
        self.countdown.is_zero() && !self.paused && !self.state.is_finished()
    }

    fn view_status(&self) -> ViewStatus {
        match self.state.outcome() {
            outcome @ (Outcome::Lost(_) | Outcome::Won) => ViewStatus::Finished(outcome),
            Outcome::Continuing if !self.countdown.is_zero() => {
                ViewStatus::Countdown(self.countdown.as_secs_f32())
            }
            Outcome::Continuing if self.paused => ViewStatus::Paused,
            Outcome::Continuing => ViewStatus::Running,
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => self.player.on_direction(direction),
                KeyAction::Pause => {
                    if !self.state.is_finished() {
                        self.paused = !self.paused;
                    }
                }
                KeyAction::Restart => self.reset_game()?,
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self) {
        let action = self.player.next_action(&self.state);
        let outcome = self.engine.step(&mut self.state, action);

        if outcome.is_terminal() {
            self.metrics.on_game_over(&self.state);
            info!(
                %outcome,
                score = self.state.score(),
                best_score = self.metrics.best_score(),
                best_length = self.metrics.best_length(),
                "You got {} points!",
                self.state.score()
            );
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        self.state = self.engine.reset().context("Failed to set up the board")?;
        self.player.reset();
        self.metrics.on_game_start();
        self.countdown = COUNTDOWN;
        self.paused = false;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, Position};
    use crate::player::KeyboardPlayer;

    fn mode() -> PlayMode<KeyboardPlayer> {
        let engine = GameEngine::seeded(GameConfig::default(), 9);
        PlayMode::new(engine, KeyboardPlayer::new(), Duration::from_millis(125)).unwrap()
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(!mode.state().is_finished());
        assert_eq!(mode.state().score(), 0);
        assert!(matches!(mode.view_status(), ViewStatus::Countdown(_)));
        assert!(!mode.accepts_moves());
    }

    #[test]
    fn test_steering_goes_through_player() {
        let mut mode = mode();
        mode.countdown = Duration::ZERO;
        mode.player.on_direction(Direction::Left);

        mode.update_game();

        assert_eq!(mode.state().direction(), Direction::Left);
        assert_eq!(mode.state().head(), Position::new(8, 9));
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        mode.countdown = Duration::ZERO;
        while !mode.state().is_finished() {
            mode.update_game();
        }
        assert!(matches!(mode.view_status(), ViewStatus::Finished(_)));
        assert_eq!(mode.metrics.games_played(), 1);
        assert_eq!(mode.metrics.last_outcome(), Some(mode.state().outcome()));

        mode.reset_game().unwrap();
        assert!(!mode.state().is_finished());
        assert_eq!(mode.countdown, COUNTDOWN);
    }
}
