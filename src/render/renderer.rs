use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{GameState, LossReason, Outcome, Position};
use crate::metrics::GameMetrics;

/// What the driver is doing, as far as the screen is concerned
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewStatus {
    /// Seconds left before the first tick
    Countdown(f32),
    Running,
    Paused,
    Finished(Outcome),
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        player: &str,
        status: ViewStatus,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics, player), chunks[0]);

        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match status {
            ViewStatus::Finished(outcome) => {
                frame.render_widget(self.render_game_over(state, metrics, outcome), board_area);
            }
            _ => frame.render_widget(self.render_board(state, status), board_area),
        }

        frame.render_widget(self.render_controls(status), chunks[2]);
    }

    /// Board as plain text rows, border ring included
    pub fn board_lines(state: &GameState) -> Vec<String> {
        let dim_x = state.dim_x() as i32;
        let dim_y = state.dim_y() as i32;
        let head = state.head();

        (0..dim_y)
            .map(|row| {
                (0..dim_x)
                    .map(|col| {
                        let pos = Position::new(row, col);
                        if col == 0 || col == dim_x - 1 {
                            '|'
                        } else if row == 0 || row == dim_y - 1 {
                            '-'
                        } else if pos == head {
                            '@'
                        } else if state.is_occupied_by_snake(pos) {
                            'o'
                        } else if pos == state.food() {
                            '*'
                        } else {
                            ' '
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn render_board(&self, state: &GameState, status: ViewStatus) -> Paragraph<'_> {
        let mut lines: Vec<Line> = Self::board_lines(state)
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .chars()
                    .map(|cell| {
                        let style = match cell {
                            '@' => Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                            'o' => Style::default().fg(Color::Green),
                            '*' => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            '|' | '-' => Style::default().fg(Color::DarkGray),
                            _ => Style::default(),
                        };
                        Span::styled(cell.to_string(), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        match status {
            ViewStatus::Countdown(remaining) => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("Game starts in {remaining:.1}s!"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            ViewStatus::Paused => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "PAUSED",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            _ => {}
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        player: &str,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut text = vec![Line::from(vec![
            Span::styled("Player: ", label),
            Span::styled(player.to_string(), value),
            Span::raw("    "),
            Span::styled("Score: ", label),
            Span::styled(state.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Hunger: ", label),
            Span::styled(
                format!("{}/{}", state.current_steps(), state.max_steps_without_eating()),
                value,
            ),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(state.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(
                format!("{} pts / {} long", metrics.best_score(), metrics.best_length()),
                value,
            ),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.round_clock(), value),
        ])];

        if let Some(last) = metrics.last_outcome() {
            text.push(Line::from(vec![
                Span::styled("Last game: ", label),
                Span::styled(last.to_string(), value),
            ]));
        }

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        outcome: Outcome,
    ) -> Paragraph<'_> {
        let (title, color) = match outcome {
            Outcome::Won => ("YOU WIN", Color::Green),
            _ => ("GAME OVER", Color::Red),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(outcome.to_string(), Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("You got ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" points!", Style::default().fg(Color::Yellow)),
            ]),
            Line::from(format!(
                "Games: {}  won {}  wall {}  bitten {}  starved {}",
                metrics.games_played(),
                metrics.wins(),
                metrics.losses(LossReason::Wall),
                metrics.losses(LossReason::SelfCollision),
                metrics.losses(LossReason::Starved),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, status: ViewStatus) -> Paragraph<'_> {
        let pause = if status == ViewStatus::Paused { " to resume | " } else { " to pause | " };
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(pause),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
